//! Chain: the singly linked collision list of one bucket.
//!
//! Nodes live in an arena (`Slots`) shared by every chain of a map and
//! are linked by arena keys instead of owning pointers. A chain only
//! records its head and length; every operation borrows the arena.
//!
//! Invariants
//! - `len` equals the number of nodes reachable from `head`.
//! - A node is reachable from at most one chain.
//! - Newest nodes sit nearest the head.

use core::fmt;
use slotmap::{DefaultKey, SlotMap};

#[derive(Clone, Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    next: Option<DefaultKey>,
}

pub(crate) type Slots<V> = SlotMap<DefaultKey, Entry<V>>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Chain {
    head: Option<DefaultKey>,
    len: usize,
}

impl Chain {
    pub(crate) const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Prepend a new node. Does not look for an existing node with the same key.
    pub(crate) fn add_front<V>(&mut self, slots: &mut Slots<V>, key: String, value: V) -> DefaultKey {
        let k = slots.insert(Entry {
            key,
            value,
            next: None,
        });
        self.link_front(slots, k);
        k
    }

    /// Prepend a node that already lives in the arena but in no chain.
    pub(crate) fn link_front<V>(&mut self, slots: &mut Slots<V>, k: DefaultKey) {
        debug_assert!(slots.contains_key(k), "linking a node that is not in the arena");
        if let Some(entry) = slots.get_mut(k) {
            entry.next = self.head;
            self.head = Some(k);
            self.len += 1;
        }
    }

    /// First node whose key matches, scanning from the head.
    pub(crate) fn find<V>(&self, slots: &Slots<V>, key: &str) -> Option<DefaultKey> {
        let mut cur = self.head;
        while let Some(k) = cur {
            let entry = slots.get(k)?;
            if entry.key == key {
                return Some(k);
            }
            cur = entry.next;
        }
        None
    }

    /// Unlink and free the first node whose key matches.
    ///
    /// `None` means nothing was removed; the chain is left untouched.
    pub(crate) fn remove<V>(&mut self, slots: &mut Slots<V>, key: &str) -> Option<(String, V)> {
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.head;
        while let Some(k) = cur {
            let entry = slots.get(k)?;
            if entry.key == key {
                let next = entry.next;
                match prev {
                    None => self.head = next,
                    Some(p) => slots.get_mut(p)?.next = next,
                }
                self.len -= 1;
                let entry = slots.remove(k)?;
                return Some((entry.key, entry.value));
            }
            prev = cur;
            cur = entry.next;
        }
        None
    }

    /// Detach every node, head to tail, leaving the chain empty.
    ///
    /// The nodes stay in the arena; the caller must relink or free them.
    pub(crate) fn take_nodes<V>(&mut self, slots: &Slots<V>) -> Vec<DefaultKey> {
        let mut out = Vec::with_capacity(self.len);
        let mut cur = self.head;
        while let Some(k) = cur {
            out.push(k);
            cur = slots.get(k).and_then(|e| e.next);
        }
        *self = Self::new();
        out
    }

    pub(crate) fn iter<'a, V>(&self, slots: &'a Slots<V>) -> Iter<'a, V> {
        Iter {
            slots,
            cur: self.head,
        }
    }

    /// Diagnostic rendering, `[(k1, v1) -> (k2, v2)]`.
    pub(crate) fn display<'a, V>(&self, slots: &'a Slots<V>) -> Display<'a, V> {
        Display {
            chain: *self,
            slots,
        }
    }
}

/// Head-to-tail iterator over the nodes of one chain.
pub(crate) struct Iter<'a, V> {
    slots: &'a Slots<V>,
    cur: Option<DefaultKey>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (DefaultKey, &'a Entry<V>);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        let entry = self.slots.get(k)?;
        self.cur = entry.next;
        Some((k, entry))
    }
}

pub(crate) struct Display<'a, V> {
    chain: Chain,
    slots: &'a Slots<V>,
}

impl<V: fmt::Display> fmt::Display for Display<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (_, e)) in self.chain.iter(self.slots).enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "({}, {})", e.key, e.value)?;
        }
        f.write_str("]")
    }
}
