//! ChainedHashMap: bucket array of chains over a shared entry arena.

use crate::chain::{Chain, Slots};
use crate::error::MapError;
use crate::hash_fn::{CodeSum, KeyHash};
use crate::numeric::NumericValue;
use core::cmp::Ordering;
use core::fmt;
use log::{debug, trace};
use slotmap::{DefaultKey, SecondaryMap, SlotMap};

/// Stable reference to one entry, resolved against the map that issued it.
///
/// Survives value updates and resizes. Stops resolving once the entry is
/// removed or the map is cleared. A handle carries no map identity: used
/// on a different map it returns an unrelated entry or `None`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub fn key<'a, V, H>(&self, map: &'a ChainedHashMap<V, H>) -> Option<&'a str> {
        map.slots.get(self.0).map(|e| e.key.as_str())
    }

    pub fn value<'a, V, H>(&self, map: &'a ChainedHashMap<V, H>) -> Option<&'a V> {
        map.slots.get(self.0).map(|e| &e.value)
    }

    pub fn value_mut<'a, V, H>(&self, map: &'a mut ChainedHashMap<V, H>) -> Option<&'a mut V> {
        map.slots.get_mut(self.0).map(|e| &mut e.value)
    }
}

/// Separate-chaining map from `String` keys to `V`.
///
/// Every operation computes `hash_fn(key) % capacity` and delegates to the
/// chain in that bucket. Capacity only changes through `resize_table`.
#[derive(Clone, Debug)]
pub struct ChainedHashMap<V, H = CodeSum> {
    hash_fn: H,
    pub(crate) buckets: Vec<Chain>,
    pub(crate) slots: Slots<V>, // every entry of every chain
    len: usize,
}

impl<V> ChainedHashMap<V> {
    /// Map with `capacity` buckets hashed by `CodeSum`.
    pub fn with_capacity(capacity: usize) -> Result<Self, MapError> {
        Self::with_hash_fn(capacity, CodeSum)
    }
}

impl<V, H> ChainedHashMap<V, H>
where
    H: KeyHash,
{
    pub fn with_hash_fn(capacity: usize, hash_fn: H) -> Result<Self, MapError> {
        check_capacity(capacity)?;
        Ok(Self {
            hash_fn,
            buckets: vec![Chain::new(); capacity],
            slots: SlotMap::with_key(),
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn hash_fn(&self) -> &H {
        &self.hash_fn
    }

    /// Bucket that `key` belongs to under the current capacity.
    pub fn bucket_index(&self, key: &str) -> usize {
        // capacity fits in usize, so the remainder does too
        (self.hash_fn.hash_key(key) % self.buckets.len() as u64) as usize
    }

    fn locate(&self, key: &str) -> Option<DefaultKey> {
        self.buckets[self.bucket_index(key)].find(&self.slots, key)
    }

    pub fn find(&self, key: &str) -> Option<Handle> {
        self.locate(key).map(Handle)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let k = self.locate(key)?;
        self.slots.get(k).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.locate(key)?;
        self.slots.get_mut(k).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Insert or overwrite. Returns the previous value when the key was present.
    ///
    /// An update keeps the entry's position in its chain; a new key goes to
    /// the front of its bucket's chain.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let idx = self.bucket_index(&key);
        let chain = &mut self.buckets[idx];
        if let Some(entry) = chain
            .find(&self.slots, &key)
            .and_then(|k| self.slots.get_mut(k))
        {
            return Some(core::mem::replace(&mut entry.value, value));
        }
        chain.add_front(&mut self.slots, key, value);
        self.len += 1;
        None
    }

    /// Remove `key`, returning its value. Absent keys leave the map untouched.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.bucket_index(key);
        let (_key, value) = self.buckets[idx].remove(&mut self.slots, key)?;
        self.len -= 1;
        Some(value)
    }

    /// Drop every entry and start over with `capacity` empty buckets.
    pub fn clear(&mut self) {
        let dropped = self.len;
        self.slots.clear();
        self.buckets = vec![Chain::new(); self.buckets.len()];
        self.len = 0;
        debug!(
            "cleared {} entries, capacity stays {}",
            dropped,
            self.buckets.len()
        );
    }

    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|c| c.is_empty()).count()
    }

    /// Entries per bucket, counted by walking every chain.
    pub fn table_load(&self) -> f64 {
        let total: usize = self
            .buckets
            .iter()
            .map(|c| c.iter(&self.slots).count())
            .sum();
        total as f64 / self.buckets.len() as f64
    }

    /// Reallocate to exactly `new_capacity` buckets and redistribute every entry.
    pub fn resize_table(&mut self, new_capacity: usize) -> Result<(), MapError> {
        check_capacity(new_capacity)?;
        let old_capacity = self.buckets.len();
        let nodes = self.detach_all();
        self.buckets = vec![Chain::new(); new_capacity];
        self.relink(nodes);
        debug_assert_eq!(self.buckets.iter().map(Chain::len).sum::<usize>(), self.len);
        debug!(
            "resized {} -> {} buckets holding {} entries",
            old_capacity, new_capacity, self.len
        );
        Ok(())
    }

    /// Move every entry into the bucket its key selects under the current capacity.
    pub fn rehash(&mut self) {
        let nodes = self.detach_all();
        self.relink(nodes);
    }

    /// Empty every chain and return their nodes, bucket by bucket, head to tail.
    fn detach_all(&mut self) -> Vec<DefaultKey> {
        let mut nodes = Vec::with_capacity(self.len);
        for chain in self.buckets.iter_mut() {
            nodes.extend(chain.take_nodes(&self.slots));
        }
        nodes
    }

    fn relink(&mut self, nodes: Vec<DefaultKey>) {
        let moved = nodes.len();
        for k in nodes {
            let Some(entry) = self.slots.get(k) else {
                debug_assert!(false, "detached node vanished from the arena");
                continue;
            };
            let idx = self.bucket_index(&entry.key);
            self.buckets[idx].link_front(&mut self.slots, k);
        }
        trace!(
            "rehashed {} entries into {} buckets",
            moved,
            self.buckets.len()
        );
    }

    /// All pairs ordered by numeric value, largest first.
    ///
    /// Fails on the first value without a numeric reading. NaN sorts last.
    pub fn sorted_pairs(&self) -> Result<Vec<(&str, &V)>, MapError>
    where
        V: NumericValue,
    {
        let mut keyed = Vec::with_capacity(self.len);
        for (k, v) in self.iter() {
            let n = v
                .as_f64()
                .ok_or_else(|| MapError::NonNumericValue { key: k.to_string() })?;
            keyed.push((n, k, v));
        }
        keyed.sort_unstable_by(|a, b| descending(a.0, b.0));
        Ok(keyed.into_iter().map(|(_, k, v)| (k, v)).collect())
    }

    /// Entries bucket by bucket, each chain head to tail.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(move |c| c.iter(&self.slots))
            .map(|(_, e)| (e.key.as_str(), &e.value))
    }

    /// Entries with mutable values, in the same order as `iter`.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        let mut rank: SecondaryMap<DefaultKey, usize> = SecondaryMap::with_capacity(self.len);
        for (i, (k, _)) in self
            .buckets
            .iter()
            .flat_map(|c| c.iter(&self.slots))
            .enumerate()
        {
            rank.insert(k, i);
        }
        let mut ordered: Vec<Option<(&str, &mut V)>> = Vec::new();
        ordered.resize_with(rank.len(), || None);
        for (k, e) in self.slots.iter_mut() {
            if let Some(slot) = rank.get(k).and_then(|&i| ordered.get_mut(i)) {
                *slot = Some((e.key.as_str(), &mut e.value));
            }
        }
        IterMut {
            it: ordered.into_iter().flatten(),
        }
    }
}

/// Iterator over mutable entries of `ChainedHashMap`, bucket by bucket.
pub struct IterMut<'a, V> {
    it: core::iter::Flatten<std::vec::IntoIter<Option<(&'a str, &'a mut V)>>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }
}

fn check_capacity(capacity: usize) -> Result<(), MapError> {
    if capacity == 0 {
        return Err(MapError::InvalidCapacity {
            requested: capacity,
        });
    }
    Ok(())
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.total_cmp(&a),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}

impl<K, V, H> Extend<(K, V)> for ChainedHashMap<V, H>
where
    K: Into<String>,
    H: KeyHash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

/// One line per bucket: `index: [(k, v) -> ...]`.
impl<V: fmt::Display, H> fmt::Display for ChainedHashMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{}: {}", i, chain.display(&self.slots))?;
        }
        Ok(())
    }
}
