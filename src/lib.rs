//! chained-hashmap: a single-threaded separate-chaining map from `String`
//! keys to arbitrary values, with pluggable hash strategies and explicit,
//! caller-driven resizing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: expose the mechanics of hash-based storage (bucket indexing,
//!   chain traversal, resizing, load accounting) without leaning on a
//!   library map type.
//! - Layers:
//!   - Chain: head + length of one bucket's singly linked list. Nodes are
//!     stored in an arena and linked by arena keys, so front insertion,
//!     lookup and predecessor unlinking behave exactly like a pointer list.
//!   - ChainedHashMap<V, H>: owns the bucket array, the shared arena and
//!     the hash strategy `H`; every operation computes
//!     `hash(key) % capacity` and delegates to one chain.
//!
//! Constraints
//! - Single-threaded; wrap the whole map in a lock if it must be shared.
//! - Capacity is always at least 1 and only changes via `resize_table`.
//! - Keys are unique across the map; `put` on an existing key overwrites
//!   the value in place and leaves `len` unchanged.
//! - `len` always equals the sum of chain lengths: `remove` of an absent
//!   key is a no-op.
//!
//! Hash strategies
//! - `KeyHash` is a pure, capacity-independent function from key to `u64`.
//!   `CodeSum` and `PositionWeighted` are the two reference strategies;
//!   `StdHash` adapts any `BuildHasher`; closures work directly.
//!
//! Resizing
//! - `resize_table(n)` detaches every node, reallocates exactly `n`
//!   buckets and relinks each node into its new home bucket. Entries are
//!   never copied, so `Handle`s stay valid across resizes.
//!
//! Notes and non-goals
//! - No automatic growth: load is reported by `table_load`, and the
//!   caller decides when to resize.
//! - Keys are immutable once inserted.

mod chain;
pub mod chained_hash_map;
mod chained_hash_map_proptest;
mod error;
pub mod hash_fn;
mod numeric;

// Public surface
pub use chained_hash_map::{ChainedHashMap, Handle, IterMut};
pub use error::MapError;
pub use hash_fn::{CodeSum, KeyHash, PositionWeighted, StdHash};
pub use numeric::NumericValue;
