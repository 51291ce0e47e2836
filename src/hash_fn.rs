//! Hash strategies: pure functions from a key to a non-negative integer.
//!
//! A strategy never sees the bucket count; the map applies the modulo
//! itself. Sums use wrapping arithmetic so arbitrarily long keys never
//! overflow.

use core::hash::BuildHasher;

/// Strategy used by `ChainedHashMap` to turn a key into a raw hash.
pub trait KeyHash {
    fn hash_key(&self, key: &str) -> u64;
}

/// Sum of the Unicode scalar values of the key.
///
/// Order-insensitive: `"ab"` and `"ba"` collide.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeSum;

impl KeyHash for CodeSum {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        key.chars()
            .fold(0u64, |acc, c| acc.wrapping_add(u64::from(c)))
    }
}

/// Sum of each scalar value weighted by its 1-based position in the key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionWeighted;

impl KeyHash for PositionWeighted {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        key.chars().zip(1u64..).fold(0u64, |acc, (c, pos)| {
            acc.wrapping_add(pos.wrapping_mul(u64::from(c)))
        })
    }
}

/// Adapter running any `BuildHasher` (e.g. `RandomState`) as a strategy.
#[derive(Clone, Debug, Default)]
pub struct StdHash<S>(pub S);

impl<S: BuildHasher> KeyHash for StdHash<S> {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        self.0.hash_one(key)
    }
}

impl<F> KeyHash for F
where
    F: Fn(&str) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        self(key)
    }
}
