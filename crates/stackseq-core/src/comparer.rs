//! Key equality + hashing used by the hash tables behind distinct and group-by.

use std::hash::Hash;

// Fixed seeds keep bucket layout (and therefore resize behavior) reproducible
// from run to run.
const SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Equality/hash capability for keys.
///
/// `equals(a, b)` must imply `hash(a) == hash(b)`.
pub trait KeyComparer<K: ?Sized> {
    fn equals(&self, a: &K, b: &K) -> bool;
    fn hash(&self, key: &K) -> u32;
}

impl<K: ?Sized, C: KeyComparer<K> + ?Sized> KeyComparer<K> for &C {
    fn equals(&self, a: &K, b: &K) -> bool {
        (**self).equals(a, b)
    }

    fn hash(&self, key: &K) -> u32 {
        (**self).hash(key)
    }
}

/// Natural `Eq` + `Hash` of the key type, hashed with ahash.
#[derive(Clone)]
pub struct DefaultComparer {
    state: ahash::RandomState,
}

impl DefaultComparer {
    pub fn new() -> Self {
        Self {
            state: ahash::RandomState::with_seeds(SEEDS[0], SEEDS[1], SEEDS[2], SEEDS[3]),
        }
    }
}

impl Default for DefaultComparer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DefaultComparer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DefaultComparer")
    }
}

impl<K: Hash + Eq + ?Sized> KeyComparer<K> for DefaultComparer {
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }

    #[inline]
    fn hash(&self, key: &K) -> u32 {
        let h = self.state.hash_one(key);
        (h ^ (h >> 32)) as u32
    }
}

/// Comparer assembled from two closures.
///
/// ```
/// use stackseq_core::{FnComparer, KeyComparer};
///
/// let ci = FnComparer::new(
///     |a: &String, b: &String| a.eq_ignore_ascii_case(b),
///     |k: &String| k.len() as u32,
/// );
/// assert!(ci.equals(&"Apple".to_string(), &"APPLE".to_string()));
/// ```
#[derive(Clone, Copy)]
pub struct FnComparer<E, H> {
    equals: E,
    hash: H,
}

impl<E, H> FnComparer<E, H> {
    pub fn new(equals: E, hash: H) -> Self {
        Self { equals, hash }
    }
}

impl<K, E, H> KeyComparer<K> for FnComparer<E, H>
where
    K: ?Sized,
    E: Fn(&K, &K) -> bool,
    H: Fn(&K) -> u32,
{
    fn equals(&self, a: &K, b: &K) -> bool {
        (self.equals)(a, b)
    }

    fn hash(&self, key: &K) -> u32 {
        (self.hash)(key)
    }
}
