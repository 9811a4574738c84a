//! Sizing rules shared by `MinimalHashSet` and `Lookup`.
//!
//! Both are open-chaining tables with a power-of-two bucket array of 1-based
//! entry indices (0 = empty) and a 0.75 load factor.

use stackseq_mem::{ArrayPool, PooledVec};

pub(crate) const INITIAL_CAPACITY: usize = 16;

/// Entries are addressed with `u32`; stay well inside that range.
pub(crate) const MAX_CAPACITY: usize = 1 << 30;

/// Clear the top bit so stored hashes stay non-negative.
#[inline]
pub(crate) fn mask_hash(hash: u32) -> u32 {
    hash & 0x7FFF_FFFF
}

#[inline]
pub(crate) fn threshold(capacity: usize) -> usize {
    capacity / 4 * 3
}

/// Next capacity after `capacity`. Exceeding `MAX_CAPACITY` is fatal.
pub(crate) fn grown_capacity(capacity: usize) -> usize {
    let next = capacity.saturating_mul(2).next_power_of_two();
    if next > MAX_CAPACITY {
        panic!("hash table capacity overflow: cannot grow past {MAX_CAPACITY} entries");
    }
    next
}

/// A zeroed bucket array of exactly `capacity` slots.
pub(crate) fn bucket_array(pool: &'static ArrayPool, capacity: usize) -> PooledVec<u32> {
    let mut buckets = PooledVec::rent(pool, capacity);
    buckets.resize(capacity, 0);
    buckets
}
