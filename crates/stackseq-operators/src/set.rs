//! Insert-only hash set over pooled storage, used by the distinct stage.

use stackseq_core::comparer::{DefaultComparer, KeyComparer};
use stackseq_core::set::KeySet;
use stackseq_mem::{ArrayPool, PooledVec};

use crate::table::{self, INITIAL_CAPACITY};

struct Slot<K> {
    hash: u32,
    /// 1-based index of the next slot in the same bucket, 0 ends the chain.
    next: u32,
    key: K,
}

pub struct MinimalHashSet<K: Send + 'static, C = DefaultComparer> {
    comparer: C,
    buckets: PooledVec<u32>,
    slots: PooledVec<Slot<K>>,
    capacity: usize,
    threshold: usize,
    bucket_mask: u32,
}

impl<K: Send + 'static, C: KeyComparer<K>> MinimalHashSet<K, C> {
    pub fn new(comparer: C) -> Self {
        Self::with_pool(ArrayPool::shared(), comparer)
    }

    pub fn with_pool(pool: &'static ArrayPool, comparer: C) -> Self {
        Self {
            comparer,
            buckets: table::bucket_array(pool, INITIAL_CAPACITY),
            slots: PooledVec::rent(pool, INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            threshold: table::threshold(INITIAL_CAPACITY),
            bucket_mask: (INITIAL_CAPACITY - 1) as u32,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        let hash = table::mask_hash(self.comparer.hash(key));
        self.find(hash, key).is_some()
    }

    fn find(&self, hash: u32, key: &K) -> Option<usize> {
        let mut current = self.buckets[(hash & self.bucket_mask) as usize];
        while current != 0 {
            let idx = current as usize - 1;
            let slot = &self.slots[idx];
            if slot.hash == hash && self.comparer.equals(&slot.key, key) {
                return Some(idx);
            }
            current = slot.next;
        }
        None
    }

    fn resize(&mut self) {
        let capacity = table::grown_capacity(self.capacity);
        let pool = self.buckets.pool();
        self.buckets = table::bucket_array(pool, capacity);
        self.slots.grow(capacity);
        self.bucket_mask = (capacity - 1) as u32;

        let mask = self.bucket_mask;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let bucket = (slot.hash & mask) as usize;
            slot.next = self.buckets[bucket];
            self.buckets[bucket] = i as u32 + 1;
        }

        self.capacity = capacity;
        self.threshold = table::threshold(capacity);
    }
}

impl<K: Send + 'static, C: KeyComparer<K>> KeySet<K> for MinimalHashSet<K, C> {
    fn add(&mut self, key: K) -> bool {
        let hash = table::mask_hash(self.comparer.hash(&key));
        if self.find(hash, &key).is_some() {
            return false;
        }

        if self.slots.len() >= self.threshold {
            self.resize();
        }

        let bucket = (hash & self.bucket_mask) as usize;
        let index = self.slots.len() as u32 + 1;
        self.slots.push(Slot {
            hash,
            next: self.buckets[bucket],
            key,
        });
        self.buckets[bucket] = index;
        true
    }
}
