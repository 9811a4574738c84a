//! Hash multi-map from key to an ordered group of elements.
//!
//! Groups are stored by value in one pooled arena and addressed by 1-based
//! `u32` index everywhere (0 = none), so buckets, hash chains and the
//! insertion chain never hold pointers. Two orderings thread through the
//! arena:
//! - `hash_next`: per-bucket chain, newest group first;
//! - `next`: one circular list in first-seen order; `last` is the newest
//!   group and `groups[last].next` is the oldest.
//!
//! A lookup is built in one pass and never shrinks. Iteration follows the
//! insertion chain and lends out groups in place; `into_groups` moves them out
//! instead, one at a time, without copying element storage.

mod grouping;

pub use grouping::Grouping;

use stackseq_core::comparer::{DefaultComparer, KeyComparer};
use stackseq_core::cursor::SeqCursor;
use stackseq_mem::{ArrayPool, PooledVec};

use crate::table::{self, INITIAL_CAPACITY};

/// Element slots rented for a brand-new group.
const INITIAL_ELEMENT_CAPACITY: usize = 4;

struct GroupSlot<K, T: Send + 'static> {
    hash: u32,
    hash_next: u32,
    next: u32,
    /// `None` once moved out by `IntoGroups`.
    group: Option<Grouping<K, T>>,
}

pub struct Lookup<K, T, C = DefaultComparer>
where
    K: Send + 'static,
    T: Send + 'static,
{
    comparer: C,
    buckets: PooledVec<u32>,
    groups: PooledVec<GroupSlot<K, T>>,
    capacity: usize,
    threshold: usize,
    bucket_mask: u32,
    last: u32,
}

impl<K, T, C> Lookup<K, T, C>
where
    K: Send + 'static,
    T: Send + 'static,
    C: KeyComparer<K>,
{
    pub fn new(comparer: C) -> Self {
        Self::with_pool(ArrayPool::shared(), comparer)
    }

    pub fn with_pool(pool: &'static ArrayPool, comparer: C) -> Self {
        Self {
            comparer,
            buckets: table::bucket_array(pool, INITIAL_CAPACITY),
            groups: PooledVec::rent(pool, INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            threshold: table::threshold(INITIAL_CAPACITY),
            bucket_mask: (INITIAL_CAPACITY - 1) as u32,
            last: 0,
        }
    }

    /// Drain `source` into a new lookup on the shared pool.
    pub fn create<S, F>(source: S, key_selector: F, comparer: C) -> Self
    where
        S: SeqCursor<Item = T>,
        F: FnMut(&T) -> K,
    {
        Self::create_in(ArrayPool::shared(), source, key_selector, comparer)
    }

    /// Drain `source` into a new lookup renting from `pool`.
    pub fn create_in<S, F>(
        pool: &'static ArrayPool,
        mut source: S,
        mut key_selector: F,
        comparer: C,
    ) -> Self
    where
        S: SeqCursor<Item = T>,
        F: FnMut(&T) -> K,
    {
        let mut lookup = Self::with_pool(pool, comparer);
        while let Some(element) = source.advance() {
            let key = key_selector(&element);
            lookup.add(key, element);
        }
        lookup
    }

    /// Number of groups.
    pub fn count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group by 1-based index (creation order). `None` when out of range or
    /// already moved out.
    pub fn group(&self, index: usize) -> Option<&Grouping<K, T>> {
        let slot = self.groups.get(index.checked_sub(1)?)?;
        slot.group.as_ref()
    }

    /// Group for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&Grouping<K, T>> {
        let hash = table::mask_hash(self.comparer.hash(key));
        let index = self.find(hash, key)?;
        self.groups[index].group.as_ref()
    }

    pub fn add(&mut self, key: K, element: T) {
        let hash = table::mask_hash(self.comparer.hash(&key));
        if let Some(index) = self.find(hash, &key) {
            if let Some(group) = self.groups[index].group.as_mut() {
                group.elements.push(element);
            }
            return;
        }

        if self.groups.len() >= self.threshold {
            self.resize();
        }
        self.create_group(key, hash, element);
    }

    pub fn iter(&self) -> LookupIter<'_, K, T> {
        LookupIter {
            groups: &self.groups,
            cursor: self.head(),
            remaining: self.groups.len(),
        }
    }

    /// Move the groups out in first-seen order.
    pub fn into_groups(self) -> IntoGroups<K, T, C> {
        let cursor = self.head();
        let remaining = self.groups.len();
        IntoGroups {
            lookup: self,
            cursor,
            remaining,
        }
    }

    /// 0-based arena index of the group holding `key`.
    fn find(&self, hash: u32, key: &K) -> Option<usize> {
        let mut current = self.buckets[(hash & self.bucket_mask) as usize];
        while current != 0 {
            let idx = current as usize - 1;
            let slot = &self.groups[idx];
            if slot.hash == hash {
                if let Some(group) = &slot.group {
                    if self.comparer.equals(&group.key, key) {
                        return Some(idx);
                    }
                }
            }
            current = slot.hash_next;
        }
        None
    }

    /// 1-based index of the oldest group, 0 when empty.
    fn head(&self) -> u32 {
        if self.last == 0 {
            0
        } else {
            self.groups[self.last as usize - 1].next
        }
    }

    fn create_group(&mut self, key: K, hash: u32, element: T) {
        let index = self.groups.len() as u32 + 1;
        let bucket = (hash & self.bucket_mask) as usize;

        let mut elements = PooledVec::rent(self.groups.pool(), INITIAL_ELEMENT_CAPACITY);
        elements.push(element);

        // Link after the current tail; the newest group points back at the head.
        let next = if self.last == 0 {
            index
        } else {
            let tail = &mut self.groups[self.last as usize - 1];
            std::mem::replace(&mut tail.next, index)
        };

        self.groups.push(GroupSlot {
            hash,
            hash_next: self.buckets[bucket],
            next,
            group: Some(Grouping { key, elements }),
        });
        self.buckets[bucket] = index;
        self.last = index;
    }

    /// Double the table and rehash every group. Group indices (and therefore
    /// the insertion chain) are unchanged.
    fn resize(&mut self) {
        let capacity = table::grown_capacity(self.capacity);
        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.capacity, to = capacity, groups = self.groups.len(), "lookup resize");

        let pool = self.buckets.pool();
        self.buckets = table::bucket_array(pool, capacity);
        self.groups.grow(capacity);
        self.bucket_mask = (capacity - 1) as u32;

        let mask = self.bucket_mask;
        for (i, slot) in self.groups.iter_mut().enumerate() {
            let bucket = (slot.hash & mask) as usize;
            slot.hash_next = self.buckets[bucket];
            self.buckets[bucket] = i as u32 + 1;
        }

        self.capacity = capacity;
        self.threshold = table::threshold(capacity);
    }
}

impl<'a, K, T, C> IntoIterator for &'a Lookup<K, T, C>
where
    K: Send + 'static,
    T: Send + 'static,
    C: KeyComparer<K>,
{
    type Item = &'a Grouping<K, T>;
    type IntoIter = LookupIter<'a, K, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing walk over the insertion chain, skipping empty groups.
pub struct LookupIter<'a, K, T: Send + 'static> {
    groups: &'a [GroupSlot<K, T>],
    cursor: u32,
    remaining: usize,
}

impl<'a, K, T: Send + 'static> LookupIter<'a, K, T> {
    /// Slots not yet visited.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<'a, K, T: Send + 'static> Iterator for LookupIter<'a, K, T> {
    type Item = &'a Grouping<K, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let slot = &self.groups[self.cursor as usize - 1];
            self.cursor = slot.next;
            self.remaining -= 1;
            if let Some(group) = &slot.group {
                if !group.is_empty() {
                    return Some(group);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// Owning walk over the insertion chain. Groups not yet yielded are returned
/// to the pool when this is dropped.
pub struct IntoGroups<K, T, C = DefaultComparer>
where
    K: Send + 'static,
    T: Send + 'static,
{
    lookup: Lookup<K, T, C>,
    cursor: u32,
    remaining: usize,
}

impl<K, T, C> Iterator for IntoGroups<K, T, C>
where
    K: Send + 'static,
    T: Send + 'static,
{
    type Item = Grouping<K, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let slot = &mut self.lookup.groups[self.cursor as usize - 1];
            self.cursor = slot.next;
            self.remaining -= 1;
            if let Some(group) = slot.group.take() {
                if !group.is_empty() {
                    return Some(group);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, T, C> ExactSizeIterator for IntoGroups<K, T, C>
where
    K: Send + 'static,
    T: Send + 'static,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::from_array;
    use stackseq_core::comparer::FnComparer;

    fn leaked_pool() -> &'static ArrayPool {
        Box::leak(Box::new(ArrayPool::default()))
    }

    fn keys<K: Clone + Send + 'static, T: Send + 'static, C: KeyComparer<K>>(
        lookup: &Lookup<K, T, C>,
    ) -> Vec<K> {
        lookup.iter().map(|g| g.key().clone()).collect()
    }

    #[test]
    fn groups_in_first_seen_order() {
        let data = [3, 1, 3, 2, 1, 3];
        let lookup = Lookup::create(from_array(&data), |x: &i32| *x, DefaultComparer::new());
        assert_eq!(lookup.count(), 3);
        assert_eq!(keys(&lookup), vec![3, 1, 2]);
        assert_eq!(lookup.get(&3).map(|g| g.len()), Some(3));
        assert_eq!(lookup.get(&1).map(|g| g.as_slice()), Some(&[1, 1][..]));
        assert!(lookup.get(&9).is_none());
    }

    #[test]
    fn one_based_indexing() {
        let data = ["b", "a", "b"];
        let lookup = Lookup::create(from_array(&data), |s: &&str| s.to_string(), DefaultComparer::new());
        assert!(lookup.group(0).is_none());
        assert_eq!(lookup.group(1).map(|g| g.key().as_str()), Some("b"));
        assert_eq!(lookup.group(2).map(|g| g.key().as_str()), Some("a"));
        assert!(lookup.group(3).is_none());
    }

    #[test]
    fn insertion_chain_survives_resizes() {
        let pool = leaked_pool();
        let data: Vec<u32> = (0..5_000).rev().collect();
        let lookup = Lookup::create_in(pool, from_array(&data), |x: &u32| x % 1_000, DefaultComparer::new());
        assert_eq!(lookup.count(), 1_000);
        // First-seen order follows the reversed input: 999, 998, ..., 0.
        assert!(keys(&lookup).into_iter().eq((0..1_000).rev()));
        for group in &lookup {
            assert_eq!(group.len(), 5);
            // Arrival order within a group is preserved.
            assert!(group.as_slice().windows(2).all(|w| w[0] > w[1]));
        }
        drop(lookup);
        assert_eq!(pool.stats().outstanding(), 0);
    }

    #[test]
    fn chains_with_constant_hash() {
        let constant = FnComparer::new(|a: &i32, b: &i32| a == b, |_: &i32| 0);
        let data: Vec<i32> = (0..40).map(|i| i % 20).collect();
        let lookup = Lookup::create(from_array(&data), |x: &i32| *x, constant);
        assert_eq!(lookup.count(), 20);
        assert!(keys(&lookup).into_iter().eq(0..20));
        assert!(lookup.iter().all(|g| g.len() == 2));
    }

    #[test]
    fn into_groups_moves_storage_out() {
        let pool = leaked_pool();
        let data = ["x1", "y1", "x2", "z1", "y2"];
        let lookup = Lookup::create_in(pool, from_array(&data), |s: &&str| s.as_bytes()[0], DefaultComparer::new());
        let mut groups = lookup.into_groups();
        assert_eq!(groups.len(), 3);

        let first = groups.next().unwrap();
        assert_eq!(*first.key(), b'x');
        assert_eq!(first.as_slice(), &["x1", "x2"]);
        assert_eq!(groups.len(), 2);

        // Remaining groups go back to the pool with the iterator.
        drop(groups);
        assert_eq!(pool.stats().outstanding(), 1);
        drop(first);
        assert_eq!(pool.stats().outstanding(), 0);
    }

    #[test]
    fn empty_lookup() {
        let data: [i32; 0] = [];
        let lookup = Lookup::create(from_array(&data), |x: &i32| *x, DefaultComparer::new());
        assert!(lookup.is_empty());
        assert_eq!(lookup.iter().count(), 0);
        assert_eq!(lookup.into_groups().count(), 0);
    }
}
