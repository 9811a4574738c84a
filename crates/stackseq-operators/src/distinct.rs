//! Distinct stage: first occurrence of each key, in source order.

use stackseq_core::comparer::KeyComparer;
use stackseq_core::cursor::SeqCursor;
use stackseq_core::set::KeySet;
use stackseq_mem::ArrayPool;

use crate::set::MinimalHashSet;

pub struct DistinctBy<S, F, K, C>
where
    K: Send + 'static,
{
    source: S,
    key_selector: F,
    seen: MinimalHashSet<K, C>,
}

impl<S, F, K, C> DistinctBy<S, F, K, C>
where
    S: SeqCursor,
    F: FnMut(&S::Item) -> K,
    K: Send + 'static,
    C: KeyComparer<K>,
{
    pub fn new(source: S, key_selector: F, comparer: C) -> Self {
        Self::new_in(ArrayPool::shared(), source, key_selector, comparer)
    }

    pub fn new_in(pool: &'static ArrayPool, source: S, key_selector: F, comparer: C) -> Self {
        Self {
            source,
            key_selector,
            seen: MinimalHashSet::with_pool(pool, comparer),
        }
    }
}

impl<S, F, K, C> SeqCursor for DistinctBy<S, F, K, C>
where
    S: SeqCursor,
    F: FnMut(&S::Item) -> K,
    K: Send + 'static,
    C: KeyComparer<K>,
{
    type Item = S::Item;

    fn advance(&mut self) -> Option<S::Item> {
        while let Some(item) = self.source.advance() {
            if self.seen.add((self.key_selector)(&item)) {
                return Some(item);
            }
        }
        None
    }
}
