//! Group stage: buffers the whole upstream into a `Lookup` on first pull,
//! then yields one owned `Grouping` per key in first-seen order.

use stackseq_core::comparer::KeyComparer;
use stackseq_core::cursor::SeqCursor;
use stackseq_mem::ArrayPool;

use crate::lookup::{Grouping, IntoGroups, Lookup};

pub struct GroupBy<S, F, K, C>
where
    S: SeqCursor,
    S::Item: Send + 'static,
    K: Send + 'static,
{
    pool: &'static ArrayPool,
    /// Upstream state until the first pull builds the lookup.
    pending: Option<(S, F, C)>,
    groups: Option<IntoGroups<K, S::Item, C>>,
}

impl<S, F, K, C> GroupBy<S, F, K, C>
where
    S: SeqCursor,
    S::Item: Send + 'static,
    F: FnMut(&S::Item) -> K,
    K: Send + 'static,
    C: KeyComparer<K>,
{
    pub fn new(source: S, key_selector: F, comparer: C) -> Self {
        Self::new_in(ArrayPool::shared(), source, key_selector, comparer)
    }

    pub fn new_in(pool: &'static ArrayPool, source: S, key_selector: F, comparer: C) -> Self {
        Self {
            pool,
            pending: Some((source, key_selector, comparer)),
            groups: None,
        }
    }

    fn is_initialized(&self) -> bool {
        self.pending.is_none()
    }
}

impl<S, F, K, C> SeqCursor for GroupBy<S, F, K, C>
where
    S: SeqCursor,
    S::Item: Send + 'static,
    F: FnMut(&S::Item) -> K,
    K: Send + 'static,
    C: KeyComparer<K>,
{
    type Item = Grouping<K, S::Item>;

    fn advance(&mut self) -> Option<Self::Item> {
        if let Some((source, key_selector, comparer)) = self.pending.take() {
            let lookup = Lookup::create_in(self.pool, source, key_selector, comparer);
            self.groups = Some(lookup.into_groups());
        }
        self.groups.as_mut()?.next()
    }

    fn known_remaining(&self) -> Option<usize> {
        if !self.is_initialized() {
            return None;
        }
        Some(self.groups.as_ref().map_or(0, ExactSizeIterator::len))
    }
}
