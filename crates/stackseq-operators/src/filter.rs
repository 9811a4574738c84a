//! Filter stage: keeps the upstream elements a predicate accepts.

use stackseq_core::cursor::SeqCursor;

use crate::fused::FilterMap;

pub struct Filter<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> Filter<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }

    /// `filter(p).map(f)` as a single stage: the predicate sees the source
    /// value and only accepted values are transformed.
    pub fn map<F, R>(self, transform: F) -> FilterMap<S, P, F>
    where
        S: SeqCursor,
        P: FnMut(&S::Item) -> bool,
        F: FnMut(S::Item) -> R,
    {
        FilterMap::new(self.source, self.predicate, transform)
    }
}

impl<S, P> SeqCursor for Filter<S, P>
where
    S: SeqCursor,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    #[inline]
    fn advance(&mut self) -> Option<S::Item> {
        while let Some(item) = self.source.advance() {
            if (self.predicate)(&item) {
                return Some(item);
            }
        }
        None
    }

    // Cardinality is data-dependent: no count, no view.
}
