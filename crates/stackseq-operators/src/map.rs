//! Map stage: one output per upstream element.

use stackseq_core::cursor::SeqCursor;

use crate::fused::MapFilter;

pub struct Map<S, F> {
    source: S,
    transform: F,
}

impl<S, F> Map<S, F> {
    pub fn new(source: S, transform: F) -> Self {
        Self { source, transform }
    }

    /// `map(f).filter(p)` as a single stage: the predicate sees the
    /// transformed value.
    pub fn filter<P, R>(self, predicate: P) -> MapFilter<S, F, P>
    where
        S: SeqCursor,
        F: FnMut(S::Item) -> R,
        P: FnMut(&R) -> bool,
    {
        MapFilter::new(self.source, self.transform, predicate)
    }
}

impl<S, F, R> SeqCursor for Map<S, F>
where
    S: SeqCursor,
    F: FnMut(S::Item) -> R,
{
    type Item = R;

    #[inline]
    fn advance(&mut self) -> Option<R> {
        self.source.advance().map(&mut self.transform)
    }

    /// Cardinality-preserving, so upstream's count carries over. There is no
    /// view: the transformed buffer never exists.
    fn known_remaining(&self) -> Option<usize> {
        self.source.known_remaining()
    }
}
