//! Fused filter/map stages.
//!
//! Both avoid an intermediate stage boundary, but they are not
//! interchangeable: each keeps the evaluation order of the chain it replaces.
//! `Filter::map` produces a `FilterMap`, `Map::filter` produces a `MapFilter`.

use stackseq_core::cursor::SeqCursor;

/// `filter(p).map(f)`: test the source value, transform accepted ones.
pub struct FilterMap<S, P, F> {
    source: S,
    predicate: P,
    transform: F,
}

impl<S, P, F> FilterMap<S, P, F> {
    pub fn new(source: S, predicate: P, transform: F) -> Self {
        Self {
            source,
            predicate,
            transform,
        }
    }
}

impl<S, P, F, R> SeqCursor for FilterMap<S, P, F>
where
    S: SeqCursor,
    P: FnMut(&S::Item) -> bool,
    F: FnMut(S::Item) -> R,
{
    type Item = R;

    #[inline]
    fn advance(&mut self) -> Option<R> {
        while let Some(item) = self.source.advance() {
            if (self.predicate)(&item) {
                return Some((self.transform)(item));
            }
        }
        None
    }
}

/// `map(f).filter(p)`: transform every source value, test the result.
pub struct MapFilter<S, F, P> {
    source: S,
    transform: F,
    predicate: P,
}

impl<S, F, P> MapFilter<S, F, P> {
    pub fn new(source: S, transform: F, predicate: P) -> Self {
        Self {
            source,
            transform,
            predicate,
        }
    }
}

impl<S, F, P, R> SeqCursor for MapFilter<S, F, P>
where
    S: SeqCursor,
    F: FnMut(S::Item) -> R,
    P: FnMut(&R) -> bool,
{
    type Item = R;

    #[inline]
    fn advance(&mut self) -> Option<R> {
        while let Some(item) = self.source.advance() {
            let mapped = (self.transform)(item);
            if (self.predicate)(&mapped) {
                return Some(mapped);
            }
        }
        None
    }
}
