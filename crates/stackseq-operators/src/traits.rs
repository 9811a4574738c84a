//! Chaining surface for pipelines: `from_array(&xs).filter(..).map(..).to_array()`.
//!
//! `Filter::map` and `Map::filter` are inherent and shadow the methods here,
//! so those two chains fuse into a single stage automatically.

use std::hash::Hash;

use stackseq_core::comparer::{DefaultComparer, KeyComparer};
use stackseq_core::cursor::SeqCursor;

use crate::distinct::DistinctBy;
use crate::filter::Filter;
use crate::group::GroupBy;
use crate::map::Map;
use crate::materialize;

pub trait SeqExt: SeqCursor + Sized {
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    fn map<F, R>(self, transform: F) -> Map<Self, F>
    where
        F: FnMut(Self::Item) -> R,
    {
        Map::new(self, transform)
    }

    fn distinct_by<F, K>(self, key_selector: F) -> DistinctBy<Self, F, K, DefaultComparer>
    where
        F: FnMut(&Self::Item) -> K,
        K: Hash + Eq + Send + 'static,
    {
        DistinctBy::new(self, key_selector, DefaultComparer::new())
    }

    fn distinct_by_with<F, K, C>(self, key_selector: F, comparer: C) -> DistinctBy<Self, F, K, C>
    where
        F: FnMut(&Self::Item) -> K,
        K: Send + 'static,
        C: KeyComparer<K>,
    {
        DistinctBy::new(self, key_selector, comparer)
    }

    fn group_by<F, K>(self, key_selector: F) -> GroupBy<Self, F, K, DefaultComparer>
    where
        Self::Item: Send + 'static,
        F: FnMut(&Self::Item) -> K,
        K: Hash + Eq + Send + 'static,
    {
        GroupBy::new(self, key_selector, DefaultComparer::new())
    }

    fn group_by_with<F, K, C>(self, key_selector: F, comparer: C) -> GroupBy<Self, F, K, C>
    where
        Self::Item: Send + 'static,
        F: FnMut(&Self::Item) -> K,
        K: Send + 'static,
        C: KeyComparer<K>,
    {
        GroupBy::new(self, key_selector, comparer)
    }

    fn to_array(self) -> Vec<Self::Item>
    where
        Self::Item: Send + 'static,
    {
        materialize::to_array(self)
    }

    /// Like `to_array`, for item types that cannot be pooled (borrowed data).
    fn to_array_unpooled(self) -> Vec<Self::Item> {
        materialize::to_array_unpooled(self)
    }

    /// Drive the pipeline as a std `Iterator`.
    fn pull(self) -> Pull<Self> {
        Pull(self)
    }
}

impl<S: SeqCursor> SeqExt for S {}

/// `Iterator` adapter over any stage.
#[derive(Debug)]
pub struct Pull<S>(S);

impl<S> Pull<S> {
    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<S: SeqCursor> Iterator for Pull<S> {
    type Item = S::Item;

    #[inline]
    fn next(&mut self) -> Option<S::Item> {
        self.0.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.0.known_remaining() {
            Some(n) => (n, Some(n)),
            None => (0, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::from_array;
    use crate::fused::{FilterMap, MapFilter};

    #[test]
    fn chains_fuse_filter_and_map() {
        let data = [1, 2, 3, 4, 5, 6];
        let fm: FilterMap<_, _, _> = from_array(&data).filter(|x: &i32| x % 2 == 0).map(|x| x * 10);
        assert_eq!(fm.to_array(), vec![20, 40, 60]);

        let mf: MapFilter<_, _, _> = from_array(&data).map(|x: i32| x * 3).filter(|y: &i32| y % 2 == 0);
        assert_eq!(mf.to_array(), vec![6, 12, 18]);
    }

    #[test]
    fn pull_drives_for_loops() {
        let data = ["a", "b", "c"];
        let it = from_array(&data).pull();
        assert_eq!(it.size_hint(), (3, Some(3)));
        let mut seen = String::new();
        for s in it {
            seen.push_str(s);
        }
        assert_eq!(seen, "abc");

        let filtered = from_array(&data).filter(|s: &&str| *s != "b").pull();
        assert_eq!(filtered.size_hint(), (0, None));
        assert_eq!(filtered.collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn distinct_then_group() {
        let words = ["pear", "plum", "pear", "fig", "kiwi", "fig"];
        let groups: Vec<(usize, Vec<&str>)> = from_array(&words)
            .distinct_by(|w| *w)
            .group_by(|w: &&str| w.len())
            .pull()
            .map(|g| (*g.key(), g.to_vec()))
            .collect();
        assert_eq!(groups, vec![(4, vec!["pear", "plum", "kiwi"]), (3, vec!["fig"])]);
    }
}
