//! Property tests for the pipeline invariants

use std::collections::HashSet;

use proptest::prelude::*;
use stackseq::prelude::*;
use stackseq::{plan, to_array_in, ArrayPool, DistinctBy, GroupBy, Strategy as Plan};

fn leaked_pool() -> &'static ArrayPool {
    Box::leak(Box::new(ArrayPool::default()))
}

proptest! {
    #[test]
    fn prop_filter_keeps_exactly_accepted(input in prop::collection::vec(any::<i32>(), 0..500), pivot in any::<i32>()) {
        let ours = from_array(&input).filter(|x| *x > pivot).to_array();
        let expected: Vec<i32> = input.iter().copied().filter(|x| *x > pivot).collect();
        prop_assert_eq!(ours, expected);
    }

    #[test]
    fn prop_map_preserves_count_and_order(input in prop::collection::vec(any::<u16>(), 0..500)) {
        let stage = from_array(&input).map(|x| u32::from(x) * 3);
        prop_assert_eq!(stage.known_remaining(), Some(input.len()));
        let ours = stage.to_array();
        let expected: Vec<u32> = input.iter().map(|x| u32::from(*x) * 3).collect();
        prop_assert_eq!(ours, expected);
    }

    #[test]
    fn prop_distinct_first_occurrences(input in prop::collection::vec(0u8..40, 0..500)) {
        let ours = from_array(&input).distinct_by(|x| *x).to_array();
        let mut seen = HashSet::new();
        let expected: Vec<u8> = input.iter().copied().filter(|x| seen.insert(*x)).collect();
        prop_assert_eq!(ours, expected);
    }

    #[test]
    fn prop_distinct_is_idempotent(input in prop::collection::vec(0u8..40, 0..500)) {
        let once = from_array(&input).distinct_by(|x| x % 7).to_array();
        let twice = from_array(&input).distinct_by(|x| x % 7).distinct_by(|x| x % 7).to_array();
        prop_assert!(once.len() <= 7);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_groups_partition_input(input in prop::collection::vec(0u16..64, 0..800)) {
        let groups: Vec<_> = from_array(&input).group_by(|x| x % 16).pull().collect();

        // Keys unique and in first-seen order.
        let mut seen = HashSet::new();
        let first_seen: Vec<u16> = input.iter().map(|x| x % 16).filter(|k| seen.insert(*k)).collect();
        let keys: Vec<u16> = groups.iter().map(|g| *g.key()).collect();
        prop_assert_eq!(keys, first_seen);

        // Elements keep arrival order within each group and nothing is lost.
        for g in &groups {
            let expected: Vec<u16> = input.iter().copied().filter(|x| x % 16 == *g.key()).collect();
            prop_assert_eq!(g.to_vec(), expected);
        }
        let total: usize = groups.iter().map(|g| g.len()).sum();
        prop_assert_eq!(total, input.len());
    }

    #[test]
    fn prop_strategies_are_equivalent(input in prop::collection::vec(any::<i64>(), 0..300)) {
        let a = from_array(&input).to_array();
        let b = from_array(&input).map(|x| x).to_array();
        let c = from_array(&input).filter(|_| true).to_array();
        prop_assert_eq!(&a, &input);
        prop_assert_eq!(&b, &input);
        prop_assert_eq!(&c, &input);
    }

    #[test]
    fn prop_fused_chains_match_unfused(input in prop::collection::vec(any::<i16>(), 0..300)) {
        let fused = from_array(&input).filter(|x| *x >= 0).map(|x| i32::from(x) + 1).to_array();
        let mut unfused = Vec::new();
        let mut pull = from_array(&input).pull().filter(|x| *x >= 0).map(|x| i32::from(x) + 1);
        for v in &mut pull {
            unfused.push(v);
        }
        prop_assert_eq!(fused, unfused);
    }

    #[test]
    fn prop_every_pipeline_returns_its_buffers(input in prop::collection::vec(0u32..1_000, 0..2_000)) {
        let pool = leaked_pool();
        let distinct = to_array_in(pool, DistinctBy::new_in(pool, from_array(&input), |x: &u32| *x, DefaultComparer::new()));
        let grouped = to_array_in(pool, GroupBy::new_in(pool, from_array(&input), |x: &u32| x % 10, DefaultComparer::new()));
        prop_assert!(distinct.len() <= input.len());
        prop_assert_eq!(pool.stats().outstanding(), grouped.len());
        drop(grouped);
        prop_assert_eq!(pool.stats().outstanding(), 0);
    }

    #[test]
    fn prop_partially_consumed_array_plans_known_count(input in prop::collection::vec(any::<u8>(), 1..100), skip in 0usize..100) {
        let mut cursor = from_array(&input);
        let skip = skip.min(input.len() - 1);
        for _ in 0..skip {
            cursor.advance();
        }
        let expected = if skip == 0 {
            Plan::Contiguous(input.len())
        } else {
            Plan::KnownCount(input.len() - skip)
        };
        prop_assert_eq!(plan(&cursor), expected);
        prop_assert_eq!(cursor.to_array(), input[skip..].to_vec());
    }
}
