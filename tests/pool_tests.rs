//! Array pool reuse, concurrency and leak-freedom


use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;

use stackseq::{
    from_array, to_array_in, ArrayBuilder, ArrayPool, DefaultComparer, DistinctBy, GroupBy,
    PoolConfig, SeqCursor,
};
use test_data_gen::{private_pool, random_keys};

#[test]
fn test_rent_and_return_reuses_buffers() {
    let pool = private_pool();
    let first: Vec<u64> = pool.rent(100);
    let capacity = first.capacity();
    assert!(capacity >= 100);
    pool.give_back(first);

    let second: Vec<u64> = pool.rent(100);
    assert_eq!(second.capacity(), capacity);
    assert!(second.is_empty());
    pool.give_back(second);

    let snap = pool.stats().snapshot();
    assert_eq!(snap.rented, 2);
    assert_eq!(snap.allocated, 1);
    assert_eq!(snap.outstanding(), 0);
}

#[test]
fn test_config_from_json_drives_pool() {
    let config = PoolConfig::from_json(
        r#"{"min_array_length": 8, "max_array_length": 64, "max_arrays_per_bucket": 2}"#,
    )
    .expect("valid config");
    let pool: &'static ArrayPool = Box::leak(Box::new(ArrayPool::new(config).expect("valid pool")));

    let small: Vec<u8> = pool.rent(3);
    assert_eq!(small.capacity(), 8);
    pool.give_back(small);

    let huge: Vec<u8> = pool.rent(1_000);
    pool.give_back(huge);
    assert_eq!(pool.stats().snapshot().discarded, 1);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = PoolConfig::from_json(r#"{"min_array_length": 24}"#).unwrap_err();
    assert!(matches!(err, stackseq::Error::Config(_)));
}

#[test]
fn test_concurrent_pipelines_share_pool() {
    let pool = private_pool();
    let handles: Vec<_> = (0..8)
        .map(|t| {
            thread::spawn(move || {
                for round in 0..50 {
                    let input = random_keys(t * 1_000 + round, 2_000, 97);
                    let distinct = to_array_in(
                        pool,
                        DistinctBy::new_in(pool, from_array(&input), |x: &u32| *x, DefaultComparer::new()),
                    );
                    assert!(distinct.len() <= 97);

                    let mut groups = GroupBy::new_in(pool, from_array(&input), |x: &u32| x % 7, DefaultComparer::new());
                    let mut total = 0;
                    while let Some(g) = groups.advance() {
                        total += g.len();
                    }
                    assert_eq!(total, input.len());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
    let snap = pool.stats().snapshot();
    assert_eq!(snap.outstanding(), 0);
    assert!(snap.allocated < snap.rented, "buffers should be reused across pipelines");
}

#[test]
fn test_panicking_callback_returns_lookup_storage() {
    let pool = private_pool();
    let input: Vec<u32> = (0..10_000).collect();
    let result = catch_unwind(AssertUnwindSafe(|| {
        let mut groups = GroupBy::new_in(
            pool,
            from_array(&input),
            |x: &u32| {
                if *x == 9_000 {
                    panic!("key selector failed");
                }
                x % 100
            },
            DefaultComparer::new(),
        );
        groups.advance()
    }));
    assert!(result.is_err());
    assert_eq!(pool.stats().outstanding(), 0);
}

#[test]
fn test_panicking_callback_returns_builder_chunks() {
    let pool = private_pool();
    let input: Vec<u32> = (0..5_000).collect();
    let result = catch_unwind(AssertUnwindSafe(|| {
        let stage = DistinctBy::new_in(
            pool,
            from_array(&input),
            |x: &u32| {
                assert!(*x < 4_000, "distinct key out of range");
                *x
            },
            DefaultComparer::new(),
        );
        to_array_in(pool, stage)
    }));
    assert!(result.is_err());
    assert_eq!(pool.stats().outstanding(), 0);
}

#[test]
fn test_builder_clear_returns_chunks() {
    let pool = private_pool();
    let mut builder = ArrayBuilder::with_pool(pool);
    for i in 0..1_000u32 {
        builder.add(i);
    }
    assert!(builder.chunk_count() > 1);
    let out = builder.to_array();
    assert_eq!(out.len(), 1_000);
    builder.clear();
    assert_eq!(pool.stats().outstanding(), 0);
    assert!(builder.is_empty());
}

#[test]
fn test_config_json_uses_field_names() {
    let json = serde_json::to_value(PoolConfig::default()).expect("serialize config");
    assert_eq!(json["min_array_length"], 16);
    assert_eq!(json["max_arrays_per_bucket"], 32);
    let back = PoolConfig::from_json(&json.to_string()).expect("parse config");
    assert_eq!(back, PoolConfig::default());
}
