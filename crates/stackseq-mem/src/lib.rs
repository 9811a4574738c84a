#![forbid(unsafe_code)]
//! stackseq-mem: the process-wide array pool and everything that rents from it.
//!
//! All buffers a pipeline needs beyond its final result (builder chunks,
//! hash-table buckets, group storage) flow through `ArrayPool` and come back
//! through RAII `PooledVec` handles, so a dropped or unwinding pipeline never
//! leaks a rental.

pub mod builder;
pub mod pool;
pub mod pooled;
pub mod tracking;

pub use builder::ArrayBuilder;
pub use pool::ArrayPool;
pub use pooled::PooledVec;
pub use tracking::{PoolSnapshot, PoolStats};
