#![forbid(unsafe_code)]
//! stackseq: filter/map/distinct/group-by pipelines over slices that allocate
//! nothing per stage and rent every scratch buffer from a shared pool.
//!
//! ```
//! use stackseq::prelude::*;
//!
//! let orders = [("ann", 30), ("bob", 5), ("ann", 12), ("cy", 40), ("bob", 60)];
//!
//! let big_spenders = from_array(&orders)
//!     .filter(|(_, amount)| *amount >= 10)
//!     .map(|(name, _)| name)
//!     .distinct_by(|name| *name)
//!     .to_array();
//! assert_eq!(big_spenders, vec!["ann", "cy", "bob"]);
//!
//! let per_customer: Vec<(&str, usize)> = from_array(&orders)
//!     .group_by(|(name, _)| *name)
//!     .pull()
//!     .map(|g| (*g.key(), g.len()))
//!     .collect();
//! assert_eq!(per_customer, vec![("ann", 2), ("bob", 2), ("cy", 1)]);
//! ```
//!
//! Crates:
//! - `stackseq-core`: the `SeqCursor` protocol, comparers, config, errors.
//! - `stackseq-mem`: the array pool, pooled vectors and the array builder.
//! - `stackseq-operators`: the stages, the lookup and the materializer.

pub use stackseq_core::{
    DefaultComparer, Error, FnComparer, KeyComparer, KeySet, PoolConfig, Result, SeqCursor,
};
pub use stackseq_mem::{ArrayBuilder, ArrayPool, PoolSnapshot, PoolStats, PooledVec};
pub use stackseq_operators::materialize::{plan, to_array, to_array_in, to_array_unpooled};
pub use stackseq_operators::{
    from_array, ArrayCursor, DistinctBy, Filter, FilterMap, GroupBy, Grouping, IntoGroups, Lookup,
    LookupIter, Map, MapFilter, MinimalHashSet, Pull, SeqExt, Strategy,
};

pub mod prelude {
    pub use stackseq_core::prelude::*;
    pub use stackseq_operators::{from_array, Grouping, Lookup, SeqExt};
}
