#![forbid(unsafe_code)]
//! stackseq-operators: pipeline stages over the `SeqCursor` protocol.
//!
//! Design intent:
//! - Stages are plain generic structs composed by value; a pipeline is one
//!   nested type the compiler can inline end to end.
//! - Pure and synchronous. Callbacks run on the caller's thread, once per
//!   visited element, in source order.
//! - Every buffer a stage needs beyond the final result is rented from
//!   `stackseq-mem` and returned on drop.

pub mod array;
pub mod distinct;
pub mod filter;
pub mod fused;
pub mod group;
pub mod lookup;
pub mod map;
pub mod materialize;
pub mod set;
pub mod traits;

mod table;

pub use array::{from_array, ArrayCursor};
pub use distinct::DistinctBy;
pub use filter::Filter;
pub use fused::{FilterMap, MapFilter};
pub use group::GroupBy;
pub use lookup::{Grouping, IntoGroups, Lookup, LookupIter};
pub use map::Map;
pub use materialize::Strategy;
pub use set::MinimalHashSet;
pub use traits::{Pull, SeqExt};
