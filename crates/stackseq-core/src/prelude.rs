//! Convenient re-exports for downstream crates.

pub use crate::comparer::{DefaultComparer, FnComparer, KeyComparer};
pub use crate::config::PoolConfig;
pub use crate::cursor::SeqCursor;
pub use crate::error::{Error, Result};
pub use crate::set::KeySet;
