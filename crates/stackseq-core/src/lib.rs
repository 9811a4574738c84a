#![forbid(unsafe_code)]
//! stackseq-core: the contracts every other stackseq crate builds on.
//!
//! - `cursor`: the capability protocol each pipeline stage implements.
//! - `comparer` / `set`: key equality/hash and the minimal set interface used
//!   by distinct and group-by.
//! - `config`: pool configuration that can be serialized or read from the
//!   environment.
//!
//! Concrete pooling lives in `stackseq-mem`; concrete stages live in
//! `stackseq-operators`.

pub mod comparer;
pub mod config;
pub mod cursor;
pub mod error;
pub mod prelude;
pub mod set;

pub use comparer::{DefaultComparer, FnComparer, KeyComparer};
pub use config::PoolConfig;
pub use cursor::SeqCursor;
pub use error::{Error, Result};
pub use set::KeySet;
