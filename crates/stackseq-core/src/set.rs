//! Minimal set interface consumed by the distinct stage.
//!
//! The concrete pooled implementation lives in `stackseq-operators::set`.
//! Releasing a set is `Drop`.

pub trait KeySet<K> {
    /// Insert `key`. Returns `true` only if it was not already present.
    fn add(&mut self, key: K) -> bool;
}
