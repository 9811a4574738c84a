//! Materializer: drain a pipeline into one exact-size `Vec`.
//!
//! Picks the cheapest path from what the outermost stage reports:
//! 1. a contiguous view: one bulk copy, no per-element dispatch;
//! 2. a known count: allocate exactly once, then pull;
//! 3. neither: pull into a pooled `ArrayBuilder` and move out at the end.
//!
//! The output does not depend on the path taken. Pooled buffers are keyed by
//! element type, so `to_array` needs `Send + 'static` items; `to_array_unpooled`
//! takes any item type (borrowed ones included) and grows a plain `Vec` on the
//! third path instead.

use stackseq_core::cursor::SeqCursor;
use stackseq_mem::{ArrayBuilder, ArrayPool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Contiguous(usize),
    KnownCount(usize),
    Buffered,
}

/// The path `to_array` would take for `source` right now. Consumes nothing.
pub fn plan<S: SeqCursor>(source: &S) -> Strategy {
    if let Some(view) = source.contiguous_view() {
        return Strategy::Contiguous(view.len());
    }
    match source.known_remaining() {
        Some(count) => Strategy::KnownCount(count),
        None => Strategy::Buffered,
    }
}

pub fn to_array<S>(source: S) -> Vec<S::Item>
where
    S: SeqCursor,
    S::Item: Send + 'static,
{
    to_array_in(ArrayPool::shared(), source)
}

/// `to_array` with scratch chunks rented from `pool`.
pub fn to_array_in<S>(pool: &'static ArrayPool, mut source: S) -> Vec<S::Item>
where
    S: SeqCursor,
    S::Item: Send + 'static,
{
    if let Some(out) = fill_exact(&mut source) {
        return out;
    }
    let mut builder = ArrayBuilder::with_pool(pool);
    while let Some(item) = source.advance() {
        builder.add(item);
    }
    builder.to_array()
}

/// `to_array` for items the pool cannot hold, such as references into a
/// caller's local data. Same first two paths; the buffered path collects into
/// an unpooled `Vec` and trims it.
pub fn to_array_unpooled<S: SeqCursor>(mut source: S) -> Vec<S::Item> {
    if let Some(out) = fill_exact(&mut source) {
        return out;
    }
    let mut out = Vec::new();
    pull_into(&mut source, &mut out);
    out.shrink_to_fit();
    out
}

/// Run the contiguous or known-count path. `None` means the source reports
/// neither and must be buffered.
fn fill_exact<S: SeqCursor>(source: &mut S) -> Option<Vec<S::Item>> {
    let strategy = plan(source);
    #[cfg(feature = "tracing")]
    tracing::trace!(?strategy, "to_array");

    match strategy {
        Strategy::Contiguous(len) => {
            let mut out = Vec::with_capacity(len);
            if !source.bulk_copy(&mut out, 0) {
                pull_into(source, &mut out);
            }
            Some(out)
        }
        Strategy::KnownCount(count) => {
            let mut out = Vec::with_capacity(count);
            pull_into(source, &mut out);
            Some(out)
        }
        Strategy::Buffered => None,
    }
}

fn pull_into<S: SeqCursor>(source: &mut S, out: &mut Vec<S::Item>) {
    while let Some(item) = source.advance() {
        out.push(item);
    }
}
