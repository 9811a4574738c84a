//! The capability protocol every pipeline stage implements.
//!
//! A stage is a pull-based cursor that also reports what it knows about
//! itself without consuming anything: how many elements are left, and whether
//! its output is literally one untouched slice. The materializer uses those
//! answers to pick the cheapest way to build a result (see
//! `stackseq_operators::materialize`).
//!
//! Stages are composed by value, so a pipeline is one concrete nested type
//! with no boxing between stages. Releasing a stage is `Drop`: dropping the
//! outermost stage drops its upstream chain and returns any pooled buffers,
//! on normal completion, early abandonment and unwinding alike.

/// Pull-based cursor with optional size/backing capabilities.
///
/// Invariants:
/// - Once `advance` returns `None`, every later call returns `None`. Stages
///   are single-use and never restart.
/// - `known_remaining` and `contiguous_view` must not consume elements.
pub trait SeqCursor {
    type Item;

    /// Produce the next element, or `None` when exhausted.
    fn advance(&mut self) -> Option<Self::Item>;

    /// Remaining element count, if it is known without pulling.
    fn known_remaining(&self) -> Option<usize> {
        None
    }

    /// The untouched buffer backing this stage element-for-element.
    fn contiguous_view(&self) -> Option<&[Self::Item]> {
        None
    }

    /// Append `view[offset..]` to `destination`.
    ///
    /// Returns `false`, leaving `destination` untouched, when there is no
    /// contiguous view or `offset` is out of range.
    fn bulk_copy(&self, _destination: &mut Vec<Self::Item>, _offset: usize) -> bool {
        false
    }
}

impl<S: SeqCursor + ?Sized> SeqCursor for &mut S {
    type Item = S::Item;

    fn advance(&mut self) -> Option<Self::Item> {
        (**self).advance()
    }

    fn known_remaining(&self) -> Option<usize> {
        (**self).known_remaining()
    }

    fn contiguous_view(&self) -> Option<&[Self::Item]> {
        (**self).contiguous_view()
    }

    fn bulk_copy(&self, destination: &mut Vec<Self::Item>, offset: usize) -> bool {
        (**self).bulk_copy(destination, offset)
    }
}
