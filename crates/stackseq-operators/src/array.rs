//! Leaf stage over a borrowed slice.

use stackseq_core::cursor::SeqCursor;
use stackseq_core::error::{Error, Result};

/// Cursor walking a backing slice, yielding clones of its elements.
///
/// This is the only stage with a genuine contiguous view, which lets the
/// materializer copy it in one shot.
#[derive(Debug, Clone)]
pub struct ArrayCursor<'a, T> {
    backing: &'a [T],
    next: usize,
    exhausted: bool,
}

impl<'a, T> ArrayCursor<'a, T> {
    pub fn new(backing: &'a [T]) -> Self {
        Self {
            backing,
            next: 0,
            exhausted: false,
        }
    }

    /// Build from an optional slice. An absent array is an argument error,
    /// never an empty sequence.
    pub fn try_from_option(backing: Option<&'a [T]>) -> Result<Self> {
        backing
            .map(Self::new)
            .ok_or_else(|| Error::InvalidArgument("array cursor requires a backing array".into()))
    }

    fn is_untouched(&self) -> bool {
        self.next == 0 && !self.exhausted
    }
}

/// Start a pipeline over `backing`.
pub fn from_array<T>(backing: &[T]) -> ArrayCursor<'_, T> {
    ArrayCursor::new(backing)
}

impl<'a, T: Clone> SeqCursor for ArrayCursor<'a, T> {
    type Item = T;

    #[inline]
    fn advance(&mut self) -> Option<T> {
        match self.backing.get(self.next) {
            Some(item) => {
                self.next += 1;
                Some(item.clone())
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    fn known_remaining(&self) -> Option<usize> {
        if self.exhausted {
            None
        } else {
            Some(self.backing.len() - self.next)
        }
    }

    fn contiguous_view(&self) -> Option<&[T]> {
        if self.is_untouched() && !self.backing.is_empty() {
            Some(self.backing)
        } else {
            None
        }
    }

    fn bulk_copy(&self, destination: &mut Vec<T>, offset: usize) -> bool {
        match self.contiguous_view() {
            Some(view) if offset < view.len() => {
                destination.extend_from_slice(&view[offset..]);
                true
            }
            _ => false,
        }
    }
}
