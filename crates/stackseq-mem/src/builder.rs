//! Chunked array builder for results of unknown length.
//!
//! Elements go into pooled chunks that double in size. Filled chunks are kept
//! in a small inline log instead of being copied on every growth step, and the
//! whole sequence is moved into one exact-size `Vec` at the end. Every chunk
//! goes back to the pool on `clear` or drop.

use smallvec::SmallVec;

use crate::pool::ArrayPool;
use crate::pooled::PooledVec;

/// Capacity requested for the first chunk. The pool rounds it up to its
/// smallest size class.
const DEFAULT_CAPACITY: usize = 5;

/// Filled chunks kept inline before the log spills to the heap. With doubling
/// growth this covers several million elements at the default pool sizes.
const INLINE_CHUNKS: usize = 16;

pub struct ArrayBuilder<T: Send + 'static> {
    pool: &'static ArrayPool,
    active: Option<PooledVec<T>>,
    chunks: SmallVec<[PooledVec<T>; INLINE_CHUNKS]>,
    total_len: usize,
}

impl<T: Send + 'static> ArrayBuilder<T> {
    /// Builder renting from the shared pool.
    pub fn new() -> Self {
        Self::with_pool(ArrayPool::shared())
    }

    pub fn with_pool(pool: &'static ArrayPool) -> Self {
        Self {
            pool,
            active: None,
            chunks: SmallVec::new(),
            total_len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.total_len
    }

    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// Chunks currently rented (filled + active).
    pub fn chunk_count(&self) -> usize {
        self.chunks.len() + usize::from(self.active.is_some())
    }

    pub fn add(&mut self, item: T) {
        let full = self.active.as_ref().map_or(true, PooledVec::is_full);
        if full {
            self.next_chunk();
        }
        if let Some(active) = self.active.as_mut() {
            active.push(item);
            self.total_len += 1;
        }
    }

    fn next_chunk(&mut self) {
        let capacity = match &self.active {
            Some(active) => active.capacity().saturating_mul(2),
            None => DEFAULT_CAPACITY,
        };
        let fresh = PooledVec::rent(self.pool, capacity);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            capacity = fresh.capacity(),
            chunks = self.chunks.len() + 1,
            "array builder chunk"
        );
        if let Some(filled) = self.active.replace(fresh) {
            self.chunks.push(filled);
        }
    }

    /// Move everything added so far into one exact-size vector, in order.
    ///
    /// The chunks stay rented (and empty) until `clear` or drop.
    pub fn to_array(&mut self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.total_len);
        for chunk in self.chunks.iter_mut() {
            chunk.drain_into(&mut result);
        }
        if let Some(active) = self.active.as_mut() {
            active.drain_into(&mut result);
        }
        self.total_len = 0;
        result
    }

    /// Return every chunk to the pool and reset.
    pub fn clear(&mut self) {
        self.active = None;
        self.chunks.clear();
        self.total_len = 0;
    }
}

impl<T: Send + 'static> Default for ArrayBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> Drop for ArrayBuilder<T> {
    fn drop(&mut self) {
        self.clear();
    }
}
