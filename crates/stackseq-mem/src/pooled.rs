//! RAII handle over a buffer rented from an `ArrayPool`.
//!
//! Dropping a `PooledVec` drops its elements and returns the buffer to the
//! pool it came from (panic-safe). Growth never goes through the global
//! allocator directly: a full buffer is replaced by a larger rental and the
//! old one is returned.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::pool::ArrayPool;

pub struct PooledVec<T: Send + 'static> {
    buf: Vec<T>,
    pool: &'static ArrayPool,
}

impl<T: Send + 'static> PooledVec<T> {
    /// Rent an empty buffer with capacity of at least `min_capacity`.
    pub fn rent(pool: &'static ArrayPool, min_capacity: usize) -> Self {
        Self {
            buf: pool.rent(min_capacity),
            pool,
        }
    }

    pub fn pool(&self) -> &'static ArrayPool {
        self.pool
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == self.buf.capacity()
    }

    /// Ensure capacity of at least `min_capacity`, moving the elements into a
    /// larger rental and returning the old buffer.
    pub fn grow(&mut self, min_capacity: usize) {
        if min_capacity <= self.buf.capacity() {
            return;
        }
        let mut next = self.pool.rent(min_capacity);
        next.append(&mut self.buf);
        let old = std::mem::replace(&mut self.buf, next);
        self.pool.give_back(old);
    }

    /// Push, doubling through the pool when full.
    pub fn push(&mut self, value: T) {
        if self.is_full() {
            let doubled = self.buf.capacity().saturating_mul(2).max(1);
            self.grow(doubled);
        }
        self.buf.push(value);
    }

    /// Resize to `len`, filling new slots with `value`.
    pub fn resize(&mut self, len: usize, value: T)
    where
        T: Clone,
    {
        self.grow(len);
        self.buf.resize(len, value);
    }

    /// Move every element to the end of `out`, leaving this buffer empty but
    /// still rented.
    pub fn drain_into(&mut self, out: &mut Vec<T>) {
        out.append(&mut self.buf);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T: Send + 'static> Deref for PooledVec<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl<T: Send + 'static> DerefMut for PooledVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl<T: Send + 'static> Drop for PooledVec<T> {
    fn drop(&mut self) {
        // NOTE: no logging here; this runs on every unwind path.
        self.pool.give_back(std::mem::take(&mut self.buf));
    }
}

impl<T: Send + 'static + fmt::Debug> fmt::Debug for PooledVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}
