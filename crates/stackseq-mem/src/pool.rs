//! Process-wide array pool.
//!
//! Buffers are handed out as empty `Vec<T>` with at least the requested
//! capacity, and come back through `give_back`. Size classes are powers of two
//! from `min_array_length` to `max_array_length`; each class keeps at most
//! `max_arrays_per_bucket` idle buffers per element type. Rentals above the
//! largest class are allocated exactly and dropped on return.
//!
//! Returned buffers are always cleared before they are shelved: the pool never
//! keeps a caller's values alive.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use stackseq_core::config::PoolConfig;
use stackseq_core::error::Result;

use crate::tracking::PoolStats;

static SHARED: Lazy<ArrayPool> = Lazy::new(|| {
    ArrayPool::new(PoolConfig::from_env()).unwrap_or_else(|_e| {
        #[cfg(feature = "tracing")]
        tracing::warn!(error = %_e, "ignoring invalid pool config from environment");
        ArrayPool::default()
    })
});

/// Idle buffers of one element type, one stack per size class.
struct Shelves<T> {
    classes: Vec<Vec<Vec<T>>>,
}

impl<T> Shelves<T> {
    fn new(classes: usize) -> Self {
        Self {
            classes: (0..classes).map(|_| Vec::new()).collect(),
        }
    }
}

type ShelfMap = HashMap<TypeId, Box<dyn Any + Send>>;

pub struct ArrayPool {
    config: PoolConfig,
    shelves: Mutex<ShelfMap>,
    stats: PoolStats,
}

impl ArrayPool {
    /// Build a private pool. Size-class arithmetic relies on a validated
    /// config, so an invalid one is rejected here rather than on first rent.
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: PoolConfig) -> Self {
        Self {
            config,
            shelves: Mutex::new(HashMap::new()),
            stats: PoolStats::new(),
        }
    }

    /// The lazily created process-wide pool, configured from the environment.
    pub fn shared() -> &'static ArrayPool {
        &SHARED
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Rent an empty buffer with capacity of at least `min_len`.
    pub fn rent<T: Send + 'static>(&self, min_len: usize) -> Vec<T> {
        self.stats.record_rent();

        let Some(class) = self.class_for_request(min_len) else {
            self.stats.record_alloc();
            #[cfg(feature = "tracing")]
            tracing::trace!(min_len, "oversized rental bypasses pool");
            return Vec::with_capacity(min_len);
        };

        let reused = {
            let mut shelves = self.lock();
            shelves
                .get_mut(&TypeId::of::<T>())
                .and_then(|s| s.downcast_mut::<Shelves<T>>())
                .and_then(|s| s.classes[class].pop())
        };

        match reused {
            Some(buf) => buf,
            None => {
                self.stats.record_alloc();
                let len = self.class_len(class);
                #[cfg(feature = "tracing")]
                tracing::trace!(min_len, class_len = len, "pool miss");
                Vec::with_capacity(len)
            }
        }
    }

    /// Return a buffer obtained from `rent`. Its elements are dropped first.
    pub fn give_back<T: Send + 'static>(&self, mut buf: Vec<T>) {
        // Drop elements before taking the lock: they may own pooled buffers
        // themselves and return them re-entrantly.
        buf.clear();
        self.stats.record_return();

        let Some(class) = self.class_for_capacity(buf.capacity()) else {
            self.stats.record_discard();
            return;
        };

        let classes = self.config.size_classes();
        let rejected = {
            let mut shelves = self.lock();
            let shelf = shelves
                .entry(TypeId::of::<T>())
                .or_insert_with(|| Box::new(Shelves::<T>::new(classes)) as Box<dyn Any + Send>)
                .downcast_mut::<Shelves<T>>()
                .map(|s| &mut s.classes[class]);
            match shelf {
                Some(shelf) if shelf.len() < self.config.max_arrays_per_bucket => {
                    shelf.push(buf);
                    None
                }
                _ => Some(buf),
            }
        };

        if let Some(_buf) = rejected {
            self.stats.record_discard();
            #[cfg(feature = "tracing")]
            tracing::trace!(capacity = _buf.capacity(), "pool shelf full; dropping buffer");
        }
    }

    /// Idle buffers currently shelved for element type `T`.
    pub fn idle<T: Send + 'static>(&self) -> usize {
        self.lock()
            .get(&TypeId::of::<T>())
            .and_then(|s| s.downcast_ref::<Shelves<T>>())
            .map(|s| s.classes.iter().map(Vec::len).sum())
            .unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, ShelfMap> {
        // Shelves hold only empty buffers, so a poisoned lock carries no torn state.
        self.shelves.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn class_len(&self, class: usize) -> usize {
        self.config.min_array_length << class
    }

    /// Smallest class whose length covers `min_len`.
    fn class_for_request(&self, min_len: usize) -> Option<usize> {
        if min_len > self.config.max_array_length {
            return None;
        }
        let len = min_len.max(self.config.min_array_length).next_power_of_two();
        Some((len / self.config.min_array_length).trailing_zeros() as usize)
    }

    /// Largest class a buffer of `capacity` can serve.
    fn class_for_capacity(&self, capacity: usize) -> Option<usize> {
        if capacity < self.config.min_array_length || capacity > self.config.max_array_length {
            return None;
        }
        let ratio = capacity / self.config.min_array_length;
        Some((usize::BITS - 1 - ratio.leading_zeros()) as usize)
    }
}

impl Default for ArrayPool {
    fn default() -> Self {
        Self::with_valid_config(PoolConfig::default())
    }
}

impl std::fmt::Debug for ArrayPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayPool")
            .field("config", &self.config)
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}
