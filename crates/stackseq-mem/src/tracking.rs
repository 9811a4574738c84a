//! Lightweight rental counters for the array pool.
//!
//! Keep this cheap: plain relaxed atomics, no locks.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct PoolStats {
    rented: AtomicUsize,
    returned: AtomicUsize,
    allocated: AtomicUsize,
    discarded: AtomicUsize,
    peak_outstanding: AtomicUsize,
}

/// Point-in-time copy of `PoolStats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub rented: usize,
    pub returned: usize,
    pub allocated: usize,
    pub discarded: usize,
    pub peak_outstanding: usize,
}

impl PoolSnapshot {
    pub fn outstanding(&self) -> usize {
        self.rented.saturating_sub(self.returned)
    }
}

impl PoolStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_rent(&self) {
        let rented = self.rented.fetch_add(1, Ordering::AcqRel) + 1;
        let outstanding = rented.saturating_sub(self.returned.load(Ordering::Acquire));
        self.record_outstanding(outstanding);
    }

    pub(crate) fn record_return(&self) {
        self.returned.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn record_alloc(&self) {
        self.allocated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_discard(&self) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    fn record_outstanding(&self, outstanding: usize) {
        let mut cur = self.peak_outstanding.load(Ordering::Relaxed);
        while outstanding > cur {
            match self.peak_outstanding.compare_exchange(
                cur,
                outstanding,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(observed) => cur = observed,
            }
        }
    }

    /// Buffers currently rented and not yet returned.
    pub fn outstanding(&self) -> usize {
        self.snapshot().outstanding()
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            rented: self.rented.load(Ordering::Acquire),
            returned: self.returned.load(Ordering::Acquire),
            allocated: self.allocated.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            peak_outstanding: self.peak_outstanding.load(Ordering::Relaxed),
        }
    }
}
