// Batch progress counters, readable while a batch is running.
//
// Each counter is a separate atomic, so a reader may see values from two
// neighbouring updates. Consumers only poll for display and tolerate that.
// Counters only move forward within a batch; `start` resets them.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// Shared progress of the current batch.
#[derive(Debug, Default)]
pub struct Progress {
    current: AtomicUsize,
    total: AtomicUsize,
    emitted: AtomicUsize,
}

/// A point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    /// Rows processed so far
    pub current: usize,
    /// Rows in the batch
    pub total: usize,
    /// Output rows produced so far
    pub emitted: usize,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new batch of `total` rows.
    pub fn start(&self, total: usize) {
        self.current.store(0, Ordering::Relaxed);
        self.emitted.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    /// Record that `current` rows are done and `emitted` rows produced.
    /// Smaller values than already recorded are ignored.
    pub fn advance(&self, current: usize, emitted: usize) {
        self.current.fetch_max(current, Ordering::Relaxed);
        self.emitted.fetch_max(emitted, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            current: self.current.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
            emitted: self.emitted.load(Ordering::Relaxed),
        }
    }
}

impl ProgressSnapshot {
    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }
}
