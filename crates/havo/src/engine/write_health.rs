use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex, PoisonError,
};

use serde::Serialize;

/// Tracks cache write failures so a silently broken cache shows up on
/// `/healthz`.
#[derive(Debug)]
pub struct CacheWriteHealth {
    threshold: u64,
    consecutive_failures: AtomicU64,
    total_failures: AtomicU64,
    last_error: Mutex<Option<String>>,
}

/// Snapshot of [`CacheWriteHealth`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheWriteStatus {
    pub degraded: bool,
    pub consecutive_failures: u64,
    pub total_failures: u64,
    pub last_error: Option<String>,
}

impl CacheWriteHealth {
    /// Creates a tracker that degrades after `threshold` consecutive failures.
    pub fn new(threshold: u64) -> Self {
        Self {
            threshold: threshold.max(1),
            consecutive_failures: AtomicU64::new(0),
            total_failures: AtomicU64::new(0),
            last_error: Mutex::new(None),
        }
    }

    pub fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::Relaxed);
    }

    /// Records a failed write. Returns `true` once the failure streak has
    /// reached the threshold.
    pub fn record_failure(&self, error: &str) -> bool {
        let streak = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        self.total_failures.fetch_add(1, Ordering::Relaxed);
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(error.to_string());
        streak >= self.threshold
    }

    pub fn status(&self) -> CacheWriteStatus {
        let consecutive_failures = self.consecutive_failures.load(Ordering::Relaxed);
        CacheWriteStatus {
            degraded: consecutive_failures >= self.threshold,
            consecutive_failures,
            total_failures: self.total_failures.load(Ordering::Relaxed),
            last_error: self
                .last_error
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}
