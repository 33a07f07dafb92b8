//! Translation metrics for language switches.
//!
//! Counters are owned by the session controller rather than held in a global,
//! so each session (and each test) observes only its own traffic.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Language switches that issued translation work (no-ops excluded)
    switches_attempted: AtomicUsize,

    /// Switches whose translations all succeeded and were applied
    switches_committed: AtomicUsize,

    /// Switches abandoned because at least one task failed
    switches_rolled_back: AtomicUsize,

    /// Individual translation requests sent to the backend
    tasks_issued: AtomicUsize,

    /// Individual translation requests that failed
    tasks_failed: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_switch_attempt(&self, tasks: usize) {
        self.switches_attempted.fetch_add(1, Ordering::Relaxed);
        self.tasks_issued.fetch_add(tasks, Ordering::Relaxed);
    }

    pub fn record_commit(&self) {
        self.switches_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rollback(&self, failed_tasks: usize) {
        self.switches_rolled_back.fetch_add(1, Ordering::Relaxed);
        self.tasks_failed.fetch_add(failed_tasks, Ordering::Relaxed);
    }

    pub fn switches_attempted(&self) -> usize {
        self.switches_attempted.load(Ordering::Relaxed)
    }

    pub fn switches_committed(&self) -> usize {
        self.switches_committed.load(Ordering::Relaxed)
    }

    pub fn switches_rolled_back(&self) -> usize {
        self.switches_rolled_back.load(Ordering::Relaxed)
    }

    pub fn tasks_issued(&self) -> usize {
        self.tasks_issued.load(Ordering::Relaxed)
    }

    pub fn tasks_failed(&self) -> usize {
        self.tasks_failed.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let issued = self.tasks_issued();
        let failed = self.tasks_failed();
        let task_success_rate = if issued > 0 {
            ((issued - failed) as f64 / issued as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            switches_attempted: self.switches_attempted(),
            switches_committed: self.switches_committed(),
            switches_rolled_back: self.switches_rolled_back(),
            tasks_issued: issued,
            tasks_failed: failed,
            task_success_rate,
        }
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub switches_attempted: usize,
    pub switches_committed: usize,
    pub switches_rolled_back: usize,
    pub tasks_issued: usize,
    pub tasks_failed: usize,

    /// Share of issued tasks that succeeded, as a percentage (0-100)
    pub task_success_rate: f64,
}
