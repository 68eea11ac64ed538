//! Lock-free classification counters
//!
//! NOTE: All atomics use Relaxed ordering; these are statistical
//! counters only. Do NOT use these atomics for coordination or logic decisions.

use crate::domain::{SkipReason, VisitEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Per-event-kind decision counters
#[derive(Debug, Default)]
struct DecisionCounters {
    logged: AtomicU64,
    skipped_bot: AtomicU64,
    skipped_not_browser: AtomicU64,
    skipped_private_ip: AtomicU64,
}

impl DecisionCounters {
    fn record_logged(&self) {
        self.logged.fetch_add(1, Ordering::Relaxed);
    }

    fn record_skipped(&self, reason: &SkipReason) {
        let counter = match reason {
            SkipReason::BotDetected(_) => &self.skipped_bot,
            SkipReason::NotABrowser => &self.skipped_not_browser,
            SkipReason::PrivateOrInvalidIP => &self.skipped_private_ip,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> DecisionSnapshot {
        DecisionSnapshot {
            logged: self.logged.load(Ordering::Relaxed),
            skipped_bot: self.skipped_bot.load(Ordering::Relaxed),
            skipped_not_browser: self.skipped_not_browser.load(Ordering::Relaxed),
            skipped_private_ip: self.skipped_private_ip.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of one event kind's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionSnapshot {
    pub logged: u64,
    pub skipped_bot: u64,
    pub skipped_not_browser: u64,
    pub skipped_private_ip: u64,
}

impl DecisionSnapshot {
    pub fn skipped(&self) -> u64 {
        self.skipped_bot + self.skipped_not_browser + self.skipped_private_ip
    }

    pub fn total(&self) -> u64 {
        self.logged + self.skipped()
    }
}

/// Shared metrics collector; every recording method is lock-free
pub struct Metrics {
    visits: DecisionCounters,
    submissions: DecisionCounters,
    /// Log store appends that failed with an I/O error (monotonic)
    sink_write_failures: AtomicU64,
    started_at: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            visits: DecisionCounters::default(),
            submissions: DecisionCounters::default(),
            sink_write_failures: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    fn counters(&self, event: &VisitEvent) -> &DecisionCounters {
        match event {
            VisitEvent::Visit => &self.visits,
            VisitEvent::Submission { .. } => &self.submissions,
        }
    }

    #[inline]
    pub fn record_logged(&self, event: &VisitEvent) {
        self.counters(event).record_logged();
    }

    #[inline]
    pub fn record_skipped(&self, event: &VisitEvent, reason: &SkipReason) {
        self.counters(event).record_skipped(reason);
    }

    #[inline]
    pub fn record_sink_write_failure(&self) {
        self.sink_write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn report(&self) -> MetricsSummary {
        MetricsSummary {
            visits: self.visits.snapshot(),
            submissions: self.submissions.snapshot(),
            sink_write_failures: self.sink_write_failures.load(Ordering::Relaxed),
            uptime_secs: self.started_at.elapsed().as_secs(),
        }
    }
}

/// Snapshot of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSummary {
    pub visits: DecisionSnapshot,
    pub submissions: DecisionSnapshot,
    pub sink_write_failures: u64,
    pub uptime_secs: u64,
}

impl MetricsSummary {
    pub fn log(&self) {
        info!(
            visits_logged = %self.visits.logged,
            visits_skipped = %self.visits.skipped(),
            submissions_logged = %self.submissions.logged,
            submissions_skipped = %self.submissions.skipped(),
            sink_write_failures = %self.sink_write_failures,
            uptime_secs = %self.uptime_secs,
            "metrics"
        );
    }
}
