//! # Session Clock
//!
//! Elapsed-time accounting for a session. The clock never reads the system
//! time itself; callers pass in the current [`Instant`], which keeps the
//! session deterministic under test.

use std::time::{Duration, Instant};

/// Wall-clock timer with pause/resume support.
///
/// Paused spans are accumulated into an offset that is subtracted from the
/// raw elapsed time. Stopping freezes the reported value.
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    started_at: Option<Instant>,
    paused_at: Option<Instant>,
    paused_total: Duration,
    stopped_at: Option<Instant>,
}

impl SessionClock {
    /// Creates a clock that has not started yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the clock. Has no effect if it is already running.
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Checks if the clock has been started.
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Checks if the clock is currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Checks if the clock has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }

    /// Freezes time accrual until [`resume`](Self::resume) is called.
    pub fn pause(&mut self, now: Instant) {
        if self.is_started() && !self.is_paused() && !self.is_stopped() {
            self.paused_at = Some(now);
        }
    }

    /// Resumes time accrual, discounting the time spent paused.
    pub fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(paused_at);
        }
    }

    /// Stops the clock permanently. A paused clock stops at its pause instant.
    pub fn stop(&mut self, now: Instant) {
        if self.is_stopped() || !self.is_started() {
            return;
        }
        let end = self.paused_at.take().unwrap_or(now);
        self.stopped_at = Some(end);
    }

    /// Gets the elapsed running time.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let Some(started_at) = self.started_at else {
            return Duration::ZERO;
        };

        let end = self.stopped_at.or(self.paused_at).unwrap_or(now);
        end.saturating_duration_since(started_at)
            .saturating_sub(self.paused_total)
    }

    /// Gets the elapsed running time in whole seconds.
    pub fn elapsed_seconds(&self, now: Instant) -> u64 {
        self.elapsed(now).as_secs()
    }

    /// Returns the clock to its initial, unstarted state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
