//! Fixed-rate tick scheduler.
//!
//! A clock-driven state machine rather than a timer: the owner passes the
//! current time to [`TickScheduler::poll`] and waits until
//! [`TickScheduler::next_deadline`] between polls. The native actor and the
//! JS worker loop both drive it this way.

use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulerState {
    Idle,
    Running {
        interval_ms: f64,
        next_due_ms: f64,
        /// Bumped on every (re)start so a stale deadline is never honoured.
        generation: u64,
    },
}

/// A tick that came due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDue {
    pub generation: u64,
    pub due_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickScheduler {
    state: SchedulerState,
    rate: f64,
    generation: u64,
}

/// Longest accepted tick interval, so the slowest rate is one tick a minute.
pub const MAX_INTERVAL_MS: f64 = 60_000.0;

/// A rate is usable when it is finite and ticks at least once per
/// [`MAX_INTERVAL_MS`].
pub fn validate_rate(rate: f64) -> SimResult<f64> {
    if rate.is_finite() && rate >= 1000.0 / MAX_INTERVAL_MS {
        Ok(rate)
    } else {
        Err(SimError::InvalidRate(rate))
    }
}

impl TickScheduler {
    /// Idle scheduler remembering `rate` for the next start.
    pub fn new(rate: f64) -> Self {
        Self {
            state: SchedulerState::Idle,
            rate,
            generation: 0,
        }
    }

    /// Arm the timer at `rate` ticks per second. Any armed timer is replaced;
    /// on error the previous state is kept.
    pub fn start(&mut self, rate: f64, now_ms: f64) -> SimResult<()> {
        let rate = validate_rate(rate)?;
        self.rate = rate;
        self.generation += 1;
        let interval_ms = 1000.0 / rate;
        self.state = SchedulerState::Running {
            interval_ms,
            next_due_ms: now_ms + interval_ms,
            generation: self.generation,
        };
        Ok(())
    }

    /// Change the rate. A running timer restarts from `now_ms`; pending time
    /// is dropped.
    pub fn set_rate(&mut self, rate: f64, now_ms: f64) -> SimResult<()> {
        let rate = validate_rate(rate)?;
        if self.is_running() {
            self.start(rate, now_ms)
        } else {
            self.rate = rate;
            Ok(())
        }
    }

    /// Re-arm at the current rate. No effect while idle.
    pub fn restart(&mut self, now_ms: f64) {
        if self.is_running() {
            // rate was validated when stored
            let _ = self.start(self.rate, now_ms);
        }
    }

    pub fn stop(&mut self) {
        self.state = SchedulerState::Idle;
    }

    /// At most one due tick per call. The next deadline moves one interval
    /// on, or to `now + interval` if the caller fell behind.
    pub fn poll(&mut self, now_ms: f64) -> Option<TickDue> {
        let SchedulerState::Running { interval_ms, next_due_ms, generation } = self.state else {
            return None;
        };
        if now_ms < next_due_ms {
            return None;
        }
        let mut next = next_due_ms + interval_ms;
        if next <= now_ms {
            next = now_ms + interval_ms;
        }
        self.state = SchedulerState::Running { interval_ms, next_due_ms: next, generation };
        Some(TickDue { generation, due_ms: next_due_ms })
    }

    pub fn next_deadline(&self) -> Option<f64> {
        match self.state {
            SchedulerState::Running { next_due_ms, .. } => Some(next_due_ms),
            SchedulerState::Idle => None,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running { .. })
    }

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
