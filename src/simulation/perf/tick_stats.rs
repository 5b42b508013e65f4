use serde::Serialize;

/// Statistics for one tick, sent to the presentation side with its snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    pub frame: u64,
    /// Movable particles evaluated by the stepper.
    pub particles_processed: u32,
    pub explosions: u32,
    pub step_ms: f64,
    /// Latest completed rate window, 0 until the first window closes.
    pub observed_rate: u32,
    /// Set when this tick closed a rate window.
    #[serde(skip)]
    pub rate_window_closed: bool,
}

/// Observed ticks per second over a fixed window.
#[derive(Debug, Clone, PartialEq)]
pub struct RateCounter {
    window_ms: f64,
    window_start_ms: f64,
    ticks: u32,
    observed: u32,
}

impl RateCounter {
    pub fn new(window_ms: f64, now_ms: f64) -> Self {
        Self {
            window_ms,
            window_start_ms: now_ms,
            ticks: 0,
            observed: 0,
        }
    }

    /// Start a fresh window. The last observed rate is kept.
    pub fn reset(&mut self, now_ms: f64) {
        self.window_start_ms = now_ms;
        self.ticks = 0;
    }

    /// Count one tick. Returns the new rate when this tick closes the window.
    pub fn record(&mut self, now_ms: f64) -> Option<u32> {
        self.ticks += 1;
        let elapsed = now_ms - self.window_start_ms;
        if elapsed < self.window_ms {
            return None;
        }
        let rate = (self.ticks as f64 * 1000.0 / elapsed).round() as u32;
        self.observed = rate;
        self.reset(now_ms);
        Some(rate)
    }

    #[inline]
    pub fn observed(&self) -> u32 {
        self.observed
    }
}
