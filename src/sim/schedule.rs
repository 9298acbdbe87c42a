//! Wall-clock intervals advanced from inside the frame loop
//!
//! The elapsed-time clock and the rock spawner both run on these instead of
//! separate host timers, so their firings always land before the frame's
//! update pass and stop the moment a level ends.

use serde::Serialize;

/// A cancellable repeating interval
#[derive(Debug, Clone, Serialize)]
pub struct Interval {
    period_ms: f64,
    elapsed_ms: f64,
    active: bool,
}

impl Interval {
    /// Create a cancelled interval with the given period
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
            active: false,
        }
    }

    /// (Re)start counting from zero
    pub fn arm(&mut self) {
        self.elapsed_ms = 0.0;
        self.active = true;
    }

    /// Stop firing until re-armed
    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed_ms = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Advance by `dt_ms` and return how many periods completed
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.active || !(dt_ms > 0.0) {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let mut fired = 0;
        while self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            fired += 1;
        }
        fired
    }
}
