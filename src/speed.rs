//! src/speed.rs
//! Iterations-per-second estimate for "estimated time" displays.
//!
//! Storing the estimate between runs is up to the caller; this type only
//! folds new measurements into it.

use crate::clock::MonotonicClock;
use crate::consts::DEFAULT_ITERATION_SPEED;
use crate::session::DerivationSession;

/// Running estimate of PBKDF2 throughput on this device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationSpeed {
    per_second: u32,
}

impl IterationSpeed {
    /// Start from a previously saved figure (at least 1 it/s).
    #[must_use]
    pub fn new(per_second: u32) -> Self {
        Self {
            per_second: per_second.max(1),
        }
    }

    #[must_use]
    pub const fn per_second(&self) -> u32 {
        self.per_second
    }

    /// Fold a measurement in: the new estimate is the mean of the previous
    /// estimate and this run's speed. Unusable timings leave it unchanged.
    pub fn record(&mut self, iterations: u32, seconds: f64) -> u32 {
        if !seconds.is_finite() || seconds <= 0.0 {
            return self.per_second;
        }
        let latest = (f64::from(iterations) / seconds).min(f64::from(u32::MAX)) as u64;
        let averaged = (latest + u64::from(self.per_second)) / 2;
        self.per_second = u32::try_from(averaged).unwrap_or(u32::MAX).max(1);
        self.per_second
    }

    /// Fold in the last completed run of `session`.
    pub fn record_session<C: MonotonicClock>(&mut self, session: &DerivationSession<C>) -> u32 {
        self.record(session.iterations(), session.elapsed_seconds())
    }

    /// Expected wall-clock seconds for `iterations` rounds.
    #[must_use]
    pub fn estimated_seconds(&self, iterations: u32) -> f64 {
        f64::from(iterations) / f64::from(self.per_second)
    }
}

impl Default for IterationSpeed {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATION_SPEED)
    }
}
