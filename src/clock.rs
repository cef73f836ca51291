//! src/clock.rs
//! Injectable monotonic clock used for derivation timing.
//!
//! Sessions never call the system clock directly; they read a
//! [`MonotonicClock`], so tests can script exact timestamps.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::error::PassforgeError;

/// Millisecond clock with an arbitrary epoch. Readings must never decrease.
pub trait MonotonicClock: Send + Sync {
    /// Current reading in milliseconds, or [`PassforgeError::ClockUnavailable`].
    fn now_millis(&self) -> Result<u64, PassforgeError>;
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for Arc<C> {
    fn now_millis(&self) -> Result<u64, PassforgeError> {
        (**self).now_millis()
    }
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn now_millis(&self) -> Result<u64, PassforgeError> {
        (**self).now_millis()
    }
}

/// Process-local monotonic clock backed by [`Instant`].
///
/// The epoch is the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    #[inline]
    fn now_millis(&self) -> Result<u64, PassforgeError> {
        let elapsed = self.origin.elapsed().as_millis();
        u64::try_from(elapsed)
            .map_err(|_| PassforgeError::ClockUnavailable("monotonic clock overflowed".into()))
    }
}

/// Deterministic clock that replays a fixed script of readings.
///
/// Once the script runs out, the last reading repeats. A clock built from an
/// empty script reports [`PassforgeError::ClockUnavailable`].
#[derive(Debug, Default)]
pub struct ScriptedClock {
    state: Mutex<Script>,
}

#[derive(Debug, Default)]
struct Script {
    pending: VecDeque<u64>,
    last: Option<u64>,
}

impl ScriptedClock {
    pub fn new(readings: impl IntoIterator<Item = u64>) -> Self {
        Self {
            state: Mutex::new(Script {
                pending: readings.into_iter().collect(),
                last: None,
            }),
        }
    }

    /// Append more readings to the end of the script.
    pub fn push(&self, reading: u64) {
        self.script().pending.push_back(reading);
    }

    /// Readings not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script().pending.len()
    }

    // A panicking test thread must not lose or hide scripted readings.
    fn script(&self) -> MutexGuard<'_, Script> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MonotonicClock for ScriptedClock {
    fn now_millis(&self) -> Result<u64, PassforgeError> {
        let mut script = self.script();

        let reading = match script.pending.pop_front() {
            Some(next) => next,
            None => script
                .last
                .ok_or_else(|| PassforgeError::ClockUnavailable("clock script is empty".into()))?,
        };
        script.last = Some(reading);
        Ok(reading)
    }
}

/// Clock that never produces a reading.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingClock;

impl MonotonicClock for FailingClock {
    fn now_millis(&self) -> Result<u64, PassforgeError> {
        Err(PassforgeError::ClockUnavailable("no time source".into()))
    }
}
