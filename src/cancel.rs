//! src/cancel.rs
//! Cooperative cancellation flag shared between a caller and a running derivation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared, cloneable cancellation flag.
///
/// Derivation is a tight CPU loop with no suspension points, so it polls this
/// token at block boundaries and every
/// [`CANCEL_CHECK_INTERVAL`](crate::consts::CANCEL_CHECK_INTERVAL) iterations.
/// Cancelling is sticky: once set, the flag never clears.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
