//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! Fallible operations return [`Result<T, PassforgeError>`](PassforgeError).
//!
//! Cancellation is deliberately absent from this enum: a cancelled derivation
//! is reported as [`Outcome::Cancelled`](crate::Outcome::Cancelled), never as an error.

use thiserror::Error;

/// The error type for all Passforge operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PassforgeError {
    /// A derivation parameter was rejected before any work started.
    ///
    /// Raised for:
    /// - Empty password
    /// - Empty salt
    /// - Requested key longer than [`MAX_DERIVED_KEY_BYTES`](crate::consts::MAX_DERIVED_KEY_BYTES)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested pseudorandom function is not available.
    ///
    /// The contained value is the name that failed to resolve.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The injected clock could not produce a reading.
    ///
    /// Sessions never propagate this variant; they log it and leave the
    /// affected timestamp unset so elapsed-time queries return `NaN`.
    #[error("Clock unavailable: {0}")]
    ClockUnavailable(String),

    /// A background derivation worker died before delivering its result.
    #[error("Worker error: {0}")]
    Worker(String),
}

impl From<&'static str> for PassforgeError {
    fn from(msg: &'static str) -> Self {
        PassforgeError::InvalidParameter(msg.to_string())
    }
}
