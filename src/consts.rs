//! # Constants
//!
//! Defaults and limits for password forging: iteration counts, output length,
//! cancellation granularity and the initial speed estimate used for ETA display.

use crate::crypto::hmac::Prf;

/// Minimum PBKDF2 iteration count. Smaller requests are clamped up to this value.
pub const PBKDF2_MIN_ITER: u32 = 1;

/// Default iteration count offered to callers that do not pick one.
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// Default length of the generated password, in encoded characters.
pub const DEFAULT_PASSWORD_LENGTH: usize = 20;

/// Minimum output length. Smaller requests are clamped up to this value.
pub const MIN_OUTPUT_LENGTH: usize = 1;

/// Legacy-compatible pseudorandom function (HMAC-SHA1, 20-byte blocks).
pub const DEFAULT_PRF: Prf = Prf::HmacSha1;

/// Number of PRF iterations between two cancellation checks inside one block.
///
/// With HMAC-SHA1 this keeps cancellation latency well under a millisecond
/// while adding no measurable overhead to the hot loop.
pub const CANCEL_CHECK_INTERVAL: u32 = 1_024;

/// Iterations-per-second assumed before any derivation has been timed.
pub const DEFAULT_ITERATION_SPEED: u32 = 2_000;

/// Largest derived key the engine will allocate, in bytes (1 MiB).
///
/// RFC 2898 allows `(2^32 - 1) * hLen` bytes, tens of gigabytes for SHA-1.
/// Requests above this cap are rejected as invalid instead of aborting on
/// allocation failure. It keeps the block counter far below `u32::MAX`.
pub const MAX_DERIVED_KEY_BYTES: usize = 1 << 20;
