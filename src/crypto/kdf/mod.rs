//! # Key Derivation Functions (KDF)
//!
//! - [`pbkdf2`] - PBKDF2 over HMAC-SHA1/256/512 with cooperative cancellation
//!
//! Most callers want [`DerivationSession`](crate::DerivationSession), which adds
//! parameter clamping, output encoding and timing on top of this engine.

pub mod pbkdf2;
