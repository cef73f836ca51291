// src/crypto/mod.rs

//! Low-level crypto primitives: the HMAC PRF and the PBKDF2 engine built on it.
//!
//! HMAC types are defined in `aliases.rs`; see the crate root for re-exports.

pub mod hmac;
pub mod kdf;
