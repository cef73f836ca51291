//! # Secret Type Aliases
//!
//! Secret-carrying types used by the derivation engine and sessions, built on
//! [`secrecy`](https://docs.rs/secrecy). Every wrapper redacts itself in
//! `Debug` output and zeroizes its heap buffer on drop.
//!
//! ## Type Categories
//!
//! ### HMAC Primitives
//! - [`HmacSha1`] - legacy PRF, 20-byte blocks
//! - [`HmacSha256`] - 32-byte blocks
//! - [`HmacSha512`] - 64-byte blocks
//!
//! ### Boxed Secrets
//! - [`PasswordString`] - master password
//! - [`SaltBytes`] - salt (usually the site name or account identifier)
//! - [`DerivedKey`] - raw PBKDF2 output
//! - [`GeneratedPassword`] - encoded and truncated output
//!
//! All wrappers require an explicit `.expose_secret()` ([`ExposeSecret`]) to
//! reach the data.

pub use secrecy::ExposeSecret;
use secrecy::SecretBox;
use zeroize::Zeroize;

// ─────────────────────────────────────────────────────────────────────────────
// HMAC primitives
// ─────────────────────────────────────────────────────────────────────────────
use hmac::Hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

pub type HmacSha1 = Hmac<Sha1>;
pub type HmacSha256 = Hmac<Sha256>;
pub type HmacSha512 = Hmac<Sha512>;

// ─────────────────────────────────────────────────────────────────────────────
// Boxed secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type PasswordString = SecretBox<String>;
pub type SaltBytes = SecretBox<Vec<u8>>;
pub type DerivedKey = SecretBox<Vec<u8>>;
pub type GeneratedPassword = SecretBox<String>;

/// Move `value` into a zeroize-on-drop box.
#[inline]
pub(crate) fn seal<T: Zeroize>(value: T) -> SecretBox<T> {
    SecretBox::new(Box::new(value))
}
