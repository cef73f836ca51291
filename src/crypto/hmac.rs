//! src/crypto/hmac.rs
//! HMAC primitive and pseudorandom-function identifiers.
//!
//! The HMAC construction itself comes from the `hmac` crate; this module maps a
//! runtime [`Prf`] choice onto the concrete `Hmac<D>` types from [`crate::aliases`].

use std::fmt;
use std::str::FromStr;

use crate::aliases::{HmacSha1, HmacSha256, HmacSha512};
use crate::error::PassforgeError;
use hmac::digest::KeyInit;
use hmac::Mac;

/// Pseudorandom function used by PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Prf {
    /// HMAC-SHA1, 20-byte output. Matches legacy derivations.
    #[default]
    HmacSha1,
    /// HMAC-SHA256, 32-byte output.
    HmacSha256,
    /// HMAC-SHA512, 64-byte output.
    HmacSha512,
}

impl Prf {
    /// Every supported PRF, weakest first.
    pub const ALL: [Prf; 3] = [Prf::HmacSha1, Prf::HmacSha256, Prf::HmacSha512];

    /// Digest size in bytes (`hLen` in RFC 2898).
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Prf::HmacSha1 => 20,
            Prf::HmacSha256 => 32,
            Prf::HmacSha512 => 64,
        }
    }

    /// Canonical name, in the style of JCE algorithm identifiers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Prf::HmacSha1 => "HmacSHA1",
            Prf::HmacSha256 => "HmacSHA256",
            Prf::HmacSha512 => "HmacSHA512",
        }
    }
}

impl fmt::Display for Prf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Prf {
    type Err = PassforgeError;

    /// Case-insensitive; `-`, `_` and spaces are ignored, so `HMACSHA1`,
    /// `hmac-sha1` and `HmacSHA1` all resolve to [`Prf::HmacSha1`].
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "hmacsha1" | "sha1" => Ok(Prf::HmacSha1),
            "hmacsha256" | "sha256" => Ok(Prf::HmacSha256),
            "hmacsha512" | "sha512" => Ok(Prf::HmacSha512),
            _ => Err(PassforgeError::UnsupportedAlgorithm(name.to_string())),
        }
    }
}

/// Compute `HMAC(key, message)` with the selected hash.
///
/// Pure function: no shared state, safe to call from any thread. Keys of any
/// length are accepted (over-long keys are hashed, short keys zero-padded, as
/// the HMAC construction specifies).
pub fn hmac(prf: Prf, key: &[u8], message: &[u8]) -> Result<Vec<u8>, PassforgeError> {
    match prf {
        Prf::HmacSha1 => mac_once::<HmacSha1>(key, message),
        Prf::HmacSha256 => mac_once::<HmacSha256>(key, message),
        Prf::HmacSha512 => mac_once::<HmacSha512>(key, message),
    }
}

/// Resolve `prf_name` and compute the HMAC in one step.
pub fn hmac_named(prf_name: &str, key: &[u8], message: &[u8]) -> Result<Vec<u8>, PassforgeError> {
    hmac(prf_name.parse()?, key, message)
}

/// Key an HMAC instance; shared by the one-shot path and the PBKDF2 engine.
#[inline]
pub(crate) fn keyed<M>(key: &[u8]) -> Result<M, PassforgeError>
where
    M: Mac + KeyInit,
{
    <M as Mac>::new_from_slice(key)
        .map_err(|e| PassforgeError::InvalidParameter(format!("HMAC key rejected: {e}")))
}

#[inline]
fn mac_once<M>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, PassforgeError>
where
    M: Mac + KeyInit,
{
    let mut mac = keyed::<M>(key)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
