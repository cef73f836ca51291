//! src/encoding.rs
//! Printable encodings for derived keys.
//!
//! The requested output length is measured in encoded characters. The engine
//! is asked for just enough bytes to cover it, and the encoded string is then
//! cut to exactly that many characters. The cut is not aligned to encoding
//! groups: with base-64 the last character may carry only part of a byte.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;

use crate::error::PassforgeError;

/// How a derived key is turned into the generated password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputEncoding {
    /// Standard base-64 alphabet (`A-Z a-z 0-9 + /`), truncated.
    #[default]
    Base64,
    /// URL-safe base-64 alphabet (`-` and `_` instead of `+` and `/`), truncated.
    Base64Url,
    /// Lowercase hex, truncated.
    Hex,
    /// Length counts bytes; the password is the full hex dump of the key.
    Raw,
}

impl OutputEncoding {
    /// Number of key bytes the engine must produce for `length` output units.
    #[must_use]
    pub const fn key_len_for(self, length: usize) -> usize {
        match self {
            OutputEncoding::Base64 | OutputEncoding::Base64Url => {
                length.saturating_mul(3).div_ceil(4)
            }
            OutputEncoding::Hex => length.div_ceil(2),
            OutputEncoding::Raw => length,
        }
    }

    /// Encode `key` and cut it to `length` characters (except [`Raw`](Self::Raw)).
    #[must_use]
    pub fn encode(self, key: &[u8], length: usize) -> String {
        let mut encoded = match self {
            OutputEncoding::Base64 => STANDARD_NO_PAD.encode(key),
            OutputEncoding::Base64Url => URL_SAFE_NO_PAD.encode(key),
            OutputEncoding::Hex | OutputEncoding::Raw => hex::encode(key),
        };
        if self != OutputEncoding::Raw {
            // All alphabets are ASCII, so a byte index is a char index.
            encoded.truncate(length);
        }
        encoded
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            OutputEncoding::Base64 => "base64",
            OutputEncoding::Base64Url => "base64url",
            OutputEncoding::Hex => "hex",
            OutputEncoding::Raw => "raw",
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputEncoding {
    type Err = PassforgeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "base64" | "b64" => Ok(OutputEncoding::Base64),
            "base64url" | "url" => Ok(OutputEncoding::Base64Url),
            "hex" => Ok(OutputEncoding::Hex),
            "raw" | "bytes" => Ok(OutputEncoding::Raw),
            _ => Err(PassforgeError::InvalidParameter(format!(
                "unknown output encoding: {name}"
            ))),
        }
    }
}
