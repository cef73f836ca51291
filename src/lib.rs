// src/lib.rs

pub mod aliases;
pub mod builders;
pub mod cancel;
pub mod clock;
pub mod consts;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod outcome;
pub mod session;
pub mod speed;
pub mod worker;

// High-level API
pub use aliases::ExposeSecret;
pub use builders::session_builder::SessionBuilder;
pub use cancel::CancelToken;
pub use clock::{FailingClock, MonotonicClock, ScriptedClock, SystemClock};
pub use encoding::OutputEncoding;
pub use error::PassforgeError;
pub use outcome::Outcome;
pub use session::{DerivationParameters, DerivationSession};
pub use speed::IterationSpeed;
pub use worker::{spawn_derivation, spawn_with_token, DerivationHandle, DerivationResult};

#[cfg(feature = "async")]
pub use worker::derive_async;

// Low-level primitives, for callers that manage timing and encoding themselves
pub use crypto::hmac::{hmac, hmac_named, Prf};
pub use crypto::kdf::pbkdf2::{derive_secure_pbkdf2_key, Pbkdf2Engine};
