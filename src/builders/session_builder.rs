//! src/builders/session_builder.rs
//! Fluent construction of a [`DerivationSession`].

use crate::clock::{MonotonicClock, SystemClock};
use crate::consts::{DEFAULT_ITERATIONS, DEFAULT_PASSWORD_LENGTH, DEFAULT_PRF};
use crate::crypto::hmac::Prf;
use crate::encoding::OutputEncoding;
use crate::error::PassforgeError;
use crate::session::{DerivationParameters, DerivationSession};

/// Derivation session builder
///
/// Defaults: [`DEFAULT_ITERATIONS`] rounds of HMAC-SHA1, a
/// [`DEFAULT_PASSWORD_LENGTH`]-character base-64 password, timed by [`SystemClock`].
///
/// # Thread Safety
///
/// The builder holds no secrets; password and salt are supplied only to
/// [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SessionBuilder<C = SystemClock> {
    iterations: i64,
    length: i64,
    prf: Prf,
    encoding: OutputEncoding,
    clock: C,
}

impl SessionBuilder<SystemClock> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            iterations: i64::from(DEFAULT_ITERATIONS),
            length: DEFAULT_PASSWORD_LENGTH as i64,
            prf: DEFAULT_PRF,
            encoding: OutputEncoding::default(),
            clock: SystemClock::new(),
        }
    }
}

impl Default for SessionBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SessionBuilder<C> {
    /// Iteration count; values ≤ 0 are clamped to 1 at build time.
    #[must_use]
    pub fn with_iterations(mut self, iterations: i64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Output length in encoded characters; values ≤ 0 are clamped to 1 at build time.
    #[must_use]
    pub fn with_length(mut self, length: i64) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn with_prf(mut self, prf: Prf) -> Self {
        self.prf = prf;
        self
    }

    /// Resolve the PRF by name (`"HmacSHA1"`, `"hmac-sha256"`, ...).
    pub fn with_prf_name(self, name: &str) -> Result<Self, PassforgeError> {
        Ok(self.with_prf(name.parse()?))
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Swap the timing source, e.g. for a [`ScriptedClock`](crate::clock::ScriptedClock) in tests.
    #[must_use]
    pub fn with_clock<D: MonotonicClock>(self, clock: D) -> SessionBuilder<D> {
        SessionBuilder {
            iterations: self.iterations,
            length: self.length,
            prf: self.prf,
            encoding: self.encoding,
            clock,
        }
    }

    #[must_use]
    pub const fn iterations(&self) -> i64 {
        self.iterations
    }

    #[must_use]
    pub const fn length(&self) -> i64 {
        self.length
    }
}

impl<C: MonotonicClock> SessionBuilder<C> {
    /// Validate inputs and create the session.
    ///
    /// # Errors
    ///
    /// [`PassforgeError::InvalidParameter`] for an empty password or salt.
    pub fn build(
        self,
        password: impl Into<String>,
        salt: impl Into<Vec<u8>>,
    ) -> Result<DerivationSession<C>, PassforgeError> {
        let params = DerivationParameters::new(password, salt, self.iterations, self.length)?
            .with_prf(self.prf)
            .with_encoding(self.encoding);
        DerivationSession::with_clock(params, self.clock)
    }
}
