//! src/session.rs
//! One password-forging request: validated parameters, a sized engine,
//! start/end timestamps and the last result.
//!
//! A session is a plain synchronous object. Run [`DerivationSession::generate_password`]
//! on a worker thread (see [`crate::worker`]) and poll
//! [`DerivationSession::current_elapsed_seconds`] from anywhere else; the
//! timestamps are atomics, so the session can sit behind an `Arc` while it runs.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::aliases::{
    seal, DerivedKey, ExposeSecret, GeneratedPassword, PasswordString, SaltBytes,
};
use crate::cancel::CancelToken;
use crate::clock::{MonotonicClock, SystemClock};
use crate::consts::{DEFAULT_PRF, MIN_OUTPUT_LENGTH, PBKDF2_MIN_ITER};
use crate::crypto::hmac::Prf;
use crate::crypto::kdf::pbkdf2::Pbkdf2Engine;
use crate::encoding::OutputEncoding;
use crate::error::PassforgeError;
use crate::outcome::Outcome;

/// Timestamp slot value meaning "not recorded".
const UNSET: u64 = u64::MAX;

/// Clamp a caller-supplied iteration count into `1..=u32::MAX`.
///
/// Non-positive counts become `1` rather than an error.
#[inline]
#[must_use]
pub fn clamp_iterations(iterations: i64) -> u32 {
    u32::try_from(iterations.max(i64::from(PBKDF2_MIN_ITER))).unwrap_or(u32::MAX)
}

/// Clamp a caller-supplied output length to at least `1`.
#[inline]
#[must_use]
pub fn clamp_length(length: i64) -> usize {
    if length < MIN_OUTPUT_LENGTH as i64 {
        MIN_OUTPUT_LENGTH
    } else {
        usize::try_from(length).unwrap_or(usize::MAX)
    }
}

/// Inputs of one derivation. Immutable once built.
pub struct DerivationParameters {
    password: PasswordString,
    salt: SaltBytes,
    iterations: u32,
    length: usize,
    prf: Prf,
    encoding: OutputEncoding,
}

impl DerivationParameters {
    /// Validate and clamp.
    ///
    /// # Errors
    ///
    /// [`PassforgeError::InvalidParameter`] if `password` or `salt` is empty.
    /// Non-positive `iterations` / `length` are silently raised to `1`.
    pub fn new(
        password: impl Into<String>,
        salt: impl Into<Vec<u8>>,
        iterations: i64,
        length: i64,
    ) -> Result<Self, PassforgeError> {
        let password = password.into();
        let salt = salt.into();

        if password.is_empty() {
            return Err(PassforgeError::InvalidParameter("Password is empty".into()));
        }
        if salt.is_empty() {
            return Err(PassforgeError::InvalidParameter("Salt is empty".into()));
        }

        Ok(Self {
            password: seal(password),
            salt: seal(salt),
            iterations: clamp_iterations(iterations),
            length: clamp_length(length),
            prf: DEFAULT_PRF,
            encoding: OutputEncoding::default(),
        })
    }

    #[must_use]
    pub fn with_prf(mut self, prf: Prf) -> Self {
        self.prf = prf;
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Output length in characters (bytes for [`OutputEncoding::Raw`]).
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub const fn prf(&self) -> Prf {
        self.prf
    }

    #[must_use]
    pub const fn encoding(&self) -> OutputEncoding {
        self.encoding
    }

    /// Bytes the engine must produce to cover [`length`](Self::length).
    #[must_use]
    pub const fn key_len(&self) -> usize {
        self.encoding.key_len_for(self.length)
    }
}

impl fmt::Debug for DerivationParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationParameters")
            .field("password", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .field("iterations", &self.iterations)
            .field("length", &self.length)
            .field("prf", &self.prf)
            .field("encoding", &self.encoding)
            .finish()
    }
}

#[derive(Default)]
struct Results {
    key: Option<DerivedKey>,
    password: Option<GeneratedPassword>,
}

/// A single derivation request with timing instrumentation.
///
/// # Thread Safety
///
/// `Send + Sync`: derive on one thread while another reads
/// [`current_elapsed_seconds`](Self::current_elapsed_seconds).
pub struct DerivationSession<C: MonotonicClock = SystemClock> {
    params: DerivationParameters,
    engine: Pbkdf2Engine,
    clock: C,
    start: AtomicU64,
    end: AtomicU64,
    results: Mutex<Results>,
}

impl DerivationSession<SystemClock> {
    /// Session with default PRF and encoding, timed by the process clock.
    pub fn new(
        password: impl Into<String>,
        salt: impl Into<Vec<u8>>,
        iterations: i64,
        length: i64,
    ) -> Result<Self, PassforgeError> {
        let params = DerivationParameters::new(password, salt, iterations, length)?;
        Self::with_clock(params, SystemClock::new())
    }
}

impl<C: MonotonicClock> DerivationSession<C> {
    /// Session over already-validated parameters and an explicit clock.
    ///
    /// # Errors
    ///
    /// [`PassforgeError::InvalidParameter`] if the requested length needs more
    /// key material than PBKDF2 can produce with the chosen PRF.
    pub fn with_clock(params: DerivationParameters, clock: C) -> Result<Self, PassforgeError> {
        let engine = Pbkdf2Engine::new(params.prf, params.iterations, params.key_len())?;

        debug!(
            prf = %params.prf,
            iterations = params.iterations,
            length = params.length,
            encoding = %params.encoding,
            key_len = engine.key_len(),
            "derivation session created"
        );

        Ok(Self {
            params,
            engine,
            clock,
            start: AtomicU64::new(UNSET),
            end: AtomicU64::new(UNSET),
            results: Mutex::new(Results::default()),
        })
    }

    /// Run PBKDF2 on the calling thread and return the raw key.
    ///
    /// The start timestamp is taken just before the engine runs and the end
    /// timestamp just after it completes. A cancelled run leaves the end unset
    /// and does not touch previously stored results.
    pub fn derive_key(&self, cancel: &CancelToken) -> Result<Outcome<DerivedKey>, PassforgeError> {
        self.start.store(UNSET, Ordering::Release);
        self.end.store(UNSET, Ordering::Release);

        debug!(
            iterations = self.params.iterations,
            key_len = self.engine.key_len(),
            "derivation started"
        );
        self.stamp(&self.start);

        let outcome = self.engine.derive(
            self.params.password.expose_secret().as_bytes(),
            self.params.salt.expose_secret(),
            cancel,
        )?;

        let key = match outcome {
            Outcome::Complete(key) => key,
            Outcome::Cancelled => {
                debug!("derivation cancelled");
                return Ok(Outcome::Cancelled);
            }
        };

        self.stamp(&self.end);
        debug!(elapsed = self.elapsed_seconds(), "derivation finished");

        let copy = seal(key.expose_secret().clone());
        self.results().key = Some(key);
        Ok(Outcome::Complete(copy))
    }

    /// [`derive_key`](Self::derive_key), then encode and truncate to the requested length.
    pub fn generate_password(
        &self,
        cancel: &CancelToken,
    ) -> Result<Outcome<GeneratedPassword>, PassforgeError> {
        let key = match self.derive_key(cancel)? {
            Outcome::Complete(key) => key,
            Outcome::Cancelled => return Ok(Outcome::Cancelled),
        };

        let encoded = self
            .params
            .encoding
            .encode(key.expose_secret(), self.params.length);
        let copy = seal(encoded.clone());
        self.results().password = Some(seal(encoded));
        Ok(Outcome::Complete(copy))
    }

    /// `(end - start) / 1000`, or `NaN` unless both timestamps are recorded.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        match (self.recorded(&self.start), self.recorded(&self.end)) {
            (Some(start), Some(end)) => millis_to_seconds(end.saturating_sub(start)),
            _ => f64::NAN,
        }
    }

    /// `(now - start) / 1000`, or `NaN` if no derivation has started or the
    /// clock cannot be read. Valid while the derivation is still running.
    #[must_use]
    pub fn current_elapsed_seconds(&self) -> f64 {
        let Some(start) = self.recorded(&self.start) else {
            return f64::NAN;
        };
        match self.clock.now_millis() {
            Ok(now) => millis_to_seconds(now.saturating_sub(start)),
            Err(e) => {
                warn!(error = %e, "clock unavailable while polling elapsed time");
                f64::NAN
            }
        }
    }

    /// Measured speed of the last completed derivation, `NaN` if unknown.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        let elapsed = self.elapsed_seconds();
        if elapsed.is_finite() && elapsed > 0.0 {
            f64::from(self.params.iterations) / elapsed
        } else {
            f64::NAN
        }
    }

    /// Last generated password, if any derivation has completed through
    /// [`generate_password`](Self::generate_password).
    #[must_use]
    pub fn generated_password(&self) -> Option<GeneratedPassword> {
        self.results()
            .password
            .as_ref()
            .map(|p| seal(p.expose_secret().clone()))
    }

    /// Last raw key, if any derivation has completed.
    #[must_use]
    pub fn derived_key(&self) -> Option<DerivedKey> {
        self.results()
            .key
            .as_ref()
            .map(|k| seal(k.expose_secret().clone()))
    }

    #[must_use]
    pub const fn parameters(&self) -> &DerivationParameters {
        &self.params
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.params.iterations
    }

    #[must_use]
    pub const fn length(&self) -> usize {
        self.params.length
    }

    #[must_use]
    pub const fn key_len(&self) -> usize {
        self.engine.key_len()
    }

    #[must_use]
    pub const fn prf(&self) -> Prf {
        self.params.prf
    }

    #[must_use]
    pub const fn encoding(&self) -> OutputEncoding {
        self.params.encoding
    }

    fn stamp(&self, slot: &AtomicU64) {
        match self.clock.now_millis() {
            Ok(now) => slot.store(now.min(UNSET - 1), Ordering::Release),
            Err(e) => warn!(error = %e, "clock unavailable; elapsed time will read NaN"),
        }
    }

    fn recorded(&self, slot: &AtomicU64) -> Option<u64> {
        match slot.load(Ordering::Acquire) {
            UNSET => None,
            millis => Some(millis),
        }
    }

    fn results(&self) -> MutexGuard<'_, Results> {
        self.results.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: MonotonicClock> fmt::Debug for DerivationSession<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationSession")
            .field("params", &self.params)
            .field("start", &self.recorded(&self.start))
            .field("end", &self.recorded(&self.end))
            .finish_non_exhaustive()
    }
}

#[inline]
fn millis_to_seconds(millis: u64) -> f64 {
    millis as f64 / 1000.0
}
