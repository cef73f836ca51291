//! src/crypto/kdf/pbkdf2.rs
//! PBKDF2 (RFC 2898 §5.2) over a selectable HMAC, with cooperative cancellation.
//!
//! Each output block is `T_i = U_1 ^ U_2 ^ ... ^ U_c` where
//! `U_1 = PRF(P, S || BE32(i))` and `U_j = PRF(P, U_{j-1})`.
//! Blocks are independent; iterations within a block are strictly sequential.

use crate::aliases::{seal, DerivedKey, HmacSha1, HmacSha256, HmacSha512};
use crate::cancel::CancelToken;
use crate::consts::{CANCEL_CHECK_INTERVAL, MAX_DERIVED_KEY_BYTES, PBKDF2_MIN_ITER};
use crate::crypto::hmac::{keyed, Prf};
use crate::error::PassforgeError;
use crate::outcome::Outcome;

use hmac::digest::KeyInit;
use hmac::Mac;
use tracing::trace;
use zeroize::{Zeroize, Zeroizing};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// PBKDF2 engine sized for one output length.
///
/// # Thread Safety
///
/// The engine holds only its configuration, so it is `Send + Sync` and may be
/// shared freely. Every call to [`derive`](Self::derive) is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Engine {
    prf: Prf,
    iterations: u32,
    key_len: usize,
}

impl Pbkdf2Engine {
    /// Build an engine producing `key_len` bytes with `iterations` PRF rounds per block.
    ///
    /// Rejects zero iterations, a zero-length key, and keys longer than
    /// [`MAX_DERIVED_KEY_BYTES`].
    pub fn new(prf: Prf, iterations: u32, key_len: usize) -> Result<Self, PassforgeError> {
        if iterations < PBKDF2_MIN_ITER {
            return Err(PassforgeError::InvalidParameter(
                "PBKDF2 iterations must be ≥1".into(),
            ));
        }
        check_key_len(key_len)?;
        Ok(Self {
            prf,
            iterations,
            key_len,
        })
    }

    #[must_use]
    pub const fn prf(&self) -> Prf {
        self.prf
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    #[must_use]
    pub const fn key_len(&self) -> usize {
        self.key_len
    }

    /// Number of PRF blocks (`l` in RFC 2898) this engine computes.
    #[must_use]
    pub const fn block_count(&self) -> usize {
        self.key_len.div_ceil(self.prf.output_len())
    }

    /// Derive a fresh key. Partial output is wiped if cancellation is observed.
    pub fn derive(
        &self,
        password: &[u8],
        salt: &[u8],
        cancel: &CancelToken,
    ) -> Result<Outcome<DerivedKey>, PassforgeError> {
        let mut out = Zeroizing::new(vec![0u8; self.key_len]);
        let outcome =
            derive_secure_pbkdf2_key(self.prf, password, salt, self.iterations, &mut out, cancel)?;
        Ok(outcome.map(|()| seal(std::mem::take(&mut *out))))
    }
}

/// Derive PBKDF2 output directly into `out_key`; its length is `dkLen`.
///
/// Returns [`Outcome::Cancelled`] (with `out_key` zeroed) if `cancel` fires
/// before the last block is finalized.
#[inline]
pub fn derive_secure_pbkdf2_key(
    prf: Prf,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out_key: &mut [u8],
    cancel: &CancelToken,
) -> Result<Outcome<()>, PassforgeError> {
    if iterations < PBKDF2_MIN_ITER {
        return Err(PassforgeError::InvalidParameter(
            "PBKDF2 iterations must be ≥1".into(),
        ));
    }
    check_key_len(out_key.len())?;

    match prf {
        Prf::HmacSha1 => fill::<HmacSha1>(prf, password, salt, iterations, out_key, cancel),
        Prf::HmacSha256 => fill::<HmacSha256>(prf, password, salt, iterations, out_key, cancel),
        Prf::HmacSha512 => fill::<HmacSha512>(prf, password, salt, iterations, out_key, cancel),
    }
}

fn check_key_len(key_len: usize) -> Result<(), PassforgeError> {
    if key_len == 0 {
        return Err(PassforgeError::InvalidParameter(
            "derived key length must be ≥1".into(),
        ));
    }
    if key_len > MAX_DERIVED_KEY_BYTES {
        return Err(PassforgeError::InvalidParameter(format!(
            "derived key length {key_len} exceeds the {MAX_DERIVED_KEY_BYTES}-byte limit"
        )));
    }
    Ok(())
}

fn fill<M>(
    prf: Prf,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out_key: &mut [u8],
    cancel: &CancelToken,
) -> Result<Outcome<()>, PassforgeError>
where
    M: Mac + KeyInit + Clone + Sync,
{
    if cancel.is_cancelled() {
        out_key.zeroize();
        return Ok(Outcome::Cancelled);
    }

    // Key once; every PRF call below starts from a clone of this state.
    let keyed_prf = keyed::<M>(password)?;
    let h_len = prf.output_len();

    let completed = fill_blocks(&keyed_prf, salt, iterations, h_len, out_key, cancel);

    if completed && !cancel.is_cancelled() {
        Ok(Outcome::Complete(()))
    } else {
        out_key.zeroize();
        Ok(Outcome::Cancelled)
    }
}

#[cfg(not(feature = "parallel"))]
fn fill_blocks<M>(
    keyed_prf: &M,
    salt: &[u8],
    iterations: u32,
    h_len: usize,
    out_key: &mut [u8],
    cancel: &CancelToken,
) -> bool
where
    M: Mac + Clone,
{
    for (index, block) in out_key.chunks_mut(h_len).enumerate() {
        if cancel.is_cancelled() {
            return false;
        }
        // Block count was bounded by `check_key_len`.
        let block_index = (index + 1) as u32;
        if compute_block(keyed_prf, salt, block_index, iterations, block, cancel).is_cancelled() {
            return false;
        }
        trace!(block = block_index, "pbkdf2 block finalized");
    }
    true
}

/// Blocks are computed concurrently; each writes only its own `chunk`, so the
/// concatenation order is fixed by block index regardless of scheduling.
#[cfg(feature = "parallel")]
fn fill_blocks<M>(
    keyed_prf: &M,
    salt: &[u8],
    iterations: u32,
    h_len: usize,
    out_key: &mut [u8],
    cancel: &CancelToken,
) -> bool
where
    M: Mac + Clone + Sync,
{
    let outcomes: Vec<Outcome<()>> = out_key
        .par_chunks_mut(h_len)
        .enumerate()
        .map(|(index, block)| {
            if cancel.is_cancelled() {
                return Outcome::Cancelled;
            }
            let block_index = (index + 1) as u32;
            let outcome = compute_block(keyed_prf, salt, block_index, iterations, block, cancel);
            trace!(block = block_index, "pbkdf2 block finalized");
            outcome
        })
        .collect();

    outcomes.iter().all(Outcome::is_complete)
}

/// Compute `T_i` and write its first `block.len()` bytes into `block`.
#[inline]
fn compute_block<M>(
    keyed_prf: &M,
    salt: &[u8],
    block_index: u32,
    iterations: u32,
    block: &mut [u8],
    cancel: &CancelToken,
) -> Outcome<()>
where
    M: Mac + Clone,
{
    let mut mac = keyed_prf.clone();
    mac.update(salt);
    mac.update(&block_index.to_be_bytes());
    let mut u = Zeroizing::new(mac.finalize().into_bytes().to_vec());
    let mut t = Zeroizing::new(u.to_vec());

    for round in 1..iterations {
        if round % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            return Outcome::Cancelled;
        }
        let mut mac = keyed_prf.clone();
        mac.update(&u);
        u.copy_from_slice(mac.finalize().into_bytes().as_slice());
        for (acc, byte) in t.iter_mut().zip(u.iter()) {
            *acc ^= byte;
        }
    }

    block.copy_from_slice(&t[..block.len()]);
    Outcome::Complete(())
}
