//! src/worker.rs
//! Run a derivation off the calling thread.
//!
//! [`spawn_derivation`] moves a shared session onto a dedicated thread and
//! returns a [`DerivationHandle`]. The handle cancels through a [`CancelToken`],
//! reports progress through the session's timing queries, and delivers the
//! outcome over a channel. With the `async` feature, [`derive_async`] does the
//! same on tokio's blocking pool.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};
use tracing::debug;

use crate::aliases::GeneratedPassword;
use crate::cancel::CancelToken;
use crate::clock::MonotonicClock;
use crate::error::PassforgeError;
use crate::outcome::Outcome;
use crate::session::DerivationSession;

/// What a worker sends back when it finishes.
pub type DerivationResult = Result<Outcome<GeneratedPassword>, PassforgeError>;

/// Handle to a derivation running on a background thread.
///
/// Dropping the handle before its result has been collected cancels the
/// derivation. Once [`wait`](Self::wait) or [`try_result`](Self::try_result)
/// has handed back a result, dropping it leaves the token alone.
pub struct DerivationHandle<C: MonotonicClock + 'static> {
    session: Arc<DerivationSession<C>>,
    cancel: CancelToken,
    result: Receiver<DerivationResult>,
    // Disconnects when the worker exits; watchdogs block on it.
    finished: Receiver<()>,
    thread: Option<JoinHandle<()>>,
    delivered: bool,
}

/// Start `session.generate_password` on a new thread.
///
/// # Errors
///
/// [`PassforgeError::Worker`] if the OS refuses to spawn the thread.
pub fn spawn_derivation<C>(
    session: Arc<DerivationSession<C>>,
) -> Result<DerivationHandle<C>, PassforgeError>
where
    C: MonotonicClock + 'static,
{
    spawn_with_token(session, CancelToken::new())
}

/// Like [`spawn_derivation`], but observing a caller-owned token.
pub fn spawn_with_token<C>(
    session: Arc<DerivationSession<C>>,
    cancel: CancelToken,
) -> Result<DerivationHandle<C>, PassforgeError>
where
    C: MonotonicClock + 'static,
{
    let (result_tx, result_rx) = bounded::<DerivationResult>(1);
    let (finished_tx, finished_rx) = bounded::<()>(0);

    let worker_session = Arc::clone(&session);
    let worker_cancel = cancel.clone();

    let thread = thread::Builder::new()
        .name("passforge-derive".into())
        .spawn(move || {
            let _finished = finished_tx;
            let result = worker_session.generate_password(&worker_cancel);
            // The handle may already be gone; nobody is left to tell.
            let _ = result_tx.send(result);
        })
        .map_err(|e| PassforgeError::Worker(format!("failed to spawn derivation thread: {e}")))?;

    debug!(
        iterations = session.iterations(),
        "derivation dispatched to worker"
    );

    Ok(DerivationHandle {
        session,
        cancel,
        result: result_rx,
        finished: finished_rx,
        thread: Some(thread),
        delivered: false,
    })
}

impl<C: MonotonicClock + 'static> DerivationHandle<C> {
    /// Request cooperative cancellation.
    pub fn cancel(&self) {
        debug!("derivation cancellation requested");
        self.cancel.cancel();
    }

    #[must_use]
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Cancel automatically if the worker has not finished within `deadline`.
    ///
    /// # Errors
    ///
    /// [`PassforgeError::Worker`] if the watchdog thread cannot be spawned.
    pub fn cancel_after(&self, deadline: Duration) -> Result<(), PassforgeError> {
        let finished = self.finished.clone();
        let cancel = self.cancel.clone();
        thread::Builder::new()
            .name("passforge-deadline".into())
            .spawn(move || {
                if let Err(RecvTimeoutError::Timeout) = finished.recv_timeout(deadline) {
                    debug!(?deadline, "derivation deadline expired");
                    cancel.cancel();
                }
            })
            .map(|_| ())
            .map_err(|e| PassforgeError::Worker(format!("failed to spawn deadline watchdog: {e}")))
    }

    #[must_use]
    pub fn session(&self) -> &Arc<DerivationSession<C>> {
        &self.session
    }

    /// Seconds since the worker started deriving, `NaN` before it starts.
    #[must_use]
    pub fn current_elapsed_seconds(&self) -> f64 {
        self.session.current_elapsed_seconds()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Non-blocking poll: `None` while the worker is still running.
    pub fn try_result(&mut self) -> Option<DerivationResult> {
        let result = match self.result.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(self.reap()),
        };
        self.delivered = true;
        Some(result)
    }

    /// Block until the worker delivers its outcome.
    pub fn wait(mut self) -> DerivationResult {
        let result = match self.result.recv() {
            Ok(result) => result,
            Err(_) => Err(self.reap()),
        };
        self.delivered = true;
        result
    }

    fn reap(&mut self) -> PassforgeError {
        let panicked = self
            .thread
            .take()
            .is_some_and(|thread| thread.join().is_err());
        if panicked {
            PassforgeError::Worker("derivation worker panicked".into())
        } else {
            PassforgeError::Worker("derivation worker exited without a result".into())
        }
    }
}

impl<C: MonotonicClock + 'static> Drop for DerivationHandle<C> {
    fn drop(&mut self) {
        // The token may be shared with later derivations; only stop a run
        // whose result nobody collected.
        if !self.delivered {
            self.cancel.cancel();
        }
    }
}

/// Run `session.generate_password` on tokio's blocking pool.
#[cfg(feature = "async")]
pub async fn derive_async<C>(
    session: Arc<DerivationSession<C>>,
    cancel: CancelToken,
) -> DerivationResult
where
    C: MonotonicClock + 'static,
{
    tokio::task::spawn_blocking(move || session.generate_password(&cancel))
        .await
        .map_err(|e| PassforgeError::Worker(format!("derivation task failed: {e}")))?
}
