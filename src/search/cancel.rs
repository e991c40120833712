//! Cooperative cancellation shared by all workers of one run.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Stop signal polled by solvers.
///
/// The flag is the fast path checked inside the search loop. The
/// zero-capacity channel never carries a message: dropping its only sender
/// disconnects every receiver, which wakes pacing sleeps immediately.
#[derive(Debug)]
pub struct CancellationToken {
    stop: AtomicBool,
    wake_tx: Mutex<Option<Sender<()>>>,
    wake_rx: Receiver<()>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        let (tx, rx) = bounded(0);
        Self {
            stop: AtomicBool::new(false),
            wake_tx: Mutex::new(Some(tx)),
            wake_rx: rx,
        }
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal every holder to stop. Idempotent.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::SeqCst);
        self.wake_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    #[inline(always)]
    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Sleep for up to `duration`, returning early once cancelled.
    ///
    /// Returns `true` if the token was cancelled.
    pub fn sleep(&self, duration: Duration) -> bool {
        if duration.is_zero() || self.is_cancelled() {
            return self.is_cancelled();
        }
        match self.wake_rx.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => self.is_cancelled(),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
        }
    }
}
