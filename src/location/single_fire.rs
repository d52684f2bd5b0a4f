//! Single-assignment completion for callback-style position APIs.

use std::sync::{Mutex, PoisonError};

use tokio::sync::oneshot;

use super::source::PositionFix;

/// One pending position request that completes at most once.
///
/// Platform adapters typically receive the result through a delegate
/// callback *and* run their own failure timer. Handing both paths the same
/// `FixSlot` makes the race safe: `resolve` takes the sender out of the
/// slot exactly once, so whichever path fires second becomes a no-op
/// instead of delivering a second completion to the waiter.
pub struct FixSlot {
    tx: Mutex<Option<oneshot::Sender<Option<PositionFix>>>>,
    rx: Mutex<Option<oneshot::Receiver<Option<PositionFix>>>>,
}

impl FixSlot {
    pub fn new() -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            tx: Mutex::new(Some(tx)),
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Commit a result. Returns `true` if this call won the slot and the
    /// waiter will observe `fix`; `false` if the slot was already resolved
    /// or the waiter is gone, in which case `fix` is dropped.
    pub fn resolve(&self, fix: Option<PositionFix>) -> bool {
        let sender = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(tx) => tx.send(fix).is_ok(),
            None => false,
        }
    }

    /// Await the committed result. The first call receives it; later calls
    /// (or a call after the sender vanished unresolved) return `None`.
    pub async fn wait(&self) -> Option<PositionFix> {
        let receiver = self
            .rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;
        receiver.await.ok().flatten()
    }
}

impl Default for FixSlot {
    fn default() -> Self {
        Self::new()
    }
}
