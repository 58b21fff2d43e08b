//! The single pending-completion slot for an in-flight update.

use std::sync::{Mutex, MutexGuard};

use tokio::sync::oneshot;

use crate::error::BridgeError;
use crate::request::UpdateResult;

/// Outcome delivered to the caller awaiting `start_update`.
pub type UpdateOutcome = Result<UpdateResult, BridgeError>;

struct Slot {
    seq: u64,
    tx: Option<oneshot::Sender<UpdateOutcome>>,
}

/// Holds at most one waiting caller.
///
/// Arming for a new update replaces any stored sender; the replaced caller's
/// future is abandoned and never settles. Terminal callbacks take the sender
/// under the lock, so exactly one of resolve/reject consumes it.
pub struct PendingUpdate {
    slot: Mutex<Slot>,
}

/// Receiver half handed to the caller that armed the slot.
pub struct ArmedUpdate {
    pub seq: u64,
    pub rx: oneshot::Receiver<UpdateOutcome>,
}

impl PendingUpdate {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot { seq: 0, tx: None }),
        }
    }

    /// Store a fresh sender, dropping any previous one.
    pub fn arm(&self) -> ArmedUpdate {
        let (tx, rx) = oneshot::channel();
        let mut slot = self.lock();
        slot.seq += 1;
        slot.tx = Some(tx);
        ArmedUpdate { seq: slot.seq, rx }
    }

    /// Resolve the waiting caller, if one is present.
    pub fn resolve(&self, result: UpdateResult) {
        self.finish(Ok(result));
    }

    /// Reject the waiting caller, if one is present.
    pub fn reject(&self, error: BridgeError) {
        self.finish(Err(error));
    }

    /// Reject only while the slot still belongs to the given arming.
    ///
    /// Used for start failures: if a newer call has re-armed the slot, the
    /// failed caller's future stays unsettled like any other replaced handle.
    pub fn reject_armed(&self, seq: u64, error: BridgeError) {
        let tx = {
            let mut slot = self.lock();
            if slot.seq != seq {
                return;
            }
            slot.tx.take()
        };
        if let Some(tx) = tx {
            let _ = tx.send(Err(error));
        }
    }

    /// Whether a caller is currently waiting.
    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.lock().tx.is_some()
    }

    fn finish(&self, outcome: UpdateOutcome) {
        let tx = self.lock().tx.take();
        if let Some(tx) = tx {
            // Send fails only when the receiver side was dropped; there is
            // no caller left to notify in that case.
            let _ = tx.send(outcome);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().expect("pending update slot poisoned")
    }
}

impl Default for PendingUpdate {
    fn default() -> Self {
        Self::new()
    }
}
