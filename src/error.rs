//! Host-facing error type for the DFU bridge.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

use crate::service::StartError;

/// Rejection code used when a transfer never reaches a terminal engine state.
pub const GENERIC_FAILURE_CODE: &str = "DFU_FAILED";

/// Rejection code used when the engine aborts a transfer.
pub const ABORTED_CODE: &str = "2";

/// Errors surfaced to the host application when an update cannot complete.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BridgeError {
    /// The request was invalid or the engine refused to start the transfer.
    #[error("{0}")]
    StartFailed(String),

    /// The engine aborted the transfer.
    #[error("DFU ABORTED")]
    Aborted,

    /// The engine reported a transfer failure. `code` is the engine's
    /// numeric error and `message` its description, both passed through
    /// unmodified.
    #[error("{message}")]
    TransferFailed { code: i32, message: String },
}

impl BridgeError {
    /// Stable rejection code delivered to the host alongside the message.
    pub fn code(&self) -> String {
        match self {
            BridgeError::StartFailed(_) => GENERIC_FAILURE_CODE.to_string(),
            BridgeError::Aborted => ABORTED_CODE.to_string(),
            BridgeError::TransferFailed { code, .. } => code.to_string(),
        }
    }
}

impl From<StartError> for BridgeError {
    fn from(err: StartError) -> Self {
        BridgeError::StartFailed(err.0)
    }
}

// Rejections cross the IPC boundary as {"code": ..., "message": ...} so the
// frontend can branch on the code without parsing the message.
impl Serialize for BridgeError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BridgeError", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
