//! Host-facing event names and payloads.
//!
//! Event names and payload field names are part of the frontend contract and
//! match the TypeScript listener code, so they must not change.

use log::warn;
use serde::{Serialize, Serializer};
use tauri::{AppHandle, Emitter, Runtime};

#[cfg(test)]
use mockall::automock;

use crate::LOG_TARGET;

/// Fired on every DFU lifecycle transition.
pub const STATE_EVENT: &str = "DFUStateChanged";

/// Fired on every progress callback during the transfer.
pub const PROGRESS_EVENT: &str = "DFUProgress";

/// Fired for every log line the engine produces.
pub const LOG_EVENT: &str = "DFULogEvent";

/// Lifecycle states reported through [`STATE_EVENT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfuState {
    Connecting,
    DfuProcessStarting,
    EnablingDfuMode,
    FirmwareValidating,
    DeviceDisconnecting,
    DfuCompleted,
    DfuAborted,
    DfuFailed,
}

impl DfuState {
    /// Wire string for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            DfuState::Connecting => "CONNECTING",
            DfuState::DfuProcessStarting => "DFU_PROCESS_STARTING",
            DfuState::EnablingDfuMode => "ENABLING_DFU_MODE",
            DfuState::FirmwareValidating => "FIRMWARE_VALIDATING",
            DfuState::DeviceDisconnecting => "DEVICE_DISCONNECTING",
            DfuState::DfuCompleted => "DFU_COMPLETED",
            DfuState::DfuAborted => "DFU_ABORTED",
            DfuState::DfuFailed => "DFU_FAILED",
        }
    }
}

// Serialization goes through `as_str` so the wire strings have one source.
impl Serialize for DfuState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Payload for [`STATE_EVENT`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChangedPayload {
    pub state: DfuState,
    pub device_address: String,
}

/// Payload for [`PROGRESS_EVENT`]. Values come from the engine unmodified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPayload {
    pub device_address: String,
    pub percent: i32,
    pub speed: f32,
    pub avg_speed: f32,
    pub current_part: i32,
    pub parts_total: i32,
}

/// Payload for [`LOG_EVENT`]. `level` carries the engine's literal integer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPayload {
    pub device_address: String,
    pub level: i32,
    pub message: String,
}

/// Destination for host-facing events.
///
/// Abstracted from the Tauri event system so relay behavior can be tested
/// without a running application.
#[cfg_attr(test, automock)]
pub trait EventSink: Send + Sync {
    fn state_changed(&self, payload: StateChangedPayload);
    fn progress(&self, payload: ProgressPayload);
    fn log(&self, payload: LogPayload);
}

/// Sink that broadcasts through the Tauri event system.
pub struct TauriEventSink<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriEventSink<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }

    fn emit<P: Serialize + Clone>(&self, event: &str, payload: P) {
        // Emission fails only when the app is tearing down; events are
        // fire-and-forget, so log and move on.
        if let Err(err) = self.app.emit(event, payload) {
            warn!(target: LOG_TARGET, "failed to emit {}: {}", event, err);
        }
    }
}

impl<R: Runtime> EventSink for TauriEventSink<R> {
    fn state_changed(&self, payload: StateChangedPayload) {
        self.emit(STATE_EVENT, payload);
    }

    fn progress(&self, payload: ProgressPayload) {
        self.emit(PROGRESS_EVENT, payload);
    }

    fn log(&self, payload: LogPayload) {
        self.emit(LOG_EVENT, payload);
    }
}
