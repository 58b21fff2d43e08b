//! Engine abstraction for the Nordic DFU service.
//!
//! The bridge never speaks the DFU protocol itself. Everything that touches
//! the radio lives behind [`DfuService`], which the embedding application
//! provides at plugin construction time. The engine reports back through the
//! [`DfuEventListener`] and [`DfuLogListener`] callbacks, which it may invoke
//! from any thread.

use std::path::PathBuf;
use std::sync::Arc;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Configuration handed to the engine for a single transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct DfuTransferConfig {
    /// Address of the device to update.
    pub device_address: String,
    /// Advertised name, when the caller knows it.
    pub device_name: Option<String>,
    /// Path to the firmware archive.
    pub archive_path: PathBuf,
    /// Keep the existing bond after the update.
    pub keep_bond: bool,
    /// Scan for a new address when the bootloader advertises under a
    /// different one (legacy DFU).
    pub force_scan_for_new_address: bool,
    /// Expect the bootloader to advertise under an incremented address
    /// (secure DFU). `None` leaves the engine default in place.
    pub alternative_advertising_name: Option<bool>,
    /// Allow buttonless entry on devices without the signed variant.
    pub unsafe_experimental_buttonless_service: bool,
}

/// Lifecycle and progress callbacks from the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum DfuEvent {
    DeviceConnecting {
        device_address: String,
    },
    DfuProcessStarting {
        device_address: String,
    },
    EnablingDfuMode {
        device_address: String,
    },
    FirmwareValidating {
        device_address: String,
    },
    DeviceDisconnecting {
        device_address: String,
    },
    DfuCompleted {
        device_address: String,
    },
    DfuAborted {
        device_address: String,
    },
    ProgressChanged {
        device_address: String,
        percent: i32,
        speed: f32,
        avg_speed: f32,
        current_part: i32,
        parts_total: i32,
    },
    Error {
        device_address: String,
        error: i32,
        error_type: i32,
        message: String,
    },
}

/// Severity of an engine log line.
///
/// The discriminants are the engine's own level constants and are forwarded
/// to the host unchanged, so the sparse values matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(i32)]
pub enum DfuLogLevel {
    Debug = 0,
    Verbose = 1,
    Info = 5,
    Application = 10,
    Warning = 15,
    Error = 20,
}

/// Receives lifecycle and progress events from the engine.
pub trait DfuEventListener: Send + Sync {
    fn on_transfer_event(&self, event: DfuEvent);
}

/// Receives log lines from the engine.
pub trait DfuLogListener: Send + Sync {
    fn on_log_event(&self, device_address: &str, level: DfuLogLevel, message: &str);
}

/// Control surface for a running transfer.
pub trait DfuControl: Send {
    fn pause(&self);
    fn resume(&self);
    fn abort(&self);
}

/// The engine refused to accept a transfer.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{0}")]
pub struct StartError(pub String);

/// The vendor DFU engine.
///
/// Listener registration is identity-based: unregistering passes the same
/// `Arc` that was registered, and implementations compare by pointer.
#[cfg_attr(test, automock)]
pub trait DfuService: Send + Sync {
    /// Begin a transfer. The returned handle controls the running transfer;
    /// dropping it does not stop the transfer.
    fn start(&self, config: DfuTransferConfig) -> Result<Box<dyn DfuControl>, StartError>;

    /// Create the notification channel used for transfer progress, on
    /// platforms that require one. Called once at bridge construction.
    fn create_notification_channel(&self);

    /// Dismiss the transfer notification left up after completion.
    fn cancel_transfer_notification(&self);

    fn register_event_listener(&self, listener: Arc<dyn DfuEventListener>);

    fn unregister_event_listener(&self, listener: &Arc<dyn DfuEventListener>);

    fn register_log_listener(&self, listener: Arc<dyn DfuLogListener>);

    fn unregister_log_listener(&self, listener: &Arc<dyn DfuLogListener>);
}
