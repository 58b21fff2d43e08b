//! Translates engine callbacks into host events and completion settlement.
//!
//! The relay is registered with the engine as both event listener and log
//! listener. Lifecycle events become `DFUStateChanged` emissions; the three
//! terminal events additionally settle the pending completion, state event
//! first. Log lines are routed into the application log and re-broadcast as
//! `DFULogEvent` regardless of who is listening.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, trace, warn};

use crate::error::BridgeError;
use crate::events::{DfuState, EventSink, LogPayload, ProgressPayload, StateChangedPayload};
use crate::pending::PendingUpdate;
use crate::request::UpdateResult;
use crate::service::{DfuEvent, DfuEventListener, DfuLogLevel, DfuLogListener, DfuService};
use crate::LOG_TARGET;

/// Delay before the transfer notification is dismissed after completion.
/// The engine posts its final notification state slightly after the
/// completion callback, so an immediate cancel would be overwritten.
pub(crate) const NOTIFICATION_DISMISS_DELAY: Duration = Duration::from_millis(200);

/// Forwards engine callbacks to the host and settles the pending completion.
pub struct EventRelay {
    sink: Arc<dyn EventSink>,
    pending: Arc<PendingUpdate>,
    service: Arc<dyn DfuService>,
}

impl EventRelay {
    pub fn new(
        sink: Arc<dyn EventSink>,
        pending: Arc<PendingUpdate>,
        service: Arc<dyn DfuService>,
    ) -> Self {
        Self {
            sink,
            pending,
            service,
        }
    }

    fn relay_state(&self, state: DfuState, device_address: &str) {
        debug!(
            target: LOG_TARGET,
            "{} for {}",
            state.as_str(),
            device_address
        );
        self.sink.state_changed(StateChangedPayload {
            state,
            device_address: device_address.to_string(),
        });
    }

    fn on_completed(&self, device_address: &str) {
        self.relay_state(DfuState::DfuCompleted, device_address);
        self.pending.resolve(UpdateResult {
            device_address: device_address.to_string(),
        });

        let service = Arc::clone(&self.service);
        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(NOTIFICATION_DISMISS_DELAY).await;
            service.cancel_transfer_notification();
        });
    }

    fn on_aborted(&self, device_address: &str) {
        self.relay_state(DfuState::DfuAborted, device_address);
        self.pending.reject(BridgeError::Aborted);
    }

    fn on_error(&self, device_address: &str, error: i32, message: &str) {
        self.relay_state(DfuState::DfuFailed, device_address);
        self.pending.reject(BridgeError::TransferFailed {
            code: error,
            message: message.to_string(),
        });
    }
}

impl DfuEventListener for EventRelay {
    fn on_transfer_event(&self, event: DfuEvent) {
        match event {
            DfuEvent::DeviceConnecting { device_address } => {
                self.relay_state(DfuState::Connecting, &device_address)
            }
            DfuEvent::DfuProcessStarting { device_address } => {
                self.relay_state(DfuState::DfuProcessStarting, &device_address)
            }
            DfuEvent::EnablingDfuMode { device_address } => {
                self.relay_state(DfuState::EnablingDfuMode, &device_address)
            }
            DfuEvent::FirmwareValidating { device_address } => {
                self.relay_state(DfuState::FirmwareValidating, &device_address)
            }
            DfuEvent::DeviceDisconnecting { device_address } => {
                self.relay_state(DfuState::DeviceDisconnecting, &device_address)
            }
            DfuEvent::DfuCompleted { device_address } => self.on_completed(&device_address),
            DfuEvent::DfuAborted { device_address } => self.on_aborted(&device_address),
            DfuEvent::ProgressChanged {
                device_address,
                percent,
                speed,
                avg_speed,
                current_part,
                parts_total,
            } => {
                self.sink.progress(ProgressPayload {
                    device_address,
                    percent,
                    speed,
                    avg_speed,
                    current_part,
                    parts_total,
                });
            }
            // The engine's error_type discriminator is not forwarded; the
            // numeric error code alone identifies the failure to the host.
            DfuEvent::Error {
                device_address,
                error,
                error_type: _,
                message,
            } => self.on_error(&device_address, error, &message),
        }
    }
}

impl DfuLogListener for EventRelay {
    fn on_log_event(&self, device_address: &str, level: DfuLogLevel, message: &str) {
        match level {
            DfuLogLevel::Debug => debug!(target: LOG_TARGET, "{}", message),
            DfuLogLevel::Verbose => trace!(target: LOG_TARGET, "{}", message),
            DfuLogLevel::Warning => warn!(target: LOG_TARGET, "{}", message),
            DfuLogLevel::Error => error!(target: LOG_TARGET, "{}", message),
            DfuLogLevel::Info | DfuLogLevel::Application => {
                info!(target: LOG_TARGET, "{}", message)
            }
        }

        self.sink.log(LogPayload {
            device_address: device_address.to_string(),
            level: i32::from(level),
            message: message.to_string(),
        });
    }
}
