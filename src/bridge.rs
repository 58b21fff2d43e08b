//! The bridge between the host application and the DFU engine.
//!
//! Owns the pending-completion slot and the relay, drives engine listener
//! registration from the host lifecycle, and turns `start_update` calls into
//! engine transfers whose outcome arrives through the relay.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};

use crate::error::BridgeError;
use crate::events::EventSink;
use crate::pending::{ArmedUpdate, PendingUpdate};
use crate::relay::EventRelay;
use crate::request::{UpdateRequest, UpdateResult};
use crate::service::{DfuEventListener, DfuLogListener, DfuService};
use crate::LOG_TARGET;

/// Managed state connecting the host application to the DFU engine.
pub struct DfuBridge {
    service: Arc<dyn DfuService>,
    pending: Arc<PendingUpdate>,
    relay: Arc<EventRelay>,
    registered: AtomicBool,
}

impl DfuBridge {
    /// Build the bridge and perform construction-time engine setup.
    pub fn new(service: Arc<dyn DfuService>, sink: Arc<dyn EventSink>) -> Self {
        service.create_notification_channel();

        let pending = Arc::new(PendingUpdate::new());
        let relay = Arc::new(EventRelay::new(
            sink,
            Arc::clone(&pending),
            Arc::clone(&service),
        ));

        Self {
            service,
            pending,
            relay,
            registered: AtomicBool::new(false),
        }
    }

    /// Register the relay with the engine.
    ///
    /// Called on every active edge of the host lifecycle; the guard makes
    /// repeated calls no-ops until `unregister_listeners` runs, so resume
    /// cycles cannot double-register.
    pub fn register_listeners(&self) {
        if self.registered.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!(target: LOG_TARGET, "registering DFU listeners");
        self.service.register_event_listener(self.event_listener());
        self.service.register_log_listener(self.log_listener());
    }

    /// Unregister the relay from the engine.
    pub fn unregister_listeners(&self) {
        if !self.registered.swap(false, Ordering::SeqCst) {
            return;
        }
        debug!(target: LOG_TARGET, "unregistering DFU listeners");
        self.service
            .unregister_event_listener(&self.event_listener());
        self.service.unregister_log_listener(&self.log_listener());
    }

    /// Start a firmware update and wait for its terminal outcome.
    ///
    /// A second call while one is in flight takes over the pending
    /// completion; the earlier caller's future never settles. Single-flight
    /// enforcement is left to the frontend.
    pub async fn start_update(&self, request: UpdateRequest) -> Result<UpdateResult, BridgeError> {
        info!(
            target: LOG_TARGET,
            "starting DFU for {}", request.device_address
        );

        let ArmedUpdate { seq, rx } = self.pending.arm();

        if let Err(err) = self.begin_transfer(&request) {
            debug!(target: LOG_TARGET, "DFU start failed: {}", err);
            self.pending.reject_armed(seq, err);
        }

        match rx.await {
            Ok(outcome) => outcome,
            // The sender was dropped, meaning a newer start replaced this
            // one. The replaced caller must never observe a settlement.
            Err(_) => std::future::pending().await,
        }
    }

    fn begin_transfer(&self, request: &UpdateRequest) -> Result<(), BridgeError> {
        let config = request.to_transfer_config()?;
        // The control handle is dropped: pause/resume/abort are not exposed
        // through this bridge.
        let _control = self.service.start(config)?;
        Ok(())
    }

    fn event_listener(&self) -> Arc<dyn DfuEventListener> {
        Arc::clone(&self.relay) as Arc<dyn DfuEventListener>
    }

    fn log_listener(&self) -> Arc<dyn DfuLogListener> {
        Arc::clone(&self.relay) as Arc<dyn DfuLogListener>
    }
}
