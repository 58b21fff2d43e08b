//! In-memory DFU engine for flow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::service::{
    DfuControl, DfuEvent, DfuEventListener, DfuLogLevel, DfuLogListener, DfuService,
    DfuTransferConfig, StartError,
};

/// Control handle that does nothing.
pub struct NoopControl;

impl DfuControl for NoopControl {
    fn pause(&self) {}
    fn resume(&self) {}
    fn abort(&self) {}
}

#[derive(Default)]
struct Inner {
    start_error: Option<String>,
    started: Vec<DfuTransferConfig>,
    event_listeners: Vec<Arc<dyn DfuEventListener>>,
    log_listeners: Vec<Arc<dyn DfuLogListener>>,
}

/// Scriptable engine: records what the bridge asks of it and lets tests
/// drive callbacks into whichever listeners are registered.
#[derive(Default)]
pub struct FakeDfuService {
    inner: Mutex<Inner>,
    channels_created: AtomicUsize,
    notifications_cancelled: AtomicUsize,
}

impl FakeDfuService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `start` call fail with the given message.
    pub fn fail_start(&self, message: &str) {
        self.lock().start_error = Some(message.to_string());
    }

    pub fn started_configs(&self) -> Vec<DfuTransferConfig> {
        self.lock().started.clone()
    }

    pub fn event_listener_count(&self) -> usize {
        self.lock().event_listeners.len()
    }

    pub fn log_listener_count(&self) -> usize {
        self.lock().log_listeners.len()
    }

    pub fn channels_created(&self) -> usize {
        self.channels_created.load(Ordering::SeqCst)
    }

    pub fn notifications_cancelled(&self) -> usize {
        self.notifications_cancelled.load(Ordering::SeqCst)
    }

    /// Deliver an event to every registered listener.
    pub fn emit(&self, event: DfuEvent) {
        // Snapshot first: listeners may call back into this service
        let listeners = self.lock().event_listeners.clone();
        for listener in listeners {
            listener.on_transfer_event(event.clone());
        }
    }

    /// Deliver a log line to every registered listener.
    pub fn emit_log(&self, device_address: &str, level: DfuLogLevel, message: &str) {
        let listeners = self.lock().log_listeners.clone();
        for listener in listeners {
            listener.on_log_event(device_address, level, message);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("fake engine state poisoned")
    }
}

impl DfuService for FakeDfuService {
    fn start(&self, config: DfuTransferConfig) -> Result<Box<dyn DfuControl>, StartError> {
        let mut inner = self.lock();
        if let Some(message) = inner.start_error.take() {
            return Err(StartError(message));
        }
        inner.started.push(config);
        Ok(Box::new(NoopControl))
    }

    fn create_notification_channel(&self) {
        self.channels_created.fetch_add(1, Ordering::SeqCst);
    }

    fn cancel_transfer_notification(&self) {
        self.notifications_cancelled.fetch_add(1, Ordering::SeqCst);
    }

    fn register_event_listener(&self, listener: Arc<dyn DfuEventListener>) {
        self.lock().event_listeners.push(listener);
    }

    fn unregister_event_listener(&self, listener: &Arc<dyn DfuEventListener>) {
        self.lock().event_listeners.retain(|registered| {
            !std::ptr::addr_eq(Arc::as_ptr(registered), Arc::as_ptr(listener))
        });
    }

    fn register_log_listener(&self, listener: Arc<dyn DfuLogListener>) {
        self.lock().log_listeners.push(listener);
    }

    fn unregister_log_listener(&self, listener: &Arc<dyn DfuLogListener>) {
        self.lock().log_listeners.retain(|registered| {
            !std::ptr::addr_eq(Arc::as_ptr(registered), Arc::as_ptr(listener))
        });
    }
}
