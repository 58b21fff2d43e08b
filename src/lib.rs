//! Tauri plugin bridging the Nordic DFU engine to the host application.
//!
//! The plugin does not implement the DFU protocol. It wires three things
//! together:
//! 1. **Command** - `start_update` hands a transfer to the engine and
//!    resolves or rejects when the engine reaches a terminal state.
//! 2. **Events** - every engine callback is re-broadcast to the frontend as
//!    `DFUStateChanged`, `DFUProgress` or `DFULogEvent`.
//! 3. **Lifecycle** - the engine listeners are registered when the app
//!    becomes ready or resumes and unregistered on exit.
//!
//! The engine itself is injected as a [`DfuService`] implementation:
//!
//! ```ignore
//! let engine: Arc<dyn DfuService> = Arc::new(NordicDfuEngine::new());
//!
//! tauri::Builder::default()
//!     .plugin(tauri_plugin_nordic_dfu::init(engine))
//!     .run(tauri::generate_context!())
//!     .expect("error while running tauri application");
//! ```
//!
//! Only one update runs at a time. Starting a second update while one is in
//! flight hands the completion to the new caller; the first caller's promise
//! never settles. Keeping the UI to a single update at a time is the
//! frontend's job.

use std::sync::Arc;

use log::debug;
use tauri::plugin::{Builder, TauriPlugin};
use tauri::{Manager, RunEvent, Runtime};

mod bridge;
mod commands;
mod error;
mod events;
mod pending;
mod relay;
mod request;
mod service;

#[cfg(test)]
mod test_helpers;

pub use bridge::DfuBridge;
pub use error::{BridgeError, ABORTED_CODE, GENERIC_FAILURE_CODE};
pub use events::{
    DfuState, EventSink, LogPayload, ProgressPayload, StateChangedPayload, TauriEventSink,
    LOG_EVENT, PROGRESS_EVENT, STATE_EVENT,
};
pub use request::{UpdateRequest, UpdateResult};
pub use service::{
    DfuControl, DfuEvent, DfuEventListener, DfuLogLevel, DfuLogListener, DfuService,
    DfuTransferConfig, StartError,
};

use commands::start_update;

/// Log target for all bridge output.
pub(crate) const LOG_TARGET: &str = "nordic-dfu";

/// Build the plugin around the given DFU engine.
pub fn init<R: Runtime>(service: Arc<dyn DfuService>) -> TauriPlugin<R> {
    Builder::new("nordic-dfu")
        .invoke_handler(tauri::generate_handler![start_update])
        .setup(move |app, _api| {
            let sink = Arc::new(TauriEventSink::new(app.clone()));
            app.manage(DfuBridge::new(service, sink));
            Ok(())
        })
        .on_event(|app, event| match event {
            RunEvent::Ready | RunEvent::Resumed => {
                app.state::<DfuBridge>().register_listeners();
            }
            RunEvent::Exit => {
                debug!(target: LOG_TARGET, "shutting down DFU bridge");
                app.state::<DfuBridge>().unregister_listeners();
            }
            _ => {}
        })
        .build()
}
