//! Tauri command surface for the plugin.

use tauri::State;

use crate::bridge::DfuBridge;
use crate::error::BridgeError;
use crate::request::{UpdateRequest, UpdateResult};

/// Start a DFU transfer against the given device.
///
/// Resolves with the device address once the engine reports completion;
/// rejects with `{code, message}` on abort or failure. Omitted boolean
/// flags default to `false`.
#[tauri::command]
pub async fn start_update(
    bridge: State<'_, DfuBridge>,
    device_address: String,
    device_name: Option<String>,
    firmware_path: Option<String>,
    keep_bond: Option<bool>,
    force_rescan: Option<bool>,
    alternative_advertising_name: Option<bool>,
) -> Result<UpdateResult, BridgeError> {
    let request = UpdateRequest {
        device_address,
        device_name,
        firmware_path,
        keep_bond: keep_bond.unwrap_or(false),
        force_rescan: force_rescan.unwrap_or(false),
        alternative_advertising_name,
    };

    bridge.start_update(request).await
}
