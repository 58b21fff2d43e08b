//! Host-facing request and result types for `start_update`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;
use crate::service::DfuTransferConfig;

/// Parameters accepted by the `start_update` command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    /// Address of the device to update.
    pub device_address: String,
    /// Advertised device name, when known.
    #[serde(default)]
    pub device_name: Option<String>,
    /// Path to the firmware archive. Accepted as null at the boundary and
    /// rejected during validation, so the caller sees a rejection rather
    /// than a deserialization error.
    #[serde(default)]
    pub firmware_path: Option<String>,
    /// Keep the existing bond after the update.
    #[serde(default)]
    pub keep_bond: bool,
    /// Scan for the bootloader under a new address (legacy DFU).
    #[serde(default)]
    pub force_rescan: bool,
    /// Expect the bootloader under an incremented address (secure DFU).
    #[serde(default)]
    pub alternative_advertising_name: Option<bool>,
}

/// Resolved value of a completed update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub device_address: String,
}

impl UpdateRequest {
    /// Validate the request and build the engine configuration.
    ///
    /// The experimental buttonless-service flag is always enabled; the
    /// devices this bridge targets ship the unsigned bootloader variant.
    pub fn to_transfer_config(&self) -> Result<DfuTransferConfig, BridgeError> {
        let address = self.device_address.trim();
        if address.is_empty() {
            return Err(BridgeError::StartFailed(
                "device address must not be empty".to_string(),
            ));
        }

        let path = self
            .firmware_path
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        if path.is_empty() {
            return Err(BridgeError::StartFailed(
                "firmware path must not be empty".to_string(),
            ));
        }

        Ok(DfuTransferConfig {
            device_address: address.to_string(),
            device_name: self.device_name.clone(),
            archive_path: PathBuf::from(path),
            keep_bond: self.keep_bond,
            force_scan_for_new_address: self.force_rescan,
            alternative_advertising_name: self.alternative_advertising_name,
            unsafe_experimental_buttonless_service: true,
        })
    }
}
