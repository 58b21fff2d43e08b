//! Builders for test data.

use crate::request::UpdateRequest;

/// Builder for test UpdateRequest instances
pub struct UpdateRequestBuilder {
    device_address: String,
    device_name: Option<String>,
    firmware_path: Option<String>,
    keep_bond: bool,
    force_rescan: bool,
    alternative_advertising_name: Option<bool>,
}

impl UpdateRequestBuilder {
    pub fn new() -> Self {
        Self {
            device_address: "AA:BB:CC:DD:EE:FF".to_string(),
            device_name: None,
            firmware_path: Some("/tmp/fw.zip".to_string()),
            keep_bond: false,
            force_rescan: false,
            alternative_advertising_name: None,
        }
    }

    pub fn device_address(mut self, address: &str) -> Self {
        self.device_address = address.to_string();
        self
    }

    pub fn device_name(mut self, name: &str) -> Self {
        self.device_name = Some(name.to_string());
        self
    }

    pub fn firmware_path(mut self, path: Option<&str>) -> Self {
        self.firmware_path = path.map(str::to_string);
        self
    }

    pub fn keep_bond(mut self, keep: bool) -> Self {
        self.keep_bond = keep;
        self
    }

    pub fn force_rescan(mut self, force: bool) -> Self {
        self.force_rescan = force;
        self
    }

    pub fn alternative_advertising_name(mut self, enabled: bool) -> Self {
        self.alternative_advertising_name = Some(enabled);
        self
    }

    pub fn build(self) -> UpdateRequest {
        UpdateRequest {
            device_address: self.device_address,
            device_name: self.device_name,
            firmware_path: self.firmware_path,
            keep_bond: self.keep_bond,
            force_rescan: self.force_rescan,
            alternative_advertising_name: self.alternative_advertising_name,
        }
    }
}

impl Default for UpdateRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
