// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Air conditioner devices.
//!
//! A [`Device`] is the library's view of one unit bound to the account: its
//! identity, what it can do, and the last state the cloud reported for it.
//! Remote calls for a single device go through [`DeviceClient`].

mod client;

pub use client::DeviceClient;

use std::fmt;

use serde::Serialize;

use crate::capabilities::Capabilities;
use crate::response::LocatedDevice;
use crate::state::DeviceState;

/// A discovered air conditioner.
///
/// # Examples
///
/// ```
/// use miraie_lib::device::Device;
/// use miraie_lib::capabilities::Capabilities;
///
/// let device = Device::new("ac-1", "Living Room")
///     .with_model("CS-U18")
///     .with_capabilities(Capabilities::basic());
///
/// assert_eq!(device.name(), "Living Room");
/// assert!(!device.capabilities().swing);
/// assert_eq!(device.summary().to_string(), "Living Room (CS-U18)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    home: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    space: Option<String>,
    capabilities: Capabilities,
    state: DeviceState,
}

impl Device {
    /// Creates a device with every capability and no known state.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            model: None,
            home: None,
            space: None,
            capabilities: Capabilities::full(),
            state: DeviceState::new(),
        }
    }

    /// Creates a device from a home listing entry.
    #[must_use]
    pub fn from_located(located: LocatedDevice) -> Self {
        let capabilities = Capabilities::from_record(&located.record);
        let record = located.record;
        Self {
            id: record.device_id,
            name: record.device_name,
            model: record.model_name,
            home: located.home,
            space: located.space,
            capabilities,
            state: DeviceState::new(),
        }
    }

    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Sets the last-known state.
    #[must_use]
    pub fn with_state(mut self, state: DeviceState) -> Self {
        self.state = state;
        self
    }

    /// Returns the stable cloud identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the model name, if known.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the home the device belongs to, if known.
    #[must_use]
    pub fn home(&self) -> Option<&str> {
        self.home.as_deref()
    }

    /// Returns the room the device is installed in, if known.
    #[must_use]
    pub fn space(&self) -> Option<&str> {
        self.space.as_deref()
    }

    /// Returns the capabilities.
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns the last-known state.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub(crate) fn set_state(&mut self, state: DeviceState) {
        self.state = state;
    }

    /// Returns `true` if the name matches, ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Returns the `{id, name, model}` projection.
    #[must_use]
    pub fn summary(&self) -> DeviceSummary {
        DeviceSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            model: self.model.clone(),
        }
    }
}

/// Short description of a device, as returned by device listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSummary {
    /// Stable cloud identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Model name, if known.
    pub model: Option<String>,
}

impl fmt::Display for DeviceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.model {
            Some(model) => write!(f, "{} ({model})", self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{HomeRecord, flatten_homes};

    #[test]
    fn from_located_carries_location_and_capabilities() {
        let homes: Vec<HomeRecord> = serde_json::from_value(serde_json::json!([{
            "homeId": "h1",
            "homeName": "Flat",
            "spaces": [{"spaceName": "Lounge", "devices": [{
                "deviceId": "d1",
                "deviceName": "Living Room",
                "modelName": "CS-U18",
                "capabilities": ["mode", "fan"]
            }]}]
        }]))
        .unwrap();

        let device = Device::from_located(flatten_homes(homes).remove(0));
        assert_eq!(device.id(), "d1");
        assert_eq!(device.home(), Some("Flat"));
        assert_eq!(device.space(), Some("Lounge"));
        assert!(device.capabilities().mode);
        assert!(!device.capabilities().swing);
        assert!(device.state().is_empty());
    }

    #[test]
    fn name_match_is_case_insensitive_and_exact() {
        let device = Device::new("d1", "Living Room");
        assert!(device.is_named("living room"));
        assert!(device.is_named(" LIVING ROOM "));
        assert!(!device.is_named("Living"));
    }

    #[test]
    fn summary_without_model() {
        assert_eq!(Device::new("d1", "Bedroom").summary().to_string(), "Bedroom");
    }
}
