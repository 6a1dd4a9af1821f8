// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Home listing response parsing.
//!
//! The cloud groups devices into homes, and homes into spaces (rooms):
//!
//! ```json
//! [{"homeId": "h1", "homeName": "Flat", "spaces": [
//!     {"spaceName": "Living Room", "devices": [
//!         {"deviceId": "d1", "deviceName": "Living Room", "modelName": "CS-U18"}
//!     ]}
//! ]}]
//! ```

use serde::Deserialize;

/// A home bound to the account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeRecord {
    /// Home identifier.
    #[serde(default)]
    pub home_id: String,
    /// Human-readable home name.
    #[serde(default)]
    pub home_name: Option<String>,
    /// Rooms in the home.
    #[serde(default)]
    pub spaces: Vec<SpaceRecord>,
}

/// A room inside a home.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceRecord {
    /// Room name.
    #[serde(default)]
    pub space_name: Option<String>,
    /// Devices installed in the room.
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
}

/// A device as listed by the cloud.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    /// Stable device identifier.
    pub device_id: String,
    /// Human-readable device name.
    pub device_name: String,
    /// Model name, if reported.
    #[serde(default)]
    pub model_name: Option<String>,
    /// Optional feature list (`mode`, `fan`, `swing`, `preset`).
    #[serde(default)]
    pub capabilities: Option<Vec<String>>,
}

/// A device record together with where it lives.
#[derive(Debug, Clone)]
pub struct LocatedDevice {
    /// Name of the home, if any.
    pub home: Option<String>,
    /// Name of the room, if any.
    pub space: Option<String>,
    /// The device record.
    pub record: DeviceRecord,
}

/// Flattens homes into devices, preserving response order.
#[must_use]
pub fn flatten_homes(homes: Vec<HomeRecord>) -> Vec<LocatedDevice> {
    homes
        .into_iter()
        .flat_map(|home| {
            let home_name = home.home_name;
            home.spaces.into_iter().flat_map(move |space| {
                let home_name = home_name.clone();
                let space_name = space.space_name;
                space.devices.into_iter().map(move |record| LocatedDevice {
                    home: home_name.clone(),
                    space: space_name.clone(),
                    record,
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_preserves_order() {
        let json = r#"[
            {"homeId": "h1", "homeName": "Flat", "spaces": [
                {"spaceName": "Living", "devices": [
                    {"deviceId": "d1", "deviceName": "Living Room"},
                    {"deviceId": "d2", "deviceName": "Hall"}
                ]},
                {"spaceName": "Bed", "devices": [
                    {"deviceId": "d3", "deviceName": "Bedroom", "modelName": "CS-U12"}
                ]}
            ]},
            {"homeId": "h2", "spaces": []}
        ]"#;
        let homes: Vec<HomeRecord> = serde_json::from_str(json).unwrap();
        let devices = flatten_homes(homes);

        let ids: Vec<_> = devices.iter().map(|d| d.record.device_id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2", "d3"]);
        assert_eq!(devices[2].space.as_deref(), Some("Bed"));
        assert_eq!(devices[2].home.as_deref(), Some("Flat"));
        assert_eq!(devices[2].record.model_name.as_deref(), Some("CS-U12"));
    }

    #[test]
    fn empty_account_flattens_to_nothing() {
        let homes: Vec<HomeRecord> = serde_json::from_str("[]").unwrap();
        assert!(flatten_homes(homes).is_empty());
    }
}
