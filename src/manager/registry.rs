// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory cache of the account's devices.

use std::sync::Arc;

use futures::future::join_all;
use parking_lot::RwLock;

use crate::command::MutationRequest;
use crate::device::{Device, DeviceClient, DeviceSummary};
use crate::error::Error;
use crate::response::flatten_homes;
use crate::session::Session;
use crate::state::DeviceState;

use super::Selector;

/// Cache of discovered devices, in discovery order.
///
/// Lock sections are short and never span an `.await`.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: RwLock<Vec<Device>>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `devices`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Discovery` if two devices share a name (ignoring case).
    pub fn from_devices(devices: Vec<Device>) -> Result<Self, Error> {
        let registry = Self::new();
        registry.replace(devices)?;
        Ok(registry)
    }

    /// Fetches the account's devices and replaces the cache.
    ///
    /// Each device's status is queried to seed its state. A failed status
    /// query leaves the device offline with no known state; it does not fail
    /// discovery.
    ///
    /// # Errors
    ///
    /// - `Error::Authentication` if the session is not usable.
    /// - `Error::Discovery` if the listing fails, is empty, or has duplicate
    ///   names.
    pub async fn discover(&self, session: &Arc<Session>) -> Result<Vec<Device>, Error> {
        let credential = session.ensure_valid().await?;
        let homes = match session.api().homes(credential.token()).await {
            Ok(homes) => homes,
            Err(e @ Error::Authentication(_)) => return Err(e),
            Err(e) => return Err(Error::Discovery(format!("device listing failed: {e}"))),
        };

        let devices: Vec<Device> = flatten_homes(homes)
            .into_iter()
            .map(Device::from_located)
            .collect();
        if devices.is_empty() {
            return Err(Error::Discovery("no devices bound to the account".into()));
        }
        check_unique(&devices)?;
        for device in &devices {
            tracing::debug!(
                device = %device.name(),
                features = ?device.capabilities().feature_names(),
                "Found device"
            );
        }

        let client = DeviceClient::new(Arc::clone(session));
        let query = MutationRequest::query();
        let states = join_all(devices.iter().map(|device| client.send(device, &query))).await;

        let devices: Vec<Device> = devices
            .into_iter()
            .zip(states)
            .map(|(device, state)| match state {
                Ok(state) => device.with_state(state),
                Err(e) => {
                    tracing::warn!(device = %device.name(), error = %e, "Initial status query failed");
                    let mut offline = DeviceState::new();
                    offline.set_online(false);
                    device.with_state(offline)
                }
            })
            .collect();

        self.replace(devices.clone())?;
        tracing::info!(count = devices.len(), "Discovered devices");
        Ok(devices)
    }

    /// Resolves a selector to devices.
    ///
    /// # Errors
    ///
    /// - `Error::NoDevices` for [`Selector::All`] on an empty registry.
    /// - `Error::DeviceNotFound` if no device has the exact name (ignoring
    ///   case).
    pub fn resolve(&self, selector: &Selector) -> Result<Vec<Device>, Error> {
        let devices = self.devices.read();
        match selector {
            Selector::All if devices.is_empty() => Err(Error::NoDevices),
            Selector::All => Ok(devices.clone()),
            Selector::Named(name) => devices
                .iter()
                .find(|d| d.is_named(name))
                .map(|d| vec![d.clone()])
                .ok_or_else(|| Error::DeviceNotFound {
                    name: name.clone(),
                    known: devices.iter().map(|d| d.name().to_string()).collect(),
                }),
        }
    }

    /// Replaces the cached state of a device.
    ///
    /// Unknown ids are ignored.
    pub fn refresh(&self, device_id: &str, state: DeviceState) {
        let mut devices = self.devices.write();
        match devices.iter_mut().find(|d| d.id() == device_id) {
            Some(device) => device.set_state(state),
            None => tracing::debug!(device_id, "Ignoring refresh for unknown device"),
        }
    }

    /// Returns the device with the given name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Device> {
        self.devices.read().iter().find(|d| d.is_named(name)).cloned()
    }

    /// Returns a summary of every device, in discovery order.
    #[must_use]
    pub fn summaries(&self) -> Vec<DeviceSummary> {
        self.devices.read().iter().map(Device::summary).collect()
    }

    /// Returns the number of cached devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    /// Returns `true` if no device is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }

    /// Removes every device.
    pub fn clear(&self) {
        self.devices.write().clear();
    }

    fn replace(&self, devices: Vec<Device>) -> Result<(), Error> {
        check_unique(&devices)?;
        *self.devices.write() = devices;
        Ok(())
    }
}

fn check_unique(devices: &[Device]) -> Result<(), Error> {
    for (i, device) in devices.iter().enumerate() {
        if devices[..i].iter().any(|earlier| earlier.is_named(device.name())) {
            return Err(Error::Discovery(format!(
                "duplicate device name '{}'",
                device.name()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PowerState, Temperature};

    fn registry() -> DeviceRegistry {
        DeviceRegistry::from_devices(vec![
            Device::new("d1", "Living Room"),
            Device::new("d2", "Bedroom"),
        ])
        .unwrap()
    }

    #[test]
    fn resolve_all_keeps_discovery_order() {
        let names: Vec<_> = registry()
            .resolve(&Selector::All)
            .unwrap()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, ["Living Room", "Bedroom"]);
    }

    #[test]
    fn resolve_named_ignores_case() {
        let devices = registry().resolve(&Selector::named("BEDROOM")).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id(), "d2");
    }

    #[test]
    fn resolve_unknown_lists_known_names() {
        let err = registry().resolve(&Selector::named("Kitchen")).unwrap_err();
        match err {
            Error::DeviceNotFound { name, known } => {
                assert_eq!(name, "Kitchen");
                assert_eq!(known, ["Living Room", "Bedroom"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn resolve_is_never_fuzzy() {
        let registry = registry();
        assert!(registry.resolve(&Selector::named("Living")).is_err());
        assert!(registry.resolve(&Selector::named("Bedroom 2")).is_err());
    }

    #[test]
    fn resolve_all_on_empty_registry() {
        let err = DeviceRegistry::new().resolve(&Selector::All).unwrap_err();
        assert!(matches!(err, Error::NoDevices));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = DeviceRegistry::from_devices(vec![
            Device::new("d1", "Bedroom"),
            Device::new("d2", "bedroom"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Discovery(_)));
    }

    #[test]
    fn refresh_replaces_state() {
        let registry = registry();
        let mut state = DeviceState::new();
        state.set_power(PowerState::On);
        state.set_temperature(Temperature::new(24).unwrap());

        registry.refresh("d1", state.clone());
        assert_eq!(registry.get("living room").unwrap().state(), &state);

        // Unknown ids are ignored.
        registry.refresh("gone", DeviceState::new());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn summaries_and_clear() {
        let registry = registry();
        let summaries = registry.summaries();
        assert_eq!(summaries[0].id, "d1");
        assert_eq!(summaries[1].name, "Bedroom");

        registry.clear();
        assert!(registry.is_empty());
    }
}
