// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-device remote calls.

use std::sync::Arc;

use crate::command::MutationRequest;
use crate::device::Device;
use crate::error::{DeviceError, Error, NetworkError};
use crate::session::Session;
use crate::state::DeviceState;

/// Performs one mutation or status query against one device.
///
/// The client never retries. Errors are mapped as follows:
///
/// | Failure | Error |
/// |---------|-------|
/// | transport, timeout, HTTP 5xx | `Error::Network` |
/// | HTTP 401/403 | `Error::Authentication` |
/// | other HTTP 4xx, device reported offline | `DeviceError::Unavailable` |
#[derive(Debug, Clone)]
pub struct DeviceClient {
    session: Arc<Session>,
}

impl DeviceClient {
    /// Creates a client that authenticates through `session`.
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Sends a request and returns the device's new state.
    ///
    /// The new state is the device's previous state with the acknowledged
    /// mutation applied, overlaid with whatever fields the reply reports.
    ///
    /// # Errors
    ///
    /// See the type-level table.
    pub async fn send(&self, device: &Device, request: &MutationRequest) -> Result<DeviceState, Error> {
        let credential = self.session.ensure_valid().await?;
        let api = self.session.api();

        tracing::debug!(
            device = %device.name(),
            query = request.is_query(),
            "Sending device request"
        );

        let response = if request.is_query() {
            api.device_status(credential.token(), device.id()).await
        } else {
            api.control(credential.token(), device.id(), request).await
        }
        .map_err(|e| map_error(device, e))?;

        if response.online() == Some(false) {
            return Err(DeviceError::Unavailable {
                device: device.name().to_string(),
                reason: "device is offline".into(),
            }
            .into());
        }

        let mut state = device.state().clone();
        if let Some(change) = request.change() {
            state.apply(change);
        }
        if !response.is_empty() {
            state.apply(&response.to_state_change());
        }
        Ok(state)
    }
}

fn map_error(device: &Device, error: Error) -> Error {
    match error {
        Error::Network(NetworkError::Status { status, reason }) if (400..500).contains(&status) => {
            DeviceError::Unavailable {
                device: device.name().to_string(),
                reason: format!("HTTP {status} - {reason}"),
            }
            .into()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_become_unavailable() {
        let device = Device::new("d1", "Bedroom");
        let err = map_error(
            &device,
            NetworkError::Status {
                status: 404,
                reason: "Not Found".into(),
            }
            .into(),
        );
        assert!(matches!(
            err,
            Error::Device(DeviceError::Unavailable { device, .. }) if device == "Bedroom"
        ));
    }

    #[test]
    fn server_errors_stay_network() {
        let device = Device::new("d1", "Bedroom");
        let err = map_error(
            &device,
            NetworkError::Status {
                status: 503,
                reason: "Service Unavailable".into(),
            }
            .into(),
        );
        assert!(matches!(err, Error::Network(NetworkError::Status { status: 503, .. })));
    }
}
