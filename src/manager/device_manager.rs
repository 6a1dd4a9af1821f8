// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device manager coordinating the session, registry and device calls.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use secrecy::SecretString;
use tokio::sync::Mutex;
use tokio::time::{Instant, timeout_at};

use crate::command::{Command, MutationRequest, OperationKind, translate};
use crate::config::ClientConfig;
use crate::device::{Device, DeviceClient, DeviceSummary};
use crate::error::{Error, NetworkError, ValueError};
use crate::protocol::ApiClient;
use crate::session::Session;
use crate::state::DeviceState;
use crate::types::{FanSpeed, Mode, Preset, SwingPosition, Temperature};

use super::{CommandOutcome, DeviceRegistry, Selector};

/// Entry point for controlling the air conditioners of one account.
///
/// Every operation:
///
/// 1. makes sure the session token is valid (logging in again if needed),
/// 2. resolves the selector against the registry,
/// 3. validates the operand,
/// 4. sends one request per device, concurrently,
/// 5. refreshes each device's cached state as soon as it answers.
///
/// Steps 1 to 3 fail the whole call. From step 4 on, each device gets its
/// own [`CommandOutcome`], in resolution order, so one unreachable unit does
/// not hide the others.
///
/// Calls are serialized: a second call waits until the first has finished.
///
/// # Examples
///
/// ```no_run
/// use miraie_lib::manager::{DeviceManager, Selector};
/// use miraie_lib::Temperature;
///
/// #[tokio::main]
/// async fn main() -> miraie_lib::Result<()> {
///     let manager = DeviceManager::initialize_from_env().await?;
///
///     for device in manager.list_devices()? {
///         println!("{device}");
///     }
///
///     let outcomes = manager
///         .set_temperature(Selector::All, Temperature::new(24)?)
///         .await?;
///     for outcome in &outcomes {
///         println!("{outcome}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DeviceManager {
    session: Arc<Session>,
    client: DeviceClient,
    registry: Arc<DeviceRegistry>,
    call_lock: Arc<Mutex<()>>,
    batch_timeout: Duration,
}

impl DeviceManager {
    /// Creates an uninitialized manager.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        let api = ApiClient::new(config)?;
        let session = Arc::new(Session::new(api, config.refresh_margin()));
        Ok(Self {
            client: DeviceClient::new(Arc::clone(&session)),
            session,
            registry: Arc::new(DeviceRegistry::new()),
            call_lock: Arc::new(Mutex::new(())),
            batch_timeout: config.batch_timeout(),
        })
    }

    /// Loads the configuration from the environment, logs in and discovers
    /// devices.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` before any network activity if the
    /// credentials are missing, otherwise the errors of
    /// [`initialize`](Self::initialize).
    pub async fn initialize_from_env() -> Result<Self, Error> {
        Self::initialize_with(&ClientConfig::from_env()?).await
    }

    /// Builds a manager from `config` and initializes it with the
    /// configured credentials.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if `config` has no credentials,
    /// otherwise the errors of [`initialize`](Self::initialize).
    pub async fn initialize_with(config: &ClientConfig) -> Result<Self, Error> {
        let (login_id, secret) = config
            .credentials()
            .ok_or_else(|| Error::Configuration("no credentials configured".into()))?;
        let manager = Self::from_config(config)?;
        manager.initialize(login_id, secret.clone()).await?;
        Ok(manager)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Logs in and discovers the account's devices.
    ///
    /// # Errors
    ///
    /// Returns `Error::Authentication`, `Error::Network` or
    /// `Error::Discovery`.
    pub async fn initialize(
        &self,
        identifier: &str,
        secret: impl Into<SecretString>,
    ) -> Result<(), Error> {
        let _guard = self.call_lock.lock().await;
        self.session.login(identifier, secret.into()).await?;
        self.registry.discover(&self.session).await?;
        Ok(())
    }

    /// Re-runs device discovery, replacing the cache.
    ///
    /// # Errors
    ///
    /// Returns `Error::Authentication` or `Error::Discovery`.
    pub async fn rediscover(&self) -> Result<Vec<DeviceSummary>, Error> {
        let _guard = self.call_lock.lock().await;
        let devices = self.registry.discover(&self.session).await?;
        Ok(devices.iter().map(Device::summary).collect())
    }

    /// Logs out and forgets every device.
    pub async fn logout(&self) {
        let _guard = self.call_lock.lock().await;
        self.session.logout().await;
        self.registry.clear();
    }

    /// Returns `true` if the session holds a token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Returns the device registry.
    #[must_use]
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lists the discovered devices.
    ///
    /// # Errors
    ///
    /// Returns `Error::Discovery` if nothing has been discovered.
    pub fn list_devices(&self) -> Result<Vec<DeviceSummary>, Error> {
        if self.registry.is_empty() {
            return Err(Error::Discovery("no devices discovered".into()));
        }
        Ok(self.registry.summaries())
    }

    /// Queries a device's current status and returns the refreshed device.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` for an unknown name, or the device's
    /// error if the status query fails.
    pub async fn get_device_details(&self, name: &str) -> Result<Device, Error> {
        let _guard = self.call_lock.lock().await;
        self.session.ensure_valid().await?;
        let device = self
            .registry
            .resolve(&Selector::named(name))?
            .into_iter()
            .next()
            .ok_or(Error::NoDevices)?;

        let state = self.client.send(&device, &MutationRequest::query()).await?;
        self.registry.refresh(device.id(), state.clone());
        Ok(device.with_state(state))
    }

    /// Queries the status of the selected devices.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn get_status(&self, selector: impl Into<Selector>) -> Result<Vec<CommandOutcome>, Error> {
        self.dispatch(selector.into(), Ok(Command::GetStatus)).await
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Executes a named operation with a raw operand.
    ///
    /// # Errors
    ///
    /// - `Error::Authentication` if the session cannot be refreshed.
    /// - `Error::DeviceNotFound` or `Error::NoDevices` from the selector.
    /// - `Error::Value` if the operand is missing or invalid.
    ///
    /// Failures of individual devices are reported in the outcomes.
    pub async fn execute(
        &self,
        selector: impl Into<Selector>,
        operation: OperationKind,
        operand: Option<&str>,
    ) -> Result<Vec<CommandOutcome>, Error> {
        self.dispatch(selector.into(), Command::parse(operation, operand))
            .await
    }

    /// Turns the selected devices on.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn turn_on(&self, selector: impl Into<Selector>) -> Result<Vec<CommandOutcome>, Error> {
        self.dispatch(selector.into(), Ok(Command::TurnOn)).await
    }

    /// Turns the selected devices off.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn turn_off(&self, selector: impl Into<Selector>) -> Result<Vec<CommandOutcome>, Error> {
        self.dispatch(selector.into(), Ok(Command::TurnOff)).await
    }

    /// Sets the target temperature.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_temperature(
        &self,
        selector: impl Into<Selector>,
        temperature: Temperature,
    ) -> Result<Vec<CommandOutcome>, Error> {
        self.dispatch(selector.into(), Ok(Command::SetTemperature(temperature)))
            .await
    }

    /// Sets the operating mode.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_mode(
        &self,
        selector: impl Into<Selector>,
        mode: Mode,
    ) -> Result<Vec<CommandOutcome>, Error> {
        self.dispatch(selector.into(), Ok(Command::SetMode(mode))).await
    }

    /// Sets the fan speed.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_fan_mode(
        &self,
        selector: impl Into<Selector>,
        speed: FanSpeed,
    ) -> Result<Vec<CommandOutcome>, Error> {
        self.dispatch(selector.into(), Ok(Command::SetFanMode(speed))).await
    }

    /// Sets the preset.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_preset_mode(
        &self,
        selector: impl Into<Selector>,
        preset: Preset,
    ) -> Result<Vec<CommandOutcome>, Error> {
        self.dispatch(selector.into(), Ok(Command::SetPresetMode(preset)))
            .await
    }

    /// Sets the vertical louver position.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_vertical_swing(
        &self,
        selector: impl Into<Selector>,
        position: SwingPosition,
    ) -> Result<Vec<CommandOutcome>, Error> {
        self.dispatch(selector.into(), Ok(Command::SetVerticalSwing(position)))
            .await
    }

    /// Sets the horizontal louver position.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_horizontal_swing(
        &self,
        selector: impl Into<Selector>,
        position: SwingPosition,
    ) -> Result<Vec<CommandOutcome>, Error> {
        self.dispatch(selector.into(), Ok(Command::SetHorizontalSwing(position)))
            .await
    }

    // =========================================================================
    // Batch execution
    // =========================================================================

    async fn dispatch(
        &self,
        selector: Selector,
        command: Result<Command, ValueError>,
    ) -> Result<Vec<CommandOutcome>, Error> {
        let _guard = self.call_lock.lock().await;
        self.session.ensure_valid().await?;
        let (devices, command) = match self
            .registry
            .resolve(&selector)
            .and_then(|devices| Ok((devices, command?)))
        {
            Ok(prepared) => prepared,
            Err(e) => {
                if e.is_caller_error() {
                    tracing::debug!(selector = %selector, error = %e, "Rejected command");
                } else {
                    tracing::warn!(selector = %selector, error = %e, "Command failed");
                }
                return Err(e);
            }
        };

        tracing::debug!(
            operation = %command.kind(),
            selector = %selector,
            devices = devices.len(),
            "Executing command"
        );
        Ok(self.run_batch(command, devices).await)
    }

    async fn run_batch(&self, command: Command, devices: Vec<Device>) -> Vec<CommandOutcome> {
        let requests = translate(&command, &devices);
        let mut results: Vec<Option<Result<DeviceState, Error>>> =
            std::iter::repeat_with(|| None).take(devices.len()).collect();

        let mut pending = FuturesUnordered::new();
        for (index, (device, request)) in devices.iter().zip(requests).enumerate() {
            match request {
                Ok(request) => pending.push(self.send_one(index, device, request)),
                Err(e) => {
                    tracing::warn!(device = %device.name(), error = %e, "Skipping device");
                    results[index] = Some(Err(e));
                }
            }
        }

        let deadline = Instant::now() + self.batch_timeout;
        loop {
            match timeout_at(deadline, pending.next()).await {
                Ok(Some((index, result))) => results[index] = Some(result),
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(
                        operation = %command.kind(),
                        unsettled = pending.len(),
                        "Batch timed out"
                    );
                    break;
                }
            }
        }
        // Aborts the requests still in flight.
        drop(pending);

        let timeout_ms = u64::try_from(self.batch_timeout.as_millis()).unwrap_or(u64::MAX);
        devices
            .iter()
            .zip(results)
            .map(|(device, result)| {
                let result =
                    result.unwrap_or_else(|| Err(NetworkError::Timeout(timeout_ms).into()));
                CommandOutcome::new(device, command, result)
            })
            .collect()
    }

    async fn send_one(
        &self,
        index: usize,
        device: &Device,
        request: MutationRequest,
    ) -> (usize, Result<DeviceState, Error>) {
        let result = self.client.send(device, &request).await;
        match &result {
            Ok(state) => self.registry.refresh(device.id(), state.clone()),
            Err(e) => tracing::warn!(device = %device.name(), error = %e, "Device request failed"),
        }
        (index, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> DeviceManager {
        DeviceManager::from_config(&ClientConfig::new().with_base_url("http://127.0.0.1:9")).unwrap()
    }

    #[test]
    fn list_devices_before_discovery_fails() {
        let err = manager().list_devices().unwrap_err();
        assert!(matches!(err, Error::Discovery(_)));
    }

    #[tokio::test]
    async fn operations_require_login() {
        let err = manager().turn_on(Selector::All).await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[tokio::test]
    async fn initialize_with_requires_credentials() {
        let err = DeviceManager::initialize_with(&ClientConfig::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
