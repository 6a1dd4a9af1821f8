// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device selection and per-device results.

use std::fmt;

use crate::command::Command;
use crate::device::Device;
use crate::error::Error;
use crate::state::DeviceState;

/// Which devices an operation targets.
///
/// ```
/// use miraie_lib::manager::Selector;
///
/// assert_eq!(Selector::parse(None), Selector::All);
/// assert_eq!(Selector::parse(Some("ALL")), Selector::All);
/// assert_eq!(Selector::parse(Some("Bedroom")), Selector::named("Bedroom"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Every registered device.
    All,
    /// The single device with this name (case-insensitive).
    Named(String),
}

impl Selector {
    /// Parses an optional device name.
    ///
    /// `None`, the empty string and `"all"` select every device.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::All,
            Some(name) if name.eq_ignore_ascii_case("all") => Self::All,
            Some(name) => Self::Named(name.to_string()),
        }
    }

    /// Selects a device by name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        Self::parse(Some(raw))
    }
}

impl From<Option<&str>> for Selector {
    fn from(raw: Option<&str>) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all devices"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// The result of one operation on one device.
#[derive(Debug)]
pub struct CommandOutcome {
    device_id: String,
    device_name: String,
    command: Command,
    result: Result<DeviceState, Error>,
}

impl CommandOutcome {
    pub(crate) fn new(device: &Device, command: Command, result: Result<DeviceState, Error>) -> Self {
        Self {
            device_id: device.id().to_string(),
            device_name: device.name().to_string(),
            command,
            result,
        }
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the device name.
    #[must_use]
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Returns the command that was executed.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command
    }

    /// Returns the new state or the device's error.
    #[must_use]
    pub fn result(&self) -> &Result<DeviceState, Error> {
        &self.result
    }

    /// Consumes the outcome, returning the result.
    pub fn into_result(self) -> Result<DeviceState, Error> {
        self.result
    }

    /// Returns `true` if the device carried out the command.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns the new state, if the command succeeded.
    #[must_use]
    pub fn state(&self) -> Option<&DeviceState> {
        self.result.as_ref().ok()
    }

    /// Returns the error, if the command failed.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.result.as_ref().err()
    }
}

/// One-line human summary, e.g. `Set Living Room temperature to 24°C`.
impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.device_name;
        let state = match &self.result {
            Ok(state) => state,
            Err(e) => return write!(f, "{name}: {e}"),
        };
        match self.command {
            Command::TurnOn => write!(f, "Turned on {name}"),
            Command::TurnOff => write!(f, "Turned off {name}"),
            Command::SetTemperature(t) => write!(f, "Set {name} temperature to {t}"),
            Command::SetMode(m) => write!(f, "Set {name} mode to {m}"),
            Command::SetFanMode(s) => write!(f, "Set {name} fan mode to {s}"),
            Command::SetPresetMode(p) => write!(f, "Set {name} preset to {p}"),
            Command::SetVerticalSwing(p) => write!(f, "Set {name} vertical swing to {p}"),
            Command::SetHorizontalSwing(p) => write!(f, "Set {name} horizontal swing to {p}"),
            Command::GetStatus => write!(f, "{name}: {state}"),
        }
    }
}

/// Counting helpers over a batch of outcomes.
pub trait Outcomes {
    /// Number of devices that carried out the command.
    fn succeeded(&self) -> usize;

    /// Number of devices that failed.
    fn failed(&self) -> usize;
}

impl Outcomes for [CommandOutcome] {
    fn succeeded(&self) -> usize {
        self.iter().filter(|o| o.is_success()).count()
    }

    fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeviceError;
    use crate::types::{PowerState, Temperature};

    fn outcome(name: &str, command: Command, result: Result<DeviceState, Error>) -> CommandOutcome {
        CommandOutcome::new(&Device::new("id", name), command, result)
    }

    #[test]
    fn selector_parsing() {
        assert_eq!(Selector::parse(Some("")), Selector::All);
        assert_eq!(Selector::parse(Some(" all ")), Selector::All);
        assert_eq!(Selector::from("Living Room"), Selector::named("Living Room"));
        assert_eq!(Selector::from(None), Selector::All);
    }

    #[test]
    fn success_display() {
        let t = Temperature::new(24).unwrap();
        let o = outcome("Living Room", Command::SetTemperature(t), Ok(DeviceState::new()));
        assert_eq!(o.to_string(), "Set Living Room temperature to 24°C");
        assert!(o.is_success());

        let o = outcome("Bedroom", Command::TurnOn, Ok(DeviceState::new()));
        assert_eq!(o.to_string(), "Turned on Bedroom");
    }

    #[test]
    fn status_display_renders_state() {
        let mut state = DeviceState::new();
        state.set_power(PowerState::Off);
        let o = outcome("Bedroom", Command::GetStatus, Ok(state));
        assert_eq!(o.to_string(), "Bedroom: off");
    }

    #[test]
    fn failure_display() {
        let err = DeviceError::Unavailable {
            device: "Bedroom".into(),
            reason: "offline".into(),
        };
        let o = outcome("Bedroom", Command::TurnOn, Err(err.into()));
        assert!(o.to_string().starts_with("Bedroom: "));
        assert!(o.to_string().contains("offline"));
        assert!(o.error().is_some());
    }

    #[test]
    fn counting() {
        let outcomes = vec![
            outcome("A", Command::TurnOn, Ok(DeviceState::new())),
            outcome("B", Command::TurnOn, Err(Error::NoDevices)),
            outcome("C", Command::TurnOn, Ok(DeviceState::new())),
        ];
        assert_eq!(outcomes.succeeded(), 2);
        assert_eq!(outcomes.failed(), 1);
    }
}
