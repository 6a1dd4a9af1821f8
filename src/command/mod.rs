// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Air conditioner commands and their translation into device requests.
//!
//! A [`Command`] is a validated, typed intent. [`translate`] turns it into
//! one [`MutationRequest`] per target device, refusing devices that lack
//! the required capability.
//!
//! # Wire fields
//!
//! | Command | Fields |
//! |---------|--------|
//! | [`Command::TurnOn`] / [`Command::TurnOff`] | `ps` |
//! | [`Command::SetTemperature`] | `actmp` (`"24.0"`) |
//! | [`Command::SetMode`] | `acmd` |
//! | [`Command::SetFanMode`] | `acfs` |
//! | [`Command::SetPresetMode`] | `acem`, `acpm` |
//! | [`Command::SetVerticalSwing`] | `acvs` |
//! | [`Command::SetHorizontalSwing`] | `achs` |
//!
//! # Examples
//!
//! ```
//! use miraie_lib::command::{Command, OperationKind};
//! use miraie_lib::types::Mode;
//!
//! let cmd = Command::parse(OperationKind::SetMode, Some("COOL")).unwrap();
//! assert_eq!(cmd, Command::SetMode(Mode::Cool));
//!
//! assert!(Command::parse(OperationKind::SetTemperature, Some("31")).is_err());
//! assert!(Command::parse(OperationKind::SetTemperature, None).is_err());
//! ```

mod mutation;
mod operation;

pub use mutation::MutationRequest;
pub use operation::OperationKind;

use crate::device::Device;
use crate::error::{DeviceError, Error, ValueError};
use crate::state::StateChange;
use crate::types::{
    FanSpeed, Mode, NormalizedValue, PowerState, Preset, SwingPosition, Temperature, validate,
};

/// A validated command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Power on.
    TurnOn,
    /// Power off.
    TurnOff,
    /// Set the target temperature.
    SetTemperature(Temperature),
    /// Set the operating mode.
    SetMode(Mode),
    /// Set the fan speed.
    SetFanMode(FanSpeed),
    /// Set the preset.
    SetPresetMode(Preset),
    /// Set the vertical louver position.
    SetVerticalSwing(SwingPosition),
    /// Set the horizontal louver position.
    SetHorizontalSwing(SwingPosition),
    /// Query the current state.
    GetStatus,
}

impl Command {
    /// Validates a raw operand for `kind` and builds the command.
    ///
    /// Operations without an operand ignore it.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidValue` if the operand is missing or not a
    /// member of the legal set, and `ValueError::OutOfRange` for a
    /// temperature outside [16, 30].
    pub fn parse(kind: OperationKind, operand: Option<&str>) -> Result<Self, ValueError> {
        let Some(value_kind) = kind.value_kind() else {
            return Ok(match kind {
                OperationKind::TurnOn => Self::TurnOn,
                OperationKind::TurnOff => Self::TurnOff,
                _ => Self::GetStatus,
            });
        };

        // An empty operand fails validation with value "" and the legal set.
        let value = validate(value_kind, operand.unwrap_or_default())?;
        Ok(match value {
            NormalizedValue::Power(PowerState::On) => Self::TurnOn,
            NormalizedValue::Power(PowerState::Off) => Self::TurnOff,
            NormalizedValue::Temperature(t) => Self::SetTemperature(t),
            NormalizedValue::Mode(m) => Self::SetMode(m),
            NormalizedValue::FanSpeed(f) => Self::SetFanMode(f),
            NormalizedValue::Preset(p) => Self::SetPresetMode(p),
            NormalizedValue::VerticalSwing(s) => Self::SetVerticalSwing(s),
            NormalizedValue::HorizontalSwing(s) => Self::SetHorizontalSwing(s),
        })
    }

    /// Returns the operation this command performs.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::TurnOn => OperationKind::TurnOn,
            Self::TurnOff => OperationKind::TurnOff,
            Self::SetTemperature(_) => OperationKind::SetTemperature,
            Self::SetMode(_) => OperationKind::SetMode,
            Self::SetFanMode(_) => OperationKind::SetFanMode,
            Self::SetPresetMode(_) => OperationKind::SetPresetMode,
            Self::SetVerticalSwing(_) => OperationKind::SetVerticalSwing,
            Self::SetHorizontalSwing(_) => OperationKind::SetHorizontalSwing,
            Self::GetStatus => OperationKind::GetStatus,
        }
    }

    /// Returns the state change the command asks for, if any.
    #[must_use]
    pub fn state_change(&self) -> Option<StateChange> {
        Some(match *self {
            Self::TurnOn => StateChange::Power(PowerState::On),
            Self::TurnOff => StateChange::Power(PowerState::Off),
            Self::SetTemperature(t) => StateChange::Temperature(t),
            Self::SetMode(m) => StateChange::Mode(m),
            Self::SetFanMode(f) => StateChange::FanSpeed(f),
            Self::SetPresetMode(p) => StateChange::Preset(p),
            Self::SetVerticalSwing(s) => StateChange::VerticalSwing(s),
            Self::SetHorizontalSwing(s) => StateChange::HorizontalSwing(s),
            Self::GetStatus => return None,
        })
    }

    /// Builds the wire request, without capability checks.
    #[must_use]
    pub fn to_request(&self) -> MutationRequest {
        let Some(change) = self.state_change() else {
            return MutationRequest::query();
        };
        let mut request = MutationRequest::mutation(change);
        match *self {
            Self::TurnOn => request.ps = Some(PowerState::On.as_str()),
            Self::TurnOff => request.ps = Some(PowerState::Off.as_str()),
            Self::SetTemperature(t) => request.actmp = Some(t.wire_value()),
            Self::SetMode(m) => request.acmd = Some(m.as_str()),
            Self::SetFanMode(f) => request.acfs = Some(f.as_str()),
            Self::SetPresetMode(p) => {
                request.acem = Some(switch(p.eco()));
                request.acpm = Some(switch(p.boost()));
            }
            Self::SetVerticalSwing(s) => request.acvs = Some(s.wire_value()),
            Self::SetHorizontalSwing(s) => request.achs = Some(s.wire_value()),
            Self::GetStatus => {}
        }
        request
    }
}

const fn switch(on: bool) -> &'static str {
    if on {
        PowerState::On.as_str()
    } else {
        PowerState::Off.as_str()
    }
}

/// Translates a command into one request per device, in order.
///
/// Devices lacking the required capability get
/// `DeviceError::UnsupportedOperation`; the others are unaffected.
#[must_use]
pub fn translate(command: &Command, devices: &[Device]) -> Vec<Result<MutationRequest, Error>> {
    let kind = command.kind();
    devices
        .iter()
        .map(|device| {
            if kind.supported_by(device.capabilities()) {
                Ok(command.to_request())
            } else {
                Err(DeviceError::UnsupportedOperation {
                    device: device.name().to_string(),
                    operation: kind.to_string(),
                }
                .into())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capabilities;

    fn body(command: Command) -> serde_json::Value {
        serde_json::to_value(command.to_request()).unwrap()
    }

    #[test]
    fn power_fields() {
        assert_eq!(body(Command::TurnOn)["ps"], "on");
        assert_eq!(body(Command::TurnOff)["ps"], "off");
    }

    #[test]
    fn preset_sets_both_switches() {
        let eco = body(Command::SetPresetMode(Preset::Eco));
        assert_eq!(eco["acem"], "on");
        assert_eq!(eco["acpm"], "off");

        let none = body(Command::SetPresetMode(Preset::None));
        assert_eq!(none["acem"], "off");
        assert_eq!(none["acpm"], "off");
    }

    #[test]
    fn swing_uses_integer_positions() {
        assert_eq!(body(Command::SetVerticalSwing(SwingPosition::Fixed(3)))["acvs"], 3);
        assert_eq!(body(Command::SetHorizontalSwing(SwingPosition::Auto))["achs"], 0);
    }

    #[test]
    fn request_is_partial() {
        let b = body(Command::SetFanMode(FanSpeed::High));
        let map = b.as_object().unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map["acfs"], "high");
    }

    #[test]
    fn status_is_a_query() {
        assert!(Command::GetStatus.to_request().is_query());
    }

    #[test]
    fn missing_operand_is_invalid_value() {
        let err = Command::parse(OperationKind::SetMode, None).unwrap_err();
        match err {
            ValueError::InvalidValue { field, value, allowed } => {
                assert_eq!(field, "mode");
                assert_eq!(value, "");
                assert!(allowed.contains(&"cool"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn operand_ignored_for_power() {
        assert_eq!(
            Command::parse(OperationKind::TurnOn, Some("whatever")).unwrap(),
            Command::TurnOn
        );
    }

    #[test]
    fn translate_checks_capabilities_per_device() {
        let devices = vec![
            Device::new("d1", "Living Room"),
            Device::new("d2", "Bedroom").with_capabilities(Capabilities::basic()),
            Device::new("d3", "Study"),
        ];

        let results = translate(&Command::SetMode(Mode::Dry), &devices);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(
            &results[1],
            Err(Error::Device(DeviceError::UnsupportedOperation { device, .. })) if device == "Bedroom"
        ));
        assert!(results[2].is_ok());

        let results = translate(&Command::TurnOn, &devices);
        assert!(results.iter().all(Result::is_ok));
    }
}
