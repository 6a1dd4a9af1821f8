// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operation names.

use std::fmt;
use std::str::FromStr;

use crate::capabilities::Capabilities;
use crate::error::{Error, ParseError};
use crate::types::ValueKind;

/// A named operation that can be executed against a selection of devices.
///
/// Parsing is lenient about the spelling: camelCase (`setTemperature`),
/// snake_case (`set_temperature`) and the tool-style names
/// (`turn_on_device`, `set_vertical_swing_mode`, `get_device_status`) are
/// all accepted.
///
/// ```
/// use miraie_lib::command::OperationKind;
///
/// let kind: OperationKind = "set_vertical_swing_mode".parse().unwrap();
/// assert_eq!(kind, OperationKind::SetVerticalSwing);
/// assert_eq!(kind.to_string(), "setVerticalSwing");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Power on.
    TurnOn,
    /// Power off.
    TurnOff,
    /// Set the target temperature.
    SetTemperature,
    /// Set the operating mode.
    SetMode,
    /// Set the fan speed.
    SetFanMode,
    /// Set the preset.
    SetPresetMode,
    /// Set the vertical louver position.
    SetVerticalSwing,
    /// Set the horizontal louver position.
    SetHorizontalSwing,
    /// Query the current state.
    GetStatus,
}

impl OperationKind {
    /// All operations.
    pub const ALL: [Self; 9] = [
        Self::TurnOn,
        Self::TurnOff,
        Self::SetTemperature,
        Self::SetMode,
        Self::SetFanMode,
        Self::SetPresetMode,
        Self::SetVerticalSwing,
        Self::SetHorizontalSwing,
        Self::GetStatus,
    ];

    /// Returns the camelCase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::SetTemperature => "setTemperature",
            Self::SetMode => "setMode",
            Self::SetFanMode => "setFanMode",
            Self::SetPresetMode => "setPresetMode",
            Self::SetVerticalSwing => "setVerticalSwing",
            Self::SetHorizontalSwing => "setHorizontalSwing",
            Self::GetStatus => "getStatus",
        }
    }

    /// Returns the kind of operand the operation takes, if any.
    #[must_use]
    pub const fn value_kind(self) -> Option<ValueKind> {
        match self {
            Self::TurnOn | Self::TurnOff | Self::GetStatus => None,
            Self::SetTemperature => Some(ValueKind::Temperature),
            Self::SetMode => Some(ValueKind::Mode),
            Self::SetFanMode => Some(ValueKind::FanSpeed),
            Self::SetPresetMode => Some(ValueKind::Preset),
            Self::SetVerticalSwing => Some(ValueKind::VerticalSwing),
            Self::SetHorizontalSwing => Some(ValueKind::HorizontalSwing),
        }
    }

    /// Returns `true` if a device with these capabilities supports the
    /// operation. Power, temperature and status are always supported.
    #[must_use]
    pub const fn supported_by(self, capabilities: &Capabilities) -> bool {
        match self {
            Self::TurnOn | Self::TurnOff | Self::SetTemperature | Self::GetStatus => true,
            Self::SetMode => capabilities.mode,
            Self::SetFanMode => capabilities.fan,
            Self::SetPresetMode => capabilities.preset,
            Self::SetVerticalSwing | Self::SetHorizontalSwing => capabilities.swing,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let kind = match key.as_str() {
            "turnon" | "turnondevice" => Self::TurnOn,
            "turnoff" | "turnoffdevice" => Self::TurnOff,
            "settemperature" => Self::SetTemperature,
            "setmode" => Self::SetMode,
            "setfanmode" | "setfanspeed" => Self::SetFanMode,
            "setpresetmode" | "setpreset" => Self::SetPresetMode,
            "setverticalswing" | "setverticalswingmode" => Self::SetVerticalSwing,
            "sethorizontalswing" | "sethorizontalswingmode" => Self::SetHorizontalSwing,
            "getstatus" | "getdevicestatus" => Self::GetStatus,
            _ => {
                return Err(ParseError::InvalidValue {
                    field: "operation".into(),
                    message: format!("unknown operation '{}'", s.trim()),
                }
                .into());
            }
        };
        Ok(kind)
    }
}
