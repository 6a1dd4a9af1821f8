// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode, fan speed and preset enumerations.
//!
//! Each type is a closed set. Parsing is case-insensitive and ignores
//! surrounding whitespace; anything else fails with
//! [`ValueError::InvalidValue`] naming the field and listing the legal values.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

use super::invalid_value;

/// Air conditioner operating mode.
///
/// # Examples
///
/// ```
/// use miraie_lib::types::Mode;
///
/// let mode: Mode = "Cool".parse().unwrap();
/// assert_eq!(mode, Mode::Cool);
/// assert_eq!(mode.as_str(), "cool");
/// assert!("turbo".parse::<Mode>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Automatic mode selection.
    Auto,
    /// Cooling.
    Cool,
    /// Heating.
    Heat,
    /// Dehumidifying.
    Dry,
    /// Fan only.
    Fan,
}

impl Mode {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "mode";

    /// Every mode, in canonical order.
    pub const ALL: [Self; 5] = [Self::Auto, Self::Cool, Self::Heat, Self::Dry, Self::Fan];

    /// Returns the cloud string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cool => "cool",
            Self::Heat => "heat",
            Self::Dry => "dry",
            Self::Fan => "fan",
        }
    }

    /// Returns the legal values, for error reporting.
    #[must_use]
    pub fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| invalid_value(Self::FIELD, s, Self::allowed()))
    }
}

/// Fan speed setting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FanSpeed {
    /// Speed chosen by the unit.
    Auto,
    /// Low speed.
    Low,
    /// Medium speed.
    Medium,
    /// High speed.
    High,
}

impl FanSpeed {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "fan_mode";

    /// Every fan speed, in canonical order.
    pub const ALL: [Self; 4] = [Self::Auto, Self::Low, Self::Medium, Self::High];

    /// Returns the cloud string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns the legal values, for error reporting.
    #[must_use]
    pub fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == needle)
            .ok_or_else(|| invalid_value(Self::FIELD, s, Self::allowed()))
    }
}

/// Preset mode.
///
/// The cloud models presets as two independent switches, economy and
/// powerful. A preset always sets both so that at most one is active.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Neither economy nor boost.
    #[default]
    None,
    /// Economy mode.
    Eco,
    /// Powerful (boost) mode.
    Boost,
}

impl Preset {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "preset_mode";

    /// Every preset, in canonical order.
    pub const ALL: [Self; 3] = [Self::None, Self::Eco, Self::Boost];

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Eco => "eco",
            Self::Boost => "boost",
        }
    }

    /// Returns the legal values, for error reporting.
    #[must_use]
    pub fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }

    /// Returns whether the economy switch is on for this preset.
    #[must_use]
    pub const fn eco(&self) -> bool {
        matches!(self, Self::Eco)
    }

    /// Returns whether the powerful switch is on for this preset.
    #[must_use]
    pub const fn boost(&self) -> bool {
        matches!(self, Self::Boost)
    }

    /// Rebuilds a preset from the two cloud switches.
    ///
    /// Boost wins if the cloud reports both.
    #[must_use]
    pub const fn from_switches(eco: bool, boost: bool) -> Self {
        if boost {
            Self::Boost
        } else if eco {
            Self::Eco
        } else {
            Self::None
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == needle)
            .ok_or_else(|| invalid_value(Self::FIELD, s, Self::allowed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("HEAT".parse::<Mode>().unwrap(), Mode::Heat);
        assert_eq!(" dry ".parse::<Mode>().unwrap(), Mode::Dry);
    }

    #[test]
    fn mode_rejects_unknown_and_names_field() {
        let err = "turbo".parse::<Mode>().unwrap_err();
        match err {
            ValueError::InvalidValue {
                field,
                value,
                allowed,
            } => {
                assert_eq!(field, "mode");
                assert_eq!(value, "turbo");
                assert_eq!(allowed, vec!["auto", "cool", "heat", "dry", "fan"]);
            }
            ValueError::OutOfRange { .. } => panic!("expected InvalidValue"),
        }
    }

    #[test]
    fn fan_speed_round_trips_through_display() {
        for speed in FanSpeed::ALL {
            assert_eq!(speed.to_string().parse::<FanSpeed>().unwrap(), speed);
        }
        assert!("quiet".parse::<FanSpeed>().is_err());
    }

    #[test]
    fn preset_switches() {
        assert!(Preset::Eco.eco());
        assert!(!Preset::Eco.boost());
        assert!(Preset::Boost.boost());
        assert_eq!(Preset::from_switches(false, false), Preset::None);
        assert_eq!(Preset::from_switches(true, false), Preset::Eco);
        assert_eq!(Preset::from_switches(true, true), Preset::Boost);
    }

    #[test]
    fn preset_rejects_unknown() {
        let err = "sleep".parse::<Preset>().unwrap_err();
        assert!(matches!(err, ValueError::InvalidValue { field: "preset_mode", .. }));
    }
}
