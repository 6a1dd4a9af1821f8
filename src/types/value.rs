// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation of raw operands into typed values.
//!
//! Adapters receive operands as loosely typed strings (a tool argument, a
//! query parameter). [`validate`] turns such a string into a
//! [`NormalizedValue`] or a [`ValueError`] that names the field and the
//! legal set.

use std::fmt;

use crate::error::ValueError;

use super::{FanSpeed, Mode, PowerState, Preset, SwingPosition, Temperature, invalid_value};

const TEMPERATURE_VALUES: [&str; 15] = [
    "16", "17", "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30",
];

/// The kind of value an operand is validated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// On/off.
    Power,
    /// Target temperature.
    Temperature,
    /// Operating mode.
    Mode,
    /// Fan speed.
    FanSpeed,
    /// Preset mode.
    Preset,
    /// Vertical louver position.
    VerticalSwing,
    /// Horizontal louver position.
    HorizontalSwing,
}

impl ValueKind {
    /// Returns the field name reported in validation errors.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Power => PowerState::FIELD,
            Self::Temperature => Temperature::FIELD,
            Self::Mode => Mode::FIELD,
            Self::FanSpeed => FanSpeed::FIELD,
            Self::Preset => Preset::FIELD,
            Self::VerticalSwing => "vertical_swing_mode",
            Self::HorizontalSwing => "horizontal_swing_mode",
        }
    }
}

/// A validated operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizedValue {
    /// Power state.
    Power(PowerState),
    /// Temperature in range.
    Temperature(Temperature),
    /// Operating mode.
    Mode(Mode),
    /// Fan speed.
    FanSpeed(FanSpeed),
    /// Preset mode.
    Preset(Preset),
    /// Vertical louver position.
    VerticalSwing(SwingPosition),
    /// Horizontal louver position.
    HorizontalSwing(SwingPosition),
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power(v) => v.fmt(f),
            Self::Temperature(v) => v.fmt(f),
            Self::Mode(v) => v.fmt(f),
            Self::FanSpeed(v) => v.fmt(f),
            Self::Preset(v) => v.fmt(f),
            Self::VerticalSwing(v) | Self::HorizontalSwing(v) => v.fmt(f),
        }
    }
}

/// Validates a raw operand against the closed set (or range) of `kind`.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Errors
///
/// - `ValueError::InvalidValue` if the value is not a member of the set, or a
///   temperature is not an integer.
/// - `ValueError::OutOfRange` if a temperature integer is outside [16, 30].
///
/// # Examples
///
/// ```
/// use miraie_lib::types::{validate, NormalizedValue, Temperature, ValueKind};
///
/// let v = validate(ValueKind::Temperature, "24").unwrap();
/// assert_eq!(v, NormalizedValue::Temperature(Temperature::new(24).unwrap()));
///
/// assert!(validate(ValueKind::Temperature, "31").is_err());
/// assert!(validate(ValueKind::Mode, "turbo").is_err());
/// ```
pub fn validate(kind: ValueKind, raw: &str) -> Result<NormalizedValue, ValueError> {
    match kind {
        ValueKind::Power => raw.parse().map(NormalizedValue::Power),
        ValueKind::Temperature => validate_temperature(raw).map(NormalizedValue::Temperature),
        ValueKind::Mode => raw.parse().map(NormalizedValue::Mode),
        ValueKind::FanSpeed => raw.parse().map(NormalizedValue::FanSpeed),
        ValueKind::Preset => raw.parse().map(NormalizedValue::Preset),
        ValueKind::VerticalSwing => {
            SwingPosition::parse_field(kind.field(), raw).map(NormalizedValue::VerticalSwing)
        }
        ValueKind::HorizontalSwing => {
            SwingPosition::parse_field(kind.field(), raw).map(NormalizedValue::HorizontalSwing)
        }
    }
}

fn validate_temperature(raw: &str) -> Result<Temperature, ValueError> {
    let trimmed = raw.trim();
    if let Ok(whole) = trimmed.parse::<i64>() {
        return Temperature::checked(whole);
    }
    match trimmed.parse::<f64>() {
        Ok(reading) if reading.is_finite() && reading.fract() == 0.0 => {
            // Saturating cast; anything that large is rejected by the range check.
            #[allow(clippy::cast_possible_truncation)]
            Temperature::checked(reading as i64)
        }
        _ => Err(invalid_value(
            Temperature::FIELD,
            raw,
            TEMPERATURE_VALUES.to_vec(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_temperature_in_range_is_returned_unchanged() {
        for t in 16..=30u8 {
            let v = validate(ValueKind::Temperature, &t.to_string()).unwrap();
            assert_eq!(v, NormalizedValue::Temperature(Temperature::new(t).unwrap()));
        }
    }

    #[test]
    fn temperatures_out_of_range_fail_with_out_of_range() {
        for t in ["15", "31", "-3", "100", "0"] {
            let err = validate(ValueKind::Temperature, t).unwrap_err();
            assert!(matches!(err, ValueError::OutOfRange { field: "temperature", .. }), "{t}");
        }
    }

    #[test]
    fn integral_float_temperature_is_accepted() {
        let v = validate(ValueKind::Temperature, "24.0").unwrap();
        assert_eq!(v.to_string(), "24°C");
    }

    #[test]
    fn fractional_or_text_temperature_is_invalid() {
        for raw in ["24.5", "warm", "", "NaN"] {
            let err = validate(ValueKind::Temperature, raw).unwrap_err();
            assert!(matches!(err, ValueError::InvalidValue { field: "temperature", .. }), "{raw}");
        }
    }

    #[test]
    fn closed_sets_report_their_field() {
        let cases = [
            (ValueKind::Mode, "turbo", "mode"),
            (ValueKind::FanSpeed, "max", "fan_mode"),
            (ValueKind::Preset, "sleep", "preset_mode"),
            (ValueKind::VerticalSwing, "9", "vertical_swing_mode"),
            (ValueKind::HorizontalSwing, "left", "horizontal_swing_mode"),
            (ValueKind::Power, "toggle", "power"),
        ];
        for (kind, raw, expected) in cases {
            match validate(kind, raw).unwrap_err() {
                ValueError::InvalidValue { field, allowed, .. } => {
                    assert_eq!(field, expected);
                    assert!(!allowed.is_empty());
                }
                ValueError::OutOfRange { .. } => panic!("{raw} should be InvalidValue"),
            }
        }
    }

    #[test]
    fn case_insensitive_match_is_tried_first() {
        assert_eq!(
            validate(ValueKind::FanSpeed, "HIGH").unwrap(),
            NormalizedValue::FanSpeed(FanSpeed::High)
        );
        assert_eq!(
            validate(ValueKind::HorizontalSwing, "Auto").unwrap(),
            NormalizedValue::HorizontalSwing(SwingPosition::Auto)
        );
    }
}
