// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target temperature type.

use std::fmt;

use crate::error::ValueError;

/// Target temperature in whole degrees Celsius (16-30).
///
/// # Examples
///
/// ```
/// use miraie_lib::types::Temperature;
///
/// let t = Temperature::new(24).unwrap();
/// assert_eq!(t.value(), 24);
/// assert_eq!(t.wire_value(), "24.0");
///
/// assert!(Temperature::new(15).is_err());
/// assert!(Temperature::new(31).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Temperature(u8);

impl Temperature {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "temperature";

    /// Lowest settable temperature.
    pub const MIN: u8 = 16;

    /// Highest settable temperature.
    pub const MAX: u8 = 30;

    /// Creates a new temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [16, 30].
    pub fn new(value: u8) -> Result<Self, ValueError> {
        Self::checked(i64::from(value))
    }

    /// Creates a temperature from any integer, checking the range.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [16, 30].
    pub fn checked(value: i64) -> Result<Self, ValueError> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            return Err(ValueError::OutOfRange {
                field: Self::FIELD,
                min: i64::from(Self::MIN),
                max: i64::from(Self::MAX),
                actual: value,
            });
        }
        // In range, so it fits in u8.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(value as u8))
    }

    /// Creates a temperature from a reported reading, rounding and clamping
    /// into the valid range.
    #[must_use]
    pub fn clamped(reading: f64) -> Self {
        if reading.is_nan() {
            return Self(Self::MIN);
        }
        let rounded = reading.round().clamp(f64::from(Self::MIN), f64::from(Self::MAX));
        // Clamped to [16, 30] above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(rounded as u8)
    }

    /// Returns the temperature in degrees Celsius.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the string the cloud expects for the `actmp` field.
    #[must_use]
    pub fn wire_value(&self) -> String {
        format!("{}.0", self.0)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

impl TryFrom<u8> for Temperature {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Temperature> for u8 {
    fn from(t: Temperature) -> Self {
        t.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_value_in_range_is_unchanged() {
        for v in 16..=30 {
            assert_eq!(Temperature::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn values_outside_range_fail() {
        for v in [0, 15, 31, 255] {
            let err = Temperature::new(v).unwrap_err();
            assert!(matches!(
                err,
                ValueError::OutOfRange {
                    field: "temperature",
                    min: 16,
                    max: 30,
                    ..
                }
            ));
        }
        assert!(Temperature::checked(-4).is_err());
        assert!(Temperature::checked(1_000).is_err());
    }

    #[test]
    fn clamped_rounds_reported_readings() {
        assert_eq!(Temperature::clamped(24.4).value(), 24);
        assert_eq!(Temperature::clamped(24.5).value(), 25);
        assert_eq!(Temperature::clamped(10.0).value(), 16);
        assert_eq!(Temperature::clamped(45.0).value(), 30);
    }

    #[test]
    fn display_and_wire_format() {
        let t = Temperature::new(22).unwrap();
        assert_eq!(t.to_string(), "22°C");
        assert_eq!(t.wire_value(), "22.0");
    }
}
