// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Louver swing position type.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

use super::invalid_value;

/// Position of the vertical or horizontal louver.
///
/// The cloud encodes automatic swing as position `0`, so `"0"` and `"auto"`
/// both parse to [`SwingPosition::Auto`]. Fixed positions run from 1 to 5.
///
/// # Examples
///
/// ```
/// use miraie_lib::types::SwingPosition;
///
/// assert_eq!("auto".parse::<SwingPosition>().unwrap(), SwingPosition::Auto);
/// assert_eq!("0".parse::<SwingPosition>().unwrap(), SwingPosition::Auto);
///
/// let third = SwingPosition::new(3).unwrap();
/// assert_eq!(third.wire_value(), 3);
/// assert!(SwingPosition::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwingPosition {
    /// Continuous automatic swing.
    #[default]
    Auto,
    /// A fixed louver position (1-5).
    Fixed(u8),
}

impl SwingPosition {
    /// Highest fixed position.
    pub const MAX: u8 = 5;

    /// Field name used when the axis is unknown.
    pub const FIELD: &'static str = "swing";

    /// Legal spellings, for error reporting.
    pub const ALLOWED: [&'static str; 7] = ["auto", "0", "1", "2", "3", "4", "5"];

    /// Creates a swing position from its numeric wire value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidValue` if `position` is greater than 5.
    pub fn new(position: u8) -> Result<Self, ValueError> {
        Self::from_wire(position)
            .ok_or_else(|| invalid_value(Self::FIELD, &position.to_string(), Self::allowed()))
    }

    /// Parses a swing position, naming `field` in the error.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidValue` if `raw` is not `auto` or 0-5.
    pub fn parse_field(field: &'static str, raw: &str) -> Result<Self, ValueError> {
        let needle = raw.trim().to_ascii_lowercase();
        if needle == "auto" {
            return Ok(Self::Auto);
        }
        needle
            .parse::<u8>()
            .ok()
            .and_then(Self::from_wire)
            .ok_or_else(|| invalid_value(field, raw, Self::allowed()))
    }

    /// Converts a wire value, returning `None` when out of range.
    #[must_use]
    pub const fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Auto),
            1..=Self::MAX => Some(Self::Fixed(value)),
            _ => None,
        }
    }

    /// Returns the numeric value sent to the cloud.
    #[must_use]
    pub const fn wire_value(&self) -> u8 {
        match self {
            Self::Auto => 0,
            Self::Fixed(position) => *position,
        }
    }

    /// Returns the legal values, for error reporting.
    #[must_use]
    pub fn allowed() -> Vec<&'static str> {
        Self::ALLOWED.to_vec()
    }
}

impl fmt::Display for SwingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(position) => write!(f, "{position}"),
        }
    }
}

impl FromStr for SwingPosition {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field(Self::FIELD, s)
    }
}

impl serde::Serialize for SwingPosition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
