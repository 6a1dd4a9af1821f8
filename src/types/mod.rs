// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for air conditioner control.
//!
//! This module provides type-safe representations of the values an air
//! conditioner accepts. Each type ensures values are legal at construction
//! time, so nothing out of range is ever sent to a device.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off
//! - [`Temperature`] - Target temperature (16-30 °C)
//! - [`Mode`] - auto, cool, heat, dry, fan
//! - [`FanSpeed`] - auto, low, medium, high
//! - [`Preset`] - none, eco, boost
//! - [`SwingPosition`] - auto or a fixed louver position (1-5)
//!
//! Raw operands are checked with [`validate`].

mod mode;
mod power;
mod swing;
mod temperature;
mod value;

pub use mode::{FanSpeed, Mode, Preset};
pub use power::PowerState;
pub use swing::SwingPosition;
pub use temperature::Temperature;
pub use value::{NormalizedValue, ValueKind, validate};

use crate::error::ValueError;

/// Builds the error returned for a value outside a closed set.
pub(crate) fn invalid_value(field: &'static str, raw: &str, allowed: Vec<&'static str>) -> ValueError {
    ValueError::InvalidValue {
        field,
        value: raw.to_string(),
        allowed,
    }
}
