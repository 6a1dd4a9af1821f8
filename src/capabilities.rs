// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device capabilities.
//!
//! Every air conditioner supports power and temperature control. Mode, fan
//! speed, swing and preset control are optional and reported by the cloud
//! in the device record. When the cloud does not report them, all are
//! assumed to be present.

use crate::response::DeviceRecord;

/// Capabilities of an air conditioner.
///
/// # Examples
///
/// ```
/// use miraie_lib::Capabilities;
///
/// let full = Capabilities::default();
/// assert!(full.preset);
///
/// let basic = Capabilities::basic();
/// assert!(!basic.mode);
/// assert!(!basic.swing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
// Each boolean is an independent feature flag.
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Supports operating mode selection.
    pub mode: bool,

    /// Supports fan speed selection.
    pub fan: bool,

    /// Supports vertical and horizontal louver positioning.
    pub swing: bool,

    /// Supports economy/boost presets.
    pub preset: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::full()
    }
}

impl Capabilities {
    /// Creates capabilities for a fully featured unit.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            mode: true,
            fan: true,
            swing: true,
            preset: true,
        }
    }

    /// Creates capabilities for a unit that only supports power and
    /// temperature.
    #[must_use]
    pub const fn basic() -> Self {
        Self {
            mode: false,
            fan: false,
            swing: false,
            preset: false,
        }
    }

    /// Derives capabilities from a discovered device record.
    ///
    /// The cloud lists features by name (`mode`, `fan`, `swing`, `preset`).
    /// Unknown names are ignored. A record without a feature list is
    /// treated as fully featured.
    #[must_use]
    pub fn from_record(record: &DeviceRecord) -> Self {
        let Some(features) = &record.capabilities else {
            return Self::full();
        };

        features
            .iter()
            .fold(CapabilitiesBuilder::new(), |builder, feature| {
                match feature.trim().to_ascii_lowercase().as_str() {
                    "mode" => builder.with_mode(),
                    "fan" | "fanspeed" => builder.with_fan(),
                    "swing" => builder.with_swing(),
                    "preset" => builder.with_preset(),
                    other => {
                        tracing::debug!(feature = other, "Ignoring unknown device feature");
                        builder
                    }
                }
            })
            .build()
    }

    /// Returns the names of the supported optional features.
    #[must_use]
    pub fn feature_names(&self) -> Vec<&'static str> {
        [
            (self.mode, "mode"),
            (self.fan, "fan"),
            (self.swing, "swing"),
            (self.preset, "preset"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

/// Builder for creating custom capabilities.
#[derive(Debug)]
pub struct CapabilitiesBuilder {
    inner: Capabilities,
}

impl Default for CapabilitiesBuilder {
    fn default() -> Self {
        Self {
            inner: Capabilities::basic(),
        }
    }
}

impl CapabilitiesBuilder {
    /// Creates a new builder starting from power and temperature only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables mode support.
    #[must_use]
    pub fn with_mode(mut self) -> Self {
        self.inner.mode = true;
        self
    }

    /// Enables fan speed support.
    #[must_use]
    pub fn with_fan(mut self) -> Self {
        self.inner.fan = true;
        self
    }

    /// Enables swing support.
    #[must_use]
    pub fn with_swing(mut self) -> Self {
        self.inner.swing = true;
        self
    }

    /// Enables preset support.
    #[must_use]
    pub fn with_preset(mut self) -> Self {
        self.inner.preset = true;
        self
    }

    /// Builds the capabilities.
    #[must_use]
    pub fn build(self) -> Capabilities {
        self.inner
    }
}
