// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes are the building blocks for updating a
//! [`DeviceState`](super::DeviceState). They come from status responses and
//! from mutation requests that the cloud acknowledged without echoing the
//! new state.
//!
//! # Examples
//!
//! ```
//! use miraie_lib::state::{DeviceState, StateChange};
//! use miraie_lib::types::{PowerState, Temperature};
//!
//! let mut state = DeviceState::new();
//!
//! // Apply returns true if state actually changed
//! assert!(state.apply(&StateChange::Power(PowerState::On)));
//! assert!(!state.apply(&StateChange::Power(PowerState::On)));
//!
//! let t = Temperature::new(24).unwrap();
//! state.apply(&StateChange::Temperature(t));
//! assert_eq!(state.temperature(), Some(t));
//! ```

use crate::types::{FanSpeed, Mode, PowerState, Preset, SwingPosition, Temperature};

/// Represents a change in device state.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// Power state changed.
    Power(PowerState),

    /// Target temperature changed.
    Temperature(Temperature),

    /// Operating mode changed.
    Mode(Mode),

    /// Fan speed changed.
    FanSpeed(FanSpeed),

    /// Preset changed.
    Preset(Preset),

    /// Vertical louver position changed.
    VerticalSwing(SwingPosition),

    /// Horizontal louver position changed.
    HorizontalSwing(SwingPosition),

    /// Cloud connectivity of the unit changed.
    Online(bool),

    /// Multiple changes at once.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Creates a batch from several changes, unwrapping a single change.
    #[must_use]
    pub fn batch(mut changes: Vec<StateChange>) -> Self {
        if changes.len() == 1 {
            changes.remove(0)
        } else {
            Self::Batch(changes)
        }
    }

    /// Returns `true` if this is an empty batch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Batch(changes) if changes.iter().all(Self::is_empty))
    }
}
