// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use std::fmt;

use crate::types::{FanSpeed, Mode, PowerState, Preset, SwingPosition, Temperature};

use super::StateChange;

/// Last-known operational state of an air conditioner.
///
/// All fields are optional because a value is unknown until the cloud
/// reports it.
///
/// # Examples
///
/// ```
/// use miraie_lib::state::DeviceState;
/// use miraie_lib::types::PowerState;
///
/// let mut state = DeviceState::new();
/// state.set_power(PowerState::On);
/// assert_eq!(state.power(), Some(PowerState::On));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DeviceState {
    power: Option<PowerState>,
    temperature: Option<Temperature>,
    mode: Option<Mode>,
    fan_speed: Option<FanSpeed>,
    preset: Option<Preset>,
    vertical_swing: Option<SwingPosition>,
    horizontal_swing: Option<SwingPosition>,
    online: Option<bool>,
}

impl DeviceState {
    /// Creates a new empty device state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the power state.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        self.power
    }

    /// Sets the power state.
    pub fn set_power(&mut self, state: PowerState) {
        self.power = Some(state);
    }

    /// Gets the target temperature.
    #[must_use]
    pub fn temperature(&self) -> Option<Temperature> {
        self.temperature
    }

    /// Sets the target temperature.
    pub fn set_temperature(&mut self, temperature: Temperature) {
        self.temperature = Some(temperature);
    }

    /// Gets the operating mode.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Sets the operating mode.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = Some(mode);
    }

    /// Gets the fan speed.
    #[must_use]
    pub fn fan_speed(&self) -> Option<FanSpeed> {
        self.fan_speed
    }

    /// Sets the fan speed.
    pub fn set_fan_speed(&mut self, speed: FanSpeed) {
        self.fan_speed = Some(speed);
    }

    /// Gets the preset.
    #[must_use]
    pub fn preset(&self) -> Option<Preset> {
        self.preset
    }

    /// Sets the preset.
    pub fn set_preset(&mut self, preset: Preset) {
        self.preset = Some(preset);
    }

    /// Gets the vertical louver position.
    #[must_use]
    pub fn vertical_swing(&self) -> Option<SwingPosition> {
        self.vertical_swing
    }

    /// Sets the vertical louver position.
    pub fn set_vertical_swing(&mut self, position: SwingPosition) {
        self.vertical_swing = Some(position);
    }

    /// Gets the horizontal louver position.
    #[must_use]
    pub fn horizontal_swing(&self) -> Option<SwingPosition> {
        self.horizontal_swing
    }

    /// Sets the horizontal louver position.
    pub fn set_horizontal_swing(&mut self, position: SwingPosition) {
        self.horizontal_swing = Some(position);
    }

    /// Returns whether the unit is reachable through the cloud, if known.
    #[must_use]
    pub fn online(&self) -> Option<bool> {
        self.online
    }

    /// Sets the cloud connectivity flag.
    pub fn set_online(&mut self, online: bool) {
        self.online = Some(online);
    }

    /// Returns `true` if the unit is known to be on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power.is_some_and(|p| p.is_on())
    }

    /// Returns `true` if nothing is known about the unit yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies a state change.
    ///
    /// Returns `true` if the state actually changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Power(v) => replace(&mut self.power, *v),
            StateChange::Temperature(v) => replace(&mut self.temperature, *v),
            StateChange::Mode(v) => replace(&mut self.mode, *v),
            StateChange::FanSpeed(v) => replace(&mut self.fan_speed, *v),
            StateChange::Preset(v) => replace(&mut self.preset, *v),
            StateChange::VerticalSwing(v) => replace(&mut self.vertical_swing, *v),
            StateChange::HorizontalSwing(v) => replace(&mut self.horizontal_swing, *v),
            StateChange::Online(v) => replace(&mut self.online, *v),
            StateChange::Batch(changes) => changes
                .iter()
                .fold(false, |changed, c| self.apply(c) || changed),
        }
    }
}

/// Renders the known fields, e.g. `on, 24°C, cool, fan high`.
impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(power) = self.power {
            parts.push(power.to_string());
        }
        if let Some(t) = self.temperature {
            parts.push(t.to_string());
        }
        if let Some(mode) = self.mode {
            parts.push(mode.to_string());
        }
        if let Some(speed) = self.fan_speed {
            parts.push(format!("fan {speed}"));
        }
        if let Some(preset) = self.preset.filter(|p| *p != Preset::None) {
            parts.push(format!("preset {preset}"));
        }
        if let Some(position) = self.vertical_swing {
            parts.push(format!("vertical swing {position}"));
        }
        if let Some(position) = self.horizontal_swing {
            parts.push(format!("horizontal swing {position}"));
        }
        if self.online == Some(false) {
            parts.push("offline".to_string());
        }

        if parts.is_empty() {
            f.write_str("unknown state")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

fn replace<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = DeviceState::new();
        assert!(state.is_empty());
        assert!(state.power().is_none());
        assert!(!state.is_on());
    }

    #[test]
    fn apply_reports_changes() {
        let mut state = DeviceState::new();
        let t = Temperature::new(24).unwrap();

        assert!(state.apply(&StateChange::Temperature(t)));
        assert!(!state.apply(&StateChange::Temperature(t)));
        assert_eq!(state.temperature(), Some(t));
    }

    #[test]
    fn apply_batch() {
        let mut state = DeviceState::new();
        let change = StateChange::Batch(vec![
            StateChange::Power(PowerState::On),
            StateChange::Mode(Mode::Cool),
            StateChange::VerticalSwing(SwingPosition::Fixed(2)),
        ]);

        assert!(state.apply(&change));
        assert!(state.is_on());
        assert_eq!(state.mode(), Some(Mode::Cool));
        assert_eq!(state.vertical_swing(), Some(SwingPosition::Fixed(2)));
        assert!(!state.apply(&change));
    }

    #[test]
    fn batch_applies_every_change_after_first_change() {
        let mut state = DeviceState::new();
        state.set_power(PowerState::On);
        let change = StateChange::Batch(vec![
            StateChange::Power(PowerState::On),
            StateChange::FanSpeed(FanSpeed::High),
        ]);

        assert!(state.apply(&change));
        assert_eq!(state.fan_speed(), Some(FanSpeed::High));
    }

    #[test]
    fn serializes_to_json() {
        let mut state = DeviceState::new();
        state.set_power(PowerState::On);
        state.set_temperature(Temperature::new(22).unwrap());
        state.set_horizontal_swing(SwingPosition::Auto);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["power"], "on");
        assert_eq!(json["temperature"], 22);
        assert_eq!(json["horizontal_swing"], "auto");
        assert!(json["mode"].is_null());
    }

    #[test]
    fn display_lists_known_fields() {
        let mut state = DeviceState::new();
        assert_eq!(state.to_string(), "unknown state");

        state.set_power(PowerState::On);
        state.set_temperature(Temperature::new(24).unwrap());
        state.set_mode(Mode::Cool);
        state.set_fan_speed(FanSpeed::High);
        state.set_preset(Preset::None);
        assert_eq!(state.to_string(), "on, 24°C, cool, fan high");

        state.set_online(false);
        assert!(state.to_string().ends_with("offline"));
    }
}
