// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device status response parsing.
//!
//! The cloud reports state with short field names and loose typing: the
//! temperature may be `"24.0"` or `24`, the online flag `"true"` or `true`.
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `ps` | power (`on`/`off`) |
//! | `actmp` | target temperature |
//! | `acmd` | mode |
//! | `acfs` | fan speed |
//! | `acem` | economy switch (`on`/`off`) |
//! | `acpm` | powerful switch (`on`/`off`) |
//! | `acvs` | vertical louver position |
//! | `achs` | horizontal louver position |
//! | `onlineStatus` | cloud connectivity |

use serde::Deserialize;
use serde_json::Value;

use crate::state::StateChange;
use crate::types::{FanSpeed, Mode, PowerState, Preset, SwingPosition, Temperature};

/// Response from a status query or a control call.
///
/// # Examples
///
/// ```
/// use miraie_lib::response::StatusResponse;
/// use miraie_lib::state::DeviceState;
///
/// let json = r#"{"ps":"on","actmp":"24.0","acmd":"cool","onlineStatus":"true"}"#;
/// let response: StatusResponse = serde_json::from_str(json).unwrap();
///
/// let mut state = DeviceState::new();
/// state.apply(&response.to_state_change());
/// assert!(state.is_on());
/// assert_eq!(state.temperature().unwrap().value(), 24);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    ps: Option<String>,
    #[serde(default)]
    actmp: Option<Value>,
    #[serde(default)]
    acmd: Option<String>,
    #[serde(default)]
    acfs: Option<String>,
    #[serde(default)]
    acem: Option<String>,
    #[serde(default)]
    acpm: Option<String>,
    #[serde(default)]
    acvs: Option<Value>,
    #[serde(default)]
    achs: Option<Value>,
    #[serde(rename = "onlineStatus", default)]
    online_status: Option<Value>,
}

impl StatusResponse {
    /// Returns `true` if the response carries no state at all (a bare
    /// acknowledgement).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_state_change().is_empty()
    }

    /// Returns the reported connectivity, if present.
    #[must_use]
    pub fn online(&self) -> Option<bool> {
        self.online_status.as_ref().and_then(as_bool)
    }

    /// Converts the response into a state change.
    ///
    /// Values the library does not recognise are skipped.
    #[must_use]
    pub fn to_state_change(&self) -> StateChange {
        let mut changes = Vec::new();

        if let Some(power) = self.ps.as_deref().and_then(|s| s.parse::<PowerState>().ok()) {
            changes.push(StateChange::Power(power));
        }
        if let Some(reading) = self.actmp.as_ref().and_then(as_f64) {
            changes.push(StateChange::Temperature(Temperature::clamped(reading)));
        }
        if let Some(mode) = self.acmd.as_deref().and_then(|s| s.parse::<Mode>().ok()) {
            changes.push(StateChange::Mode(mode));
        }
        if let Some(speed) = self.acfs.as_deref().and_then(|s| s.parse::<FanSpeed>().ok()) {
            changes.push(StateChange::FanSpeed(speed));
        }
        let eco = self.acem.as_deref().and_then(switch);
        let boost = self.acpm.as_deref().and_then(switch);
        if eco.is_some() || boost.is_some() {
            changes.push(StateChange::Preset(Preset::from_switches(
                eco.unwrap_or(false),
                boost.unwrap_or(false),
            )));
        }
        if let Some(position) = self.acvs.as_ref().and_then(as_swing) {
            changes.push(StateChange::VerticalSwing(position));
        }
        if let Some(position) = self.achs.as_ref().and_then(as_swing) {
            changes.push(StateChange::HorizontalSwing(position));
        }
        if let Some(online) = self.online() {
            changes.push(StateChange::Online(online));
        }

        StateChange::batch(changes)
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "online" | "1" => Some(true),
            "false" | "offline" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_swing(value: &Value) -> Option<SwingPosition> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .and_then(SwingPosition::from_wire),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn switch(raw: &str) -> Option<bool> {
    raw.parse::<PowerState>().ok().map(|p| p.is_on())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DeviceState;

    fn parse(json: &str) -> DeviceState {
        let response: StatusResponse = serde_json::from_str(json).unwrap();
        let mut state = DeviceState::new();
        state.apply(&response.to_state_change());
        state
    }

    #[test]
    fn full_status() {
        let state = parse(
            r#"{"ps":"on","actmp":"22.0","acmd":"heat","acfs":"high",
                "acem":"off","acpm":"on","acvs":3,"achs":"0","onlineStatus":"true"}"#,
        );
        assert_eq!(state.power(), Some(PowerState::On));
        assert_eq!(state.temperature().unwrap().value(), 22);
        assert_eq!(state.mode(), Some(Mode::Heat));
        assert_eq!(state.fan_speed(), Some(FanSpeed::High));
        assert_eq!(state.preset(), Some(Preset::Boost));
        assert_eq!(state.vertical_swing(), Some(SwingPosition::Fixed(3)));
        assert_eq!(state.horizontal_swing(), Some(SwingPosition::Auto));
        assert_eq!(state.online(), Some(true));
    }

    #[test]
    fn numeric_temperature_and_bool_online() {
        let state = parse(r#"{"actmp":25,"onlineStatus":false}"#);
        assert_eq!(state.temperature().unwrap().value(), 25);
        assert_eq!(state.online(), Some(false));
    }

    #[test]
    fn unknown_values_are_skipped() {
        let state = parse(r#"{"acmd":"turbo","acvs":9,"ps":"on"}"#);
        assert!(state.mode().is_none());
        assert!(state.vertical_swing().is_none());
        assert!(state.is_on());
    }

    #[test]
    fn acknowledgement_is_empty() {
        let response: StatusResponse = serde_json::from_str("{}").unwrap();
        assert!(response.is_empty());
        let response: StatusResponse = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert!(response.is_empty());
    }
}
