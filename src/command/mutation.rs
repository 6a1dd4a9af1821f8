// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partial device-state mutation requests.

use serde::Serialize;

use crate::state::StateChange;

/// Wire envelope: key index.
const ENVELOPE_KI: u8 = 1;
/// Wire envelope: client type.
const ENVELOPE_CNT: &str = "an";
/// Wire envelope: session id.
const ENVELOPE_SID: &str = "1";

/// A request for one device, carrying only the fields being changed.
///
/// A request with no fields is a status query.
///
/// ```
/// use miraie_lib::command::{Command, MutationRequest};
/// use miraie_lib::types::Temperature;
///
/// let request = Command::SetTemperature(Temperature::new(24).unwrap()).to_request();
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["actmp"], "24.0");
/// assert!(body.get("ps").is_none());
/// assert!(MutationRequest::query().is_query());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ps: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) actmp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) acmd: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) acfs: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) acem: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) acpm: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) acvs: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) achs: Option<u8>,
    ki: u8,
    cnt: &'static str,
    sid: &'static str,
    #[serde(skip)]
    change: Option<StateChange>,
}

impl MutationRequest {
    /// Creates a status query.
    #[must_use]
    pub fn query() -> Self {
        Self {
            ps: None,
            actmp: None,
            acmd: None,
            acfs: None,
            acem: None,
            acpm: None,
            acvs: None,
            achs: None,
            ki: ENVELOPE_KI,
            cnt: ENVELOPE_CNT,
            sid: ENVELOPE_SID,
            change: None,
        }
    }

    /// Creates a mutation that applies `change` when acknowledged.
    pub(crate) fn mutation(change: StateChange) -> Self {
        Self {
            change: Some(change),
            ..Self::query()
        }
    }

    /// Returns `true` if the request carries no mutation.
    #[must_use]
    pub fn is_query(&self) -> bool {
        self.change.is_none()
    }

    /// Returns the state change this request asks for.
    #[must_use]
    pub fn change(&self) -> Option<&StateChange> {
        self.change.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PowerState;

    #[test]
    fn query_serializes_envelope_only() {
        let body = serde_json::to_value(MutationRequest::query()).unwrap();
        assert_eq!(body, serde_json::json!({"ki": 1, "cnt": "an", "sid": "1"}));
    }

    #[test]
    fn mutation_keeps_change() {
        let mut request = MutationRequest::mutation(StateChange::Power(PowerState::On));
        request.ps = Some("on");
        assert!(!request.is_query());
        assert_eq!(request.change(), Some(&StateChange::Power(PowerState::On)));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["ps"], "on");
    }
}
