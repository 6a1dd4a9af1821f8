// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login response parsing.

use serde::Deserialize;

/// Response from the login endpoint.
///
/// ```
/// use miraie_lib::response::LoginResponse;
///
/// let json = r#"{"userId":"u-1","accessToken":"tok","expiresIn":3600}"#;
/// let response: LoginResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.expires_in, 3600);
/// ```
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Account identifier.
    #[serde(default)]
    pub user_id: String,
    /// Bearer token for authenticated calls.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Token lifetime in seconds; 0 when the cloud does not report one.
    #[serde(default)]
    pub expires_in: u64,
}

// Hand-written so tokens never reach a log line.
impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("user_id", &self.user_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}
