// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session credential.

use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use tokio::time::Instant;

use super::LoginId;
use crate::error::Error;
use crate::response::LoginResponse;

// Caps absurd `expiresIn` values.
const FAR_FUTURE: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

// Assumed when the login response omits `expiresIn` or reports 0.
const DEFAULT_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// An authenticated session token and its lifetime.
///
/// The token is a [`SecretString`]: its `Debug` output is redacted.
#[derive(Debug, Clone)]
pub struct Credential {
    login_id: LoginId,
    user_id: String,
    token: SecretString,
    expires_at: DateTime<Utc>,
    lifetime: Duration,
    deadline: Instant,
}

impl Credential {
    /// Builds a credential from a login response.
    ///
    /// # Errors
    ///
    /// Returns `Error::Authentication` if the response carries no token.
    pub(crate) fn from_response(login_id: LoginId, response: LoginResponse) -> Result<Self, Error> {
        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Authentication("login response carried no access token".into()))?;

        let lifetime = match response.expires_in {
            0 => DEFAULT_LIFETIME,
            secs => Duration::from_secs(secs),
        };
        let expires_at = chrono::Duration::from_std(lifetime)
            .ok()
            .and_then(|d| Utc::now().checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Ok(Self {
            login_id,
            user_id: response.user_id,
            token: SecretString::from(token),
            expires_at,
            lifetime,
            deadline: Instant::now()
                .checked_add(lifetime)
                .unwrap_or_else(|| Instant::now() + FAR_FUTURE),
        })
    }

    /// Returns the identifier used to log in.
    #[must_use]
    pub fn login_id(&self) -> &LoginId {
        &self.login_id
    }

    /// Returns the account's user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Returns the wall-clock expiry time.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns the token lifetime granted at login.
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Returns `true` if the token expires within `margin` from now.
    ///
    /// The margin never exceeds half the token's lifetime, so a short-lived
    /// token is used for a while before it is renewed.
    #[must_use]
    pub fn expires_within(&self, margin: Duration) -> bool {
        let margin = margin.min(self.lifetime / 2);
        Instant::now()
            .checked_add(margin)
            .is_none_or(|horizon| horizon >= self.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(token: Option<&str>, expires_in: u64) -> LoginResponse {
        serde_json::from_value(serde_json::json!({
            "userId": "u-1",
            "accessToken": token,
            "expiresIn": expires_in,
        }))
        .unwrap()
    }

    #[test]
    fn missing_token_is_authentication_error() {
        let err = Credential::from_response(LoginId::classify("admin"), response(None, 60))
            .unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));

        let err = Credential::from_response(LoginId::classify("admin"), response(Some(""), 60))
            .unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[test]
    fn long_lifetime_is_fresh() {
        let cred =
            Credential::from_response(LoginId::classify("admin"), response(Some("t"), 3600))
                .unwrap();
        assert!(!cred.expires_within(Duration::from_secs(60)));
        assert!(cred.expires_at() > Utc::now());
        assert_eq!(cred.user_id(), "u-1");
    }

    #[test]
    fn missing_lifetime_uses_default() {
        let cred = Credential::from_response(LoginId::classify("admin"), response(Some("t"), 0))
            .unwrap();
        assert_eq!(cred.lifetime(), DEFAULT_LIFETIME);
        assert!(!cred.expires_within(Duration::from_secs(60)));
    }

    #[test]
    fn margin_is_capped_by_short_lifetime() {
        let cred =
            Credential::from_response(LoginId::classify("admin"), response(Some("t"), 30))
                .unwrap();
        assert!(!cred.expires_within(Duration::from_secs(60)));
        assert!(!cred.expires_within(Duration::from_secs(3600)));
    }

    #[tokio::test(start_paused = true)]
    async fn short_lifetime_expires_after_half() {
        let cred =
            Credential::from_response(LoginId::classify("admin"), response(Some("t"), 30))
                .unwrap();
        tokio::time::advance(Duration::from_secs(14)).await;
        assert!(!cred.expires_within(Duration::from_secs(60)));
        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cred.expires_within(Duration::from_secs(60)));
    }

    #[test]
    fn debug_is_redacted() {
        let cred =
            Credential::from_response(LoginId::classify("admin"), response(Some("tok-123"), 60))
                .unwrap();
        assert!(!format!("{cred:?}").contains("tok-123"));
    }
}
