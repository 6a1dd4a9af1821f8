// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session management.
//!
//! A [`Session`] owns the account credentials for the lifetime of a client.
//! It moves through these states:
//!
//! ```text
//! Unauthenticated -> Authenticating -> Authenticated -> Expired -> Authenticating -> ...
//! ```
//!
//! Callers obtain a usable token through [`Session::ensure_valid`], which
//! logs in again with the stored identifier and secret once the token is
//! within the refresh margin of its expiry. Concurrent callers are
//! serialized, so a burst of requests on an expired token triggers a single
//! re-login.

mod credential;
mod login_id;

pub use credential::Credential;
pub use login_id::LoginId;

use std::fmt;
use std::time::Duration;

use parking_lot::RwLock;
use secrecy::SecretString;
use tokio::sync::Mutex;

use crate::error::Error;
use crate::protocol::ApiClient;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No credential.
    Unauthenticated,
    /// A login is in flight.
    Authenticating,
    /// Holding a valid token.
    Authenticated,
    /// The token has expired; the next use logs in again.
    Expired,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
            Self::Expired => "expired",
        };
        f.write_str(s)
    }
}

#[derive(Default)]
struct Inner {
    login: Option<(LoginId, SecretString)>,
    credential: Option<Credential>,
}

/// An authenticated session with the `MirAIe` cloud.
pub struct Session {
    api: ApiClient,
    refresh_margin: Duration,
    inner: Mutex<Inner>,
    // Mirrors the state so it can be read while a login holds `inner`.
    state: RwLock<SessionState>,
}

impl Session {
    /// Creates an unauthenticated session.
    #[must_use]
    pub fn new(api: ApiClient, refresh_margin: Duration) -> Self {
        Self {
            api,
            refresh_margin,
            inner: Mutex::new(Inner::default()),
            state: RwLock::new(SessionState::Unauthenticated),
        }
    }

    /// Returns the API client used by this session.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    /// Returns `true` if the session holds a token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state(), SessionState::Authenticated | SessionState::Expired)
    }

    /// Logs in with the given identifier and secret.
    ///
    /// The identifier is classified as a phone number, email address or
    /// username. On success both are kept in memory for later re-login.
    ///
    /// # Errors
    ///
    /// Returns `Error::Authentication` if the cloud rejects the credentials
    /// and `Error::Network` if it cannot be reached.
    pub async fn login(&self, identifier: &str, secret: SecretString) -> Result<Credential, Error> {
        let login_id = LoginId::classify(identifier);
        let mut inner = self.inner.lock().await;
        self.set_state(SessionState::Authenticating);

        match self.authenticate(&login_id, &secret).await {
            Ok(credential) => {
                tracing::info!(
                    kind = login_id.kind(),
                    expires_at = %credential.expires_at(),
                    "Logged in"
                );
                inner.login = Some((login_id, secret));
                inner.credential = Some(credential.clone());
                self.set_state(SessionState::Authenticated);
                Ok(credential)
            }
            Err(e) => {
                *inner = Inner::default();
                self.set_state(SessionState::Unauthenticated);
                Err(e)
            }
        }
    }

    /// Returns a credential whose token is not about to expire.
    ///
    /// # Errors
    ///
    /// Returns `Error::Authentication` if the session is unauthenticated or
    /// the re-login fails. A failed re-login drops the stored secret.
    pub async fn ensure_valid(&self) -> Result<Credential, Error> {
        let mut inner = self.inner.lock().await;

        match &inner.credential {
            Some(credential) if !credential.expires_within(self.refresh_margin) => {
                return Ok(credential.clone());
            }
            Some(_) => {
                self.set_state(SessionState::Expired);
                tracing::info!("Session token expired, logging in again");
            }
            None => {
                return Err(Error::Authentication("not logged in".into()));
            }
        }

        let Some((login_id, secret)) = inner.login.clone() else {
            *inner = Inner::default();
            self.set_state(SessionState::Unauthenticated);
            return Err(Error::Authentication("no stored credentials".into()));
        };

        self.set_state(SessionState::Authenticating);
        match self.authenticate(&login_id, &secret).await {
            Ok(credential) => {
                tracing::debug!(expires_at = %credential.expires_at(), "Re-login succeeded");
                inner.credential = Some(credential.clone());
                self.set_state(SessionState::Authenticated);
                Ok(credential)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Re-login failed");
                *inner = Inner::default();
                self.set_state(SessionState::Unauthenticated);
                Err(match e {
                    Error::Authentication(msg) => Error::Authentication(msg),
                    other => Error::Authentication(format!("re-login failed: {other}")),
                })
            }
        }
    }

    /// Logs out.
    ///
    /// The remote revoke is best-effort: a failure is logged and the local
    /// credential is cleared regardless.
    pub async fn logout(&self) {
        let mut inner = self.inner.lock().await;
        if let Some(credential) = inner.credential.take()
            && let Err(e) = self.api.logout(credential.token()).await
        {
            tracing::warn!(error = %e, "Remote logout failed");
        }
        *inner = Inner::default();
        self.set_state(SessionState::Unauthenticated);
        tracing::info!("Logged out");
    }

    async fn authenticate(&self, login_id: &LoginId, secret: &SecretString) -> Result<Credential, Error> {
        let response = self.api.login(login_id, secret).await?;
        Credential::from_response(login_id.clone(), response)
    }

    fn set_state(&self, state: SessionState) {
        *self.state.write() = state;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api", &self.api.auth_url())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn session() -> Session {
        let config = ClientConfig::new().with_base_url("http://127.0.0.1:9");
        Session::new(ApiClient::new(&config).unwrap(), config.refresh_margin())
    }

    #[tokio::test]
    async fn unauthenticated_session_fails_fast() {
        let session = session();
        assert_eq!(session.state(), SessionState::Unauthenticated);
        let err = session.ensure_valid().await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn logout_without_login_is_harmless() {
        let session = session();
        session.logout().await;
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Expired.to_string(), "expired");
    }
}
