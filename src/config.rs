// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client configuration.
//!
//! [`ClientConfig`] holds the cloud endpoints, timeouts and (optionally) the
//! account credentials. It can be built programmatically or loaded from the
//! environment:
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `MIRAIE_LOGIN_ID` | phone number, email or username | required |
//! | `MIRAIE_PASSWORD` | account password | required |
//! | `MIRAIE_AUTH_URL` | authentication service | `https://auth.miraie.in` |
//! | `MIRAIE_API_URL` | home/device service | `https://app.miraie.in` |
//! | `MIRAIE_TIMEOUT_SECS` | per-request timeout | 10 |
//! | `MIRAIE_BATCH_TIMEOUT_SECS` | whole-batch timeout | 30 |
//!
//! Endpoints and timeouts are layered with `figment`: built-in defaults,
//! then `MIRAIE_*` variables. Credentials are read verbatim, since a phone
//! number would otherwise be coerced into an integer.

use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Serialized};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Prefix shared by every environment variable.
pub const ENV_PREFIX: &str = "MIRAIE_";
/// Environment variable holding the login identifier.
pub const ENV_LOGIN_ID: &str = "MIRAIE_LOGIN_ID";
/// Environment variable holding the password.
pub const ENV_PASSWORD: &str = "MIRAIE_PASSWORD";
/// Environment variable overriding the authentication URL.
pub const ENV_AUTH_URL: &str = "MIRAIE_AUTH_URL";
/// Environment variable overriding the API URL.
pub const ENV_API_URL: &str = "MIRAIE_API_URL";
/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT: &str = "MIRAIE_TIMEOUT_SECS";
/// Environment variable overriding the batch timeout (seconds).
pub const ENV_BATCH_TIMEOUT: &str = "MIRAIE_BATCH_TIMEOUT_SECS";

// Keys match the variable names with `ENV_PREFIX` stripped and lowercased.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct EnvSettings {
    auth_url: String,
    api_url: String,
    timeout_secs: u64,
    batch_timeout_secs: u64,
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self {
            auth_url: ClientConfig::DEFAULT_AUTH_URL.to_string(),
            api_url: ClientConfig::DEFAULT_API_URL.to_string(),
            timeout_secs: ClientConfig::DEFAULT_TIMEOUT.as_secs(),
            batch_timeout_secs: ClientConfig::DEFAULT_BATCH_TIMEOUT.as_secs(),
        }
    }
}

/// Configuration for a `MirAIe` cloud client.
///
/// # Examples
///
/// ```
/// use miraie_lib::config::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_api_url("http://127.0.0.1:8080")
///     .with_timeout(Duration::from_secs(5))
///     .with_credentials("user@example.com", "secret");
///
/// assert_eq!(config.api_url(), "http://127.0.0.1:8080");
/// assert!(config.credentials().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    auth_url: String,
    api_url: String,
    timeout: Duration,
    batch_timeout: Duration,
    refresh_margin: Duration,
    credentials: Option<(String, SecretString)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    /// Default authentication service.
    pub const DEFAULT_AUTH_URL: &'static str = "https://auth.miraie.in";
    /// Default home/device service.
    pub const DEFAULT_API_URL: &'static str = "https://app.miraie.in";
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default whole-batch timeout.
    pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(30);
    /// Tokens closer than this to expiry are refreshed before use.
    pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(60);

    /// Creates a configuration with the default endpoints and no credentials.
    #[must_use]
    pub fn new() -> Self {
        Self {
            auth_url: Self::DEFAULT_AUTH_URL.to_string(),
            api_url: Self::DEFAULT_API_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            batch_timeout: Self::DEFAULT_BATCH_TIMEOUT,
            refresh_margin: Self::DEFAULT_REFRESH_MARGIN,
            credentials: None,
        }
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the login identifier or password is
    /// missing or empty, or a timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_sources(&Self::figment(), |key| std::env::var(key).ok())
    }

    /// Returns the default provider stack: built-in defaults overridden by
    /// `MIRAIE_*` environment variables.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(EnvSettings::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads endpoints and timeouts from `figment` and credentials through
    /// `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_sources<F>(figment: &Figment, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Configuration(format!("{key} is not set")))
        };

        let login_id = required(ENV_LOGIN_ID)?;
        let password = required(ENV_PASSWORD)?;

        let settings: EnvSettings = figment
            .extract()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self::new()
            .with_auth_url(settings.auth_url)
            .with_api_url(settings.api_url)
            .with_timeout(Duration::from_secs(settings.timeout_secs))
            .with_batch_timeout(Duration::from_secs(settings.batch_timeout_secs))
            .with_credentials(login_id, password))
    }

    /// Sets the authentication service URL.
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = trim_slash(url.into());
        self
    }

    /// Sets the home/device service URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = trim_slash(url.into());
        self
    }

    /// Points both services at the same base URL.
    #[must_use]
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.with_auth_url(url.clone()).with_api_url(url)
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the timeout bounding a whole multi-device operation.
    #[must_use]
    pub fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = timeout;
        self
    }

    /// Sets how long before expiry a token is considered stale.
    #[must_use]
    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// Sets the account credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        login_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((login_id.into(), SecretString::from(password.into())));
        self
    }

    /// Returns the authentication service URL.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Returns the home/device service URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the batch timeout.
    #[must_use]
    pub fn batch_timeout(&self) -> Duration {
        self.batch_timeout
    }

    /// Returns the token refresh margin.
    #[must_use]
    pub fn refresh_margin(&self) -> Duration {
        self.refresh_margin
    }

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &SecretString)> {
        self.credentials.as_ref().map(|(id, pw)| (id.as_str(), pw))
    }
}

fn trim_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(EnvSettings::default()))
    }

    fn credentials() -> impl Fn(&str) -> Option<String> {
        env(&[(ENV_LOGIN_ID, "9876543210"), (ENV_PASSWORD, "hunter2")])
    }

    #[test]
    fn new_uses_defaults() {
        let config = ClientConfig::new();
        assert_eq!(config.auth_url(), "https://auth.miraie.in");
        assert_eq!(config.api_url(), "https://app.miraie.in");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.batch_timeout(), Duration::from_secs(30));
        assert!(config.credentials().is_none());
    }

    #[test]
    fn sources_supply_credentials_and_overrides() {
        let figment = defaults()
            .merge(Serialized::default("api_url", "http://localhost:9000/"))
            .merge(Serialized::default("batch_timeout_secs", 5));
        let config = ClientConfig::from_sources(&figment, credentials()).unwrap();

        let (id, pw) = config.credentials().unwrap();
        assert_eq!(id, "9876543210");
        assert_eq!(pw.expose_secret(), "hunter2");
        assert_eq!(config.api_url(), "http://localhost:9000");
        assert_eq!(config.auth_url(), ClientConfig::DEFAULT_AUTH_URL);
        assert_eq!(config.batch_timeout(), Duration::from_secs(5));
        assert_eq!(config.timeout(), ClientConfig::DEFAULT_TIMEOUT);
    }

    #[test]
    fn empty_figment_falls_back_to_defaults() {
        let config = ClientConfig::from_sources(&Figment::new(), credentials()).unwrap();
        assert_eq!(config.api_url(), ClientConfig::DEFAULT_API_URL);
        assert_eq!(config.batch_timeout(), ClientConfig::DEFAULT_BATCH_TIMEOUT);
    }

    #[test]
    fn missing_login_id_fails() {
        let err = ClientConfig::from_sources(&defaults(), env(&[(ENV_PASSWORD, "x")]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(msg) if msg.contains(ENV_LOGIN_ID)));
    }

    #[test]
    fn empty_password_fails() {
        let err = ClientConfig::from_sources(
            &defaults(),
            env(&[(ENV_LOGIN_ID, "me"), (ENV_PASSWORD, "  ")]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Configuration(msg) if msg.contains(ENV_PASSWORD)));
    }

    #[test]
    fn malformed_timeout_fails() {
        let figment = defaults().merge(Serialized::default("timeout_secs", "ten"));
        let err = ClientConfig::from_sources(&figment, credentials()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn debug_does_not_leak_password() {
        let config = ClientConfig::new().with_credentials("me", "super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
