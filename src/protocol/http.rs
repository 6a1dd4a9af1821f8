// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the `MirAIe` cloud.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::command::MutationRequest;
use crate::config::ClientConfig;
use crate::error::{Error, NetworkError, ParseError};
use crate::response::{HomeRecord, LoginResponse, StatusResponse};
use crate::session::LoginId;

const LOGIN_PATH: &str = "/simplifi/v1/userManagement/login";
const LOGOUT_PATH: &str = "/simplifi/v1/userManagement/logout";
const HOMES_PATH: &str = "/simplifi/v1/homeManagement/homes";
const DEVICES_PATH: &str = "/simplifi/v1/deviceManagement/devices";

/// HTTP client for the `MirAIe` authentication and device services.
///
/// The client is cheap to clone; clones share the connection pool.
///
/// It is a thin transport: every non-success status is reported as
/// [`NetworkError::Status`], except `401`/`403` which become
/// [`Error::Authentication`]. Callers decide what a status means for them.
#[derive(Debug, Clone)]
pub struct ApiClient {
    auth_url: String,
    api_url: String,
    client: Client,
    client_id: Uuid,
    timeout: Duration,
}

impl ApiClient {
    /// Creates an API client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidAddress` if a service URL is malformed,
    /// or `NetworkError::Http` if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, NetworkError> {
        for url in [config.auth_url(), config.api_url()] {
            Url::parse(url).map_err(|e| NetworkError::InvalidAddress(format!("{url}: {e}")))?;
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            auth_url: config.auth_url().to_string(),
            api_url: config.api_url().to_string(),
            client,
            client_id: Uuid::new_v4(),
            timeout: config.timeout(),
        })
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

    /// Logs in and returns the raw login response.
    ///
    /// # Errors
    ///
    /// Returns `Error::Authentication` if the credentials are rejected and
    /// `Error::Network` on transport failure.
    pub async fn login(
        &self,
        login_id: &LoginId,
        password: &SecretString,
    ) -> Result<LoginResponse, Error> {
        let mut body = serde_json::Map::new();
        body.insert(login_id.wire_field().into(), login_id.value().into());
        body.insert("password".into(), password.expose_secret().into());
        body.insert("clientId".into(), self.client_id.to_string().into());
        body.insert("scope".into(), format!("an_{}", self.client_id.simple()).into());

        tracing::debug!(kind = login_id.kind(), "Sending login request");

        let request = self
            .client
            .post(format!("{}{LOGIN_PATH}", self.auth_url))
            .json(&body);

        match self.execute(request).await {
            Ok(text) => parse(&text),
            // The auth service answers bad credentials with 400 as well.
            Err(Error::Network(NetworkError::Status { status, reason }))
                if (400..500).contains(&status) =>
            {
                Err(Error::Authentication(format!("HTTP {status} - {reason}")))
            }
            Err(e) => Err(e),
        }
    }

    /// Revokes the session token.
    ///
    /// # Errors
    ///
    /// Returns error if the revoke request fails.
    pub async fn logout(&self, token: &SecretString) -> Result<(), Error> {
        let request = self
            .authorized(Method::DELETE, &format!("{}{LOGOUT_PATH}", self.auth_url), token);
        self.execute(request).await.map(drop)
    }

    /// Lists the homes (and their devices) bound to the account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    pub async fn homes(&self, token: &SecretString) -> Result<Vec<HomeRecord>, Error> {
        let request = self.authorized(Method::GET, &format!("{}{HOMES_PATH}", self.api_url), token);
        let text = self.execute(request).await?;
        parse(&text)
    }

    /// Queries the current status of a device.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    pub async fn device_status(
        &self,
        token: &SecretString,
        device_id: &str,
    ) -> Result<StatusResponse, Error> {
        let url = format!("{}/mobile/status", self.device_url(device_id));
        let text = self.execute(self.authorized(Method::GET, &url, token)).await?;
        parse(&text)
    }

    /// Sends a partial state mutation to a device.
    ///
    /// A success reply that is empty or not a JSON object counts as a bare
    /// acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    pub async fn control(
        &self,
        token: &SecretString,
        device_id: &str,
        request: &MutationRequest,
    ) -> Result<StatusResponse, Error> {
        let url = format!("{}/control", self.device_url(device_id));
        let builder = self.authorized(Method::POST, &url, token).json(request);
        let text = self.execute(builder).await?;
        acknowledgement(&text)
    }

    fn device_url(&self, device_id: &str) -> String {
        format!(
            "{}{DEVICES_PATH}/{}",
            self.api_url,
            urlencoding::encode(device_id)
        )
    }

    fn authorized(&self, method: Method, url: &str, token: &SecretString) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(token.expose_secret())
    }

    async fn execute(&self, request: RequestBuilder) -> Result<String, Error> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        tracing::debug!(url = %response.url(), status = status.as_u16(), "Received HTTP response");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let reason = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown").to_string()
            } else {
                body
            };
            return Err(NetworkError::Status {
                status: status.as_u16(),
                reason,
            }
            .into());
        }

        Ok(body)
    }

    fn transport_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            let ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            NetworkError::Timeout(ms).into()
        } else {
            NetworkError::Http(error).into()
        }
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Parse(ParseError::Json(e)))
}

fn acknowledgement(body: &str) -> Result<StatusResponse, Error> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value @ serde_json::Value::Object(_)) => {
            serde_json::from_value(value).map_err(|e| Error::Parse(ParseError::Json(e)))
        }
        _ => Ok(StatusResponse::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(
            &ClientConfig::new()
                .with_auth_url("http://auth.local/")
                .with_api_url("http://api.local"),
        )
        .unwrap()
    }

    #[test]
    fn urls_come_from_config() {
        let api = client();
        assert_eq!(api.auth_url(), "http://auth.local");
        assert_eq!(api.api_url(), "http://api.local");
    }

    #[test]
    fn device_url_encodes_identifier() {
        let api = client();
        assert_eq!(
            api.device_url("ac 1/a"),
            "http://api.local/simplifi/v1/deviceManagement/devices/ac%201%2Fa"
        );
    }

    #[test]
    fn malformed_url_is_rejected() {
        let err = ApiClient::new(&ClientConfig::new().with_api_url("not a url")).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidAddress(_)));
    }

    #[test]
    fn non_object_control_reply_is_acknowledgement() {
        for body in ["", "  ", "\"ok\"", "true", "OK"] {
            assert!(acknowledgement(body).unwrap().is_empty(), "{body:?}");
        }
    }

    #[test]
    fn object_control_reply_is_parsed() {
        let response = acknowledgement(r#"{"onlineStatus": true}"#).unwrap();
        assert_eq!(response.online(), Some(true));
    }

    #[test]
    fn parse_reports_json_errors() {
        let err = parse::<Vec<HomeRecord>>("not json").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
    }
}
