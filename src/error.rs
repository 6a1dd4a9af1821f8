// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `MirAIe` library.
//!
//! This module provides the error hierarchy for the library: configuration,
//! authentication, transport, discovery, device resolution, value validation,
//! per-device failures, and response parsing.
//!
//! Caller-input errors ([`Error::DeviceNotFound`], [`Error::NoDevices`],
//! [`Error::Value`]) abort an operation before any device is touched.
//! Per-device errors ([`Error::Network`], [`Error::Device`]) are reported
//! inside each [`CommandOutcome`](crate::manager::CommandOutcome) instead.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Credentials were rejected or the session could not be (re)established.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Transport-level failure talking to the cloud.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The device list could not be obtained or is unusable.
    #[error("discovery failed: {0}")]
    Discovery(String),

    /// No device matches the requested name.
    #[error("device '{name}' not found (known devices: {})", known.join(", "))]
    DeviceNotFound {
        /// The name that was requested.
        name: String,
        /// Names of every known device, in discovery order.
        known: Vec<String>,
    },

    /// The "all" selector was used but no device is registered.
    #[error("no devices registered")]
    NoDevices,

    /// An operand failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A single device could not carry out the request.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// A cloud response could not be understood.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The value is not a member of the field's closed set.
    #[error("invalid {field} '{value}', expected one of: {}", allowed.join(", "))]
    InvalidValue {
        /// The field being validated.
        field: &'static str,
        /// The rejected input.
        value: String,
        /// Every legal value for the field.
        allowed: Vec<&'static str>,
    },

    /// A numeric value is outside the allowed range.
    #[error("{field} {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// The field being validated.
        field: &'static str,
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },
}

/// Errors related to cloud communication.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request or batch timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The cloud answered with a failure status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase or response body.
        reason: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to a single device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device lacks the capability required by the operation.
    #[error("{device} does not support {operation}")]
    UnsupportedOperation {
        /// Device name.
        device: String,
        /// The operation that was refused.
        operation: String,
    },

    /// The cloud reported the device as unable to take the command.
    #[error("{device} is unavailable: {reason}")]
    Unavailable {
        /// Device name.
        device: String,
        /// Reason reported by the cloud.
        reason: String,
    },
}

/// Errors related to parsing cloud responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

impl Error {
    /// Returns `true` for errors caused by caller input rather than by the
    /// cloud or a device.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotFound { .. } | Self::NoDevices | Self::Value(_)
        )
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_display() {
        let err = ValueError::OutOfRange {
            field: "temperature",
            min: 16,
            max: 30,
            actual: 31,
        };
        assert_eq!(err.to_string(), "temperature 31 is out of range [16, 30]");
    }

    #[test]
    fn invalid_value_lists_allowed_set() {
        let err = ValueError::InvalidValue {
            field: "mode",
            value: "turbo".to_string(),
            allowed: vec!["auto", "cool"],
        };
        assert_eq!(
            err.to_string(),
            "invalid mode 'turbo', expected one of: auto, cool"
        );
    }

    #[test]
    fn device_not_found_lists_known_names() {
        let err = Error::DeviceNotFound {
            name: "Kitchen".to_string(),
            known: vec!["Living Room".to_string(), "Bedroom".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "device 'Kitchen' not found (known devices: Living Room, Bedroom)"
        );
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::OutOfRange {
            field: "temperature",
            min: 16,
            max: 30,
            actual: 5,
        }
        .into();
        assert!(matches!(err, Error::Value(ValueError::OutOfRange { .. })));
        assert!(err.is_caller_error());
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::UnsupportedOperation {
            device: "Bedroom".to_string(),
            operation: "setPresetMode".to_string(),
        };
        assert_eq!(err.to_string(), "Bedroom does not support setPresetMode");
        assert!(!Error::from(err).is_caller_error());
    }
}
