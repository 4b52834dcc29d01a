// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `RoboVac` library.
//!
//! This module provides a comprehensive error hierarchy for handling failures
//! across the library: value validation, transport communication, response
//! parsing, device command rejection, and property-table configuration.
//!
//! Device-reported faults (vacuum stuck, dustbin missing, ...) are *not*
//! errors in this hierarchy: they are long-lived state observed through the
//! `error` property and the error capability hook. See
//! [`DeviceFault`](crate::types::DeviceFault).

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when interacting
/// with a vacuum device.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred in the underlying RPC transport.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Error in the property-table configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A raw code does not name a known water-box mode.
    #[error("invalid water-box mode code: {0}")]
    InvalidWaterBoxMode(i64),
}

/// Errors raised by the RPC transport collaborator.
///
/// The transport itself (framing, encryption, socket retries, timeouts) lives
/// outside this crate; these variants are the vocabulary it reports failures
/// in. They are propagated unchanged to the caller of the triggering
/// operation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The device answered the RPC with an error payload.
    #[error("RPC call failed: {0}")]
    Rpc(String),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// Errors related to parsing device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors related to device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device returned a non-success result code for a command.
    #[error("command rejected by device: {0}")]
    CommandRejected(String),
}

/// Errors in the property definition table, detected at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A raw key was registered twice.
    #[error("duplicate raw property key: {0}")]
    DuplicateRawKey(String),

    /// A semantic name was registered twice.
    #[error("duplicate semantic property name: {0}")]
    DuplicateSemanticName(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 1,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [1, 100]");
    }

    #[test]
    fn error_from_transport_error() {
        let transport_err = TransportError::Timeout(5000);
        let err: Error = transport_err.into();
        assert!(matches!(err, Error::Transport(TransportError::Timeout(5000))));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("state".to_string());
        assert_eq!(err.to_string(), "missing field in response: state");
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::CommandRejected("[\"error\"]".to_string());
        assert_eq!(err.to_string(), "command rejected by device: [\"error\"]");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::DuplicateRawKey("state".to_string());
        assert_eq!(err.to_string(), "duplicate raw property key: state");
    }
}
