// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport abstraction for device RPC.
//!
//! The wire protocol — framing, encryption, handshakes, socket-level retries,
//! timeouts — lives outside this crate. This module defines the seam: the
//! [`Transport`] trait a concrete transport implements, the
//! [`RefreshDirective`] a command attaches to keep the local snapshot
//! consistent with asynchronous device-side effects, and the generic
//! [`check_result`] success validator applied to command results.
//!
//! # Implementing a Transport
//!
//! ```ignore
//! use async_trait::async_trait;
//! use robovac_lib::error::TransportError;
//! use robovac_lib::protocol::Transport;
//! use serde_json::Value;
//!
//! struct UdpTransport { /* socket, token, ids... */ }
//!
//! #[async_trait]
//! impl Transport for UdpTransport {
//!     async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
//!         // frame, encrypt, send, await the response...
//!         # unimplemented!()
//!     }
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{DeviceError, TransportError};

/// An RPC transport to a device.
///
/// Implementations perform one remote procedure call and return the raw
/// result payload. Retries and timeouts are the transport's responsibility;
/// this crate propagates transport failures unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a remote call.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the call could not be completed.
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError>;
}

/// Instruction to re-fetch named properties after a command.
///
/// Device-side effects of a command land asynchronously; a refresh directive
/// schedules a snapshot reload of the affected properties once the device has
/// had time to apply them. A directive without an explicit delay uses the
/// device's configured refresh delay (1000ms by default, matching the
/// observed command-to-effect latency of this device class).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use robovac_lib::protocol::RefreshDirective;
///
/// // Re-read `state` after the device-default delay
/// let directive = RefreshDirective::state();
/// assert_eq!(directive.properties(), ["state"]);
/// assert_eq!(directive.delay(), None);
///
/// // Explicit delay
/// let directive = RefreshDirective::new(["batteryLevel"])
///     .with_delay(Duration::from_millis(500));
/// assert_eq!(directive.delay(), Some(Duration::from_millis(500)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshDirective {
    properties: Vec<String>,
    delay: Option<Duration>,
}

impl RefreshDirective {
    /// Creates a directive for the given semantic properties, refreshed
    /// after the device's configured default delay.
    pub fn new<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
            delay: None,
        }
    }

    /// Overrides the refresh delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Creates a directive that refreshes without waiting.
    pub fn immediate<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(properties).with_delay(Duration::ZERO)
    }

    /// Directive re-reading the `state` property; what most motion commands
    /// attach.
    #[must_use]
    pub fn state() -> Self {
        Self::new(["state"])
    }

    /// The semantic properties to re-fetch, in order.
    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// The explicit delay, or `None` for the device default.
    #[must_use]
    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Consumes the directive, returning its property list.
    #[must_use]
    pub fn into_properties(self) -> Vec<String> {
        self.properties
    }
}

/// Validates a command result against the device's success conventions.
///
/// The device acknowledges commands with `"ok"`, `["ok"]`, `[0]`, or `0`;
/// anything else is a rejection.
///
/// # Errors
///
/// Returns [`DeviceError::CommandRejected`] carrying the raw result rendering
/// when the device signals a non-success code.
pub fn check_result(raw: Value) -> Result<Value, DeviceError> {
    if result_is_ok(&raw) {
        Ok(raw)
    } else {
        Err(DeviceError::CommandRejected(raw.to_string()))
    }
}

fn result_is_ok(raw: &Value) -> bool {
    match raw {
        Value::String(s) => s == "ok",
        Value::Number(n) => n.as_i64() == Some(0),
        Value::Array(items) => items.first().is_some_and(|first| match first {
            Value::String(s) => s == "ok",
            Value::Number(n) => n.as_i64() == Some(0),
            _ => false,
        }),
        _ => false,
    }
}
