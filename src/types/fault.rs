// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured device fault values.
//!
//! A fault is a long-lived condition the device reports through status
//! polling (vacuum stuck, dustbin missing, charging problem). Faults are
//! state, not control flow: they travel through the `error` semantic property
//! and the error capability hook, never as a raised [`Error`](crate::Error).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Identifies a fault either by the device's raw numeric code or by a
/// synthetic label for conditions derived from the state property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaultCode {
    /// Raw numeric error code as reported by the device.
    Raw(i64),
    /// Synthetic label for state-derived faults (`charging-error`,
    /// `charger-offline`).
    Label(String),
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(code) => write!(f, "{code}"),
            Self::Label(label) => write!(f, "{label}"),
        }
    }
}

/// A device-reported fault with a code and a human-readable message.
///
/// The authoritative error-code table for this device class is not published,
/// so raw codes carry a generic `Unknown error <code>` message rather than
/// being suppressed.
///
/// # Examples
///
/// ```
/// use robovac_lib::types::DeviceFault;
///
/// // Raw code 0 means "no error"
/// assert!(DeviceFault::from_code(0).is_none());
///
/// let fault = DeviceFault::from_code(7).unwrap();
/// assert_eq!(fault.message, "Unknown error 7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFault {
    /// Fault identifier.
    pub code: FaultCode,
    /// Human-readable description.
    pub message: String,
}

impl DeviceFault {
    /// Derives a fault from a raw error code.
    ///
    /// Code `0` means "no error" and yields `None`. Every nonzero code
    /// surfaces as a fault with a generic message.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        if code == 0 {
            return None;
        }
        Some(Self {
            code: FaultCode::Raw(code),
            message: format!("Unknown error {code}"),
        })
    }

    /// Synthetic fault raised when the state property reports
    /// `charging-error`.
    #[must_use]
    pub fn charging_error() -> Self {
        Self {
            code: FaultCode::Label("charging-error".to_string()),
            message: "Error during charging".to_string(),
        }
    }

    /// Synthetic fault raised when the state property reports
    /// `charger-offline`.
    #[must_use]
    pub fn charger_offline() -> Self {
        Self {
            code: FaultCode::Label("charger-offline".to_string()),
            message: "Charger is offline".to_string(),
        }
    }

    /// Renders the fault as the `{code, message}` JSON value stored on the
    /// `error` semantic property.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let code = match &self.code {
            FaultCode::Raw(code) => json!(code),
            FaultCode::Label(label) => json!(label),
        };
        json!({ "code": code, "message": self.message })
    }
}

impl fmt::Display for DeviceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device fault {}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_zero_is_no_fault() {
        assert!(DeviceFault::from_code(0).is_none());
    }

    #[test]
    fn nonzero_codes_surface_with_generic_message() {
        let fault = DeviceFault::from_code(7).unwrap();
        assert_eq!(fault.code, FaultCode::Raw(7));
        assert_eq!(fault.message, "Unknown error 7");

        let fault = DeviceFault::from_code(115).unwrap();
        assert_eq!(fault.message, "Unknown error 115");
    }

    #[test]
    fn synthetic_faults() {
        let charging = DeviceFault::charging_error();
        assert_eq!(charging.code, FaultCode::Label("charging-error".into()));
        assert_eq!(charging.message, "Error during charging");

        let offline = DeviceFault::charger_offline();
        assert_eq!(offline.code, FaultCode::Label("charger-offline".into()));
        assert_eq!(offline.message, "Charger is offline");
    }

    #[test]
    fn json_value_shape() {
        let fault = DeviceFault::from_code(7).unwrap();
        assert_eq!(
            fault.to_value(),
            json!({ "code": 7, "message": "Unknown error 7" })
        );

        let synthetic = DeviceFault::charger_offline();
        assert_eq!(
            synthetic.to_value(),
            json!({ "code": "charger-offline", "message": "Charger is offline" })
        );
    }

    #[test]
    fn round_trips_through_serde() {
        let fault = DeviceFault::from_code(12).unwrap();
        let parsed: DeviceFault = serde_json::from_value(fault.to_value()).unwrap();
        assert_eq!(parsed, fault);

        let synthetic = DeviceFault::charging_error();
        let parsed: DeviceFault = serde_json::from_value(synthetic.to_value()).unwrap();
        assert_eq!(parsed, synthetic);
    }

    #[test]
    fn display_format() {
        let fault = DeviceFault::from_code(9).unwrap();
        assert_eq!(fault.to_string(), "device fault 9: Unknown error 9");
    }
}
