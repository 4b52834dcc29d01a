// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device metadata: serial number, schedule timers, room mapping.

use serde_json::Value;

use crate::error::ParseError;

/// A scheduled cleaning timer as reported by `get_timer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTimer {
    /// Timer identifier (epoch-milliseconds string on this device class).
    pub id: String,
    /// Whether the timer is enabled.
    pub enabled: bool,
    /// Schedule in cron field syntax.
    pub schedule: String,
}

impl DeviceTimer {
    /// Parses one raw timer entry `[id, "on"|"off", [cron, [action...]]]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the entry does not match the expected
    /// shape.
    pub fn from_entry(raw: &Value) -> Result<Self, ParseError> {
        let items = raw.as_array().ok_or_else(|| {
            ParseError::UnexpectedFormat(format!("expected timer array, got {raw}"))
        })?;

        let id = items
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::MissingField("timer id".to_string()))?
            .to_string();
        let enabled = items.get(1).and_then(Value::as_str) == Some("on");
        let schedule = items
            .get(2)
            .and_then(Value::as_array)
            .and_then(|detail| detail.first())
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::MissingField("timer schedule".to_string()))?
            .to_string();

        Ok(Self {
            id,
            enabled,
            schedule,
        })
    }

    /// Parses the full `get_timer` payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the payload or any entry does not match
    /// the expected shape.
    pub fn from_response(raw: &Value) -> Result<Vec<Self>, ParseError> {
        raw.as_array()
            .ok_or_else(|| ParseError::UnexpectedFormat(format!("expected timer list, got {raw}")))?
            .iter()
            .map(Self::from_entry)
            .collect()
    }
}

/// Maps one map segment to its assigned room, as reported by
/// `get_room_mapping`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMapping {
    /// Map segment ID used by room-clean commands.
    pub segment: i64,
    /// Vendor-cloud room identifier.
    pub room_id: String,
}

impl RoomMapping {
    /// Parses the full `get_room_mapping` payload `[[segment, room_id], ...]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the payload or any entry does not match
    /// the expected shape.
    pub fn from_response(raw: &Value) -> Result<Vec<Self>, ParseError> {
        let entries = raw.as_array().ok_or_else(|| {
            ParseError::UnexpectedFormat(format!("expected room mapping list, got {raw}"))
        })?;

        entries
            .iter()
            .map(|entry| {
                let pair = entry.as_array().ok_or_else(|| {
                    ParseError::UnexpectedFormat(format!("expected mapping pair, got {entry}"))
                })?;
                let segment = pair
                    .first()
                    .and_then(Value::as_i64)
                    .ok_or_else(|| ParseError::MissingField("segment id".to_string()))?;
                let room_id = pair
                    .get(1)
                    .and_then(Value::as_str)
                    .ok_or_else(|| ParseError::MissingField("room id".to_string()))?
                    .to_string();
                Ok(Self { segment, room_id })
            })
            .collect()
    }
}

/// Extracts the serial number from the `get_serial_number` payload
/// `[{"serial_number": "..."}]`.
///
/// # Errors
///
/// Returns a [`ParseError`] if the payload does not match the expected shape.
pub fn parse_serial_number(raw: &Value) -> Result<String, ParseError> {
    raw.as_array()
        .and_then(|items| items.first())
        .and_then(|entry| entry.get("serial_number"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| ParseError::MissingField("serial_number".to_string()))
}
