// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cleaning history types.
//!
//! The device reports its cleaning history with fixed unit conventions:
//! area values in raw map units that divide by 1,000,000 to yield square
//! meters, durations in seconds, and timestamps as seconds since the Unix
//! epoch. This module parses the raw `get_clean_summary` and
//! `get_clean_record` payloads into typed values with those conversions
//! applied.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::ParseError;
use crate::types::DeviceFault;

/// Scale factor between the device's raw area unit and square meters.
const AREA_SCALE: f64 = 1_000_000.0;

fn as_seconds(value: &Value, field: &str) -> Result<u64, ParseError> {
    value
        .as_u64()
        .ok_or_else(|| ParseError::MissingField(field.to_string()))
}

fn as_square_meters(value: &Value, field: &str) -> Result<f64, ParseError> {
    value
        .as_f64()
        .map(|raw| raw / AREA_SCALE)
        .ok_or_else(|| ParseError::MissingField(field.to_string()))
}

fn as_datetime(value: &Value, field: &str) -> Result<DateTime<Utc>, ParseError> {
    let seconds = value
        .as_i64()
        .ok_or_else(|| ParseError::MissingField(field.to_string()))?;
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        ParseError::UnexpectedFormat(format!("{field}: timestamp {seconds} out of range"))
    })
}

/// Selects a history day, either as a date-time or as the raw
/// epoch-seconds record ID the summary lists.
///
/// Both forms address the same instant and produce identical lookups.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use robovac_lib::history::RecordDay;
///
/// let by_epoch = RecordDay::from(1_640_995_200_i64);
/// let by_date = RecordDay::from(DateTime::from_timestamp(1_640_995_200, 0).unwrap());
/// assert_eq!(by_epoch, by_date);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordDay(i64);

impl RecordDay {
    /// Returns the day as seconds since the Unix epoch.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RecordDay {
    fn from(epoch_seconds: i64) -> Self {
        Self(epoch_seconds)
    }
}

impl From<DateTime<Utc>> for RecordDay {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant.timestamp())
    }
}

/// Aggregate cleaning history as reported by `get_clean_summary`.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningSummary {
    /// Total time spent cleaning.
    pub total_duration: Duration,
    /// Total cleaned area in square meters.
    pub total_area: f64,
    /// Number of completed cleaning runs.
    pub count: u64,
    /// Record IDs (epoch seconds) of the most recent cleaning days, newest
    /// first; pass one to [`Device::cleaning_record`](crate::Device::cleaning_record).
    pub record_ids: Vec<i64>,
}

impl CleaningSummary {
    /// Parses the raw summary payload
    /// `[duration_seconds, raw_area, count, [record_ids...]]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the payload does not match the expected
    /// shape.
    pub fn from_response(raw: &Value) -> Result<Self, ParseError> {
        let items = raw.as_array().ok_or_else(|| {
            ParseError::UnexpectedFormat(format!("expected summary array, got {raw}"))
        })?;

        let total_duration =
            Duration::from_secs(as_seconds(items.first().unwrap_or(&Value::Null), "clean_time")?);
        let total_area = as_square_meters(items.get(1).unwrap_or(&Value::Null), "clean_area")?;
        let count = items
            .get(2)
            .and_then(Value::as_u64)
            .ok_or_else(|| ParseError::MissingField("clean_count".to_string()))?;
        let record_ids = items
            .get(3)
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
            .unwrap_or_default();

        Ok(Self {
            total_duration,
            total_area,
            count,
            record_ids,
        })
    }
}

/// A single cleaning run as reported by `get_clean_record`.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningRecord {
    /// When the run started.
    pub start: DateTime<Utc>,
    /// When the run ended.
    pub end: DateTime<Utc>,
    /// Active cleaning time; can be shorter than `end - start` when the run
    /// was paused.
    pub duration: Duration,
    /// Cleaned area in square meters.
    pub area: f64,
    /// Fault that interrupted the run, if any.
    pub fault: Option<DeviceFault>,
    /// Whether the run completed.
    pub completed: bool,
}

impl CleaningRecord {
    /// Parses one raw record entry
    /// `[start_epoch, end_epoch, duration_seconds, raw_area, error_code, complete_flag]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the entry does not match the expected
    /// shape.
    pub fn from_entry(raw: &Value) -> Result<Self, ParseError> {
        let items = raw.as_array().ok_or_else(|| {
            ParseError::UnexpectedFormat(format!("expected record array, got {raw}"))
        })?;

        let start = as_datetime(items.first().unwrap_or(&Value::Null), "begin")?;
        let end = as_datetime(items.get(1).unwrap_or(&Value::Null), "end")?;
        let duration =
            Duration::from_secs(as_seconds(items.get(2).unwrap_or(&Value::Null), "duration")?);
        let area = as_square_meters(items.get(3).unwrap_or(&Value::Null), "area")?;
        let fault = items
            .get(4)
            .and_then(Value::as_i64)
            .and_then(DeviceFault::from_code);
        let completed = items.get(5).and_then(Value::as_i64) == Some(1);

        Ok(Self {
            start,
            end,
            duration,
            area,
            fault,
            completed,
        })
    }

    /// Parses the full `get_clean_record` payload (a list of runs).
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the payload or any entry does not match
    /// the expected shape.
    pub fn from_response(raw: &Value) -> Result<Vec<Self>, ParseError> {
        raw.as_array()
            .ok_or_else(|| {
                ParseError::UnexpectedFormat(format!("expected record list, got {raw}"))
            })?
            .iter()
            .map(Self::from_entry)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_applies_unit_conventions() {
        let raw = json!([174_145, 26_000_000, 82, [1_640_995_200, 1_640_908_800]]);
        let summary = CleaningSummary::from_response(&raw).unwrap();

        assert_eq!(summary.total_duration, Duration::from_secs(174_145));
        assert!((summary.total_area - 26.0).abs() < f64::EPSILON);
        assert_eq!(summary.count, 82);
        assert_eq!(summary.record_ids, vec![1_640_995_200, 1_640_908_800]);
    }

    #[test]
    fn summary_rejects_malformed_payload() {
        assert!(CleaningSummary::from_response(&json!({"total": 1})).is_err());
        assert!(CleaningSummary::from_response(&json!(["x", 2, 3, []])).is_err());
    }

    #[test]
    fn record_parses_timestamps_and_area() {
        let raw = json!([1_640_995_200, 1_640_998_800, 3_600, 52_000_000, 0, 1]);
        let record = CleaningRecord::from_entry(&raw).unwrap();

        assert_eq!(record.start.timestamp(), 1_640_995_200);
        assert_eq!(record.end.timestamp(), 1_640_998_800);
        assert_eq!(record.duration, Duration::from_secs(3_600));
        assert!((record.area - 52.0).abs() < f64::EPSILON);
        assert!(record.fault.is_none());
        assert!(record.completed);
    }

    #[test]
    fn record_surfaces_fault_and_incomplete_flag() {
        let raw = json!([1_640_995_200, 1_640_996_000, 700, 8_000_000, 5, 0]);
        let record = CleaningRecord::from_entry(&raw).unwrap();

        let fault = record.fault.unwrap();
        assert_eq!(fault.message, "Unknown error 5");
        assert!(!record.completed);
    }

    #[test]
    fn record_list_parses_every_entry() {
        let raw = json!([
            [1_640_995_200, 1_640_998_800, 3_600, 52_000_000, 0, 1],
            [1_640_908_800, 1_640_910_000, 1_100, 15_500_000, 0, 1]
        ]);
        let records = CleaningRecord::from_response(&raw).unwrap();
        assert_eq!(records.len(), 2);
        assert!((records[1].area - 15.5).abs() < f64::EPSILON);
    }

    #[test]
    fn record_day_from_epoch_and_datetime_agree() {
        let epoch = 1_640_995_200_i64;
        let instant = DateTime::from_timestamp(epoch, 0).unwrap();

        assert_eq!(RecordDay::from(epoch), RecordDay::from(instant));
        assert_eq!(RecordDay::from(instant).timestamp(), epoch);
    }
}
