// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property definition table.
//!
//! The device speaks in raw field names (`fan_power`, `clean_area`, ...);
//! callers and capability logic speak in stable semantic names (`fanSpeed`,
//! `cleanArea`, ...). The [`PropertyTable`] declares that mapping once per
//! device type, together with an optional value transform per property, and
//! is immutable afterwards.
//!
//! # Transforms
//!
//! A transform is a pure function from the raw JSON value to the semantic
//! value. It may return `Null` to signal "no value" — the `error` property
//! uses this to express "no fault". Transforms never fail: raw values outside
//! the expected domain degrade to `Null` or to a tagged fallback (see
//! [`state_label`]).
//!
//! # Examples
//!
//! ```
//! use robovac_lib::properties::PropertyTable;
//! use serde_json::json;
//!
//! let table = PropertyTable::standard();
//!
//! // Reverse lookup: semantic name back to the raw fetch key
//! assert_eq!(table.raw_key_for("batteryLevel"), Some("battery"));
//!
//! // Transforms applied through the definition
//! let def = table.definition("state").unwrap();
//! assert_eq!(def.apply(&json!(5)), json!("cleaning"));
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::error::ConfigError;
use crate::types::{DeviceFault, VacuumState};

/// A pure value transform from raw device value to semantic value.
pub type Transform = fn(&Value) -> Value;

/// Scale factor between the device's raw area unit and square meters.
const AREA_SCALE: f64 = 1_000_000.0;

/// Identity transform; used when a property needs no conversion.
#[must_use]
pub fn identity(raw: &Value) -> Value {
    raw.clone()
}

/// Maps a raw state code to its semantic label.
///
/// Codes outside the known set become `unknown-<code>` so unseen firmware
/// states surface for diagnosis instead of failing the device. Non-numeric
/// input degrades to `Null`.
#[must_use]
pub fn state_label(raw: &Value) -> Value {
    match raw.as_i64() {
        Some(code) => {
            let state = VacuumState::from_code(code);
            if matches!(state, VacuumState::Unknown(_)) {
                tracing::debug!(code, "Unmapped device state code");
            }
            Value::String(state.to_string())
        }
        None => Value::Null,
    }
}

/// Maps a raw error code to a structured `{code, message}` fault value.
///
/// Code `0` and non-numeric input yield `Null` ("no error"). Nonzero codes
/// always surface, with a generic message, since the authoritative error
/// table is not available.
#[must_use]
pub fn fault_or_null(raw: &Value) -> Value {
    raw.as_i64()
        .and_then(DeviceFault::from_code)
        .map_or(Value::Null, |fault| fault.to_value())
}

/// Converts a raw area value to square meters.
#[must_use]
pub fn square_meters(raw: &Value) -> Value {
    match raw.as_f64() {
        Some(area) => Value::from(area / AREA_SCALE),
        None => Value::Null,
    }
}

/// A single raw-to-semantic property descriptor.
#[derive(Clone)]
pub struct PropertyDefinition {
    raw_key: String,
    semantic_name: String,
    transform: Transform,
}

impl PropertyDefinition {
    /// Returns the device's native field name.
    #[must_use]
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    /// Returns the stable semantic name exposed to callers.
    #[must_use]
    pub fn semantic_name(&self) -> &str {
        &self.semantic_name
    }

    /// Applies the property's transform to a raw value.
    #[must_use]
    pub fn apply(&self, raw: &Value) -> Value {
        (self.transform)(raw)
    }
}

impl std::fmt::Debug for PropertyDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyDefinition")
            .field("raw_key", &self.raw_key)
            .field("semantic_name", &self.semantic_name)
            .finish_non_exhaustive()
    }
}

/// The immutable raw-to-semantic mapping for one device type.
///
/// Built once at device-type initialization; duplicate registrations are a
/// configuration error detected at startup, not at property access time.
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
    definitions: Vec<PropertyDefinition>,
    by_raw: HashMap<String, usize>,
    by_semantic: HashMap<String, usize>,
}

/// The standard mapping for this vacuum device class.
///
/// Status fields come from `get_status`; the wear counters at the end are
/// served by `get_consumable`.
const STANDARD_DEFINITIONS: &[(&str, &str, Transform)] = &[
    ("state", "state", state_label),
    ("error_code", "error", fault_or_null),
    ("battery", "batteryLevel", identity),
    ("fan_power", "fanSpeed", identity),
    ("clean_time", "cleanTime", identity),
    ("clean_area", "cleanArea", square_meters),
    ("water_box_mode", "waterBoxMode", identity),
    ("main_brush_work_time", "mainBrushWorkTime", identity),
    ("side_brush_work_time", "sideBrushWorkTime", identity),
    ("filter_work_time", "filterWorkTime", identity),
    ("sensor_dirty_time", "sensorDirtyTime", identity),
];

impl PropertyTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the standard table for this vacuum device class.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (raw_key, semantic_name, transform) in STANDARD_DEFINITIONS {
            // The built-in list is a literal; uniqueness is covered by the
            // standard_table_is_consistent test.
            if let Err(err) = table.define_with(*raw_key, *semantic_name, *transform) {
                unreachable!("built-in property table is inconsistent: {err}");
            }
        }
        table
    }

    /// Registers a property whose semantic name equals its raw key, with the
    /// identity transform.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] on duplicate raw key or semantic name.
    pub fn define(&mut self, raw_key: impl Into<String>) -> Result<(), ConfigError> {
        let raw_key = raw_key.into();
        let semantic_name = raw_key.clone();
        self.define_with(raw_key, semantic_name, identity)
    }

    /// Registers a property under a semantic name, with the identity
    /// transform.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] on duplicate raw key or semantic name.
    pub fn define_as(
        &mut self,
        raw_key: impl Into<String>,
        semantic_name: impl Into<String>,
    ) -> Result<(), ConfigError> {
        self.define_with(raw_key, semantic_name, identity)
    }

    /// Registers a property with a semantic name and a value transform.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] on duplicate raw key or semantic name.
    pub fn define_with(
        &mut self,
        raw_key: impl Into<String>,
        semantic_name: impl Into<String>,
        transform: Transform,
    ) -> Result<(), ConfigError> {
        let raw_key = raw_key.into();
        let semantic_name = semantic_name.into();

        if self.by_raw.contains_key(&raw_key) {
            return Err(ConfigError::DuplicateRawKey(raw_key));
        }
        if self.by_semantic.contains_key(&semantic_name) {
            return Err(ConfigError::DuplicateSemanticName(semantic_name));
        }

        let index = self.definitions.len();
        self.by_raw.insert(raw_key.clone(), index);
        self.by_semantic.insert(semantic_name.clone(), index);
        self.definitions.push(PropertyDefinition {
            raw_key,
            semantic_name,
            transform,
        });
        Ok(())
    }

    /// Reverse lookup: translates a semantic name back to its raw fetch key.
    #[must_use]
    pub fn raw_key_for(&self, semantic_name: &str) -> Option<&str> {
        self.by_semantic
            .get(semantic_name)
            .map(|&index| self.definitions[index].raw_key())
    }

    /// Returns the definition registered under a semantic name.
    #[must_use]
    pub fn definition(&self, semantic_name: &str) -> Option<&PropertyDefinition> {
        self.by_semantic
            .get(semantic_name)
            .map(|&index| &self.definitions[index])
    }

    /// Returns the definition registered under a raw key.
    #[must_use]
    pub fn definition_by_raw(&self, raw_key: &str) -> Option<&PropertyDefinition> {
        self.by_raw
            .get(raw_key)
            .map(|&index| &self.definitions[index])
    }

    /// Iterates over all definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.definitions.iter()
    }

    /// Returns the number of registered properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if no properties are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn standard_table_is_consistent() {
        // Re-registering every entry of the standard list into a fresh table
        // must succeed; a duplicate would have panicked in standard().
        let table = PropertyTable::standard();
        assert_eq!(table.len(), STANDARD_DEFINITIONS.len());
    }

    #[test]
    fn define_defaults_semantic_name_to_raw_key() {
        let mut table = PropertyTable::new();
        table.define("battery").unwrap();
        assert_eq!(table.raw_key_for("battery"), Some("battery"));

        let def = table.definition("battery").unwrap();
        assert_eq!(def.apply(&json!(80)), json!(80));
    }

    #[test]
    fn duplicate_raw_key_is_rejected() {
        let mut table = PropertyTable::new();
        table.define_as("battery", "batteryLevel").unwrap();
        assert_eq!(
            table.define("battery"),
            Err(ConfigError::DuplicateRawKey("battery".to_string()))
        );
    }

    #[test]
    fn duplicate_semantic_name_is_rejected() {
        let mut table = PropertyTable::new();
        table.define_as("battery", "batteryLevel").unwrap();
        assert_eq!(
            table.define_as("bat_level", "batteryLevel"),
            Err(ConfigError::DuplicateSemanticName("batteryLevel".to_string()))
        );
    }

    #[test]
    fn reverse_lookup() {
        let table = PropertyTable::standard();
        assert_eq!(table.raw_key_for("state"), Some("state"));
        assert_eq!(table.raw_key_for("batteryLevel"), Some("battery"));
        assert_eq!(table.raw_key_for("fanSpeed"), Some("fan_power"));
        assert_eq!(table.raw_key_for("error"), Some("error_code"));
        assert_eq!(table.raw_key_for("no_such_property"), None);
    }

    #[test]
    fn state_transform_maps_known_codes() {
        assert_eq!(state_label(&json!(5)), json!("cleaning"));
        assert_eq!(state_label(&json!(8)), json!("charging"));
        assert_eq!(state_label(&json!(12)), json!("error"));
        assert_eq!(state_label(&json!(22)), json!("dust-collection"));
        assert_eq!(state_label(&json!(100)), json!("full"));
    }

    #[test]
    fn state_transform_tags_unknown_codes() {
        assert_eq!(state_label(&json!(42)), json!("unknown-42"));
        assert_eq!(state_label(&json!(7)), json!("unknown-7"));
    }

    #[test]
    fn state_transform_degrades_on_non_numeric() {
        assert_eq!(state_label(&json!("cleaning")), Value::Null);
        assert_eq!(state_label(&Value::Null), Value::Null);
    }

    #[test]
    fn error_transform() {
        assert_eq!(fault_or_null(&json!(0)), Value::Null);
        assert_eq!(
            fault_or_null(&json!(7)),
            json!({ "code": 7, "message": "Unknown error 7" })
        );
        assert_eq!(fault_or_null(&Value::Null), Value::Null);
    }

    #[test]
    fn area_transform_yields_square_meters() {
        assert_eq!(square_meters(&json!(26_000_000)), json!(26.0));
        assert_eq!(square_meters(&json!(1_500_000)), json!(1.5));
        assert_eq!(square_meters(&json!("not a number")), Value::Null);
    }

    #[test]
    fn definition_lookup_by_raw_key() {
        let table = PropertyTable::standard();
        let def = table.definition_by_raw("clean_area").unwrap();
        assert_eq!(def.semantic_name(), "cleanArea");
        assert_eq!(def.apply(&json!(26_000_000)), json!(26.0));
    }
}
