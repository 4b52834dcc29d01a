// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Semantic property snapshot.

use std::collections::HashMap;

use serde_json::Value;

/// The device's current set of known semantic property values.
///
/// Every semantic key that has been requested at least once has an entry,
/// possibly `Null`. The snapshot is owned by the device instance and written
/// only by the snapshot loader; a refresh replaces the full requested set
/// before any change notification fires.
///
/// # Examples
///
/// ```
/// use robovac_lib::state::Snapshot;
/// use serde_json::json;
///
/// let mut snapshot = Snapshot::new();
/// snapshot.insert("batteryLevel", json!(80));
/// assert_eq!(snapshot.get("batteryLevel"), Some(&json!(80)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    values: HashMap<String, Value>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of a semantic property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Sets a property value, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    /// Returns `true` if the property has been loaded at least once.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterates over all `(key, value)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of known properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no properties are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Clears all values, resetting to unknown.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// A single observed property transition.
///
/// Produced by the snapshot loader for every key whose value actually
/// changed, consumed synchronously by the state projector and the generic
/// property hook, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange {
    /// Semantic property name.
    pub key: String,
    /// Value before the refresh; `None` on the first load of this key.
    pub previous: Option<Value>,
    /// Value after the refresh.
    pub current: Value,
}

impl PropertyChange {
    /// Creates a change record.
    #[must_use]
    pub fn new(key: impl Into<String>, previous: Option<Value>, current: Value) -> Self {
        Self {
            key: key.into(),
            previous,
            current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_snapshot_is_empty() {
        let snapshot = Snapshot::new();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.get("state"), None);
    }

    #[test]
    fn insert_returns_previous_value() {
        let mut snapshot = Snapshot::new();
        assert_eq!(snapshot.insert("state", json!("cleaning")), None);
        assert_eq!(
            snapshot.insert("state", json!("charging")),
            Some(json!("cleaning"))
        );
        assert_eq!(snapshot.get("state"), Some(&json!("charging")));
    }

    #[test]
    fn null_is_a_value_not_an_absence() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("error", Value::Null);
        assert!(snapshot.contains_key("error"));
        assert_eq!(snapshot.get("error"), Some(&Value::Null));
    }

    #[test]
    fn clear_resets_to_unknown() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("batteryLevel", json!(80));
        snapshot.clear();
        assert!(snapshot.is_empty());
    }
}
