// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Derived-effect rules for property changes.
//!
//! The state projector turns each semantic property change into the
//! capability updates it implies: a `state` transition drives the charging
//! and cleaning flags and may raise a fault, a `fanSpeed` change is echoed to
//! the fan-speed capability. Projection is a pure function so the rule table
//! is testable without a transport; the device layer executes the resulting
//! [`Projection`] against its capability registry, always before forwarding
//! the generic property notification.

use crate::state::PropertyChange;
use crate::types::{DeviceFault, VacuumState};

/// How the error capability should be updated for a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultEffect {
    /// Push the current value of the `error` semantic property.
    FromErrorProperty,
    /// Push a synthetic fault derived from the state itself.
    Synthetic(DeviceFault),
}

/// The capability updates implied by one property change.
///
/// `None` fields mean "leave that capability untouched".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    /// New value for the charging flag.
    pub charging: Option<bool>,
    /// New value for the cleaning flag.
    pub cleaning: Option<bool>,
    /// Error capability update.
    pub fault: Option<FaultEffect>,
    /// Fan speed echo.
    pub fan_speed: Option<i64>,
}

/// Applies the derived-effect rule table to a property change.
///
/// The charging flag is derived strictly from whether the new state equals
/// `charging`; the cleaning flag and the error effect follow the transition
/// table. Changes to keys without rules produce an empty projection.
#[must_use]
pub fn project(change: &PropertyChange) -> Projection {
    let mut projection = Projection::default();
    match change.key.as_str() {
        "state" => {
            let state = change.current.as_str().and_then(VacuumState::parse_label);
            projection.charging = Some(state.is_some_and(|s| s.is_charging()));
            match state {
                Some(s) if s.is_active_cleaning() => projection.cleaning = Some(true),
                // Charging keeps whatever cleaning flag was last derived;
                // paused is an explicit no-op on the cleaning flag.
                Some(VacuumState::Charging | VacuumState::Paused) => {}
                Some(VacuumState::Error) => {
                    projection.cleaning = Some(false);
                    projection.fault = Some(FaultEffect::FromErrorProperty);
                }
                Some(VacuumState::ChargingError) => {
                    projection.cleaning = Some(false);
                    projection.fault = Some(FaultEffect::Synthetic(DeviceFault::charging_error()));
                }
                Some(VacuumState::ChargerOffline) => {
                    projection.cleaning = Some(false);
                    projection.fault = Some(FaultEffect::Synthetic(DeviceFault::charger_offline()));
                }
                _ => projection.cleaning = Some(false),
            }
        }
        "fanSpeed" => projection.fan_speed = change.current.as_i64(),
        _ => {}
    }
    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn state_change(label: &str) -> PropertyChange {
        PropertyChange::new("state", None, json!(label))
    }

    #[test]
    fn charging_sets_flag_and_leaves_cleaning_alone() {
        let projection = project(&state_change("charging"));
        assert_eq!(projection.charging, Some(true));
        assert_eq!(projection.cleaning, None);
        assert_eq!(projection.fault, None);
    }

    #[test]
    fn cleaning_states_set_cleaning_flag() {
        for label in ["cleaning", "spot-cleaning", "zone-cleaning", "room-cleaning"] {
            let projection = project(&state_change(label));
            assert_eq!(projection.charging, Some(false), "{label}");
            assert_eq!(projection.cleaning, Some(true), "{label}");
            assert_eq!(projection.fault, None, "{label}");
        }
    }

    #[test]
    fn paused_leaves_cleaning_flag_unchanged() {
        let projection = project(&state_change("paused"));
        assert_eq!(projection.charging, Some(false));
        assert_eq!(projection.cleaning, None);
        assert_eq!(projection.fault, None);
    }

    #[test]
    fn error_state_raises_from_error_property() {
        let projection = project(&state_change("error"));
        assert_eq!(projection.charging, Some(false));
        assert_eq!(projection.cleaning, Some(false));
        assert_eq!(projection.fault, Some(FaultEffect::FromErrorProperty));
    }

    #[test]
    fn charging_error_raises_synthetic_fault() {
        let projection = project(&state_change("charging-error"));
        assert_eq!(projection.charging, Some(false));
        assert_eq!(projection.cleaning, Some(false));
        assert_eq!(
            projection.fault,
            Some(FaultEffect::Synthetic(DeviceFault::charging_error()))
        );
    }

    #[test]
    fn charger_offline_raises_synthetic_fault() {
        let projection = project(&state_change("charger-offline"));
        assert_eq!(
            projection.fault,
            Some(FaultEffect::Synthetic(DeviceFault::charger_offline()))
        );
        assert_eq!(projection.cleaning, Some(false));
    }

    #[test]
    fn other_states_clear_both_flags() {
        for label in ["waiting", "returning", "docking", "full", "unknown-42"] {
            let projection = project(&state_change(label));
            assert_eq!(projection.charging, Some(false), "{label}");
            assert_eq!(projection.cleaning, Some(false), "{label}");
            assert_eq!(projection.fault, None, "{label}");
        }
    }

    #[test]
    fn non_string_state_clears_both_flags() {
        let change = PropertyChange::new("state", None, Value::Null);
        let projection = project(&change);
        assert_eq!(projection.charging, Some(false));
        assert_eq!(projection.cleaning, Some(false));
    }

    #[test]
    fn fan_speed_is_echoed() {
        let change = PropertyChange::new("fanSpeed", Some(json!(38)), json!(60));
        let projection = project(&change);
        assert_eq!(projection.fan_speed, Some(60));
        assert_eq!(projection.charging, None);
        assert_eq!(projection.cleaning, None);
    }

    #[test]
    fn unrelated_keys_produce_empty_projection() {
        let change = PropertyChange::new("batteryLevel", Some(json!(79)), json!(80));
        assert_eq!(project(&change), Projection::default());
    }
}
