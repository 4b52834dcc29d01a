// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Maintenance and settings commands.

use serde_json::Value;

use crate::command::Command;
use crate::protocol::RefreshDirective;
use crate::types::{FanSpeed, WaterBoxMode};

/// Controls the dock's dust collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DustCollectionCommand {
    /// Start emptying the dustbin into the dock.
    Start,
    /// Stop an in-progress dust collection.
    Stop,
}

impl Command for DustCollectionCommand {
    fn method(&self) -> &'static str {
        match self {
            Self::Start => "app_start_collect_dust",
            Self::Stop => "app_stop_collect_dust",
        }
    }

    fn refresh(&self) -> Option<RefreshDirective> {
        Some(RefreshDirective::state())
    }
}

/// Sets the suction fan speed.
///
/// # Examples
///
/// ```
/// use robovac_lib::command::{Command, FanSpeedCommand};
/// use robovac_lib::types::FanSpeed;
///
/// let cmd = FanSpeedCommand::new(FanSpeed::BALANCED);
/// assert_eq!(cmd.method(), "set_custom_mode");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanSpeedCommand {
    speed: FanSpeed,
}

impl FanSpeedCommand {
    /// Creates a fan speed command.
    #[must_use]
    pub const fn new(speed: FanSpeed) -> Self {
        Self { speed }
    }
}

impl Command for FanSpeedCommand {
    fn method(&self) -> &'static str {
        "set_custom_mode"
    }

    fn params(&self) -> Value {
        serde_json::json!([self.speed.value()])
    }

    fn refresh(&self) -> Option<RefreshDirective> {
        // Fan speed applies immediately; no settle delay needed.
        Some(RefreshDirective::immediate(["fanSpeed"]))
    }
}

/// Sets the mopping water flow mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterBoxModeCommand {
    mode: WaterBoxMode,
}

impl WaterBoxModeCommand {
    /// Creates a water-box mode command.
    #[must_use]
    pub const fn new(mode: WaterBoxMode) -> Self {
        Self { mode }
    }
}

impl Command for WaterBoxModeCommand {
    fn method(&self) -> &'static str {
        "set_water_box_custom_mode"
    }

    fn params(&self) -> Value {
        serde_json::json!([self.mode.code()])
    }

    fn refresh(&self) -> Option<RefreshDirective> {
        Some(RefreshDirective::immediate(["waterBoxMode"]))
    }
}

/// Makes the device play its locate sound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindCommand;

impl Command for FindCommand {
    fn method(&self) -> &'static str {
        "find_me"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dust_collection_methods() {
        assert_eq!(
            DustCollectionCommand::Start.method(),
            "app_start_collect_dust"
        );
        assert_eq!(
            DustCollectionCommand::Stop.method(),
            "app_stop_collect_dust"
        );
        assert!(DustCollectionCommand::Start.refresh().is_some());
    }

    #[test]
    fn fan_speed_params() {
        let cmd = FanSpeedCommand::new(FanSpeed::TURBO);
        assert_eq!(cmd.params(), json!([77]));

        let refresh = cmd.refresh().unwrap();
        assert_eq!(refresh.properties(), ["fanSpeed"]);
        assert_eq!(refresh.delay(), Some(std::time::Duration::ZERO));
    }

    #[test]
    fn water_box_params() {
        let cmd = WaterBoxModeCommand::new(WaterBoxMode::Medium);
        assert_eq!(cmd.method(), "set_water_box_custom_mode");
        assert_eq!(cmd.params(), json!([202]));
    }

    #[test]
    fn find_has_no_refresh() {
        assert_eq!(FindCommand.method(), "find_me");
        assert!(FindCommand.refresh().is_none());
        assert_eq!(FindCommand.params(), json!([]));
    }
}
