// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cleaning and motion commands.

use serde_json::Value;

use crate::command::Command;
use crate::protocol::RefreshDirective;
use crate::types::CleaningZone;

/// Controls the autonomous cleaning run.
///
/// # Examples
///
/// ```
/// use robovac_lib::command::{CleaningCommand, Command};
///
/// assert_eq!(CleaningCommand::Start.method(), "app_start");
/// assert_eq!(CleaningCommand::Pause.method(), "app_pause");
/// assert_eq!(CleaningCommand::Stop.method(), "app_stop");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningCommand {
    /// Start an autonomous cleaning run.
    Start,
    /// Pause the current run.
    Pause,
    /// Stop the current run.
    Stop,
}

impl Command for CleaningCommand {
    fn method(&self) -> &'static str {
        match self {
            Self::Start => "app_start",
            Self::Pause => "app_pause",
            Self::Stop => "app_stop",
        }
    }

    fn refresh(&self) -> Option<RefreshDirective> {
        Some(RefreshDirective::state())
    }
}

/// Spot-cleans a small area around the current position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpotCleanCommand;

impl Command for SpotCleanCommand {
    fn method(&self) -> &'static str {
        "app_spot"
    }

    fn refresh(&self) -> Option<RefreshDirective> {
        Some(RefreshDirective::state())
    }
}

/// Returns the device to the dock to charge.
///
/// Note: when the device may still be moving, prefer
/// [`Device::activate_charging`](crate::Device::activate_charging), which
/// settles the motion state before docking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChargeCommand;

impl Command for ChargeCommand {
    fn method(&self) -> &'static str {
        "app_charge"
    }

    fn refresh(&self) -> Option<RefreshDirective> {
        Some(RefreshDirective::state())
    }
}

/// Sends the device to a map location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GotoCommand {
    x: i32,
    y: i32,
}

impl GotoCommand {
    /// Creates a goto command for the given map coordinates (millimeters).
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Command for GotoCommand {
    fn method(&self) -> &'static str {
        "app_goto_target"
    }

    fn params(&self) -> Value {
        serde_json::json!([self.x, self.y])
    }

    fn refresh(&self) -> Option<RefreshDirective> {
        Some(RefreshDirective::state())
    }
}

/// Cleans one or more rectangular zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCleanCommand {
    zones: Vec<CleaningZone>,
}

impl ZoneCleanCommand {
    /// Creates a zone-clean command.
    #[must_use]
    pub fn new(zones: Vec<CleaningZone>) -> Self {
        Self { zones }
    }

    /// Returns the zones to clean.
    #[must_use]
    pub fn zones(&self) -> &[CleaningZone] {
        &self.zones
    }
}

impl Command for ZoneCleanCommand {
    fn method(&self) -> &'static str {
        "app_zoned_clean"
    }

    fn params(&self) -> Value {
        Value::Array(self.zones.iter().map(CleaningZone::to_params).collect())
    }

    fn refresh(&self) -> Option<RefreshDirective> {
        Some(RefreshDirective::state())
    }
}

/// Cleans specific mapped rooms by segment ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCleanCommand {
    segments: Vec<i64>,
}

impl RoomCleanCommand {
    /// Creates a room-clean command for the given segment IDs.
    #[must_use]
    pub fn new(segments: Vec<i64>) -> Self {
        Self { segments }
    }

    /// Returns the segment IDs to clean.
    #[must_use]
    pub fn segments(&self) -> &[i64] {
        &self.segments
    }
}

impl Command for RoomCleanCommand {
    fn method(&self) -> &'static str {
        "app_segment_clean"
    }

    fn params(&self) -> Value {
        Value::Array(self.segments.iter().map(|&id| Value::from(id)).collect())
    }

    fn refresh(&self) -> Option<RefreshDirective> {
        Some(RefreshDirective::state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cleaning_command_methods() {
        assert_eq!(CleaningCommand::Start.method(), "app_start");
        assert_eq!(CleaningCommand::Pause.method(), "app_pause");
        assert_eq!(CleaningCommand::Stop.method(), "app_stop");
        assert_eq!(CleaningCommand::Start.params(), json!([]));
    }

    #[test]
    fn motion_commands_refresh_state() {
        let refresh = CleaningCommand::Start.refresh().unwrap();
        assert_eq!(refresh.properties(), ["state"]);
        assert!(SpotCleanCommand.refresh().is_some());
        assert!(ChargeCommand.refresh().is_some());
    }

    #[test]
    fn goto_params() {
        let cmd = GotoCommand::new(25500, 25500);
        assert_eq!(cmd.method(), "app_goto_target");
        assert_eq!(cmd.params(), json!([25500, 25500]));
    }

    #[test]
    fn zone_clean_params() {
        let zones = vec![
            CleaningZone::new(25000, 25000, 27000, 27500, 1).unwrap(),
            CleaningZone::new(30000, 30000, 31000, 31000, 2).unwrap(),
        ];
        let cmd = ZoneCleanCommand::new(zones);
        assert_eq!(cmd.method(), "app_zoned_clean");
        assert_eq!(
            cmd.params(),
            json!([
                [25000, 25000, 27000, 27500, 1],
                [30000, 30000, 31000, 31000, 2]
            ])
        );
    }

    #[test]
    fn room_clean_params() {
        let cmd = RoomCleanCommand::new(vec![16, 17, 18]);
        assert_eq!(cmd.method(), "app_segment_clean");
        assert_eq!(cmd.params(), json!([16, 17, 18]));
    }
}
