// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vacuum command definitions.
//!
//! This module provides typed representations of the remote commands a
//! vacuum accepts, dispatched through
//! [`Device::invoke`](crate::Device::invoke).
//!
//! # Available Commands
//!
//! | Command Type | Purpose |
//! |-------------|---------|
//! | [`CleaningCommand`] | Start, pause, or stop autonomous cleaning |
//! | [`SpotCleanCommand`] | Spot-clean around the current position |
//! | [`ZoneCleanCommand`] | Clean rectangular map zones |
//! | [`RoomCleanCommand`] | Clean specific mapped rooms |
//! | [`GotoCommand`] | Send the device to a map location |
//! | [`ChargeCommand`] | Return to the dock and charge |
//! | [`DustCollectionCommand`] | Start/stop dock dust collection |
//! | [`FanSpeedCommand`] | Set suction fan speed |
//! | [`WaterBoxModeCommand`] | Set mopping water flow |
//! | [`FindCommand`] | Audible locate |
//!
//! # Command Structure
//!
//! Each command consists of:
//! - A remote method name (e.g. `app_start`, `set_custom_mode`)
//! - A JSON parameter array (often empty)
//! - An optional [`RefreshDirective`] naming the semantic properties whose
//!   device-side values the command affects
//!
//! # Examples
//!
//! ```
//! use robovac_lib::command::{CleaningCommand, Command};
//!
//! let cmd = CleaningCommand::Start;
//! assert_eq!(cmd.method(), "app_start");
//! assert!(cmd.refresh().is_some());
//! ```

mod cleaning;
mod maintenance;

pub use cleaning::{
    ChargeCommand, CleaningCommand, GotoCommand, RoomCleanCommand, SpotCleanCommand,
    ZoneCleanCommand,
};
pub use maintenance::{DustCollectionCommand, FanSpeedCommand, FindCommand, WaterBoxModeCommand};

use serde_json::Value;

use crate::protocol::RefreshDirective;

/// A command that can be sent to a vacuum device.
pub trait Command {
    /// Returns the remote method name.
    fn method(&self) -> &'static str;

    /// Returns the JSON parameter array sent with the method.
    ///
    /// Defaults to an empty array, which most commands use.
    fn params(&self) -> Value {
        Value::Array(Vec::new())
    }

    /// Returns the properties to re-fetch once the command has taken effect.
    ///
    /// Defaults to no refresh.
    fn refresh(&self) -> Option<RefreshDirective> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_params_are_empty_array() {
        struct Bare;
        impl Command for Bare {
            fn method(&self) -> &'static str {
                "noop"
            }
        }

        assert_eq!(Bare.params(), json!([]));
        assert!(Bare.refresh().is_none());
    }
}
