// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Semantic vacuum state labels.
//!
//! The device reports its operating state as a raw integer code. This module
//! maps the known codes to stable semantic labels. Codes outside the known
//! set are never an error: they degrade to the tagged fallback
//! `unknown-<code>` so unseen firmware states stay visible for diagnosis
//! instead of hard-failing the device.

use std::fmt;

/// Operating state of a vacuum device.
///
/// # Examples
///
/// ```
/// use robovac_lib::types::VacuumState;
///
/// assert_eq!(VacuumState::from_code(5), VacuumState::Cleaning);
/// assert_eq!(VacuumState::Cleaning.to_string(), "cleaning");
///
/// // Unmapped firmware codes stay visible instead of failing
/// assert_eq!(VacuumState::from_code(42).to_string(), "unknown-42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VacuumState {
    /// Device is starting up.
    Initiating,
    /// The charging dock is unreachable.
    ChargerOffline,
    /// Device is idle, waiting for a command.
    Waiting,
    /// Autonomous cleaning run in progress.
    Cleaning,
    /// Returning to the charging dock.
    Returning,
    /// Docked and charging.
    Charging,
    /// A fault occurred while charging.
    ChargingError,
    /// Cleaning run paused.
    Paused,
    /// Spot-cleaning a small area around the current position.
    SpotCleaning,
    /// Device-reported fault; details are on the `error` property.
    Error,
    /// Device is powering down.
    ShuttingDown,
    /// Firmware update in progress.
    Updating,
    /// Maneuvering onto the dock.
    Docking,
    /// Traveling to a requested target location.
    GoingToLocation,
    /// Cleaning one or more rectangular zones.
    ZoneCleaning,
    /// Cleaning specific mapped rooms.
    RoomCleaning,
    /// Dock is emptying the dustbin.
    DustCollection,
    /// Dustbin is full.
    Full,
    /// Raw code not covered by the known set; rendered as `unknown-<code>`.
    Unknown(i64),
}

impl VacuumState {
    /// Maps a raw device state code to its semantic state.
    ///
    /// Codes outside the known set map to [`VacuumState::Unknown`].
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Initiating,
            2 => Self::ChargerOffline,
            3 => Self::Waiting,
            5 => Self::Cleaning,
            6 => Self::Returning,
            8 => Self::Charging,
            9 => Self::ChargingError,
            10 => Self::Paused,
            11 => Self::SpotCleaning,
            12 => Self::Error,
            13 => Self::ShuttingDown,
            14 => Self::Updating,
            15 => Self::Docking,
            16 => Self::GoingToLocation,
            17 => Self::ZoneCleaning,
            18 => Self::RoomCleaning,
            22 => Self::DustCollection,
            100 => Self::Full,
            other => Self::Unknown(other),
        }
    }

    /// Parses a semantic label back into a state.
    ///
    /// Accepts the `unknown-<code>` fallback form. Returns `None` for
    /// strings that are neither a known label nor a well-formed fallback.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        let state = match label {
            "initiating" => Self::Initiating,
            "charger-offline" => Self::ChargerOffline,
            "waiting" => Self::Waiting,
            "cleaning" => Self::Cleaning,
            "returning" => Self::Returning,
            "charging" => Self::Charging,
            "charging-error" => Self::ChargingError,
            "paused" => Self::Paused,
            "spot-cleaning" => Self::SpotCleaning,
            "error" => Self::Error,
            "shutting-down" => Self::ShuttingDown,
            "updating" => Self::Updating,
            "docking" => Self::Docking,
            "going-to-location" => Self::GoingToLocation,
            "zone-cleaning" => Self::ZoneCleaning,
            "room-cleaning" => Self::RoomCleaning,
            "dust-collection" => Self::DustCollection,
            "full" => Self::Full,
            other => {
                let code = other.strip_prefix("unknown-")?.parse().ok()?;
                Self::Unknown(code)
            }
        };
        Some(state)
    }

    /// Returns `true` if the device is actively cleaning.
    ///
    /// Covers autonomous, spot, zone, and room cleaning. Paused runs do not
    /// count as active.
    #[must_use]
    pub const fn is_active_cleaning(&self) -> bool {
        matches!(
            self,
            Self::Cleaning | Self::SpotCleaning | Self::ZoneCleaning | Self::RoomCleaning
        )
    }

    /// Returns `true` if the device is docked and charging.
    #[must_use]
    pub const fn is_charging(&self) -> bool {
        matches!(self, Self::Charging)
    }
}

impl fmt::Display for VacuumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initiating => write!(f, "initiating"),
            Self::ChargerOffline => write!(f, "charger-offline"),
            Self::Waiting => write!(f, "waiting"),
            Self::Cleaning => write!(f, "cleaning"),
            Self::Returning => write!(f, "returning"),
            Self::Charging => write!(f, "charging"),
            Self::ChargingError => write!(f, "charging-error"),
            Self::Paused => write!(f, "paused"),
            Self::SpotCleaning => write!(f, "spot-cleaning"),
            Self::Error => write!(f, "error"),
            Self::ShuttingDown => write!(f, "shutting-down"),
            Self::Updating => write!(f, "updating"),
            Self::Docking => write!(f, "docking"),
            Self::GoingToLocation => write!(f, "going-to-location"),
            Self::ZoneCleaning => write!(f, "zone-cleaning"),
            Self::RoomCleaning => write!(f, "room-cleaning"),
            Self::DustCollection => write!(f, "dust-collection"),
            Self::Full => write!(f, "full"),
            Self::Unknown(code) => write!(f, "unknown-{code}"),
        }
    }
}
