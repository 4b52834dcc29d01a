// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Water-box (mopping) mode value type.

use crate::error::ValueError;

/// Water flow mode of the mopping attachment.
///
/// The device encodes the mode as a raw code in the 200 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum WaterBoxMode {
    /// Mopping disabled.
    Off = 200,
    /// Low water flow.
    Low = 201,
    /// Medium water flow.
    Medium = 202,
    /// High water flow.
    High = 203,
}

impl WaterBoxMode {
    /// Maps a raw device code to a water-box mode.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidWaterBoxMode`] for codes outside the
    /// known set.
    pub const fn from_code(code: i64) -> Result<Self, ValueError> {
        match code {
            200 => Ok(Self::Off),
            201 => Ok(Self::Low),
            202 => Ok(Self::Medium),
            203 => Ok(Self::High),
            other => Err(ValueError::InvalidWaterBoxMode(other)),
        }
    }

    /// Returns the raw device code for this mode.
    #[must_use]
    pub const fn code(&self) -> i64 {
        *self as i64
    }
}

impl std::fmt::Display for WaterBoxMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for mode in [
            WaterBoxMode::Off,
            WaterBoxMode::Low,
            WaterBoxMode::Medium,
            WaterBoxMode::High,
        ] {
            assert_eq!(WaterBoxMode::from_code(mode.code()), Ok(mode));
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(
            WaterBoxMode::from_code(42),
            Err(ValueError::InvalidWaterBoxMode(42))
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(WaterBoxMode::Off.to_string(), "off");
        assert_eq!(WaterBoxMode::High.to_string(), "high");
    }
}
