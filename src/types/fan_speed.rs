// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed value type.

use crate::error::ValueError;

/// Suction fan speed as a percentage (1-100).
///
/// The device accepts any value in range; the named presets match the
/// levels the vendor app exposes.
///
/// # Examples
///
/// ```
/// use robovac_lib::types::FanSpeed;
///
/// let speed = FanSpeed::new(60)?;
/// assert_eq!(speed.value(), 60);
///
/// assert!(FanSpeed::new(0).is_err());
/// assert!(FanSpeed::new(101).is_err());
/// # Ok::<(), robovac_lib::error::ValueError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FanSpeed(u8);

impl FanSpeed {
    /// Quiet preset.
    pub const QUIET: Self = Self(38);
    /// Balanced preset.
    pub const BALANCED: Self = Self(60);
    /// Turbo preset.
    pub const TURBO: Self = Self(77);
    /// Maximum suction.
    pub const MAX: Self = Self(100);

    /// Creates a fan speed from a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::OutOfRange`] if the value is not within 1-100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if !(1..=100).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: 1,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the speed as a percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for FanSpeed {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_range() {
        assert_eq!(FanSpeed::new(1).unwrap().value(), 1);
        assert_eq!(FanSpeed::new(100).unwrap().value(), 100);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            FanSpeed::new(0),
            Err(ValueError::OutOfRange {
                min: 1,
                max: 100,
                actual: 0
            })
        );
        assert!(FanSpeed::new(101).is_err());
    }

    #[test]
    fn presets() {
        assert_eq!(FanSpeed::QUIET.value(), 38);
        assert_eq!(FanSpeed::BALANCED.value(), 60);
        assert_eq!(FanSpeed::TURBO.value(), 77);
        assert_eq!(FanSpeed::MAX.value(), 100);
    }

    #[test]
    fn display_format() {
        assert_eq!(FanSpeed::BALANCED.to_string(), "60%");
    }
}
