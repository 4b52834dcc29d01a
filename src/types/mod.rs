// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for vacuum device control.
//!
//! This module provides type-safe representations of values used in vacuum
//! commands and properties. Constrained types validate their values at
//! construction time, preventing runtime errors.
//!
//! # Types
//!
//! - [`VacuumState`] - Semantic operating state mapped from raw codes
//! - [`DeviceFault`] - Structured `{code, message}` fault values
//! - [`FanSpeed`] - Suction fan speed (1-100%)
//! - [`WaterBoxMode`] - Mopping water flow mode
//! - [`CleaningZone`] - Rectangular map zone with repeat count

mod fan_speed;
mod fault;
mod vacuum_state;
mod water_box;
mod zone;

pub use fan_speed::FanSpeed;
pub use fault::{DeviceFault, FaultCode};
pub use vacuum_state::VacuumState;
pub use water_box::WaterBoxMode;
pub use zone::CleaningZone;
