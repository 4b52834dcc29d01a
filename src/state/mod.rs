// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management.
//!
//! This module provides the semantic property [`Snapshot`], the
//! [`PropertyChange`] records the snapshot loader emits when values change,
//! and the state projector that turns each change into derived capability
//! effects.

mod projector;
mod snapshot;

pub use projector::{FaultEffect, Projection, project};
pub use snapshot::{PropertyChange, Snapshot};
