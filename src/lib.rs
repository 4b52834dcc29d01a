// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `RoboVac` Lib - A Rust library to control `miIO`-compatible robot vacuums.
//!
//! This library is the translation layer between a vacuum's raw RPC
//! vocabulary and a stable semantic model: it maps raw device fields to
//! named properties with value transforms, merges the status and consumable
//! sources into one snapshot, derives charging/cleaning/error capability
//! state from property changes, and wraps remote commands with a delayed
//! property refresh so the local snapshot tracks asynchronous device-side
//! effects.
//!
//! The wire protocol itself (framing, encryption, retries, timeouts) is not
//! part of this crate: you bring a [`Transport`] implementation, the library
//! does the rest.
//!
//! # Supported Features
//!
//! - **Cleaning control**: start/pause/stop, spot, zone, and room cleaning,
//!   send-to-location, docking with motion settling
//! - **Properties**: semantic snapshot of state, battery, fan speed, cleaned
//!   area/time, consumable wear counters
//! - **Capabilities**: charging/cleaning flags, structured fault reporting,
//!   fan-speed echo, generic property-change hook
//! - **History**: cleaning summary and per-day records with unit conversion
//! - **Metadata**: serial number, schedule timers, room mapping
//!
//! # Quick Start
//!
//! ```no_run
//! use async_trait::async_trait;
//! use robovac_lib::error::TransportError;
//! use robovac_lib::{Device, Transport};
//! use serde_json::Value;
//!
//! struct MyTransport; // wraps your socket, token, request IDs...
//!
//! #[async_trait]
//! impl Transport for MyTransport {
//!     async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
//!         // frame, encrypt, send, await the device's response
//!         todo!()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> robovac_lib::Result<()> {
//!     let device = Device::new(MyTransport);
//!
//!     // React to derived capability state
//!     device.on_cleaning_changed(|cleaning| {
//!         println!("cleaning: {cleaning}");
//!     });
//!
//!     // Load semantic properties; raw sources are fetched once, batched
//!     let snapshot = device.load(&["state", "batteryLevel", "fanSpeed"]).await?;
//!     println!("state: {:?}", snapshot.get("state"));
//!
//!     // Commands refresh their affected properties after a settle delay
//!     device.start_cleaning().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Property Model
//!
//! Raw fields (`fan_power`, `clean_area`, ...) are declared once in a
//! [`PropertyTable`] together with their semantic name and an optional pure
//! transform. Unknown state codes never fail the device; they surface as
//! `unknown-<code>` labels. Nonzero error codes surface as structured
//! `{code, message}` faults through the error capability hook — a fault is
//! long-lived state observed by polling, not a call failure.

mod capabilities;
pub mod command;
mod device;
pub mod error;
pub mod history;
pub mod metadata;
pub mod properties;
pub mod protocol;
pub mod state;
pub mod types;

pub use capabilities::{Capability, CapabilityRegistry, SubscriptionId};
pub use command::{
    ChargeCommand, CleaningCommand, Command, DustCollectionCommand, FanSpeedCommand, FindCommand,
    GotoCommand, RoomCleanCommand, SpotCleanCommand, WaterBoxModeCommand, ZoneCleanCommand,
};
pub use device::{Device, DeviceBuilder};
pub use error::{
    ConfigError, DeviceError, Error, ParseError, Result, TransportError, ValueError,
};
pub use history::{CleaningRecord, CleaningSummary, RecordDay};
pub use metadata::{DeviceTimer, RoomMapping};
pub use properties::{PropertyDefinition, PropertyTable, Transform};
pub use protocol::{RefreshDirective, Transport, check_result};
pub use state::{PropertyChange, Snapshot};
pub use types::{CleaningZone, DeviceFault, FanSpeed, FaultCode, VacuumState, WaterBoxMode};
