// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level device abstraction for `miIO` vacuums.
//!
//! A [`Device`] owns the semantic property snapshot and drives the full
//! pipeline: commands go out through the transport, an optional refresh
//! directive re-reads the affected properties after a settle delay, the
//! snapshot loader merges the raw status and consumable sources through the
//! property table, and every resulting change runs the derived-effect rules
//! before reaching the registered capabilities.
//!
//! # Consistency model
//!
//! Property updates flow through the sequential pipeline command → (delay) →
//! load → project; the snapshot is never partially updated from a caller's
//! perspective. Multiple commands may be in flight at once — if their
//! refreshes race, the last write wins. Callers needing strict ordering must
//! serialize their commands.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde_json::Value;

use crate::capabilities::{Capability, CapabilityRegistry, SubscriptionId};
use crate::command::{
    ChargeCommand, CleaningCommand, Command, DustCollectionCommand, FanSpeedCommand, FindCommand,
    GotoCommand, RoomCleanCommand, SpotCleanCommand, WaterBoxModeCommand, ZoneCleanCommand,
};
use crate::error::{Error, ParseError, Result};
use crate::history::{CleaningRecord, CleaningSummary, RecordDay};
use crate::metadata::{DeviceTimer, RoomMapping, parse_serial_number};
use crate::properties::PropertyTable;
use crate::protocol::{RefreshDirective, Transport, check_result};
use crate::state::{FaultEffect, PropertyChange, Snapshot, project};
use crate::types::{CleaningZone, DeviceFault, FanSpeed, VacuumState, WaterBoxMode};

/// Empirical command-to-effect latency of this device class. Shorter delays
/// read back stale state.
const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(1000);

/// Builder for configuring a [`Device`].
///
/// # Examples
///
/// ```ignore
/// let device = Device::builder(transport)
///     .refresh_delay(Duration::from_millis(1500))
///     .build();
/// ```
pub struct DeviceBuilder<T: Transport> {
    transport: T,
    table: PropertyTable,
    refresh_delay: Duration,
}

impl<T: Transport> std::fmt::Debug for DeviceBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceBuilder")
            .field("table", &self.table)
            .field("refresh_delay", &self.refresh_delay)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> DeviceBuilder<T> {
    fn new(transport: T) -> Self {
        Self {
            transport,
            table: PropertyTable::standard(),
            refresh_delay: DEFAULT_REFRESH_DELAY,
        }
    }

    /// Replaces the standard property table.
    #[must_use]
    pub fn property_table(mut self, table: PropertyTable) -> Self {
        self.table = table;
        self
    }

    /// Overrides the default refresh delay (1000ms).
    ///
    /// Other device families may need a longer settle time between a command
    /// and its observable effect.
    #[must_use]
    pub fn refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    /// Builds the device.
    #[must_use]
    pub fn build(self) -> Device<T> {
        Device {
            transport: Arc::new(self.transport),
            table: Arc::new(self.table),
            snapshot: Arc::new(RwLock::new(Snapshot::new())),
            capabilities: Arc::new(CapabilityRegistry::new()),
            refresh_delay: self.refresh_delay,
        }
    }
}

/// A vacuum device reachable through an RPC [`Transport`].
///
/// The device owns its property [`Snapshot`] exclusively; the snapshot
/// loader is the only writer, and capability hooks observe every change.
pub struct Device<T: Transport> {
    transport: Arc<T>,
    table: Arc<PropertyTable>,
    snapshot: Arc<RwLock<Snapshot>>,
    capabilities: Arc<CapabilityRegistry>,
    refresh_delay: Duration,
}

impl<T: Transport> std::fmt::Debug for Device<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("table", &self.table)
            .field("refresh_delay", &self.refresh_delay)
            .finish_non_exhaustive()
    }
}

impl<T: Transport + 'static> Device<T> {
    /// Creates a device with the standard property table and the default
    /// refresh delay.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::builder(transport).build()
    }

    /// Creates a builder for a customized device.
    #[must_use]
    pub fn builder(transport: T) -> DeviceBuilder<T> {
        DeviceBuilder::new(transport)
    }

    // ========== Capabilities ==========

    /// Returns the capability registry.
    #[must_use]
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Registers a capability implementation.
    pub fn register_capability(&self, capability: Arc<dyn Capability>) -> SubscriptionId {
        self.capabilities.register(capability)
    }

    /// Subscribes to charging flag changes.
    pub fn on_charging_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.capabilities.on_charging_changed(callback)
    }

    /// Subscribes to cleaning flag changes.
    pub fn on_cleaning_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.capabilities.on_cleaning_changed(callback)
    }

    /// Subscribes to fault raise/clear events.
    pub fn on_error_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Option<&DeviceFault>) + Send + Sync + 'static,
    {
        self.capabilities.on_error_changed(callback)
    }

    /// Subscribes to fan speed changes.
    pub fn on_fan_speed_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(i64) + Send + Sync + 'static,
    {
        self.capabilities.on_fan_speed_changed(callback)
    }

    /// Subscribes to every property change.
    pub fn on_property_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.capabilities.on_property_changed(callback)
    }

    /// Removes a capability or hook by its subscription ID.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.capabilities.unsubscribe(id)
    }

    // ========== Properties ==========

    /// Returns the current value of a semantic property, if it has been
    /// loaded.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<Value> {
        self.snapshot.read().get(key).cloned()
    }

    /// Returns a copy of the full property snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.read().clone()
    }

    /// Returns the semantic operating state, if known.
    #[must_use]
    pub fn state(&self) -> Option<VacuumState> {
        let snapshot = self.snapshot.read();
        snapshot
            .get("state")
            .and_then(Value::as_str)
            .and_then(VacuumState::parse_label)
    }

    /// Returns the current device fault, if one is reported.
    #[must_use]
    pub fn fault(&self) -> Option<DeviceFault> {
        self.snapshot
            .read()
            .get("error")
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Loads the requested semantic properties from the device.
    ///
    /// Both raw sources (status and consumable) are fetched exactly once per
    /// call regardless of how many keys are requested. Keys without a table
    /// entry pass through as raw field names. The returned snapshot holds the
    /// requested subset; the device's own snapshot is updated and all
    /// capability hooks fire for keys whose value changed.
    ///
    /// # Errors
    ///
    /// Fails without touching the snapshot if either underlying fetch fails.
    pub async fn load(&self, keys: &[&str]) -> Result<Snapshot> {
        let keys: Vec<String> = keys.iter().map(ToString::to_string).collect();
        load_properties(
            self.transport.as_ref(),
            &self.table,
            &self.snapshot,
            &self.capabilities,
            &keys,
        )
        .await
    }

    // ========== Command Dispatch ==========

    /// Dispatches a typed command: remote call, result validation, then the
    /// command's refresh directive, if any.
    ///
    /// # Errors
    ///
    /// Returns the transport failure or the device's rejection unchanged.
    pub async fn invoke<C: Command + Sync>(&self, command: &C) -> Result<Value> {
        self.call_with_refresh(command.method(), command.params(), command.refresh())
            .await
    }

    /// Dispatches a raw method with an optional refresh directive.
    ///
    /// On success, the directive's properties are re-fetched in the
    /// background after its delay (or the device's configured default). The
    /// refresh is fire-and-forget from the caller's perspective; once
    /// scheduled it always fires.
    ///
    /// # Errors
    ///
    /// Returns the transport failure or the device's rejection unchanged; in
    /// both cases no refresh is scheduled.
    pub async fn call_with_refresh(
        &self,
        method: &str,
        params: Value,
        refresh: Option<RefreshDirective>,
    ) -> Result<Value> {
        tracing::debug!(method, "Dispatching command");
        let raw = self.transport.call(method, params).await?;
        let result = check_result(raw)?;
        if let Some(directive) = refresh {
            self.schedule_refresh(directive);
        }
        Ok(result)
    }

    fn schedule_refresh(&self, directive: RefreshDirective) {
        let delay = directive.delay().unwrap_or(self.refresh_delay);
        let transport = Arc::clone(&self.transport);
        let table = Arc::clone(&self.table);
        let snapshot = Arc::clone(&self.snapshot);
        let capabilities = Arc::clone(&self.capabilities);
        let properties = directive.into_properties();

        tracing::debug!(?properties, ?delay, "Scheduling property refresh");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = load_properties(
                transport.as_ref(),
                &table,
                &snapshot,
                &capabilities,
                &properties,
            )
            .await;
            if let Err(err) = result {
                tracing::warn!(error = %err, "Deferred property refresh failed");
            }
        });
    }

    // ========== Cleaning Control ==========

    /// Starts an autonomous cleaning run.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn start_cleaning(&self) -> Result<()> {
        self.invoke(&CleaningCommand::Start).await.map(drop)
    }

    /// Pauses the current cleaning run.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails, including when the device is not
    /// in a pausable state.
    pub async fn pause_cleaning(&self) -> Result<()> {
        self.invoke(&CleaningCommand::Pause).await.map(drop)
    }

    /// Stops the current cleaning run.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn stop_cleaning(&self) -> Result<()> {
        self.invoke(&CleaningCommand::Stop).await.map(drop)
    }

    /// Spot-cleans a small area around the current position.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn spot_clean(&self) -> Result<()> {
        self.invoke(&SpotCleanCommand).await.map(drop)
    }

    /// Cleans the given rectangular zones.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn clean_zones(&self, zones: Vec<CleaningZone>) -> Result<()> {
        self.invoke(&ZoneCleanCommand::new(zones)).await.map(drop)
    }

    /// Cleans the given mapped rooms by segment ID.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn clean_rooms(&self, segments: Vec<i64>) -> Result<()> {
        self.invoke(&RoomCleanCommand::new(segments)).await.map(drop)
    }

    /// Sends the device to a map location.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn send_to_location(&self, x: i32, y: i32) -> Result<()> {
        self.invoke(&GotoCommand::new(x, y)).await.map(drop)
    }

    /// Sends the device back to the dock to charge.
    ///
    /// Requesting a charge while the device is actively cleaning is
    /// unreliable on this device class, so the motion state is settled
    /// first: pause, falling back to stop when the device is not in a
    /// pausable state, then a mandatory settle delay before the dock
    /// command.
    ///
    /// # Errors
    ///
    /// Returns error if stopping or docking fails. A failed pause alone is
    /// not an error; it triggers the stop fallback.
    pub async fn activate_charging(&self) -> Result<()> {
        if let Err(err) = self
            .call_with_refresh(CleaningCommand::Pause.method(), Value::Array(Vec::new()), None)
            .await
        {
            tracing::debug!(error = %err, "Pause before docking failed, stopping instead");
            self.call_with_refresh(CleaningCommand::Stop.method(), Value::Array(Vec::new()), None)
                .await?;
        }
        tokio::time::sleep(self.refresh_delay).await;
        self.invoke(&ChargeCommand).await.map(drop)
    }

    // ========== Dock & Settings ==========

    /// Starts emptying the dustbin into the dock.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn start_dust_collection(&self) -> Result<()> {
        self.invoke(&DustCollectionCommand::Start).await.map(drop)
    }

    /// Stops an in-progress dust collection.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn stop_dust_collection(&self) -> Result<()> {
        self.invoke(&DustCollectionCommand::Stop).await.map(drop)
    }

    /// Sets the suction fan speed.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_fan_speed(&self, speed: FanSpeed) -> Result<()> {
        self.invoke(&FanSpeedCommand::new(speed)).await.map(drop)
    }

    /// Sets the mopping water flow mode.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_water_box_mode(&self, mode: WaterBoxMode) -> Result<()> {
        self.invoke(&WaterBoxModeCommand::new(mode)).await.map(drop)
    }

    /// Queries the current mopping water flow mode.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails or the device reports an unknown
    /// mode code.
    pub async fn water_box_mode(&self) -> Result<WaterBoxMode> {
        let raw = self
            .transport
            .call("get_water_box_custom_mode", Value::Array(Vec::new()))
            .await?;
        let code = raw
            .as_array()
            .and_then(|items| items.first())
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                Error::Parse(ParseError::UnexpectedFormat(format!(
                    "expected water-box mode array, got {raw}"
                )))
            })?;
        WaterBoxMode::from_code(code).map_err(Error::Value)
    }

    /// Makes the device play its locate sound.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn find(&self) -> Result<()> {
        self.invoke(&FindCommand).await.map(drop)
    }

    // ========== History & Metadata ==========

    /// Fetches the aggregate cleaning history.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails or the response is malformed.
    pub async fn cleaning_summary(&self) -> Result<CleaningSummary> {
        let raw = self
            .transport
            .call("get_clean_summary", Value::Array(Vec::new()))
            .await?;
        CleaningSummary::from_response(&raw).map_err(Error::Parse)
    }

    /// Fetches the cleaning runs of one history day.
    ///
    /// The day is addressed by its record ID from
    /// [`CleaningSummary::record_ids`]; a [`chrono::DateTime<Utc>`] for the
    /// same instant is equivalent.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails or the response is malformed.
    pub async fn cleaning_record(&self, day: impl Into<RecordDay>) -> Result<Vec<CleaningRecord>> {
        let day = day.into();
        let raw = self
            .transport
            .call("get_clean_record", serde_json::json!([day.timestamp()]))
            .await?;
        CleaningRecord::from_response(&raw).map_err(Error::Parse)
    }

    /// Fetches the device serial number.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails or the response is malformed.
    pub async fn serial_number(&self) -> Result<String> {
        let raw = self
            .transport
            .call("get_serial_number", Value::Array(Vec::new()))
            .await?;
        parse_serial_number(&raw).map_err(Error::Parse)
    }

    /// Fetches the scheduled cleaning timers.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails or the response is malformed.
    pub async fn timers(&self) -> Result<Vec<DeviceTimer>> {
        let raw = self
            .transport
            .call("get_timer", Value::Array(Vec::new()))
            .await?;
        DeviceTimer::from_response(&raw).map_err(Error::Parse)
    }

    /// Fetches the segment-to-room mapping of the current map.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails or the response is malformed.
    pub async fn room_mapping(&self) -> Result<Vec<RoomMapping>> {
        let raw = self
            .transport
            .call("get_room_mapping", Value::Array(Vec::new()))
            .await?;
        RoomMapping::from_response(&raw).map_err(Error::Parse)
    }
}

/// Loads semantic properties through the property table.
///
/// Fetches the status and consumable sources concurrently (each exactly
/// once), merges by requested key preferring status, applies the transforms,
/// writes the full requested set into the shared snapshot, and runs the
/// derived-effect rules followed by the generic property hook for every key
/// whose value changed, in request order.
async fn load_properties<T: Transport>(
    transport: &T,
    table: &PropertyTable,
    snapshot: &RwLock<Snapshot>,
    capabilities: &CapabilityRegistry,
    keys: &[String],
) -> Result<Snapshot> {
    tracing::debug!(?keys, "Loading property snapshot");

    let (status, consumables) = tokio::join!(
        transport.call("get_status", Value::Array(Vec::new())),
        transport.call("get_consumable", Value::Array(Vec::new())),
    );
    let status = unwrap_fields(status?)?;
    let consumables = unwrap_fields(consumables?)?;

    let mut result = Snapshot::new();
    let mut changes = Vec::new();
    {
        let mut guard = snapshot.write();
        for key in keys {
            let definition = table.definition(key);
            let raw_key = definition.map_or(key.as_str(), |def| def.raw_key());
            let raw = status.get(raw_key).or_else(|| consumables.get(raw_key));

            let value = match (raw, definition) {
                (Some(raw), Some(def)) => def.apply(raw),
                (Some(raw), None) => raw.clone(),
                (None, _) => Value::Null,
            };

            let previous = guard.insert(key.clone(), value.clone());
            if previous.as_ref() != Some(&value) {
                changes.push(PropertyChange::new(key.clone(), previous, value.clone()));
            }
            result.insert(key.clone(), value);
        }
    }

    for change in &changes {
        apply_projection(snapshot, capabilities, change);
        capabilities.notify_property(change);
    }

    Ok(result)
}

/// Runs the derived-effect rules for one change, ahead of the generic
/// notification, so downstream observers see consistent derived state.
fn apply_projection(
    snapshot: &RwLock<Snapshot>,
    capabilities: &CapabilityRegistry,
    change: &PropertyChange,
) {
    let projection = project(change);
    if let Some(charging) = projection.charging {
        capabilities.notify_charging(charging);
    }
    if let Some(cleaning) = projection.cleaning {
        capabilities.notify_cleaning(cleaning);
    }
    if let Some(effect) = projection.fault {
        let fault = match effect {
            FaultEffect::Synthetic(fault) => Some(fault),
            FaultEffect::FromErrorProperty => self_reported_fault(snapshot),
        };
        capabilities.notify_error(fault.as_ref());
    }
    if let Some(speed) = projection.fan_speed {
        capabilities.notify_fan_speed(speed);
    }
}

fn self_reported_fault(snapshot: &RwLock<Snapshot>) -> Option<DeviceFault> {
    snapshot
        .read()
        .get("error")
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
}

/// Unwraps a raw source payload into its field map.
///
/// The device wraps `get_status` and `get_consumable` objects in a
/// one-element array; a bare object is accepted too.
fn unwrap_fields(raw: Value) -> Result<serde_json::Map<String, Value>> {
    match raw {
        Value::Object(map) => Ok(map),
        Value::Array(mut items) if items.len() == 1 => match items.remove(0) {
            Value::Object(map) => Ok(map),
            other => Err(Error::Parse(ParseError::UnexpectedFormat(format!(
                "expected field object, got {other}"
            )))),
        },
        other => Err(Error::Parse(ParseError::UnexpectedFormat(format!(
            "expected field object, got {other}"
        )))),
    }
}
