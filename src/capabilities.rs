// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capability hooks and their registry.
//!
//! A capability is a named bundle of behavior a device implements — battery
//! reporting, autonomous cleaning, fan-speed adjustment. Rather than mixing
//! capabilities into the device through inheritance, the device aggregates
//! them: each capability implements the [`Capability`] trait's update hooks
//! and registers with the device's [`CapabilityRegistry`], which invokes all
//! registered capabilities synchronously, in registration order, on every
//! snapshot mutation.
//!
//! Closure-based subscriptions (`on_charging_changed` and friends) are thin
//! adapters over the same mechanism for callers that only care about one
//! hook.
//!
//! # Examples
//!
//! ```
//! use robovac_lib::CapabilityRegistry;
//!
//! let registry = CapabilityRegistry::new();
//!
//! let id = registry.on_charging_changed(|charging| {
//!     println!("charging: {charging}");
//! });
//!
//! // Later, unsubscribe
//! registry.unsubscribe(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::PropertyChange;
use crate::types::DeviceFault;

/// Unique identifier for a registered capability or hook.
///
/// Returned on registration and used to unsubscribe. IDs are unique within a
/// registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Update hooks for a device capability.
///
/// All hooks default to no-ops; a capability overrides the ones it cares
/// about. Hooks are invoked synchronously from the snapshot pipeline, so
/// implementations must not block.
pub trait Capability: Send + Sync {
    /// Short name of the capability, for diagnostics.
    fn name(&self) -> &str;

    /// The charging flag changed.
    fn update_charging(&self, _charging: bool) {}

    /// The cleaning flag changed.
    fn update_cleaning(&self, _cleaning: bool) {}

    /// A device fault was raised or cleared.
    fn update_error(&self, _fault: Option<&DeviceFault>) {}

    /// The fan speed changed.
    fn update_fan_speed(&self, _speed: i64) {}

    /// Generic passthrough invoked for every property change, after the
    /// derived-effect hooks above.
    fn property_updated(&self, _change: &PropertyChange) {}
}

/// Registry of the capabilities a device instance implements.
///
/// Capabilities are stored as an ordered list and notified in registration
/// order. The registry is thread-safe; notification clones the current list
/// under a read lock and invokes the hooks without holding it, so a hook may
/// register or unsubscribe capabilities without deadlocking.
pub struct CapabilityRegistry {
    next_id: AtomicU64,
    capabilities: RwLock<Vec<(SubscriptionId, Arc<dyn Capability>)>>,
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            capabilities: RwLock::new(Vec::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a capability.
    pub fn register(&self, capability: Arc<dyn Capability>) -> SubscriptionId {
        let id = self.next_id();
        self.capabilities.write().push((id, capability));
        id
    }

    /// Subscribes a closure to charging flag changes.
    pub fn on_charging_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.register(Arc::new(ChargingHook(callback)))
    }

    /// Subscribes a closure to cleaning flag changes.
    pub fn on_cleaning_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.register(Arc::new(CleaningHook(callback)))
    }

    /// Subscribes a closure to fault raise/clear events.
    pub fn on_error_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Option<&DeviceFault>) + Send + Sync + 'static,
    {
        self.register(Arc::new(ErrorHook(callback)))
    }

    /// Subscribes a closure to fan speed changes.
    pub fn on_fan_speed_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(i64) + Send + Sync + 'static,
    {
        self.register(Arc::new(FanSpeedHook(callback)))
    }

    /// Subscribes a closure to every property change.
    pub fn on_property_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.register(Arc::new(PropertyHook(callback)))
    }

    /// Removes a capability by its subscription ID.
    ///
    /// Returns `true` if the capability was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut capabilities = self.capabilities.write();
        let before = capabilities.len();
        capabilities.retain(|(existing, _)| *existing != id);
        capabilities.len() != before
    }

    /// Returns the number of registered capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.capabilities.read().len()
    }

    /// Returns `true` if no capabilities are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capabilities.read().is_empty()
    }

    fn snapshot_capabilities(&self) -> Vec<Arc<dyn Capability>> {
        self.capabilities
            .read()
            .iter()
            .map(|(_, capability)| Arc::clone(capability))
            .collect()
    }

    /// Notifies all capabilities of a charging flag change.
    pub fn notify_charging(&self, charging: bool) {
        for capability in self.snapshot_capabilities() {
            capability.update_charging(charging);
        }
    }

    /// Notifies all capabilities of a cleaning flag change.
    pub fn notify_cleaning(&self, cleaning: bool) {
        for capability in self.snapshot_capabilities() {
            capability.update_cleaning(cleaning);
        }
    }

    /// Notifies all capabilities of a fault raise/clear.
    pub fn notify_error(&self, fault: Option<&DeviceFault>) {
        for capability in self.snapshot_capabilities() {
            capability.update_error(fault);
        }
    }

    /// Notifies all capabilities of a fan speed change.
    pub fn notify_fan_speed(&self, speed: i64) {
        for capability in self.snapshot_capabilities() {
            capability.update_fan_speed(speed);
        }
    }

    /// Forwards a property change to all capabilities.
    pub fn notify_property(&self, change: &PropertyChange) {
        for capability in self.snapshot_capabilities() {
            capability.property_updated(change);
        }
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .capabilities
            .read()
            .iter()
            .map(|(id, capability)| format!("{id}:{}", capability.name()))
            .collect();
        f.debug_struct("CapabilityRegistry")
            .field("capabilities", &names)
            .finish()
    }
}

struct ChargingHook<F>(F);

impl<F: Fn(bool) + Send + Sync> Capability for ChargingHook<F> {
    fn name(&self) -> &str {
        "charging"
    }

    fn update_charging(&self, charging: bool) {
        (self.0)(charging);
    }
}

struct CleaningHook<F>(F);

impl<F: Fn(bool) + Send + Sync> Capability for CleaningHook<F> {
    fn name(&self) -> &str {
        "cleaning"
    }

    fn update_cleaning(&self, cleaning: bool) {
        (self.0)(cleaning);
    }
}

struct ErrorHook<F>(F);

impl<F: Fn(Option<&DeviceFault>) + Send + Sync> Capability for ErrorHook<F> {
    fn name(&self) -> &str {
        "error"
    }

    fn update_error(&self, fault: Option<&DeviceFault>) {
        (self.0)(fault);
    }
}

struct FanSpeedHook<F>(F);

impl<F: Fn(i64) + Send + Sync> Capability for FanSpeedHook<F> {
    fn name(&self) -> &str {
        "fan-speed"
    }

    fn update_fan_speed(&self, speed: i64) {
        (self.0)(speed);
    }
}

struct PropertyHook<F>(F);

impl<F: Fn(&PropertyChange) + Send + Sync> Capability for PropertyHook<F> {
    fn name(&self) -> &str {
        "property"
    }

    fn property_updated(&self, change: &PropertyChange) {
        (self.0)(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde_json::json;

    #[test]
    fn charging_hook_receives_updates() {
        let registry = CapabilityRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        registry.on_charging_changed(move |charging| {
            seen_clone.lock().unwrap().push(charging);
        });

        registry.notify_charging(true);
        registry.notify_charging(false);

        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn hooks_only_fire_for_their_channel() {
        let registry = CapabilityRegistry::new();
        let cleaning_count = Arc::new(Mutex::new(0));

        let count = Arc::clone(&cleaning_count);
        registry.on_cleaning_changed(move |_| {
            *count.lock().unwrap() += 1;
        });

        registry.notify_charging(true);
        registry.notify_fan_speed(60);
        assert_eq!(*cleaning_count.lock().unwrap(), 0);

        registry.notify_cleaning(true);
        assert_eq!(*cleaning_count.lock().unwrap(), 1);
    }

    #[test]
    fn unsubscribe_removes_capability() {
        let registry = CapabilityRegistry::new();
        let count = Arc::new(Mutex::new(0));

        let count_clone = Arc::clone(&count);
        let id = registry.on_charging_changed(move |_| {
            *count_clone.lock().unwrap() += 1;
        });

        registry.notify_charging(true);
        assert!(registry.unsubscribe(id));
        registry.notify_charging(false);

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(!registry.unsubscribe(id));
    }

    #[test]
    fn notification_order_follows_registration_order() {
        let registry = CapabilityRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order_clone = Arc::clone(&order);
            registry.on_charging_changed(move |_| {
                order_clone.lock().unwrap().push(tag);
            });
        }

        registry.notify_charging(true);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn error_hook_receives_fault_and_clear() {
        let registry = CapabilityRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        registry.on_error_changed(move |fault| {
            seen_clone.lock().unwrap().push(fault.cloned());
        });

        let fault = DeviceFault::from_code(7).unwrap();
        registry.notify_error(Some(&fault));
        registry.notify_error(None);

        assert_eq!(*seen.lock().unwrap(), vec![Some(fault), None]);
    }

    #[test]
    fn full_capability_sees_all_hooks() {
        struct Recorder {
            events: Arc<Mutex<Vec<String>>>,
        }

        impl Capability for Recorder {
            fn name(&self) -> &str {
                "recorder"
            }

            fn update_charging(&self, charging: bool) {
                self.events.lock().unwrap().push(format!("charging={charging}"));
            }

            fn update_cleaning(&self, cleaning: bool) {
                self.events.lock().unwrap().push(format!("cleaning={cleaning}"));
            }

            fn property_updated(&self, change: &PropertyChange) {
                self.events.lock().unwrap().push(format!("property={}", change.key));
            }
        }

        let registry = CapabilityRegistry::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        registry.register(Arc::new(Recorder {
            events: Arc::clone(&events),
        }));

        registry.notify_charging(true);
        registry.notify_cleaning(false);
        registry.notify_property(&PropertyChange::new("state", None, json!("charging")));

        assert_eq!(
            *events.lock().unwrap(),
            vec!["charging=true", "cleaning=false", "property=state"]
        );
    }
}
