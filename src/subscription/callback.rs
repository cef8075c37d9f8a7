// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for refresh subscriptions.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::device::RefreshOutcome;

/// Unique identifier for a subscription.
///
/// This ID is returned when creating a subscription and can be used to
/// unsubscribe later. IDs are unique within a device's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
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

/// Type alias for refresh-cycle callbacks.
type RefreshCallback = Arc<dyn Fn(&RefreshOutcome) + Send + Sync>;

/// Registry for refresh subscription callbacks.
///
/// Thread-safe via `parking_lot::RwLock`; callbacks are wrapped in `Arc` so
/// they can be invoked without holding the lock.
#[derive(Default)]
pub struct CallbackRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Refresh-cycle callbacks.
    refresh_callbacks: RwLock<HashMap<SubscriptionId, RefreshCallback>>,
}

impl CallbackRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked after every refresh cycle.
    pub fn on_refresh<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&RefreshOutcome) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.refresh_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Removes a subscription.
    ///
    /// Returns `true` if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.refresh_callbacks.write().remove(&id).is_some()
    }

    /// Returns `true` if any subscriber is registered.
    #[must_use]
    pub fn has_subscribers(&self) -> bool {
        !self.refresh_callbacks.read().is_empty()
    }

    /// Returns the number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.refresh_callbacks.read().len()
    }

    /// Invokes every refresh callback with the given outcome.
    pub fn notify_refresh(&self, outcome: &RefreshOutcome) {
        let callbacks: Vec<RefreshCallback> =
            self.refresh_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(outcome);
        }
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
