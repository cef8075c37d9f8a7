// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller state tracking.
//!
//! The two telemetry snapshots are the single source of truth; everything a
//! consumer reads is projected from them on demand. The one piece of
//! client-held state with its own lifecycle is the optimistic target
//! temperature, cached so a setpoint chosen while the shower is idle can be
//! reported before the device confirms it.

mod outlet_map;
mod projection;

pub use outlet_map::OutletMap;
pub use projection::Projection;

use crate::telemetry::Snapshot;

/// The tracked state of one controller.
///
/// Replaced piecewise by the refresh cycle: each snapshot is swapped
/// wholesale on a successful fetch and left untouched on a failed one, and
/// the outlet map is rebuilt from the values snapshot every cycle.
#[derive(Debug, Default)]
pub(crate) struct ControllerState {
    /// Configuration snapshot from `values.cgi`.
    pub(crate) values: Snapshot,
    /// Live-status snapshot from `system_info.cgi`.
    pub(crate) system_info: Snapshot,
    /// Port-to-function mapping derived from the values snapshot.
    pub(crate) outlets: OutletMap,
    /// Optimistic target temperature, last-writer-wins.
    pub(crate) target_temperature: Option<f64>,
    /// Whether the most recent values fetch succeeded.
    pub(crate) values_fresh: bool,
    /// Whether the most recent system-info fetch succeeded.
    pub(crate) system_info_fresh: bool,
}

impl ControllerState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the outlet map from the current values snapshot.
    pub(crate) fn rebuild_outlet_map(&mut self) {
        self.outlets = OutletMap::from_values(&self.values);
    }

    /// Returns a read-only projection over the current state.
    pub(crate) fn projection(&self) -> Projection<'_> {
        Projection::new(
            &self.values,
            &self.system_info,
            &self.outlets,
            self.target_temperature,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValveId;

    #[test]
    fn new_state_projects_everything_off() {
        let state = ControllerState::new();
        let projection = state.projection();

        assert!(!projection.is_shower_on());
        assert!(!projection.is_outlet_on(ValveId::ONE, 1));
        assert_eq!(projection.current_temperature(), None);
    }

    #[test]
    fn rebuild_outlet_map_tracks_values() {
        let mut state = ControllerState::new();
        state.values = serde_json::from_str(
            r#"{"valve1PortsAvailable": 2, "valve1_outlet1_func": {"id": 5}}"#,
        )
        .unwrap();

        assert_eq!(state.outlets.port_count(ValveId::ONE), 0);
        state.rebuild_outlet_map();
        assert_eq!(state.outlets.port_count(ValveId::ONE), 2);
    }
}
