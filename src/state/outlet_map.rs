// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Physical-port to outlet-function mapping.
//!
//! The controller's own UI lets the owner reassign which logical outlet
//! function (rain head, hand shower, body spray) each physical port serves.
//! Live outlet status in `system_info.cgi` is keyed by *function id*
//! (`valve1outlet5`), while users address outlets by *physical port number*,
//! so projecting an outlet's state requires this mapping. It is rebuilt from
//! the values snapshot on every refresh cycle because assignments can change
//! between polls.

use crate::telemetry::Snapshot;
use crate::types::ValveId;

/// Per-valve mapping from physical port index to outlet-function id.
///
/// For each valve the mapping is an ordered list of exactly
/// `valve{N}PortsAvailable` entries; index `i` (0-based) holds the function
/// id assigned to physical port `i + 1`. A valve with no advertised ports has
/// an empty mapping and every outlet query for it resolves to "off".
///
/// # Examples
///
/// ```
/// use kohler_lib::state::OutletMap;
/// use kohler_lib::telemetry::Snapshot;
/// use kohler_lib::types::ValveId;
///
/// let values: Snapshot = serde_json::from_str(
///     r#"{"valve1PortsAvailable":"2","valve1_outlet1_func":{"id":5},"valve1_outlet2_func":{"id":7}}"#,
/// )
/// .unwrap();
///
/// let map = OutletMap::from_values(&values);
/// assert_eq!(map.port_count(ValveId::ONE), 2);
/// assert_eq!(map.function_id(ValveId::ONE, 1), Some(5));
/// assert_eq!(map.function_id(ValveId::ONE, 3), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutletMap {
    valves: [Vec<i64>; 2],
}

impl OutletMap {
    /// Creates an empty mapping (no ports on either valve).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            valves: [Vec::new(), Vec::new()],
        }
    }

    /// Rebuilds the mapping from a values snapshot.
    ///
    /// A missing or unparseable port count yields an empty mapping for that
    /// valve; a missing function assignment maps the port to id 0, which no
    /// live-status key matches.
    #[must_use]
    pub fn from_values(values: &Snapshot) -> Self {
        let mut map = Self::new();
        for valve in ValveId::ALL {
            let key = format!("valve{}PortsAvailable", valve.number());
            let count = usize::try_from(values.i64_or(&key, 0)).unwrap_or(0);
            map.valves[valve.index()] = (1..=count)
                .map(|port| {
                    let func_key = format!("valve{}_outlet{port}_func", valve.number());
                    values.func_id(&func_key).unwrap_or(0)
                })
                .collect();
        }
        map
    }

    /// Returns the number of physical ports advertised for a valve.
    #[must_use]
    pub fn port_count(&self, valve: ValveId) -> usize {
        self.valves[valve.index()].len()
    }

    /// Returns the function id assigned to a physical outlet.
    ///
    /// Returns `None` for outlet 0 or any outlet beyond the advertised port
    /// count; callers treat that as "off".
    #[must_use]
    pub fn function_id(&self, valve: ValveId, outlet: u8) -> Option<i64> {
        if outlet == 0 {
            return None;
        }
        self.valves[valve.index()]
            .get(usize::from(outlet) - 1)
            .copied()
    }
}
