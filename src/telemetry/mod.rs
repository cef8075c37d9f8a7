// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Telemetry snapshots reported by the controller.
//!
//! A DTV+ controller exposes two read-only JSON endpoints: `values.cgi`
//! (installation configuration) and `system_info.cgi` (live status). Both
//! answer a flat object whose value types are inconsistent across firmware
//! versions: counts arrive as numbers or numeric strings (`3` or `"3"`),
//! booleans as `true`, `"True"`, or `"On"`, and outlet-function assignments
//! as nested `{"id": N}` objects.
//!
//! [`Snapshot`] wraps one such object and provides typed accessors that
//! coerce across those representations. A missing or unconvertible key always
//! resolves to the caller-supplied default, never an error: telemetry reads
//! must not fail just because the device dropped a key.
//!
//! # Examples
//!
//! ```
//! use kohler_lib::telemetry::Snapshot;
//!
//! let snapshot: Snapshot = serde_json::from_str(
//!     r#"{"valve1PortsAvailable":"3","valve1_installed":true,"def_temp":100}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(snapshot.i64_or("valve1PortsAvailable", 0), 3);
//! assert!(snapshot.bool_or("valve1_installed", false));
//! assert_eq!(snapshot.f64("def_temp"), Some(100.0));
//! assert_eq!(snapshot.i64_or("valve2PortsAvailable", 0), 0);
//! ```

mod points;

pub use points::{PointKind, PointState, TelemetryPoint};

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// An outlet-function assignment as reported under `valve{N}_outlet{i}_func`.
#[derive(Debug, Clone, Copy, Deserialize)]
struct OutletFunction {
    id: i64,
}

/// One key/value snapshot fetched from a telemetry endpoint.
///
/// Snapshots are replaced wholesale on each successful fetch and retained
/// unchanged when a fetch fails, so readers always see the most recent
/// complete report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: HashMap<String, Value>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if the snapshot reports the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the string value for a key, if it is a string.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Returns the string value for a key, or the default.
    #[must_use]
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.string(key).unwrap_or(default)
    }

    /// Returns the boolean value for a key, or the default.
    ///
    /// The firmware reports booleans as JSON `true`/`false`, `"True"`, or
    /// `"On"`; all are accepted.
    #[must_use]
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.entries.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true") || s == "On",
            _ => default,
        }
    }

    /// Returns the integer value for a key, or the default.
    ///
    /// Accepts JSON numbers and numeric strings.
    #[must_use]
    pub fn i64_or(&self, key: &str, default: i64) -> i64 {
        match self.entries.get(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Returns the float value for a key.
    ///
    /// Accepts JSON numbers and numeric strings; anything else is `None`.
    #[must_use]
    pub fn f64(&self, key: &str) -> Option<f64> {
        match self.entries.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns the outlet-function id from a `{"id": N}` assignment value.
    #[must_use]
    pub fn func_id(&self, key: &str) -> Option<i64> {
        self.entries
            .get(key)
            .and_then(|value| OutletFunction::deserialize(value).ok())
            .map(|func| func.id)
    }

    /// Returns the number of reported keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot reports no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, Value>> for Snapshot {
    fn from(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }
}
