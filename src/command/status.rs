// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Telemetry query commands.
//!
//! The controller exposes two read-only snapshots: `values.cgi` with the
//! installation's configuration (installed hardware, outlet-function
//! assignments, names, defaults) and `system_info.cgi` with live status
//! (valve states, outlet states, temperatures, setpoints).

use crate::command::Command;

/// Queries the configuration snapshot from `values.cgi`.
///
/// The response is a flat JSON object mixing strings, numbers, booleans, and
/// nested outlet-function objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValuesCommand;

impl Command for ValuesCommand {
    fn endpoint(&self) -> &'static str {
        "values.cgi"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Queries the live-status snapshot from `system_info.cgi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemInfoCommand;

impl Command for SystemInfoCommand {
    fn endpoint(&self) -> &'static str {
        "system_info.cgi"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}
