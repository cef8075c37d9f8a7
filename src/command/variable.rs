// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic device-variable writes.
//!
//! The firmware stores its persistent settings as numbered variables exposed
//! through `save_variable.cgi`. Some variables are scoped to one valve and
//! take an additional `valve` parameter.

use crate::command::Command;
use crate::types::{Temperature, ValveId};

/// Writes a numbered device variable.
///
/// # Examples
///
/// ```
/// use kohler_lib::command::{Command, SaveVariableCommand};
/// use kohler_lib::types::{Temperature, ValveId};
///
/// // Variable 38 is the per-valve temperature setpoint
/// let cmd = SaveVariableCommand::temperature_setpoint(ValveId::ONE, Temperature::new(104.0));
/// assert_eq!(
///     cmd.params(),
///     vec![
///         ("index", "38".to_string()),
///         ("value", "104.0".to_string()),
///         ("valve", "1".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveVariableCommand {
    index: u32,
    value: String,
    valve: Option<ValveId>,
}

impl SaveVariableCommand {
    /// Variable index of the per-valve temperature setpoint.
    pub const TEMPERATURE_SETPOINT: u32 = 38;

    /// Creates a variable write.
    #[must_use]
    pub fn new(index: u32, value: impl Into<String>) -> Self {
        Self {
            index,
            value: value.into(),
            valve: None,
        }
    }

    /// Scopes the write to one valve.
    #[must_use]
    pub const fn for_valve(mut self, valve: ValveId) -> Self {
        self.valve = Some(valve);
        self
    }

    /// Creates a temperature-setpoint write for the given valve.
    #[must_use]
    pub fn temperature_setpoint(valve: ValveId, temperature: Temperature) -> Self {
        Self::new(Self::TEMPERATURE_SETPOINT, temperature.wire_value()).for_valve(valve)
    }
}

impl Command for SaveVariableCommand {
    fn endpoint(&self) -> &'static str {
        "save_variable.cgi"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("index", self.index.to_string()),
            ("value", self.value.clone()),
        ];
        if let Some(valve) = self.valve {
            params.push(("valve", valve.number().to_string()));
        }
        params
    }
}
