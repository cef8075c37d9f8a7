// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shower control commands.
//!
//! `quick_shower.cgi` is the controller's only way to open outlets: one call
//! carries the complete desired configuration for *both* valves. There is no
//! per-outlet command, so callers changing a single outlet must resend the
//! other valve's current set unchanged or the firmware will close it.

use std::time::Duration;

use crate::command::Command;
use crate::types::{OutletSet, Temperature, ValveId};

/// Desired configuration for one valve within a quick-shower command.
///
/// # Examples
///
/// ```
/// use kohler_lib::command::ValveProgram;
/// use kohler_lib::types::{OutletSet, Temperature};
///
/// let outlets: OutletSet = [1, 2].into_iter().collect();
/// let program = ValveProgram::new(outlets, Temperature::new(104.0));
/// assert_eq!(program.massage(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValveProgram {
    outlets: OutletSet,
    massage: u8,
    temperature: Temperature,
}

impl ValveProgram {
    /// Creates a valve program with massage mode off.
    #[must_use]
    pub const fn new(outlets: OutletSet, temperature: Temperature) -> Self {
        Self {
            outlets,
            massage: 0,
            temperature,
        }
    }

    /// Sets the massage mode value.
    #[must_use]
    pub const fn with_massage(mut self, massage: u8) -> Self {
        self.massage = massage;
        self
    }

    /// Returns the outlets to open.
    #[must_use]
    pub const fn outlets(&self) -> &OutletSet {
        &self.outlets
    }

    /// Returns the massage mode value.
    #[must_use]
    pub const fn massage(&self) -> u8 {
        self.massage
    }

    /// Returns the target temperature.
    #[must_use]
    pub const fn temperature(&self) -> Temperature {
        self.temperature
    }
}

/// Configures both valves' outlet sets and temperatures in one call.
///
/// `valve` selects which valve the firmware treats as primary for this call;
/// the payload always carries both valves' full configuration.
///
/// # Examples
///
/// ```
/// use kohler_lib::command::{Command, QuickShowerCommand, ValveProgram};
/// use kohler_lib::types::{OutletSet, Temperature, ValveId};
///
/// let valve1 = ValveProgram::new([1, 2].into_iter().collect(), Temperature::new(104.0));
/// let valve2 = ValveProgram::new(OutletSet::new(), Temperature::new(104.0));
/// let cmd = QuickShowerCommand::new(ValveId::ONE, valve1, valve2);
///
/// assert_eq!(cmd.endpoint(), "quick_shower.cgi");
/// let params = cmd.params();
/// assert_eq!(params[0], ("valve_num", "1".to_string()));
/// assert_eq!(params[1], ("valve1_outlet", "12".to_string()));
/// assert_eq!(params[3], ("valve1_temp", "104.0".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuickShowerCommand {
    valve: ValveId,
    valve1: ValveProgram,
    valve2: ValveProgram,
}

impl QuickShowerCommand {
    /// Creates a quick-shower command targeting the given primary valve.
    #[must_use]
    pub const fn new(valve: ValveId, valve1: ValveProgram, valve2: ValveProgram) -> Self {
        Self {
            valve,
            valve1,
            valve2,
        }
    }

    /// Returns the primary valve for this call.
    #[must_use]
    pub const fn valve(&self) -> ValveId {
        self.valve
    }
}

impl Command for QuickShowerCommand {
    fn endpoint(&self) -> &'static str {
        "quick_shower.cgi"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("valve_num", self.valve.number().to_string()),
            ("valve1_outlet", self.valve1.outlets.as_digits()),
            ("valve1_massage", self.valve1.massage.to_string()),
            ("valve1_temp", self.valve1.temperature.wire_value()),
            ("valve2_outlet", self.valve2.outlets.as_digits()),
            ("valve2_massage", self.valve2.massage.to_string()),
            ("valve2_temp", self.valve2.temperature.wire_value()),
        ]
    }

    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(3))
    }
}

/// Stops the running shower on all valves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopShowerCommand;

impl Command for StopShowerCommand {
    fn endpoint(&self) -> &'static str {
        "stop_shower.cgi"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(outlets: &[u8], temp: f64) -> ValveProgram {
        ValveProgram::new(outlets.iter().copied().collect(), Temperature::new(temp))
    }

    #[test]
    fn quick_shower_params_in_wire_order() {
        let cmd = QuickShowerCommand::new(ValveId::TWO, program(&[1], 100.0), program(&[], 100.0));

        let params = cmd.params();
        assert_eq!(
            params,
            vec![
                ("valve_num", "2".to_string()),
                ("valve1_outlet", "1".to_string()),
                ("valve1_massage", "0".to_string()),
                ("valve1_temp", "100.0".to_string()),
                ("valve2_outlet", String::new()),
                ("valve2_massage", "0".to_string()),
                ("valve2_temp", "100.0".to_string()),
            ]
        );
    }

    #[test]
    fn quick_shower_truncates_temperature() {
        let cmd = QuickShowerCommand::new(ValveId::ONE, program(&[1], 104.6), program(&[], 104.6));

        let params = cmd.params();
        assert_eq!(params[3], ("valve1_temp", "104.0".to_string()));
        assert_eq!(params[6], ("valve2_temp", "104.0".to_string()));
    }

    #[test]
    fn quick_shower_timeout() {
        let cmd = QuickShowerCommand::new(ValveId::ONE, program(&[], 100.0), program(&[], 100.0));
        assert_eq!(cmd.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn valve_program_massage_defaults_off() {
        assert_eq!(program(&[1, 2], 100.0).massage(), 0);
        assert_eq!(program(&[1], 100.0).with_massage(1).massage(), 1);
    }

    #[test]
    fn stop_shower_endpoint_and_timeout() {
        assert_eq!(StopShowerCommand.endpoint(), "stop_shower.cgi");
        assert_eq!(StopShowerCommand.timeout(), Some(Duration::from_secs(10)));
    }
}
