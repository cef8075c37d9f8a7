// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light control commands.

use crate::command::Command;
use crate::types::{Intensity, LightId};

/// Turns a light module on at the given intensity.
///
/// # Examples
///
/// ```
/// use kohler_lib::command::{Command, LightOnCommand};
/// use kohler_lib::types::{Intensity, LightId};
///
/// let cmd = LightOnCommand::new(LightId::TWO, Intensity::MAX);
/// assert_eq!(cmd.endpoint(), "light_on.cgi");
/// assert_eq!(
///     cmd.params(),
///     vec![("module", "2".to_string()), ("intensity", "100".to_string())]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightOnCommand {
    module: LightId,
    intensity: Intensity,
}

impl LightOnCommand {
    /// Creates a light-on command.
    #[must_use]
    pub const fn new(module: LightId, intensity: Intensity) -> Self {
        Self { module, intensity }
    }
}

impl Command for LightOnCommand {
    fn endpoint(&self) -> &'static str {
        "light_on.cgi"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("module", self.module.number().to_string()),
            ("intensity", self.intensity.value().to_string()),
        ]
    }
}

/// Turns a light module off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightOffCommand {
    module: LightId,
}

impl LightOffCommand {
    /// Creates a light-off command.
    #[must_use]
    pub const fn new(module: LightId) -> Self {
        Self { module }
    }
}

impl Command for LightOffCommand {
    fn endpoint(&self) -> &'static str {
        "light_off.cgi"
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![("module", self.module.number().to_string())]
    }
}
