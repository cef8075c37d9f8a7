// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DTV+ command definitions.
//!
//! This module provides typed representations of the controller's CGI
//! commands. Every command is an HTTP GET against one `.cgi` endpoint with
//! query parameters.
//!
//! # Available Commands
//!
//! | Command Type | Endpoint | Purpose |
//! |-------------|----------|---------|
//! | [`ValuesCommand`] | `values.cgi` | Fetch the configuration snapshot |
//! | [`SystemInfoCommand`] | `system_info.cgi` | Fetch the live-status snapshot |
//! | [`QuickShowerCommand`] | `quick_shower.cgi` | Configure both valves' outlets and temperatures |
//! | [`StopShowerCommand`] | `stop_shower.cgi` | Stop the running shower |
//! | [`LightOnCommand`] | `light_on.cgi` | Set a light module's intensity |
//! | [`LightOffCommand`] | `light_off.cgi` | Turn a light module off |
//! | [`SaveVariableCommand`] | `save_variable.cgi` | Write a numbered device variable |
//!
//! # Examples
//!
//! ```
//! use kohler_lib::command::{Command, LightOnCommand};
//! use kohler_lib::types::{Intensity, LightId};
//!
//! let cmd = LightOnCommand::new(LightId::ONE, Intensity::new(80).unwrap());
//! assert_eq!(cmd.endpoint(), "light_on.cgi");
//! assert_eq!(
//!     cmd.params(),
//!     vec![("module", "1".to_string()), ("intensity", "80".to_string())]
//! );
//! ```

mod light;
mod shower;
mod status;
mod variable;

pub use light::{LightOffCommand, LightOnCommand};
pub use shower::{QuickShowerCommand, StopShowerCommand, ValveProgram};
pub use status::{SystemInfoCommand, ValuesCommand};
pub use variable::SaveVariableCommand;

use std::time::Duration;

/// A command that can be sent to a DTV+ controller.
///
/// Commands are serialized to a CGI endpoint name plus query parameters for
/// transmission over HTTP.
pub trait Command {
    /// Returns the CGI endpoint this command targets, e.g. `"values.cgi"`.
    fn endpoint(&self) -> &'static str;

    /// Returns the query parameters to send, in wire order.
    ///
    /// Query commands with no parameters return an empty list.
    fn params(&self) -> Vec<(&'static str, String)>;

    /// Returns a per-request timeout override, if this command needs one.
    ///
    /// The firmware answers its telemetry endpoints quickly but takes several
    /// seconds to acknowledge valve actuation, so actuating commands carry
    /// longer timeouts than the client default.
    fn timeout(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_commands_have_no_params() {
        assert!(ValuesCommand.params().is_empty());
        assert!(SystemInfoCommand.params().is_empty());
        assert!(StopShowerCommand.params().is_empty());
    }

    #[test]
    fn default_timeout_is_none() {
        assert_eq!(ValuesCommand.timeout(), None);
        assert_eq!(SystemInfoCommand.timeout(), None);
    }
}
