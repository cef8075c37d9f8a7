// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol implementation for communicating with DTV+ controllers.
//!
//! The controller speaks plain HTTP: every command is a GET against a `.cgi`
//! endpoint with query parameters. Telemetry endpoints answer with JSON;
//! actuating endpoints answer with plain text that callers generally ignore.

mod http;

pub use http::{HttpClient, HttpConfig};

use crate::command::Command;
use crate::error::ProtocolError;

/// Response from a controller command.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    /// The raw response body.
    body: String,
}

impl CommandResponse {
    /// Creates a new command response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response body as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, crate::error::ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// Trait for transports that can send commands to a DTV+ controller.
#[allow(async_fn_in_trait)]
pub trait Protocol {
    /// Sends a command to the device and returns the response.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the command fails to send or receive.
    async fn send_command<C: Command + Sync>(
        &self,
        command: &C,
    ) -> Result<CommandResponse, ProtocolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn response_parse_json_map() {
        let response = CommandResponse::new(r#"{"valve1_installed":true,"def_temp":100}"#.into());
        let map: HashMap<String, serde_json::Value> = response.parse().unwrap();
        assert_eq!(map["valve1_installed"], serde_json::json!(true));
        assert_eq!(map["def_temp"], serde_json::json!(100));
    }

    #[test]
    fn response_parse_invalid_json() {
        let response = CommandResponse::new("OK".into());
        let result: Result<HashMap<String, serde_json::Value>, _> = response.parse();
        assert!(result.is_err());
    }
}
