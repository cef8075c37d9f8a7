// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Kohler library.
//!
//! This module provides a comprehensive error hierarchy for handling failures
//! across the library: value validation, HTTP communication, JSON parsing,
//! and device configuration.
//!
//! Note that telemetry reads never fail: a missing key resolves to a
//! caller-supplied default, and a projection query for an outlet the device
//! does not report resolves to "off". Only command transmission and
//! constrained-type construction return errors.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when interacting
/// with a Kohler DTV+ controller.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during HTTP communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during device setup or operation.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A valve number outside 1-2 was provided.
    #[error("valve number {0} is out of range [1, 2]")]
    InvalidValve(u8),

    /// A light module number outside 1-2 was provided.
    #[error("light module {0} is out of range [1, 2]")]
    InvalidLightModule(u8),
}

/// Errors related to HTTP communication with the controller.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing controller responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors related to device setup and configuration.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The waiver of liability has not been accepted.
    ///
    /// Remote control of a shower can scald whoever is standing under it;
    /// the builder refuses to construct a device until the integrator
    /// explicitly opts in.
    #[error("the waiver of liability has not been accepted")]
    LiabilityTermsNotAccepted,

    /// The device did not answer its telemetry endpoints during setup.
    #[error("device is not ready: {0}")]
    NotReady(String),

    /// Device configuration is invalid.
    #[error("invalid device configuration: {0}")]
    InvalidConfiguration(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::InvalidValve(3);
        let err: Error = value_err.into();
        assert!(matches!(err, Error::Value(ValueError::InvalidValve(3))));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::UnexpectedFormat("not a map".to_string());
        assert_eq!(err.to_string(), "unexpected response format: not a map");
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::NotReady("no response from 10.0.0.5".to_string());
        assert_eq!(
            err.to_string(),
            "device is not ready: no response from 10.0.0.5"
        );
    }
}
