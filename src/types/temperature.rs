// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature values and units.
//!
//! The controller transmits setpoints as one-decimal fixed strings with the
//! fraction always zero (`"104.0"`), and reports its display unit via the
//! `degree_symbol` system-info key.

use std::fmt;

/// A water temperature setpoint.
///
/// The value is kept as reported or requested; only the wire encoding is
/// constrained. The firmware accepts whole degrees, so [`Temperature::wire_value`]
/// truncates the fraction and appends `".0"`.
///
/// # Examples
///
/// ```
/// use kohler_lib::types::Temperature;
///
/// let temp = Temperature::new(104.0);
/// assert_eq!(temp.wire_value(), "104.0");
///
/// // Fractional setpoints are truncated on the wire
/// assert_eq!(Temperature::new(104.9).wire_value(), "104.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature(f64);

impl Temperature {
    /// Creates a temperature from a value in the device's display unit.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the temperature value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Returns the one-decimal fixed string the firmware expects.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn wire_value(&self) -> String {
        format!("{}.0", self.0.trunc() as i64)
    }
}

impl From<f64> for Temperature {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The display unit the controller is configured for.
///
/// # Examples
///
/// ```
/// use kohler_lib::types::TemperatureUnit;
///
/// let unit = TemperatureUnit::from_degree_symbol("&degF");
/// assert_eq!(unit, TemperatureUnit::Fahrenheit);
/// assert_eq!(unit.max_target(), 113.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// Derives the unit from the `degree_symbol` system-info value.
    ///
    /// The controller reports `"&degF"` for Fahrenheit; anything else is
    /// treated as Celsius.
    #[must_use]
    pub fn from_degree_symbol(symbol: &str) -> Self {
        if symbol == "&degF" {
            Self::Fahrenheit
        } else {
            Self::Celsius
        }
    }

    /// Lowest accepted target temperature in this unit.
    #[must_use]
    pub const fn min_target(&self) -> f64 {
        match self {
            Self::Celsius => 30.0,
            Self::Fahrenheit => 86.0,
        }
    }

    /// Highest accepted target temperature in this unit.
    #[must_use]
    pub const fn max_target(&self) -> f64 {
        match self {
            Self::Celsius => 45.0,
            Self::Fahrenheit => 113.0,
        }
    }

    /// Returns the display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
