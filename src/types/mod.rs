// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for DTV+ device control.
//!
//! This module provides type-safe representations of values used in
//! controller commands. Each type ensures values are within their valid
//! ranges at construction time, preventing runtime errors.
//!
//! # Types
//!
//! - [`ValveId`] - Valve number for the two-valve controller (1-2)
//! - [`LightId`] - Light module number (1-2)
//! - [`Intensity`] - Light brightness (0-100%), with 0-255 level conversions
//! - [`Temperature`] - Setpoint with the firmware's one-decimal wire encoding
//! - [`TemperatureUnit`] - Display unit derived from `degree_symbol`
//! - [`OutletSet`] - Digit-string set of open outlets for whole-valve commands

mod light;
mod outlet_set;
mod temperature;
mod valve;

pub use light::{Intensity, LightId};
pub use outlet_set::OutletSet;
pub use temperature::{Temperature, TemperatureUnit};
pub use valve::ValveId;
