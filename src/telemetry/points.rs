// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Projected telemetry points.
//!
//! A point is one user-visible fact about the installation: a light's
//! brightness, a valve's running state, an outlet's open state, the shower or
//! steam status. Points are recomputed from the current snapshots on demand;
//! they carry no lifecycle of their own.

use crate::types::{Intensity, LightId, ValveId};

/// What a telemetry point describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    /// A light module's brightness.
    Light {
        /// The light module.
        light: LightId,
    },
    /// A valve's running state.
    ValveStatus {
        /// The valve.
        valve: ValveId,
    },
    /// A physical outlet's open state.
    OutletStatus {
        /// The valve the outlet belongs to.
        valve: ValveId,
        /// The 1-based physical outlet number.
        outlet: u8,
    },
    /// The whole-shower running state.
    Shower,
    /// The steam generator's running state.
    Steam,
}

/// The projected state of a telemetry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointState {
    /// An on/off fact.
    Binary(bool),
    /// A brightness fact (lights only).
    Brightness(Intensity),
}

/// One projected fact about the installation.
///
/// # Examples
///
/// ```
/// use kohler_lib::telemetry::{PointKind, PointState, TelemetryPoint};
/// use kohler_lib::types::ValveId;
///
/// let point = TelemetryPoint::new(
///     PointKind::ValveStatus { valve: ValveId::ONE },
///     "Kohler Valve 1",
///     true,
///     PointState::Binary(true),
/// );
/// assert!(point.is_on());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryPoint {
    kind: PointKind,
    name: String,
    installed: bool,
    state: PointState,
}

impl TelemetryPoint {
    /// Creates a telemetry point.
    #[must_use]
    pub fn new(
        kind: PointKind,
        name: impl Into<String>,
        installed: bool,
        state: PointState,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            installed,
            state,
        }
    }

    /// Returns what this point describes.
    #[must_use]
    pub const fn kind(&self) -> PointKind {
        self.kind
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the underlying hardware is installed.
    ///
    /// Points for absent hardware are still projected (with inert state) so
    /// consumers can decide what to surface.
    #[must_use]
    pub const fn installed(&self) -> bool {
        self.installed
    }

    /// Returns the projected state.
    #[must_use]
    pub const fn state(&self) -> PointState {
        self.state
    }

    /// Returns `true` if the point is currently on.
    ///
    /// A brightness point is on when its intensity is nonzero.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        match self.state {
            PointState::Binary(on) => on,
            PointState::Brightness(intensity) => intensity.value() > 0,
        }
    }
}
