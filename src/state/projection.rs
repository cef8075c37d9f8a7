// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only projections over the current telemetry.
//!
//! Everything here is a pure function of the two snapshots, the outlet map,
//! and the optimistic target temperature. No query fails: unknown outlets,
//! missing keys, and absent hardware all resolve to inert defaults.

use crate::state::OutletMap;
use crate::telemetry::{PointKind, PointState, Snapshot, TelemetryPoint};
use crate::types::{Intensity, LightId, OutletSet, TemperatureUnit, ValveId};

/// Physical outlet ports a valve can structurally carry.
const OUTLETS_PER_VALVE: u8 = 6;

/// Valves whose readings feed the shower-wide temperature values.
///
/// Valve 2, where installed, blends against valve 1; only valve 1 carries
/// the authoritative temperature and setpoint.
const TEMPERATURE_VALVES: [ValveId; 1] = [ValveId::ONE];

/// A read-only view over one consistent state of the controller.
///
/// Borrowed from the device's state for the duration of a read; construct a
/// fresh projection per query rather than holding one across refreshes.
#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    values: &'a Snapshot,
    system_info: &'a Snapshot,
    outlets: &'a OutletMap,
    target_override: Option<f64>,
}

impl<'a> Projection<'a> {
    pub(crate) const fn new(
        values: &'a Snapshot,
        system_info: &'a Snapshot,
        outlets: &'a OutletMap,
        target_override: Option<f64>,
    ) -> Self {
        Self {
            values,
            system_info,
            outlets,
            target_override,
        }
    }

    // ========== Installed hardware ==========

    /// Returns `true` if the valve is installed.
    #[must_use]
    pub fn is_valve_installed(&self, valve: ValveId) -> bool {
        let key = format!("valve{}_installed", valve.number());
        self.values.bool_or(&key, false)
    }

    /// Returns `true` if the physical outlet has a function assigned.
    #[must_use]
    pub fn is_outlet_installed(&self, valve: ValveId, outlet: u8) -> bool {
        let key = format!("valve{}_outlet{outlet}_func", valve.number());
        self.values.contains_key(&key)
    }

    /// Returns `true` if a steam generator is installed.
    #[must_use]
    pub fn is_steam_installed(&self) -> bool {
        self.values.bool_or("steam_installed", false)
    }

    /// Returns `true` if the light module is installed.
    #[must_use]
    pub fn is_light_installed(&self, light: LightId) -> bool {
        let key = format!("light{}_installed", light.number());
        self.values.bool_or(&key, false)
    }

    // ========== Live status ==========

    /// Returns `true` if the physical outlet is currently open.
    ///
    /// Outlets beyond the valve's advertised port count are reported as off;
    /// a stale UI may still ask about a port that was reassigned away.
    #[must_use]
    pub fn is_outlet_on(&self, valve: ValveId, outlet: u8) -> bool {
        let Some(function_id) = self.outlets.function_id(valve, outlet) else {
            return false;
        };
        let key = format!("valve{}outlet{function_id}", valve.number());
        self.system_info.bool_or(&key, false)
    }

    /// Returns `true` if the valve reports itself running.
    #[must_use]
    pub fn is_valve_on(&self, valve: ValveId) -> bool {
        let key = format!("valve{}_Currentstatus", valve.number());
        self.system_info.str_or(&key, "Off") == "On"
    }

    /// Returns `true` if either valve is running.
    #[must_use]
    pub fn is_shower_on(&self) -> bool {
        ValveId::ALL.into_iter().any(|valve| self.is_valve_on(valve))
    }

    /// Returns `true` if the configuration snapshot flags the shower on.
    ///
    /// This is the `shower_on` value key, which the firmware updates
    /// independently of the per-valve status strings.
    #[must_use]
    pub fn shower_reported_on(&self) -> bool {
        self.values.bool_or("shower_on", false)
    }

    /// Returns `true` if the steam generator is running.
    #[must_use]
    pub fn is_steam_running(&self) -> bool {
        self.values.bool_or("steam_running", false)
    }

    // ========== Temperatures ==========

    /// Returns the current water temperature.
    ///
    /// Aggregates the reporting valves and keeps the maximum: a second valve
    /// blending cooler water must not make the shower read cooler than the
    /// leading valve. `None` when no installed valve reports a reading.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        TEMPERATURE_VALVES
            .into_iter()
            .filter(|valve| self.is_valve_installed(*valve))
            .filter_map(|valve| {
                let key = format!("valve{}Temp", valve.number());
                self.system_info.f64(&key)
            })
            .reduce(f64::max)
    }

    /// Returns the target temperature.
    ///
    /// While a valve runs (or when no optimistic value has been cached) the
    /// valve's live setpoint wins; otherwise the cached value set by the last
    /// idle `set_target_temperature` call is reported so UIs reflect the
    /// intended setpoint before the device confirms it. Falls back to the
    /// device's `def_temp` when no valve contributes a value.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        let temps: Vec<f64> = TEMPERATURE_VALVES
            .into_iter()
            .filter(|valve| self.is_valve_installed(*valve))
            .filter_map(|valve| {
                if self.is_valve_on(valve) || self.target_override.is_none() {
                    let key = format!("valve{}Setpoint", valve.number());
                    self.system_info.f64(&key)
                } else {
                    self.target_override
                }
            })
            .collect();

        if temps.is_empty() {
            self.values.f64("def_temp")
        } else {
            temps.into_iter().reduce(f64::max)
        }
    }

    /// Returns the display unit the controller is configured for.
    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureUnit {
        TemperatureUnit::from_degree_symbol(self.system_info.str_or("degree_symbol", ""))
    }

    // ========== Outlet sets ==========

    /// Returns the set of outlets currently open on a valve.
    #[must_use]
    pub fn open_outlets(&self, valve: ValveId) -> OutletSet {
        self.build_outlet_set(valve, |_, currently_on| currently_on)
    }

    /// Returns the valve's outlet set with `outlet` forced open.
    ///
    /// Every other outlet keeps its current state, so sending the result to
    /// the device changes exactly one outlet.
    #[must_use]
    pub fn outlets_opening(&self, valve: ValveId, outlet: u8) -> OutletSet {
        self.build_outlet_set(valve, |port, currently_on| currently_on || port == outlet)
    }

    /// Returns the valve's outlet set with `outlet` forced closed.
    #[must_use]
    pub fn outlets_closing(&self, valve: ValveId, outlet: u8) -> OutletSet {
        self.build_outlet_set(valve, |port, currently_on| currently_on && port != outlet)
    }

    fn build_outlet_set(&self, valve: ValveId, include: impl Fn(u8, bool) -> bool) -> OutletSet {
        let count = self.outlets.port_count(valve);
        let mut set = OutletSet::new();
        for port in 1..=count {
            let Ok(outlet) = u8::try_from(port) else {
                break;
            };
            if include(outlet, self.is_outlet_on(valve, outlet)) {
                set.insert(outlet);
            }
        }
        set
    }

    // ========== Lights ==========

    /// Returns the display name for a light module.
    #[must_use]
    pub fn light_name(&self, light: LightId) -> String {
        let key = format!("light{}_name", light.number());
        let default = format!("Light {}", light.number());
        format!("Kohler {}", self.values.str_or(&key, &default))
    }

    /// Returns the light module's brightness (0-100).
    #[must_use]
    pub fn light_brightness(&self, light: LightId) -> Intensity {
        let key = format!("light{}_level", light.number());
        let level = self.values.i64_or(&key, 100).clamp(0, 100);
        Intensity::clamped(u8::try_from(level).unwrap_or(100))
    }

    // ========== Device identity ==========

    /// Returns the controller's MAC address.
    #[must_use]
    pub fn mac_address(&self) -> Option<&str> {
        self.values.string("MAC")
    }

    /// Returns the controller's firmware version string.
    #[must_use]
    pub fn firmware_version(&self) -> Option<&str> {
        self.values.string("controller_version_string")
    }

    // ========== Points ==========

    /// Projects every telemetry point from the current state.
    #[must_use]
    pub fn telemetry_points(&self) -> Vec<TelemetryPoint> {
        let mut points = Vec::new();

        for light in LightId::ALL {
            points.push(TelemetryPoint::new(
                PointKind::Light { light },
                self.light_name(light),
                self.is_light_installed(light),
                PointState::Brightness(self.light_brightness(light)),
            ));
        }

        for valve in ValveId::ALL {
            points.push(TelemetryPoint::new(
                PointKind::ValveStatus { valve },
                format!("Kohler Valve {}", valve.number()),
                self.is_valve_installed(valve),
                PointState::Binary(self.is_valve_on(valve)),
            ));

            for outlet in 1..=OUTLETS_PER_VALVE {
                points.push(TelemetryPoint::new(
                    PointKind::OutletStatus { valve, outlet },
                    format!("Kohler Valve {} Outlet {outlet}", valve.number()),
                    self.is_outlet_installed(valve, outlet),
                    PointState::Binary(self.is_outlet_on(valve, outlet)),
                ));
            }
        }

        points.push(TelemetryPoint::new(
            PointKind::Shower,
            "Kohler Shower Status",
            true,
            PointState::Binary(self.shower_reported_on()),
        ));

        points.push(TelemetryPoint::new(
            PointKind::Steam,
            "Kohler Steam Status",
            self.is_steam_installed(),
            PointState::Binary(self.is_steam_running()),
        ));

        points
    }
}
