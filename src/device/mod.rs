// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level device abstraction for DTV+ controllers.
//!
//! [`Device`] owns the transport, the tracked state, and the subscription
//! registry, and translates per-outlet intents into the whole-valve commands
//! the firmware accepts.
//!
//! # Read-after-write staleness
//!
//! Issuing a command only *requests* a transition; the device reports the
//! resulting state through the next telemetry refresh. Commands therefore do
//! not update the local state, and callers that need to observe the effect
//! should call [`Device::refresh`] (or wait for the next polled cycle).
//!
//! # Examples
//!
//! ```no_run
//! use kohler_lib::{Device, ValveId};
//!
//! #[tokio::main]
//! async fn main() -> kohler_lib::Result<()> {
//!     let device = Device::http("192.168.1.100")
//!         .accept_liability_terms()
//!         .build()
//!         .await?;
//!
//!     // Open outlet 2 on valve 1, preserving every other open outlet
//!     device.open_outlet(ValveId::ONE, 2).await?;
//!
//!     device.refresh().await;
//!     assert!(device.is_shower_on());
//!     Ok(())
//! }
//! ```

mod http_builder;

pub use http_builder::HttpDeviceBuilder;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::command::{
    Command, LightOffCommand, LightOnCommand, QuickShowerCommand, SaveVariableCommand,
    StopShowerCommand, SystemInfoCommand, ValuesCommand, ValveProgram,
};
use crate::error::Error;
use crate::protocol::{HttpClient, Protocol};
use crate::state::{ControllerState, Projection};
use crate::subscription::{CallbackRegistry, SubscriptionId};
use crate::telemetry::{Snapshot, TelemetryPoint};
use crate::types::{Intensity, LightId, OutletSet, Temperature, TemperatureUnit, ValveId};

/// Temperature sent when neither the device nor the caller supplies one.
///
/// Matches the firmware's own quick-shower default of 100 degrees.
const FALLBACK_TEMPERATURE: f64 = 100.0;

/// Result of one refresh cycle.
///
/// Each fetch succeeds or fails independently; a failed fetch leaves the
/// previous snapshot in effect, so a partially failed cycle degrades to
/// stale-but-available state rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Whether the values snapshot was replaced this cycle.
    pub values_updated: bool,
    /// Whether the system-info snapshot was replaced this cycle.
    pub system_info_updated: bool,
}

impl RefreshOutcome {
    /// Returns `true` if both fetches succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.values_updated && self.system_info_updated
    }

    /// Returns `true` if either fetch failed this cycle.
    ///
    /// This is the recoverable "update failed" signal; the next cycle is the
    /// retry.
    #[must_use]
    pub const fn is_update_failed(&self) -> bool {
        !self.is_success()
    }
}

/// A DTV+ shower controller.
///
/// The type parameter `P` is the transport; [`HttpClient`] for real devices.
/// All reads are projections over the most recently fetched telemetry, and
/// all intents are encoded as whole-valve commands.
#[derive(Debug)]
pub struct Device<P: Protocol> {
    protocol: Arc<P>,
    state: RwLock<ControllerState>,
    callbacks: CallbackRegistry,
}

impl Device<HttpClient> {
    /// Creates a builder for an HTTP device.
    #[must_use]
    pub fn http(host: impl Into<String>) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(host)
    }
}

impl<P: Protocol> Device<P> {
    /// Creates a device over the given transport.
    pub(crate) fn new(protocol: P) -> Self {
        Self {
            protocol: Arc::new(protocol),
            state: RwLock::new(ControllerState::new()),
            callbacks: CallbackRegistry::new(),
        }
    }

    // ========== Refresh ==========

    /// Runs one refresh cycle.
    ///
    /// Fetches both telemetry snapshots, isolating each fetch's failure from
    /// the other: a failed fetch is logged, leaves the previous snapshot in
    /// effect, and marks only that snapshot stale. The outlet map is rebuilt
    /// afterwards because the device's own UI can reassign ports between
    /// polls. Subscribers are notified with the cycle's outcome.
    pub async fn refresh(&self) -> RefreshOutcome {
        let values = self.fetch_snapshot(&ValuesCommand).await;
        let system_info = self.fetch_snapshot(&SystemInfoCommand).await;

        let outcome = {
            let mut state = self.state.write();

            match values {
                Ok(snapshot) => {
                    state.values = snapshot;
                    state.values_fresh = true;
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Unable to update values");
                    state.values_fresh = false;
                }
            }

            match system_info {
                Ok(snapshot) => {
                    state.system_info = snapshot;
                    state.system_info_fresh = true;
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Unable to update system info");
                    state.system_info_fresh = false;
                }
            }

            state.rebuild_outlet_map();

            RefreshOutcome {
                values_updated: state.values_fresh,
                system_info_updated: state.system_info_fresh,
            }
        };

        self.callbacks.notify_refresh(&outcome);
        outcome
    }

    async fn fetch_snapshot<C: Command + Sync>(&self, command: &C) -> Result<Snapshot, Error> {
        let response = self
            .protocol
            .send_command(command)
            .await
            .map_err(Error::Protocol)?;
        let entries: HashMap<String, serde_json::Value> =
            response.parse().map_err(Error::Parse)?;
        tracing::debug!(endpoint = command.endpoint(), keys = entries.len(), "Updated snapshot");
        Ok(Snapshot::from(entries))
    }

    /// Returns `true` if the most recent refresh cycle fully succeeded.
    #[must_use]
    pub fn last_refresh_succeeded(&self) -> bool {
        let state = self.state.read();
        state.values_fresh && state.system_info_fresh
    }

    // ========== Subscriptions ==========

    /// Registers a callback invoked after every refresh cycle.
    ///
    /// Polling (see [`Device::start_polling`](crate::coordinator)) only
    /// fetches while at least one subscriber is registered.
    pub fn on_refresh<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&RefreshOutcome) + Send + Sync + 'static,
    {
        self.callbacks.on_refresh(callback)
    }

    /// Removes a refresh subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }

    /// Returns `true` if any refresh subscriber is registered.
    #[must_use]
    pub fn has_subscribers(&self) -> bool {
        self.callbacks.has_subscribers()
    }

    // ========== Projected reads ==========

    /// Runs a closure against one consistent projection of the state.
    ///
    /// Useful when several facts must come from the same refresh cycle, e.g.
    /// reading both valves' open sets without a refresh landing in between.
    pub fn read<R>(&self, f: impl FnOnce(Projection<'_>) -> R) -> R {
        let state = self.state.read();
        f(state.projection())
    }

    /// Returns `true` if the physical outlet is currently open.
    #[must_use]
    pub fn is_outlet_on(&self, valve: ValveId, outlet: u8) -> bool {
        self.state.read().projection().is_outlet_on(valve, outlet)
    }

    /// Returns `true` if the valve reports itself running.
    #[must_use]
    pub fn is_valve_on(&self, valve: ValveId) -> bool {
        self.state.read().projection().is_valve_on(valve)
    }

    /// Returns `true` if either valve is running.
    #[must_use]
    pub fn is_shower_on(&self) -> bool {
        self.state.read().projection().is_shower_on()
    }

    /// Returns `true` if the valve is installed.
    #[must_use]
    pub fn is_valve_installed(&self, valve: ValveId) -> bool {
        self.state.read().projection().is_valve_installed(valve)
    }

    /// Returns `true` if a steam generator is installed.
    #[must_use]
    pub fn is_steam_installed(&self) -> bool {
        self.state.read().projection().is_steam_installed()
    }

    /// Returns `true` if the steam generator is running.
    #[must_use]
    pub fn is_steam_running(&self) -> bool {
        self.state.read().projection().is_steam_running()
    }

    /// Returns the current water temperature, if any valve reports one.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.state.read().projection().current_temperature()
    }

    /// Returns the target temperature.
    ///
    /// The live setpoint while a valve runs; the optimistic cached value
    /// after an idle [`Device::set_target_temperature`] call; the device's
    /// default when neither exists.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        self.state.read().projection().target_temperature()
    }

    /// Returns the display unit the controller is configured for.
    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.state.read().projection().temperature_unit()
    }

    /// Returns the set of outlets currently open on a valve.
    #[must_use]
    pub fn open_outlets(&self, valve: ValveId) -> OutletSet {
        self.state.read().projection().open_outlets(valve)
    }

    /// Returns `true` if the light module is installed.
    #[must_use]
    pub fn is_light_installed(&self, light: LightId) -> bool {
        self.state.read().projection().is_light_installed(light)
    }

    /// Returns the light module's display name.
    #[must_use]
    pub fn light_name(&self, light: LightId) -> String {
        self.state.read().projection().light_name(light)
    }

    /// Returns the light module's brightness.
    #[must_use]
    pub fn light_brightness(&self, light: LightId) -> Intensity {
        self.state.read().projection().light_brightness(light)
    }

    /// Returns the controller's MAC address.
    #[must_use]
    pub fn mac_address(&self) -> Option<String> {
        self.state
            .read()
            .projection()
            .mac_address()
            .map(ToOwned::to_owned)
    }

    /// Returns the controller's firmware version string.
    #[must_use]
    pub fn firmware_version(&self) -> Option<String> {
        self.state
            .read()
            .projection()
            .firmware_version()
            .map(ToOwned::to_owned)
    }

    /// Projects every telemetry point from the current state.
    #[must_use]
    pub fn telemetry_points(&self) -> Vec<TelemetryPoint> {
        self.state.read().projection().telemetry_points()
    }

    // ========== Intents ==========

    /// Opens one outlet, preserving every other outlet on both valves.
    ///
    /// The firmware configures both valves in a single quick-shower call, so
    /// the other valve's currently open set is re-sent unchanged; dropping it
    /// would shut that valve off.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails to send.
    pub async fn open_outlet(&self, valve: ValveId, outlet: u8) -> Result<(), Error> {
        tracing::debug!(valve = %valve, outlet, "Opening outlet");
        let (valve1, valve2, temperature) = {
            let state = self.state.read();
            let projection = state.projection();
            let valve1 = if valve == ValveId::ONE {
                projection.outlets_opening(ValveId::ONE, outlet)
            } else {
                projection.open_outlets(ValveId::ONE)
            };
            let valve2 = if valve == ValveId::TWO {
                projection.outlets_opening(ValveId::TWO, outlet)
            } else {
                projection.open_outlets(ValveId::TWO)
            };
            (valve1, valve2, projection.target_temperature())
        };

        self.send_quick_shower(valve1, valve2, temperature.unwrap_or(FALLBACK_TEMPERATURE))
            .await
    }

    /// Closes one outlet, preserving every other outlet on both valves.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails to send.
    pub async fn close_outlet(&self, valve: ValveId, outlet: u8) -> Result<(), Error> {
        tracing::debug!(valve = %valve, outlet, "Closing outlet");
        let (valve1, valve2, temperature) = {
            let state = self.state.read();
            let projection = state.projection();
            let valve1 = if valve == ValveId::ONE {
                projection.outlets_closing(ValveId::ONE, outlet)
            } else {
                projection.open_outlets(ValveId::ONE)
            };
            let valve2 = if valve == ValveId::TWO {
                projection.outlets_closing(ValveId::TWO, outlet)
            } else {
                projection.open_outlets(ValveId::TWO)
            };
            (valve1, valve2, projection.target_temperature())
        };

        self.send_quick_shower(valve1, valve2, temperature.unwrap_or(FALLBACK_TEMPERATURE))
            .await
    }

    /// Sets the target temperature.
    ///
    /// The value is cached optimistically (last-writer-wins) so idle UIs can
    /// reflect the intended setpoint. If the shower is running, the new
    /// temperature takes effect immediately by re-sending both valves'
    /// current outlet sets; while idle it only applies to the next start.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails to send.
    pub async fn set_target_temperature(&self, temperature: f64) -> Result<(), Error> {
        tracing::debug!(temperature, "Setting target temperature");
        let running_outlets = {
            let mut state = self.state.write();
            state.target_temperature = Some(temperature);

            let projection = state.projection();
            if projection.is_shower_on() {
                Some((
                    projection.open_outlets(ValveId::ONE),
                    projection.open_outlets(ValveId::TWO),
                ))
            } else {
                None
            }
        };

        if let Some((valve1, valve2)) = running_outlets {
            self.send_quick_shower(valve1, valve2, temperature).await?;
        }
        Ok(())
    }

    /// Turns the shower on.
    ///
    /// Reopens each valve's last-reported-open outlets at the given
    /// temperature, or the current target temperature when none is given.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails to send.
    pub async fn turn_on_shower(&self, temperature: Option<f64>) -> Result<(), Error> {
        tracing::debug!(?temperature, "Turning shower on");
        let (valve1, valve2, target) = {
            let state = self.state.read();
            let projection = state.projection();
            (
                projection.open_outlets(ValveId::ONE),
                projection.open_outlets(ValveId::TWO),
                projection.target_temperature(),
            )
        };

        let temperature = temperature.or(target).unwrap_or(FALLBACK_TEMPERATURE);
        let command = QuickShowerCommand::new(
            ValveId::ONE,
            ValveProgram::new(valve1, Temperature::new(temperature)),
            ValveProgram::new(valve2, Temperature::new(temperature)),
        );
        self.send(&command).await
    }

    /// Turns the shower off on all valves.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails to send.
    pub async fn turn_off_shower(&self) -> Result<(), Error> {
        tracing::debug!("Turning shower off");
        self.send(&StopShowerCommand).await
    }

    /// Sets a light module's intensity.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails to send.
    pub async fn set_light(&self, light: LightId, intensity: Intensity) -> Result<(), Error> {
        self.send(&LightOnCommand::new(light, intensity)).await
    }

    /// Turns a light module off.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails to send.
    pub async fn light_off(&self, light: LightId) -> Result<(), Error> {
        self.send(&LightOffCommand::new(light)).await
    }

    /// Writes a numbered device variable.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails to send.
    pub async fn save_variable(
        &self,
        index: u32,
        value: impl Into<String> + Send,
        valve: Option<ValveId>,
    ) -> Result<(), Error> {
        let mut command = SaveVariableCommand::new(index, value);
        if let Some(valve) = valve {
            command = command.for_valve(valve);
        }
        self.send(&command).await
    }

    /// Sends the quick-shower configuration once per valve number.
    ///
    /// The firmware applies the full two-valve payload on each call but some
    /// revisions only actuate the valve named by `valve_num`, so both are
    /// addressed.
    async fn send_quick_shower(
        &self,
        valve1: OutletSet,
        valve2: OutletSet,
        temperature: f64,
    ) -> Result<(), Error> {
        for valve in ValveId::ALL {
            let command = QuickShowerCommand::new(
                valve,
                ValveProgram::new(valve1.clone(), Temperature::new(temperature)),
                ValveProgram::new(valve2.clone(), Temperature::new(temperature)),
            );
            self.send(&command).await?;
        }
        Ok(())
    }

    async fn send<C: Command + Sync>(&self, command: &C) -> Result<(), Error> {
        self.protocol
            .send_command(command)
            .await
            .map_err(Error::Protocol)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use parking_lot::Mutex;
    use serde_json::json;

    use crate::error::ProtocolError;
    use crate::protocol::CommandResponse;

    type SentCommand = (String, Vec<(String, String)>);

    /// In-memory transport answering canned snapshots and recording sends.
    #[derive(Debug, Default)]
    struct FakeTransport {
        values: serde_json::Value,
        system_info: serde_json::Value,
        fail_values: Arc<AtomicBool>,
        fail_system_info: Arc<AtomicBool>,
        sent: Arc<Mutex<Vec<SentCommand>>>,
    }

    impl Protocol for FakeTransport {
        async fn send_command<C: Command + Sync>(
            &self,
            command: &C,
        ) -> Result<CommandResponse, ProtocolError> {
            let params = command
                .params()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect();
            self.sent
                .lock()
                .push((command.endpoint().to_string(), params));

            match command.endpoint() {
                "values.cgi" => {
                    if self.fail_values.load(Ordering::SeqCst) {
                        Err(ProtocolError::ConnectionFailed("values down".into()))
                    } else {
                        Ok(CommandResponse::new(self.values.to_string()))
                    }
                }
                "system_info.cgi" => {
                    if self.fail_system_info.load(Ordering::SeqCst) {
                        Err(ProtocolError::ConnectionFailed("system info down".into()))
                    } else {
                        Ok(CommandResponse::new(self.system_info.to_string()))
                    }
                }
                _ => Ok(CommandResponse::new("OK".to_string())),
            }
        }
    }

    struct Harness {
        device: Device<FakeTransport>,
        fail_values: Arc<AtomicBool>,
        fail_system_info: Arc<AtomicBool>,
        sent: Arc<Mutex<Vec<SentCommand>>>,
    }

    fn harness(values: serde_json::Value, system_info: serde_json::Value) -> Harness {
        let transport = FakeTransport {
            values,
            system_info,
            ..FakeTransport::default()
        };
        let fail_values = Arc::clone(&transport.fail_values);
        let fail_system_info = Arc::clone(&transport.fail_system_info);
        let sent = Arc::clone(&transport.sent);
        Harness {
            device: Device::new(transport),
            fail_values,
            fail_system_info,
            sent,
        }
    }

    fn two_valve_values() -> serde_json::Value {
        json!({
            "valve1_installed": true,
            "valve2_installed": true,
            "valve1PortsAvailable": "3",
            "valve1_outlet1_func": {"id": 5},
            "valve1_outlet2_func": {"id": 7},
            "valve1_outlet3_func": {"id": 2},
            "valve2PortsAvailable": "2",
            "valve2_outlet1_func": {"id": 9},
            "valve2_outlet2_func": {"id": 3},
            "light1_installed": true,
            "light1_level": 40,
            "def_temp": 100,
        })
    }

    fn sent_to(harness: &Harness, endpoint: &str) -> Vec<SentCommand> {
        harness
            .sent
            .lock()
            .iter()
            .filter(|(e, _)| e == endpoint)
            .cloned()
            .collect()
    }

    fn param<'a>(command: &'a SentCommand, key: &str) -> &'a str {
        command
            .1
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[tokio::test]
    async fn refresh_isolates_fetch_failures() {
        let harness = harness(two_valve_values(), json!({"valve1outlet5": true}));

        let outcome = harness.device.refresh().await;
        assert!(outcome.is_success());
        assert!(harness.device.is_outlet_on(ValveId::ONE, 1));

        harness.fail_system_info.store(true, Ordering::SeqCst);
        let outcome = harness.device.refresh().await;

        assert!(outcome.values_updated);
        assert!(!outcome.system_info_updated);
        assert!(outcome.is_update_failed());
        assert!(!harness.device.last_refresh_succeeded());

        // The previous system-info snapshot stays in effect, and the values
        // side is unaffected.
        assert!(harness.device.is_outlet_on(ValveId::ONE, 1));
        assert_eq!(harness.device.light_brightness(LightId::ONE).value(), 40);
    }

    #[tokio::test]
    async fn refresh_keeps_previous_values_snapshot_on_failure() {
        let harness = harness(two_valve_values(), json!({}));

        harness.device.refresh().await;
        harness.fail_values.store(true, Ordering::SeqCst);
        let outcome = harness.device.refresh().await;

        assert!(!outcome.values_updated);
        assert_eq!(harness.device.light_brightness(LightId::ONE).value(), 40);
        assert!(harness.device.is_valve_installed(ValveId::ONE));
    }

    #[tokio::test]
    async fn open_outlet_sends_both_valve_numbers_with_preserved_sets() {
        let harness = harness(
            two_valve_values(),
            json!({
                "valve1outlet5": true,
                "valve2outlet9": true,
                "valve1Setpoint": 104,
            }),
        );
        harness.device.refresh().await;

        harness
            .device
            .open_outlet(ValveId::ONE, 2)
            .await
            .unwrap();

        let calls = sent_to(&harness, "quick_shower.cgi");
        assert_eq!(calls.len(), 2);
        assert_eq!(param(&calls[0], "valve_num"), "1");
        assert_eq!(param(&calls[1], "valve_num"), "2");
        for call in &calls {
            assert_eq!(param(call, "valve1_outlet"), "12");
            assert_eq!(param(call, "valve2_outlet"), "1");
            assert_eq!(param(call, "valve1_temp"), "104.0");
        }
    }

    #[tokio::test]
    async fn close_outlet_on_valve_two_leaves_valve_one_untouched() {
        let harness = harness(
            two_valve_values(),
            json!({
                "valve1outlet5": true,
                "valve2outlet9": true,
                "valve2outlet3": true,
            }),
        );
        harness.device.refresh().await;

        harness
            .device
            .close_outlet(ValveId::TWO, 2)
            .await
            .unwrap();

        let calls = sent_to(&harness, "quick_shower.cgi");
        assert_eq!(calls.len(), 2);
        for call in &calls {
            assert_eq!(param(call, "valve1_outlet"), "1");
            assert_eq!(param(call, "valve2_outlet"), "1");
        }
    }

    #[tokio::test]
    async fn set_target_temperature_only_caches_while_idle() {
        let harness = harness(two_valve_values(), json!({"valve1Setpoint": 104}));
        harness.device.refresh().await;

        harness.device.set_target_temperature(96.0).await.unwrap();

        assert!(sent_to(&harness, "quick_shower.cgi").is_empty());
        assert_eq!(harness.device.target_temperature(), Some(96.0));
    }

    #[tokio::test]
    async fn set_target_temperature_reissues_while_running() {
        let harness = harness(
            two_valve_values(),
            json!({
                "valve1outlet5": true,
                "valve1_Currentstatus": "On",
                "valve1Setpoint": 104,
            }),
        );
        harness.device.refresh().await;

        harness.device.set_target_temperature(96.0).await.unwrap();

        let calls = sent_to(&harness, "quick_shower.cgi");
        assert_eq!(calls.len(), 2);
        for call in &calls {
            assert_eq!(param(call, "valve1_outlet"), "1");
            assert_eq!(param(call, "valve1_temp"), "96.0");
        }
    }

    #[tokio::test]
    async fn turn_on_shower_issues_single_call() {
        let harness = harness(
            two_valve_values(),
            json!({"valve1outlet5": true, "valve1Setpoint": 104}),
        );
        harness.device.refresh().await;

        harness.device.turn_on_shower(None).await.unwrap();

        let calls = sent_to(&harness, "quick_shower.cgi");
        assert_eq!(calls.len(), 1);
        assert_eq!(param(&calls[0], "valve_num"), "1");
        assert_eq!(param(&calls[0], "valve1_outlet"), "1");
        assert_eq!(param(&calls[0], "valve1_temp"), "104.0");
    }

    #[tokio::test]
    async fn turn_on_shower_without_any_temperature_source_uses_fallback() {
        let harness = harness(json!({}), json!({}));
        harness.device.refresh().await;

        harness.device.turn_on_shower(None).await.unwrap();

        let calls = sent_to(&harness, "quick_shower.cgi");
        assert_eq!(param(&calls[0], "valve1_temp"), "100.0");
    }

    #[tokio::test]
    async fn commands_do_not_mutate_projected_state() {
        let harness = harness(two_valve_values(), json!({}));
        harness.device.refresh().await;

        harness
            .device
            .open_outlet(ValveId::ONE, 1)
            .await
            .unwrap();

        // The command only requests a transition; the projection changes at
        // the next refresh.
        assert!(!harness.device.is_outlet_on(ValveId::ONE, 1));
    }
}
