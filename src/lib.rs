// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Kohler Lib - A Rust library to control Kohler DTV+ digital shower systems.
//!
//! This library provides async APIs to monitor and control a DTV+ shower
//! controller over its HTTP CGI interface: polling its two telemetry
//! snapshots, projecting per-outlet state from valve-level status, and
//! encoding per-outlet intents as the whole-valve commands the firmware
//! accepts.
//!
//! # Supported Features
//!
//! - **Shower control**: Open/close individual outlets, turn the shower
//!   on/off, set the target temperature
//! - **Light control**: Per-module intensity (0-100%) with 0-255 level
//!   conversions for UI frameworks
//! - **Telemetry**: Valve, outlet, shower, and steam status; current and
//!   target temperatures; device identity
//! - **Polling**: A single-timer scheduler with per-fetch failure isolation
//!   and refresh subscriptions
//!
//! # The outlet model
//!
//! The firmware has no notion of toggling one outlet. Its quick-shower
//! command takes a complete desired outlet set per valve, and which physical
//! port serves which logical outlet function can be reassigned from the
//! device's own UI. This library rebuilds the port-to-function mapping on
//! every refresh and, when toggling a single outlet, re-sends every other
//! outlet's current state unchanged.
//!
//! # Quick Start
//!
//! ```no_run
//! use kohler_lib::{Device, ValveId};
//!
//! #[tokio::main]
//! async fn main() -> kohler_lib::Result<()> {
//!     // Construction is gated on an explicit liability acknowledgement
//!     let device = Device::http("192.168.1.100")
//!         .accept_liability_terms()
//!         .build()
//!         .await?;
//!
//!     if let Some(temp) = device.current_temperature() {
//!         println!("water is at {temp}{}", device.temperature_unit());
//!     }
//!
//!     // Open outlet 2 on valve 1; every other open outlet is preserved
//!     device.open_outlet(ValveId::ONE, 2).await?;
//!
//!     // Commands only request a transition; refresh to observe the result
//!     device.refresh().await;
//!     assert!(device.is_outlet_on(ValveId::ONE, 2));
//!     Ok(())
//! }
//! ```
//!
//! ## Polling with subscriptions
//!
//! ```no_run
//! use std::sync::Arc;
//! use kohler_lib::coordinator::DEFAULT_POLL_INTERVAL;
//! use kohler_lib::Device;
//!
//! #[tokio::main]
//! async fn main() -> kohler_lib::Result<()> {
//!     let device = Arc::new(
//!         Device::http("192.168.1.100")
//!             .accept_liability_terms()
//!             .build()
//!             .await?,
//!     );
//!
//!     // Polling only runs while at least one subscriber is registered
//!     let subscription = device.on_refresh(|outcome| {
//!         if outcome.is_update_failed() {
//!             eprintln!("telemetry stale this cycle");
//!         }
//!     });
//!
//!     let poller = Arc::clone(&device).start_polling(DEFAULT_POLL_INTERVAL);
//!
//!     // ...
//!
//!     device.unsubscribe(subscription);
//!     drop(poller);
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod coordinator;
mod device;
pub mod error;
pub mod protocol;
pub mod state;
pub mod subscription;
pub mod telemetry;
pub mod types;

pub use command::{
    Command, LightOffCommand, LightOnCommand, QuickShowerCommand, SaveVariableCommand,
    StopShowerCommand, SystemInfoCommand, ValuesCommand, ValveProgram,
};
pub use coordinator::Poller;
pub use device::{Device, HttpDeviceBuilder, RefreshOutcome};
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
pub use protocol::{CommandResponse, HttpClient, HttpConfig, Protocol};
pub use state::{OutletMap, Projection};
pub use subscription::{CallbackRegistry, SubscriptionId};
pub use telemetry::{PointKind, PointState, Snapshot, TelemetryPoint};
pub use types::{Intensity, LightId, OutletSet, Temperature, TemperatureUnit, ValveId};
