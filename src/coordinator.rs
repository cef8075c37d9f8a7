// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polling scheduler.
//!
//! One timer drives all telemetry refreshes: each tick runs a single refresh
//! cycle to completion, so cycles never overlap. Ticks are skipped while no
//! refresh subscriber is registered, and a failed cycle is simply retried at
//! the next tick; there is no backoff or circuit breaking.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::device::Device;
use crate::protocol::HttpClient;

/// Default polling interval.
///
/// The firmware recomputes its telemetry a few times per minute; polling
/// faster than this only re-reads identical snapshots.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(20);

/// Handle to a running polling task.
///
/// The task stops when the handle is dropped or [`stop`](Poller::stop) is
/// called.
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// Stops the polling task.
    pub fn stop(&self) {
        self.handle.abort();
    }

    /// Returns `true` if the polling task is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl Device<HttpClient> {
    /// Starts polling the device on a fixed interval.
    ///
    /// Each tick runs one [`refresh`](Device::refresh) cycle; subscribers
    /// registered via [`on_refresh`](Device::on_refresh) receive every
    /// cycle's outcome. Ticks are skipped while no subscriber is registered.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use kohler_lib::{coordinator::DEFAULT_POLL_INTERVAL, Device};
    ///
    /// # async fn example() -> kohler_lib::Result<()> {
    /// let device = Arc::new(
    ///     Device::http("192.168.1.100")
    ///         .accept_liability_terms()
    ///         .build()
    ///         .await?,
    /// );
    ///
    /// device.on_refresh(|outcome| {
    ///     if outcome.is_update_failed() {
    ///         eprintln!("update failed; previous state retained");
    ///     }
    /// });
    ///
    /// let poller = Arc::clone(&device).start_polling(DEFAULT_POLL_INTERVAL);
    /// // ... poller stops when dropped
    /// # drop(poller);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn start_polling(self: Arc<Self>, interval: Duration) -> Poller {
        let device = self;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval() fires immediately; the builder's initial refresh
            // already covered startup.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if !device.has_subscribers() {
                    continue;
                }
                let outcome = device.refresh().await;
                if outcome.is_update_failed() {
                    tracing::debug!(?outcome, "Refresh cycle failed; retrying next tick");
                }
            }
        });
        Poller { handle }
    }
}
