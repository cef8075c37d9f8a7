// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builder for HTTP devices.

use std::time::Duration;

use crate::device::Device;
use crate::error::{DeviceError, Error};
use crate::protocol::{HttpClient, HttpConfig};

/// Builder for creating a [`Device`] over HTTP.
///
/// Construction is gated on an explicit liability acknowledgement: remotely
/// opening valves can scald whoever is in the shower, so the integrator must
/// opt in with [`accept_liability_terms`](Self::accept_liability_terms)
/// before a device will be built.
///
/// # Examples
///
/// ```no_run
/// use kohler_lib::Device;
///
/// # async fn example() -> kohler_lib::Result<()> {
/// let device = Device::http("192.168.1.100")
///     .accept_liability_terms()
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpDeviceBuilder {
    config: HttpConfig,
    liability_terms_accepted: bool,
}

impl HttpDeviceBuilder {
    pub(crate) fn new(host: impl Into<String>) -> Self {
        Self {
            config: HttpConfig::new(host),
            liability_terms_accepted: false,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Sets the default request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Accepts the waiver of liability, enabling construction.
    #[must_use]
    pub fn accept_liability_terms(mut self) -> Self {
        self.liability_terms_accepted = true;
        self
    }

    /// Builds the device and runs an initial refresh.
    ///
    /// The initial refresh both primes the projections and verifies the
    /// device is reachable; an unreachable values endpoint fails the build.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::LiabilityTermsNotAccepted` if the waiver was not
    /// accepted, a protocol error if the client cannot be created, or
    /// `DeviceError::NotReady` if the controller does not answer.
    pub async fn build(self) -> Result<Device<HttpClient>, Error> {
        let host = self.config.host().to_string();
        let device = self.build_without_refresh()?;

        let outcome = device.refresh().await;
        if !outcome.values_updated {
            return Err(Error::Device(DeviceError::NotReady(format!(
                "no response from {host}"
            ))));
        }

        Ok(device)
    }

    /// Builds the device without contacting it.
    ///
    /// Projections report everything off until the first
    /// [`refresh`](Device::refresh).
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::LiabilityTermsNotAccepted` if the waiver was not
    /// accepted, or a protocol error if the client cannot be created.
    pub fn build_without_refresh(self) -> Result<Device<HttpClient>, Error> {
        if !self.liability_terms_accepted {
            return Err(Error::Device(DeviceError::LiabilityTermsNotAccepted));
        }

        let client = self.config.into_client().map_err(Error::Protocol)?;
        Ok(Device::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_liability_acceptance() {
        let result = Device::http("192.168.1.100").build_without_refresh();
        assert!(matches!(
            result,
            Err(Error::Device(DeviceError::LiabilityTermsNotAccepted))
        ));
    }

    #[test]
    fn build_without_refresh_starts_inert() {
        let device = Device::http("192.168.1.100")
            .accept_liability_terms()
            .build_without_refresh()
            .unwrap();

        assert!(!device.is_shower_on());
        assert!(!device.last_refresh_succeeded());
    }
}
