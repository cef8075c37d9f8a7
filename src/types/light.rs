// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light module addressing and brightness values.
//!
//! A DTV+ controller drives up to two light modules. The device expresses
//! brightness as a percentage (0-100); many UI frameworks use a 0-255 level
//! instead, so [`Intensity`] carries the conversions between the two domains.

use std::fmt;

use crate::error::ValueError;

/// Identifies one of the controller's two light modules.
///
/// # Examples
///
/// ```
/// use kohler_lib::types::LightId;
///
/// let light = LightId::new(2).unwrap();
/// assert_eq!(light, LightId::TWO);
///
/// assert!(LightId::new(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(u8);

impl LightId {
    /// Maximum valid light module number.
    pub const MAX: u8 = 2;

    /// Light module 1.
    pub const ONE: Self = Self(1);

    /// Light module 2.
    pub const TWO: Self = Self(2);

    /// Both light modules, in ascending order.
    pub const ALL: [Self; 2] = [Self::ONE, Self::TWO];

    /// Creates a light identifier from a 1-based module number.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidLightModule` if the number is 0 or
    /// greater than 2.
    pub fn new(number: u8) -> Result<Self, ValueError> {
        if number == 0 || number > Self::MAX {
            return Err(ValueError::InvalidLightModule(number));
        }
        Ok(Self(number))
    }

    /// Returns the 1-based module number used in telemetry keys and commands.
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for LightId {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Light brightness as a percentage (0-100).
///
/// The controller uses 0-100 for light intensity, where 0 is off and 100 is
/// full brightness.
///
/// # Level conversion
///
/// UI frameworks commonly express brightness as a 0-255 level. The conversion
/// is linear with fixed rounding in each direction: device to level rounds to
/// nearest, level to device truncates. Round-tripping a device value is
/// therefore stable to within one percentage point.
///
/// # Examples
///
/// ```
/// use kohler_lib::types::Intensity;
///
/// let intensity = Intensity::new(75).unwrap();
/// assert_eq!(intensity.value(), 75);
/// assert_eq!(intensity.level(), 191);
///
/// assert_eq!(Intensity::MAX.level(), 255);
/// assert_eq!(Intensity::from_level(255).value(), 100);
///
/// // Invalid values return an error
/// assert!(Intensity::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Intensity(u8);

impl Intensity {
    /// Minimum intensity (off).
    pub const MIN: Self = Self(0);

    /// Maximum intensity (full brightness).
    pub const MAX: Self = Self(100);

    /// Creates a new intensity value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates an intensity value, clamping to the valid range.
    ///
    /// Values above 100 are clamped to 100.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Creates an intensity from a 0-255 brightness level.
    ///
    /// The level is scaled down linearly and truncated, so `from_level(255)`
    /// is exactly 100.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_level(level: u8) -> Self {
        // (255 * 100) / 255 == 100, so the result always fits.
        Self(((level as u16 * 100) / 255) as u8)
    }

    /// Returns the intensity percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the 0-255 brightness level for this intensity.
    ///
    /// Scales up linearly and rounds to nearest, so `level()` of 100 is
    /// exactly 255 and `level()` of 0 is 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn level(&self) -> u8 {
        // 100 * 2.55 == 255.0, so the rounded result always fits.
        (f32::from(self.0) * 2.55).round() as u8
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Intensity {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
