//! Semantic unit types for measured environmental quantities
//!
//! Newtype wrappers keep the raw weather, rain and terrain measurements that
//! feed the engine from being mixed up (a humidity percentage passed where a
//! wind speed is expected, millimetres of rain passed as kilometres).
//!
//! # Design Philosophy
//! - All quantities use f32; the inputs come from weather feeds with at most
//!   one decimal of precision
//! - Total ordering via `Ord` (`total_cmp`, NaN sorts above every value)
//! - Constructors do not validate. Domain checks happen where the value is
//!   consumed so they can be reported as validation errors instead of panics
//! - Serde support is transparent (a `Percent` serialises as a bare number)
//!
//! # Usage
//! ```
//! use wildfire_risk_core::core_types::units::{Celsius, KilometersPerHour, Percent};
//!
//! let temp = Celsius::new(31.5);
//! let wind = KilometersPerHour::new(36.0);
//! assert!((*wind.to_mps() - 10.0).abs() < 0.001);
//! assert_eq!(Percent::new(40.0).max(Percent::new(12.0)), Percent::new(40.0));
//! assert_eq!(temp.to_string(), "31.5°C");
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Shared boilerplate for f32 unit newtypes: total ordering, `Deref` to the
/// raw value, raw conversions and a `Display` with the unit suffix.
macro_rules! unit_newtype {
    ($name:ident, $suffix:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f32;
            #[inline]
            fn deref(&self) -> &f32 {
                &self.0
            }
        }

        impl $name {
            /// Create a new value. No range validation is performed.
            #[inline]
            #[must_use]
            pub const fn new(value: f32) -> Self {
                $name(value)
            }

            /// Get the raw f32 value
            #[inline]
            #[must_use]
            pub fn value(self) -> f32 {
                self.0
            }
        }

        impl From<f32> for $name {
            fn from(v: f32) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f32 {
            fn from(v: $name) -> f32 {
                v.0
            }
        }

        impl PartialEq<f32> for $name {
            fn eq(&self, other: &f32) -> bool {
                self.0 == *other
            }
        }

        impl PartialOrd<f32> for $name {
            fn partial_cmp(&self, other: &f32) -> Option<Ordering> {
                self.0.partial_cmp(other)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("{:.1}", $suffix), self.0)
            }
        }
    };
}

/// Air temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Celsius(f32);

unit_newtype!(Celsius, "°C");

/// Relative humidity as a percentage (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Percent(f32);

unit_newtype!(Percent, "%");

impl Percent {
    /// Whether the value is a valid percentage in `[0, 100]`
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        (0.0..=100.0).contains(&self.0)
    }
}

/// Wind speed in km/h (the unit weather feeds report at 10 m height)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct KilometersPerHour(f32);

unit_newtype!(KilometersPerHour, " km/h");

impl KilometersPerHour {
    /// Convert to m/s
    #[inline]
    #[must_use]
    pub fn to_mps(self) -> MetersPerSecond {
        MetersPerSecond(self.0 / 3.6)
    }
}

/// Wind speed in m/s
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MetersPerSecond(f32);

unit_newtype!(MetersPerSecond, " m/s");

impl MetersPerSecond {
    /// Convert to km/h
    #[inline]
    #[must_use]
    pub fn to_kmh(self) -> KilometersPerHour {
        KilometersPerHour(self.0 * 3.6)
    }
}

/// Rainfall depth in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Millimeters(f32);

unit_newtype!(Millimeters, " mm");

/// Terrain slope angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Degrees(f32);

unit_newtype!(Degrees, "°");

impl Degrees {
    /// Build from an angle in radians
    #[inline]
    #[must_use]
    pub fn from_radians(radians: f32) -> Self {
        Degrees(radians.to_degrees())
    }
}

/// Elevation or horizontal spacing in metres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Meters(f32);

unit_newtype!(Meters, " m");

/// Ground distance in kilometres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kilometers(f32);

unit_newtype!(Kilometers, " km");
