//! Fire Danger Index (FDI)
//!
//! A numeric danger index computed from current weather and rain history,
//! reported alongside the categorical risk tier but never fed into it.
//!
//! # Model
//!
//! ```text
//! base  = ((T - 3) × 6.7 / 2 + (90 - H) × 1.3) / 3.3
//! FDI   = max(0, (base + wind_addition(V)) × rain_adjustment(R, D))
//! ```
//!
//! Where:
//! - **T** = Air temperature (°C)
//! - **H** = Relative humidity (%)
//! - **V** = Wind speed (km/h), see [`wind::wind_addition`]
//! - **R** = Rainfall of the last rain event (mm)
//! - **D** = Days since that rain, saturated at the configured horizon, see
//!   [`rain_adjustment::rain_adjustment_factor`]
//!
//! The base index rises 1.015 per °C and falls 0.394 per % humidity. Wind
//! enters only through the step addition.
//!
//! # Categories
//!
//! With the default cutoffs (upper bounds inclusive):
//! - **0-20**: Blue (insignificant)
//! - **20-45**: Green (low)
//! - **45-60**: Yellow (moderate)
//! - **60-75**: Orange (high)
//! - **75+**: Red (extremely high)
//!
//! # Example
//!
//! ```
//! use wildfire_risk_core::config::FdiConfig;
//! use wildfire_risk_core::core_types::{Celsius, KilometersPerHour, Millimeters, Percent};
//! use wildfire_risk_core::fdi::{calculate_fdi, FdiCategory, FdiInputs};
//!
//! let inputs = FdiInputs {
//!     temperature: Celsius::new(30.0),
//!     humidity: Percent::new(30.0),
//!     wind_speed: KilometersPerHour::new(20.0),
//!     rainfall: Millimeters::new(0.0),
//!     days_since_rain: 30,
//! };
//! let fdi = calculate_fdi(&inputs, &FdiConfig::default()).unwrap();
//! assert_eq!(fdi.value, 61.0);
//! assert_eq!(fdi.category, FdiCategory::Orange);
//! ```

pub mod rain_adjustment;
pub mod wind;

pub use rain_adjustment::{rain_adjustment_factor, RAIN_ADJUSTMENT_TABLE};
pub use wind::wind_addition;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::config::FdiConfig;
use crate::core_types::units::{Celsius, KilometersPerHour, Millimeters, Percent};
use crate::error::{ValidationError, Violation};

/// Raw weather and rain inputs of the FDI model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FdiInputs {
    pub temperature: Celsius,
    /// Relative humidity, `[0, 100]`
    pub humidity: Percent,
    /// Wind speed, non-negative
    pub wind_speed: KilometersPerHour,
    /// Depth of the last rain event, non-negative
    pub rainfall: Millimeters,
    /// Whole days since the last rain event
    pub days_since_rain: u32,
}

impl FdiInputs {
    /// Check every numeric domain constraint.
    ///
    /// Out-of-range values are rejected, never clamped. Saturating
    /// `days_since_rain` at the horizon is not a validation concern.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        if !self.temperature.is_finite() {
            violations.push(Violation::out_of_range(
                "temperature_c",
                *self.temperature,
                "must be a finite number",
            ));
        }
        if !self.humidity.is_valid() {
            violations.push(Violation::out_of_range(
                "humidity_pct",
                *self.humidity,
                "must be within [0, 100]",
            ));
        }
        if !self.wind_speed.is_finite() || *self.wind_speed < 0.0 {
            violations.push(Violation::out_of_range(
                "wind_speed_kmh",
                *self.wind_speed,
                "must be finite and non-negative",
            ));
        }
        if !self.rainfall.is_finite() || *self.rainfall < 0.0 {
            violations.push(Violation::out_of_range(
                "rainfall_mm_last_event",
                *self.rainfall,
                "must be finite and non-negative",
            ));
        }
        ValidationError::check("FDI inputs", violations)
    }
}

/// Five ordered FDI colour categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FdiCategory {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
}

impl FdiCategory {
    /// All categories, least dangerous first
    pub const ALL: [FdiCategory; 5] = [
        FdiCategory::Blue,
        FdiCategory::Green,
        FdiCategory::Yellow,
        FdiCategory::Orange,
        FdiCategory::Red,
    ];

    /// Category for an FDI value given ascending, upper-inclusive cutoffs
    #[must_use]
    pub fn from_value(value: f32, cutoffs: &[f32; 4]) -> Self {
        cutoffs
            .iter()
            .zip(Self::ALL)
            .find(|(cutoff, _)| value <= **cutoff)
            .map_or(FdiCategory::Red, |(_, category)| category)
    }

    /// Colour name ("Orange")
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FdiCategory::Blue => "Blue",
            FdiCategory::Green => "Green",
            FdiCategory::Yellow => "Yellow",
            FdiCategory::Orange => "Orange",
            FdiCategory::Red => "Red",
        }
    }

    /// Plain-language danger level of the colour
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            FdiCategory::Blue => "insignificant",
            FdiCategory::Green => "low",
            FdiCategory::Yellow => "moderate",
            FdiCategory::Orange => "high",
            FdiCategory::Red => "extremely high",
        }
    }

    /// Colour with its description, e.g. "Orange (high)"
    #[must_use]
    pub fn label(self) -> String {
        format!("{} ({})", self.as_str(), self.description())
    }
}

impl fmt::Display for FdiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// FDI value, category and the intermediate stages that produced them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FdiResult {
    /// Non-negative index, rounded to the configured precision
    pub value: f32,
    pub category: FdiCategory,
    /// Temperature/humidity component before wind and rain
    pub base_index: f32,
    /// Step bonus for wind
    pub wind_addition: f32,
    /// Rain recovery multiplier applied last
    pub rain_adjustment: f32,
}

/// Base index from temperature and humidity.
///
/// Rises with temperature and falls with humidity; may be negative in cold,
/// saturated air (the final value is clamped, not the base).
#[must_use]
pub fn base_index(temperature: Celsius, humidity: Percent) -> f32 {
    let temperature_factor = (*temperature - 3.0) * 6.7;
    let humidity_factor = (90.0 - *humidity) * 2.6;
    let burn_factor = temperature_factor - humidity_factor;
    (burn_factor / 2.0 + humidity_factor) / 3.3
}

fn round_to(value: f32, decimals: u32) -> f32 {
    let scale = 10f32.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Compute the Fire Danger Index.
///
/// # Errors
///
/// Returns a [`ValidationError`] when any input violates its domain (see
/// [`FdiInputs::validate`]).
pub fn calculate_fdi(inputs: &FdiInputs, config: &FdiConfig) -> Result<FdiResult, ValidationError> {
    if let Err(err) = inputs.validate() {
        warn!(error = %err, "Rejected FDI inputs");
        return Err(err);
    }

    let days_since_rain = inputs.days_since_rain.min(config.rain_horizon_days);
    let base = base_index(inputs.temperature, inputs.humidity);
    let wind = wind_addition(inputs.wind_speed);
    let rain = rain_adjustment_factor(inputs.rainfall, days_since_rain);

    let raw = ((base + wind) * rain).max(0.0);
    let value = round_to(raw, config.precision);
    let category = FdiCategory::from_value(value, &config.category_cutoffs);

    debug!(
        base_index = base,
        wind_addition = wind,
        rain_adjustment = rain,
        days_since_rain,
        value,
        category = %category,
        "Computed fire danger index"
    );

    Ok(FdiResult {
        value,
        category,
        base_index: base,
        wind_addition: wind,
        rain_adjustment: rain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs(temperature: f32, humidity: f32, wind: f32, rain: f32, days: u32) -> FdiInputs {
        FdiInputs {
            temperature: Celsius::new(temperature),
            humidity: Percent::new(humidity),
            wind_speed: KilometersPerHour::new(wind),
            rainfall: Millimeters::new(rain),
            days_since_rain: days,
        }
    }

    #[test]
    fn test_base_index_formula() {
        // ((30 - 3) × 6.7 / 2 + (90 - 30) × 1.3) / 3.3 = 168.45 / 3.3
        let base = base_index(Celsius::new(30.0), Percent::new(30.0));
        assert_relative_eq!(base, 51.045_45, epsilon = 1e-3);
    }

    #[test]
    fn test_fdi_dry_spell() {
        let fdi = calculate_fdi(&inputs(30.0, 30.0, 20.0, 0.0, 30), &FdiConfig::default()).unwrap();
        // 51.045 + 10 (wind ≥ 17) × 1.0 (fully recovered)
        assert_eq!(fdi.wind_addition, 10.0);
        assert_eq!(fdi.rain_adjustment, 1.0);
        assert_eq!(fdi.value, 61.0);
        assert_eq!(fdi.category, FdiCategory::Orange);
    }

    #[test]
    fn test_fdi_day_after_light_rain() {
        let fdi = calculate_fdi(&inputs(30.0, 30.0, 20.0, 0.0, 1), &FdiConfig::default()).unwrap();
        assert_eq!(fdi.rain_adjustment, 0.7);
        // 61.045 × 0.7 = 42.73
        assert_eq!(fdi.value, 42.7);
        assert_eq!(fdi.category, FdiCategory::Green);
    }

    #[test]
    fn test_value_is_clamped_at_zero() {
        let fdi = calculate_fdi(&inputs(-10.0, 100.0, 0.0, 0.0, 5), &FdiConfig::default()).unwrap();
        assert!(fdi.base_index < 0.0);
        assert_eq!(fdi.value, 0.0);
        assert_eq!(fdi.category, FdiCategory::Blue);
    }

    #[test]
    fn test_heavy_recent_rain_zeroes_the_index() {
        let fdi = calculate_fdi(&inputs(40.0, 10.0, 50.0, 80.0, 1), &FdiConfig::default()).unwrap();
        assert_eq!(fdi.rain_adjustment, 0.0);
        assert_eq!(fdi.value, 0.0);
    }

    #[test]
    fn test_category_cutoffs_are_upper_inclusive() {
        let cutoffs = FdiConfig::default().category_cutoffs;
        assert_eq!(FdiCategory::from_value(0.0, &cutoffs), FdiCategory::Blue);
        assert_eq!(FdiCategory::from_value(20.0, &cutoffs), FdiCategory::Blue);
        assert_eq!(FdiCategory::from_value(20.1, &cutoffs), FdiCategory::Green);
        assert_eq!(FdiCategory::from_value(45.0, &cutoffs), FdiCategory::Green);
        assert_eq!(FdiCategory::from_value(60.0, &cutoffs), FdiCategory::Yellow);
        assert_eq!(FdiCategory::from_value(75.0, &cutoffs), FdiCategory::Orange);
        assert_eq!(FdiCategory::from_value(75.1, &cutoffs), FdiCategory::Red);
    }

    #[test]
    fn test_precision_controls_rounding() {
        let config = FdiConfig {
            precision: 0,
            ..FdiConfig::default()
        };
        let fdi = calculate_fdi(&inputs(30.0, 30.0, 20.0, 0.0, 1), &config).unwrap();
        assert_eq!(fdi.value, 43.0);
    }

    #[test]
    fn test_days_beyond_horizon_saturate() {
        let config = FdiConfig {
            rain_horizon_days: 2,
            ..FdiConfig::default()
        };
        // 100 mm of rain needs 21 days to recover, the horizon stops at day 2
        let capped = calculate_fdi(&inputs(35.0, 20.0, 30.0, 100.0, 60), &config).unwrap();
        assert_eq!(capped.rain_adjustment, 0.0);

        let uncapped =
            calculate_fdi(&inputs(35.0, 20.0, 30.0, 100.0, 60), &FdiConfig::default()).unwrap();
        assert_eq!(uncapped.rain_adjustment, 1.0);
    }

    #[test]
    fn test_validation_lists_every_bad_input() {
        let err = calculate_fdi(&inputs(f32::NAN, 120.0, -1.0, -0.5, 3), &FdiConfig::default())
            .unwrap_err();
        assert_eq!(
            err.fields(),
            vec![
                "temperature_c",
                "humidity_pct",
                "wind_speed_kmh",
                "rainfall_mm_last_event"
            ]
        );
    }

    #[test]
    fn test_boundary_inputs_are_valid() {
        let config = FdiConfig::default();
        assert!(calculate_fdi(&inputs(25.0, 0.0, 0.0, 0.0, 0), &config).is_ok());
        assert!(calculate_fdi(&inputs(25.0, 100.0, 0.0, 0.0, u32::MAX), &config).is_ok());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(FdiCategory::Blue.label(), "Blue (insignificant)");
        assert_eq!(FdiCategory::Red.label(), "Red (extremely high)");
    }
}
