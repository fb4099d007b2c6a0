//! Engine configuration
//!
//! Every section has defaults matching the reference rule tables, so an empty
//! document (`{}`) is a valid configuration.
//!
//! ```
//! use wildfire_risk_core::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.explanation.max_factors, 3);
//! assert_eq!(config.fdi.category_cutoffs, [20.0, 45.0, 60.0, 75.0]);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::core_types::levels::Factor;
use crate::core_types::units::Kilometers;
use crate::error::ConfigError;
use crate::scoring::DEFAULT_EXPLANATION_FACTORS;

/// Largest number of rounding decimals accepted for FDI values
pub const MAX_FDI_PRECISION: u32 = 6;

/// Explanation text settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationConfig {
    /// How many dominant factors the explanation names
    pub max_factors: usize,
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self {
            max_factors: DEFAULT_EXPLANATION_FACTORS,
        }
    }
}

/// Fire Danger Index settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FdiConfig {
    /// Days since rain saturate at this horizon (the rain history lookback)
    pub rain_horizon_days: u32,
    /// Upper (inclusive) bounds of Blue, Green, Yellow and Orange; anything
    /// above the last cutoff is Red
    pub category_cutoffs: [f32; 4],
    /// Decimal places the reported value is rounded to
    pub precision: u32,
}

impl Default for FdiConfig {
    fn default() -> Self {
        Self {
            rain_horizon_days: 90,
            category_cutoffs: [20.0, 45.0, 60.0, 75.0],
            precision: 1,
        }
    }
}

/// Active fire threat settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatConfig {
    /// Detections within this distance count as nearby
    pub check_radius_km: Kilometers,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            check_radius_km: Kilometers::new(50.0),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub explanation: ExplanationConfig,
    pub fdi: FdiConfig,
    pub threat: ThreatConfig,
}

impl EngineConfig {
    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking explanation, FDI and
    /// threat settings in that order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = Factor::ALL.len();
        if !(1..=max).contains(&self.explanation.max_factors) {
            return Err(ConfigError::ExplanationFactorCount {
                value: self.explanation.max_factors,
                max,
            });
        }

        if self.fdi.rain_horizon_days == 0 {
            return Err(ConfigError::ZeroRainHorizon);
        }
        if self.fdi.precision > MAX_FDI_PRECISION {
            return Err(ConfigError::Precision {
                value: self.fdi.precision,
                max: MAX_FDI_PRECISION,
            });
        }
        let cutoffs = self.fdi.category_cutoffs;
        let ascending = cutoffs.windows(2).all(|w| w[0] < w[1]);
        if !ascending || cutoffs[0] < 0.0 || !cutoffs.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::CategoryCutoffs { cutoffs });
        }

        let radius = self.threat.check_radius_km;
        if !radius.is_finite() || *radius <= 0.0 {
            return Err(ConfigError::CheckRadius { value: *radius });
        }

        Ok(())
    }
}
