//! Configured entry point to the rule engine

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::core_types::snapshot::{EnvironmentalSnapshot, SnapshotInput};
use crate::error::{ConfigError, ValidationError};
use crate::fdi::{calculate_fdi, FdiInputs, FdiResult};
use crate::hotspots::{self, FireDetection, FireThreatAssessment, GeoPoint};
use crate::scoring::{self, RiskAssessment, RiskTier};

/// Risk engine with a validated configuration.
///
/// Immutable after construction; share it across threads freely.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: EngineConfig,
}

impl RiskEngine {
    /// Create an engine from a configuration
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration is malformed.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            "Risk engine configured: {} explanation factors, {} day rain horizon, FDI cutoffs {:?}",
            config.explanation.max_factors, config.fdi.rain_horizon_days, config.fdi.category_cutoffs
        );
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify a validated snapshot
    #[must_use]
    pub fn classify(&self, snapshot: &EnvironmentalSnapshot) -> RiskAssessment {
        scoring::classify(snapshot, self.config.explanation.max_factors)
    }

    /// Validate untrusted level strings, then classify them.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every missing or unknown field;
    /// nothing is classified in that case.
    pub fn classify_input(&self, input: &SnapshotInput) -> Result<RiskAssessment, ValidationError> {
        match EnvironmentalSnapshot::try_from(input) {
            Ok(snapshot) => Ok(self.classify(&snapshot)),
            Err(err) => {
                warn!(fields = ?err.fields(), "Rejected environmental snapshot");
                Err(err)
            }
        }
    }

    /// Classify many inputs in parallel.
    ///
    /// Results keep the order of `inputs`; each one succeeds or fails on its
    /// own.
    #[must_use]
    pub fn classify_batch(
        &self,
        inputs: &[SnapshotInput],
    ) -> Vec<Result<RiskAssessment, ValidationError>> {
        let results: Vec<_> = inputs
            .par_iter()
            .map(|input| self.classify_input(input))
            .collect();

        let rejected = results.iter().filter(|r| r.is_err()).count();
        let extreme = results
            .iter()
            .filter(|r| matches!(r, Ok(a) if a.risk_tier == RiskTier::Extreme))
            .count();
        info!(
            total = results.len(),
            rejected, extreme, "Classified snapshot batch"
        );
        results
    }

    /// Compute the Fire Danger Index with this engine's FDI settings
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every out-of-domain input.
    pub fn fire_danger_index(&self, inputs: &FdiInputs) -> Result<FdiResult, ValidationError> {
        calculate_fdi(inputs, &self.config.fdi)
    }

    /// Rate fire detections around `location` and elevate `current_tier`
    #[must_use]
    pub fn analyze_fire_threat(
        &self,
        location: &GeoPoint,
        detections: &[FireDetection],
        current_tier: RiskTier,
    ) -> FireThreatAssessment {
        hotspots::analyze_fire_threat(location, detections, current_tier, &self.config.threat)
    }
}
