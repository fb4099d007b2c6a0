//! Full assessment of one location from raw measurements
//!
//! Buckets the measurements, classifies the resulting snapshot, computes the
//! FDI and, when a location is known, folds in nearby fire detections.

use serde::Serialize;
use tracing::{debug, warn};

use crate::bucketing::RawConditions;
use crate::core_types::snapshot::EnvironmentalSnapshot;
use crate::engine::RiskEngine;
use crate::error::ValidationError;
use crate::fdi::FdiResult;
use crate::hotspots::{detection_violations, FireDetection, FireThreatAssessment, GeoPoint};
use crate::scoring::{Evacuation, Recommendation, RiskAssessment, RiskTier};

/// Everything known about one location's wildfire risk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    pub conditions: RawConditions,
    /// Levels the measurements were bucketed into
    pub snapshot: EnvironmentalSnapshot,
    pub assessment: RiskAssessment,
    pub fdi: FdiResult,
    /// Present only when a location was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fire_threat: Option<FireThreatAssessment>,
}

impl LocationReport {
    /// Tier after any active fire elevation
    #[must_use]
    pub fn effective_tier(&self) -> RiskTier {
        self.fire_threat
            .as_ref()
            .map_or(self.assessment.risk_tier, |threat| threat.elevated_tier)
    }

    /// Recommendation for the effective tier
    #[must_use]
    pub fn effective_recommendation(&self) -> Recommendation {
        Recommendation::for_tier(self.effective_tier())
    }

    /// Whether anything (tier or a nearby fire) calls for evacuation
    #[must_use]
    pub fn evacuation_advised(&self) -> bool {
        self.fire_threat
            .as_ref()
            .is_some_and(|threat| threat.evacuation.recommended)
            || self.effective_recommendation().evacuation == Evacuation::Yes
    }
}

impl RiskEngine {
    /// Assess a location from raw measurements.
    ///
    /// Fire detections are only considered when `location` is given.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every bad measurement and
    /// coordinate, detections included (`fires[i].latitude`).
    pub fn assess_location(
        &self,
        conditions: &RawConditions,
        location: Option<GeoPoint>,
        detections: &[FireDetection],
    ) -> Result<LocationReport, ValidationError> {
        let mut violations = match conditions.validate() {
            Ok(()) => Vec::new(),
            Err(err) => err.violations,
        };
        if let Some(Err(err)) = location.as_ref().map(GeoPoint::validate) {
            violations.extend(err.violations);
        }
        violations.extend(detection_violations(detections));
        if let Err(err) = ValidationError::check("location conditions", violations) {
            warn!(fields = ?err.fields(), "Rejected location conditions");
            return Err(err);
        }

        let snapshot = conditions.snapshot()?;
        let assessment = self.classify(&snapshot);
        let fdi = self.fire_danger_index(&conditions.fdi_inputs())?;
        let fire_threat = location.map(|point| {
            self.analyze_fire_threat(&point, detections, assessment.risk_tier)
        });

        debug!(
            "Location assessed: tier={}, fdi={} ({}), fire threat={}",
            assessment.risk_tier,
            fdi.value,
            fdi.category,
            fire_threat
                .as_ref()
                .map_or("n/a", |threat| threat.threat_level.as_str())
        );

        Ok(LocationReport {
            location,
            conditions: *conditions,
            snapshot,
            assessment,
            fdi,
            fire_threat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucketing::Settlement;
    use crate::core_types::units::{Celsius, Degrees, KilometersPerHour, Millimeters, Percent};
    use crate::fdi::FdiCategory;
    use crate::hotspots::{ConfidenceLevel, ThreatLevel};

    fn mild() -> RawConditions {
        RawConditions {
            temperature: Celsius::new(18.0),
            humidity: Percent::new(60.0),
            wind_speed: KilometersPerHour::new(8.0),
            rainfall: Millimeters::new(6.0),
            days_since_rain: 2,
            slope: Degrees::new(3.0),
            settlement: Settlement::Rural,
            critical_facilities: 0,
        }
    }

    #[test]
    fn test_mild_conditions_without_location() {
        let report = RiskEngine::default()
            .assess_location(&mild(), None, &[])
            .unwrap();
        assert_eq!(report.assessment.risk_tier, RiskTier::VeryLow);
        assert_eq!(report.fdi.category, FdiCategory::Blue);
        assert!(report.fire_threat.is_none());
        assert_eq!(report.effective_tier(), RiskTier::VeryLow);
        assert!(!report.evacuation_advised());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("fire_threat").is_none());
        assert_eq!(json["assessment"]["risk_tier"], "Very Low");
    }

    #[test]
    fn test_nearby_fire_elevates_effective_tier() {
        let location = GeoPoint::new(-37.8136, 144.9631);
        let fire = FireDetection::new(GeoPoint::new(-37.85, 144.96), ConfidenceLevel::High);
        let report = RiskEngine::default()
            .assess_location(&mild(), Some(location), &[fire])
            .unwrap();

        let threat = report.fire_threat.as_ref().unwrap();
        assert_eq!(threat.threat_level, ThreatLevel::Critical);
        assert_eq!(report.assessment.risk_tier, RiskTier::VeryLow);
        assert_eq!(report.effective_tier(), RiskTier::Extreme);
        assert_eq!(report.effective_recommendation().evacuation, Evacuation::Yes);
        assert!(report.evacuation_advised());
    }

    #[test]
    fn test_bad_measurements_and_coordinates_are_reported_together() {
        let conditions = RawConditions {
            wind_speed: KilometersPerHour::new(-3.0),
            ..mild()
        };
        let err = RiskEngine::default()
            .assess_location(&conditions, Some(GeoPoint::new(120.0, 0.0)), &[])
            .unwrap_err();
        assert_eq!(err.fields(), vec!["wind_speed_kmh", "latitude"]);
    }

    #[test]
    fn test_bad_fire_coordinates_reject_the_report() {
        let detections = [
            FireDetection::new(GeoPoint::new(-33.9, 151.2), ConfidenceLevel::High),
            FireDetection::new(GeoPoint::new(f64::NAN, 0.0), ConfidenceLevel::High),
        ];
        let err = RiskEngine::default()
            .assess_location(&mild(), Some(GeoPoint::new(-33.87, 151.21)), &detections)
            .unwrap_err();
        assert_eq!(err.fields(), vec!["fires[1].latitude"]);
    }
}
