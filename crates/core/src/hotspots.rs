//! Active fire threat analysis
//!
//! Rates satellite fire detections around a location and decides how far
//! they should raise the rule-based risk tier. Fetching detections is the
//! caller's job; this module only consumes them.
//!
//! The closest detection is rated on a confidence × distance matrix:
//!
//! | Confidence | ≤10 km | ≤25 km | ≤50 km | beyond |
//! |---|---|---|---|---|
//! | high | critical | severe | moderate | minor |
//! | nominal | severe | moderate | minor | none |
//! | low | moderate | minor | none | none |

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::config::ThreatConfig;
use crate::core_types::units::Kilometers;
use crate::error::{ValidationError, Violation};
use crate::scoring::RiskTier;

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check latitude is within `[-90, 90]` and longitude within `[-180, 180]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming each bad coordinate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        if !(-90.0..=90.0).contains(&self.latitude) {
            violations.push(Violation::out_of_range(
                "latitude",
                self.latitude as f32,
                "must be within [-90, 90]",
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            violations.push(Violation::out_of_range(
                "longitude",
                self.longitude as f32,
                "must be within [-180, 180]",
            ));
        }
        ValidationError::check("location", violations)
    }

    /// Haversine great-circle distance
    #[must_use]
    pub fn distance_to(&self, other: &GeoPoint) -> Kilometers {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();
        Kilometers::new((EARTH_RADIUS_KM * c) as f32)
    }
}

/// Detection confidence as reported by the satellite product
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Nominal,
    High,
}

impl ConfidenceLevel {
    /// Confidence from a 0-100 score: ≥76 high, ≥41 nominal
    #[must_use]
    pub fn from_score(score: f32) -> Self {
        if score >= 76.0 {
            ConfidenceLevel::High
        } else if score >= 41.0 {
            ConfidenceLevel::Nominal
        } else {
            ConfidenceLevel::Low
        }
    }

    /// Parse a confidence flag (`h`, `n`, `l`, or the full word) or a
    /// numeric score. Anything unreadable is nominal.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().to_ascii_lowercase();
        match raw.as_str() {
            "h" | "high" => ConfidenceLevel::High,
            "n" | "nominal" => ConfidenceLevel::Nominal,
            "l" | "low" => ConfidenceLevel::Low,
            other => other
                .parse::<f32>()
                .ok()
                .filter(|score| score.is_finite())
                .map_or(ConfidenceLevel::Nominal, Self::from_score),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Nominal => "nominal",
            ConfidenceLevel::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One satellite fire detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireDetection {
    pub location: GeoPoint,
    pub confidence: ConfidenceLevel,
    /// Fire radiative power (MW)
    #[serde(default)]
    pub frp: f32,
    /// Acquisition date and time as reported, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquired: Option<String>,
}

impl FireDetection {
    #[must_use]
    pub fn new(location: GeoPoint, confidence: ConfidenceLevel) -> Self {
        Self {
            location,
            confidence,
            frp: 0.0,
            acquired: None,
        }
    }
}

/// Coordinate violations of every detection, named `fires[i].latitude` and
/// `fires[i].longitude` after the detection's position in `detections`
#[must_use]
pub fn detection_violations(detections: &[FireDetection]) -> Vec<Violation> {
    detections
        .iter()
        .enumerate()
        .filter_map(|(index, detection)| {
            detection
                .location
                .validate()
                .err()
                .map(|err| (index, err.violations))
        })
        .flat_map(|(index, violations)| {
            let prefix = format!("fires[{index}]");
            violations.into_iter().map(move |v| v.nested(&prefix))
        })
        .collect()
}

/// Distance band of the threat matrix (upper bounds inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBand {
    Within10Km,
    Within25Km,
    Within50Km,
    Beyond,
}

impl DistanceBand {
    #[must_use]
    pub fn from_distance(distance: Kilometers) -> Self {
        match *distance {
            d if d <= 10.0 => DistanceBand::Within10Km,
            d if d <= 25.0 => DistanceBand::Within25Km,
            d if d <= 50.0 => DistanceBand::Within50Km,
            _ => DistanceBand::Beyond,
        }
    }
}

/// Threat posed by the closest detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    None,
    Minor,
    Moderate,
    Severe,
    Critical,
}

impl ThreatLevel {
    /// Look up the threat matrix
    #[must_use]
    pub fn rate(confidence: ConfidenceLevel, band: DistanceBand) -> Self {
        use ConfidenceLevel as C;
        use DistanceBand as D;

        match (confidence, band) {
            (C::High, D::Within10Km) => ThreatLevel::Critical,
            (C::High, D::Within25Km) | (C::Nominal, D::Within10Km) => ThreatLevel::Severe,
            (C::High, D::Within50Km) | (C::Nominal, D::Within25Km) | (C::Low, D::Within10Km) => {
                ThreatLevel::Moderate
            }
            (C::High, D::Beyond) | (C::Nominal, D::Within50Km) | (C::Low, D::Within25Km) => {
                ThreatLevel::Minor
            }
            (C::Nominal, D::Beyond) | (C::Low, D::Within50Km | D::Beyond) => ThreatLevel::None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ThreatLevel::None => "none",
            ThreatLevel::Minor => "minor",
            ThreatLevel::Moderate => "moderate",
            ThreatLevel::Severe => "severe",
            ThreatLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raise a risk tier for an active fire threat.
///
/// The result is never below `current`; no threat leaves it unchanged.
#[must_use]
pub fn elevate_tier(current: RiskTier, threat: ThreatLevel) -> RiskTier {
    use RiskTier::{Extreme, High, Low, Medium, VeryHigh, VeryLow};

    let elevated = match (threat, current) {
        (ThreatLevel::None, tier) => tier,
        (ThreatLevel::Critical, _) => Extreme,
        (ThreatLevel::Severe, VeryLow | Low) => High,
        (ThreatLevel::Severe, _) => Extreme,
        (ThreatLevel::Moderate, VeryLow | Low) => Medium,
        (ThreatLevel::Moderate, Medium) => High,
        (ThreatLevel::Moderate, _) => Extreme,
        (ThreatLevel::Minor, VeryLow | Low) => Low,
        (ThreatLevel::Minor, Medium) => Medium,
        (ThreatLevel::Minor, High | VeryHigh) => High,
        (ThreatLevel::Minor, Extreme) => Extreme,
    };
    current.max(elevated)
}

/// Whether the closest fire warrants leaving, and why
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvacuationAdvice {
    pub recommended: bool,
    /// Empty when nothing is recommended
    pub reason: String,
}

impl EvacuationAdvice {
    /// Critical or severe within 25 km: evacuate. Moderate within 15 km:
    /// prepare to.
    #[must_use]
    pub fn for_threat(threat: ThreatLevel, confidence: ConfidenceLevel, distance: Kilometers) -> Self {
        let km = *distance;
        let reason = match threat {
            ThreatLevel::Critical if km <= 25.0 => format!(
                "CRITICAL: Fire detected {km:.1}km away (High confidence). Immediate evacuation recommended."
            ),
            ThreatLevel::Severe if km <= 25.0 => format!(
                "SEVERE: Fire detected {km:.1}km away ({confidence} confidence). Evacuation recommended."
            ),
            ThreatLevel::Moderate if km <= 15.0 => {
                format!("Fire detected {km:.1}km away. Consider evacuation preparation.")
            }
            _ => return Self::default(),
        };
        Self {
            recommended: true,
            reason,
        }
    }
}

/// A detection with its distance from the assessed location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyFire {
    pub detection: FireDetection,
    pub distance: Kilometers,
}

/// Outcome of rating the detections around one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FireThreatAssessment {
    /// Detections within the check radius
    pub nearby_fire_count: usize,
    /// Every detection, closest first
    pub fires: Vec<NearbyFire>,
    pub threat_level: ThreatLevel,
    /// Tier before the threat was considered
    pub base_tier: RiskTier,
    /// Tier after elevation; never below `base_tier`
    pub elevated_tier: RiskTier,
    pub evacuation: EvacuationAdvice,
}

impl FireThreatAssessment {
    #[must_use]
    pub fn has_nearby_fires(&self) -> bool {
        self.nearby_fire_count > 0
    }

    /// Closest detection, if any
    #[must_use]
    pub fn closest(&self) -> Option<&NearbyFire> {
        self.fires.first()
    }
}

/// Rate the detections around `location` and elevate `current_tier`.
///
/// Detections are sorted by distance; the closest one alone decides the
/// threat level, whether or not it falls inside the check radius. Detections
/// with coordinates off the globe are skipped; use [`detection_violations`]
/// to reject them instead.
#[must_use]
pub fn analyze_fire_threat(
    location: &GeoPoint,
    detections: &[FireDetection],
    current_tier: RiskTier,
    config: &ThreatConfig,
) -> FireThreatAssessment {
    let mut fires: Vec<NearbyFire> = detections
        .iter()
        .filter(|detection| {
            let valid = detection.location.validate().is_ok();
            if !valid {
                warn!(
                    latitude = detection.location.latitude,
                    longitude = detection.location.longitude,
                    "Ignoring fire detection with invalid coordinates"
                );
            }
            valid
        })
        .map(|detection| NearbyFire {
            distance: location.distance_to(&detection.location),
            detection: detection.clone(),
        })
        .collect();
    fires.sort_by(|a, b| a.distance.cmp(&b.distance));

    let nearby_fire_count = fires
        .iter()
        .filter(|fire| fire.distance <= config.check_radius_km)
        .count();

    let (threat_level, evacuation) = match fires.first() {
        Some(closest) => {
            let confidence = closest.detection.confidence;
            let threat =
                ThreatLevel::rate(confidence, DistanceBand::from_distance(closest.distance));
            (
                threat,
                EvacuationAdvice::for_threat(threat, confidence, closest.distance),
            )
        }
        None => (ThreatLevel::None, EvacuationAdvice::default()),
    };
    let elevated_tier = elevate_tier(current_tier, threat_level);

    debug!(
        detections = fires.len(),
        nearby_fire_count,
        threat = %threat_level,
        base_tier = %current_tier,
        elevated_tier = %elevated_tier,
        "Analyzed active fire threat"
    );

    FireThreatAssessment {
        nearby_fire_count,
        fires,
        threat_level,
        base_tier: current_tier,
        elevated_tier,
        evacuation,
    }
}
