//! Factor scoring and composite risk classification
//!
//! Each factor level carries a fixed number of points. The seven points are
//! summed into a composite score, the score is banded into a [`RiskTier`],
//! and the tier alone decides the evacuation flag and resource plan.
//!
//! | Factor | Levels → Points |
//! |---|---|
//! | fuel_moisture | extremely_dry=30, dry=20, moderate=10, moist=0 |
//! | temperature | very_high=20, high=15, moderate=8, low=0 |
//! | humidity | very_low=20, low=15, moderate=8, high=0 |
//! | wind_speed | extreme=20, strong=15, moderate=8, low=0 |
//! | topography | very_steep=15, steep=10, hilly=5, flat=0 |
//! | population_density | high=10, medium=5, low=0 |
//! | infrastructure_criticality | critical=15, slightly_critical=10, no_critical=5, no=0 |

pub mod explanation;
pub mod recommendation;
pub mod tier;

pub use explanation::{dominant_factors, explain, DEFAULT_EXPLANATION_FACTORS};
pub use recommendation::{Evacuation, Recommendation, Resource, ResourcePlan};
pub use tier::RiskTier;

use serde::Serialize;
use tracing::debug;

use crate::core_types::levels::{
    Factor, FactorLevel, FuelMoisture, HumidityLevel, InfrastructureCriticality,
    PopulationDensity, TemperatureLevel, Topography, WindSpeedLevel,
};
use crate::core_types::snapshot::EnvironmentalSnapshot;

/// Highest composite score a snapshot can reach (every factor at its maximum)
pub const MAX_TOTAL_SCORE: u32 = 130;

/// Point value of a factor level
pub trait FactorPoints: FactorLevel {
    /// Points this level adds to the composite score
    fn points(self) -> u32;
}

impl FactorPoints for FuelMoisture {
    fn points(self) -> u32 {
        match self {
            FuelMoisture::ExtremelyDry => 30,
            FuelMoisture::Dry => 20,
            FuelMoisture::Moderate => 10,
            FuelMoisture::Moist => 0,
        }
    }
}

impl FactorPoints for TemperatureLevel {
    fn points(self) -> u32 {
        match self {
            TemperatureLevel::VeryHigh => 20,
            TemperatureLevel::High => 15,
            TemperatureLevel::Moderate => 8,
            TemperatureLevel::Low => 0,
        }
    }
}

impl FactorPoints for HumidityLevel {
    fn points(self) -> u32 {
        match self {
            HumidityLevel::VeryLow => 20,
            HumidityLevel::Low => 15,
            HumidityLevel::Moderate => 8,
            HumidityLevel::High => 0,
        }
    }
}

impl FactorPoints for WindSpeedLevel {
    fn points(self) -> u32 {
        match self {
            WindSpeedLevel::Extreme => 20,
            WindSpeedLevel::Strong => 15,
            WindSpeedLevel::Moderate => 8,
            WindSpeedLevel::Low => 0,
        }
    }
}

impl FactorPoints for Topography {
    fn points(self) -> u32 {
        match self {
            Topography::VerySteep => 15,
            Topography::Steep => 10,
            Topography::Hilly => 5,
            Topography::Flat => 0,
        }
    }
}

impl FactorPoints for PopulationDensity {
    fn points(self) -> u32 {
        match self {
            PopulationDensity::High => 10,
            PopulationDensity::Medium => 5,
            PopulationDensity::Low => 0,
        }
    }
}

impl FactorPoints for InfrastructureCriticality {
    fn points(self) -> u32 {
        match self {
            InfrastructureCriticality::Critical => 15,
            InfrastructureCriticality::SlightlyCritical => 10,
            InfrastructureCriticality::NoCritical => 5,
            InfrastructureCriticality::No => 0,
        }
    }
}

/// Points one factor contributed to a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactorContribution {
    pub factor: Factor,
    /// Level name, e.g. "extremely_dry"
    pub level: &'static str,
    pub points: u32,
    /// Explanation phrase for the level
    #[serde(skip)]
    pub phrase: &'static str,
}

impl FactorContribution {
    fn of<L: FactorPoints>(level: L) -> Self {
        Self {
            factor: L::FACTOR,
            level: level.as_str(),
            points: level.points(),
            phrase: level.phrase(),
        }
    }
}

/// Score every factor of a snapshot, in table order
#[must_use]
pub fn score_snapshot(snapshot: &EnvironmentalSnapshot) -> [FactorContribution; 7] {
    [
        FactorContribution::of(snapshot.fuel_moisture),
        FactorContribution::of(snapshot.temperature),
        FactorContribution::of(snapshot.humidity),
        FactorContribution::of(snapshot.wind_speed),
        FactorContribution::of(snapshot.topography),
        FactorContribution::of(snapshot.population_density),
        FactorContribution::of(snapshot.infrastructure_criticality),
    ]
}

/// Composite score of a snapshot, in `[0, MAX_TOTAL_SCORE]`
#[must_use]
pub fn total_score(snapshot: &EnvironmentalSnapshot) -> u32 {
    score_snapshot(snapshot).iter().map(|c| c.points).sum()
}

/// Outcome of classifying one environmental snapshot.
///
/// Immutable once produced; every field is a pure function of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub total_score: u32,
    pub risk_tier: RiskTier,
    pub evacuation: Evacuation,
    pub resources: ResourcePlan,
    /// Per-factor points in table order
    pub contributions: Vec<FactorContribution>,
    pub explanation: String,
}

impl RiskAssessment {
    /// Evacuation flag and resource plan as one value
    #[must_use]
    pub fn recommendation(&self) -> Recommendation {
        Recommendation {
            evacuation: self.evacuation,
            resources: self.resources,
        }
    }
}

/// Classify a snapshot: score, tier, recommendation and explanation.
///
/// `explanation_factors` caps how many factors the explanation names.
#[must_use]
pub fn classify(snapshot: &EnvironmentalSnapshot, explanation_factors: usize) -> RiskAssessment {
    let contributions = score_snapshot(snapshot);
    let total_score: u32 = contributions.iter().map(|c| c.points).sum();
    let risk_tier = RiskTier::from_score(total_score);
    let recommendation = Recommendation::for_tier(risk_tier);
    let explanation = explain(risk_tier, &contributions, explanation_factors);

    debug!(
        total_score,
        tier = %risk_tier,
        evacuation = %recommendation.evacuation,
        "Classified environmental snapshot"
    );

    RiskAssessment {
        total_score,
        risk_tier,
        evacuation: recommendation.evacuation,
        resources: recommendation.resources,
        contributions: contributions.to_vec(),
        explanation,
    }
}
