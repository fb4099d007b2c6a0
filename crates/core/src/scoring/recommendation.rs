//! Evacuation and resource recommendation, derived from the tier alone

use serde::{Deserialize, Serialize};
use std::fmt;

use super::tier::RiskTier;

/// Whether residents should leave
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evacuation {
    No,
    Maybe,
    Yes,
}

impl Evacuation {
    /// Lowercase name ("maybe")
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Evacuation::No => "no",
            Evacuation::Maybe => "maybe",
            Evacuation::Yes => "yes",
        }
    }
}

impl fmt::Display for Evacuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single kind of suppression resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    FireEngines,
    WaterTankers,
    AerialSupport,
}

/// Resources to stage, always a prefix of engines → tankers → aircraft
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourcePlan {
    FireEngines,
    FireEnginesAndWaterTankers,
    FireEnginesAndWaterTankersAndAerialSupport,
}

impl ResourcePlan {
    /// Resource units in dispatch order
    #[must_use]
    pub fn units(self) -> &'static [Resource] {
        match self {
            ResourcePlan::FireEngines => &[Resource::FireEngines],
            ResourcePlan::FireEnginesAndWaterTankers => {
                &[Resource::FireEngines, Resource::WaterTankers]
            }
            ResourcePlan::FireEnginesAndWaterTankersAndAerialSupport => &[
                Resource::FireEngines,
                Resource::WaterTankers,
                Resource::AerialSupport,
            ],
        }
    }

    /// Label as reported to callers
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResourcePlan::FireEngines => "fire_engines",
            ResourcePlan::FireEnginesAndWaterTankers => "fire_engines_and_water_tankers",
            ResourcePlan::FireEnginesAndWaterTankersAndAerialSupport => {
                "fire_engines_and_water_tankers_and_aerial_support"
            }
        }
    }
}

impl fmt::Display for ResourcePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evacuation flag and resource plan for a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    pub evacuation: Evacuation,
    pub resources: ResourcePlan,
}

impl Recommendation {
    /// Recommendation for a tier. No other input is consulted.
    #[must_use]
    pub fn for_tier(tier: RiskTier) -> Self {
        let (evacuation, resources) = match tier {
            RiskTier::VeryLow | RiskTier::Low => (Evacuation::No, ResourcePlan::FireEngines),
            RiskTier::Medium | RiskTier::High => {
                (Evacuation::Maybe, ResourcePlan::FireEnginesAndWaterTankers)
            }
            RiskTier::VeryHigh => (Evacuation::Yes, ResourcePlan::FireEnginesAndWaterTankers),
            RiskTier::Extreme => (
                Evacuation::Yes,
                ResourcePlan::FireEnginesAndWaterTankersAndAerialSupport,
            ),
        };
        Self {
            evacuation,
            resources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_table() {
        let expected = [
            (RiskTier::VeryLow, Evacuation::No, "fire_engines"),
            (RiskTier::Low, Evacuation::No, "fire_engines"),
            (RiskTier::Medium, Evacuation::Maybe, "fire_engines_and_water_tankers"),
            (RiskTier::High, Evacuation::Maybe, "fire_engines_and_water_tankers"),
            (RiskTier::VeryHigh, Evacuation::Yes, "fire_engines_and_water_tankers"),
            (
                RiskTier::Extreme,
                Evacuation::Yes,
                "fire_engines_and_water_tankers_and_aerial_support",
            ),
        ];
        for (tier, evacuation, resources) in expected {
            let rec = Recommendation::for_tier(tier);
            assert_eq!(rec.evacuation, evacuation, "{tier}");
            assert_eq!(rec.resources.as_str(), resources, "{tier}");
        }
    }

    #[test]
    fn test_recommendation_never_relaxes_as_tier_rises() {
        let recs: Vec<Recommendation> =
            RiskTier::ALL.iter().map(|t| Recommendation::for_tier(*t)).collect();
        assert!(recs
            .windows(2)
            .all(|w| w[0].evacuation <= w[1].evacuation && w[0].resources <= w[1].resources));
    }

    #[test]
    fn test_plan_units_are_prefixes() {
        let full = ResourcePlan::FireEnginesAndWaterTankersAndAerialSupport.units();
        for plan in [
            ResourcePlan::FireEngines,
            ResourcePlan::FireEnginesAndWaterTankers,
        ] {
            assert!(full.starts_with(plan.units()));
        }
    }

    #[test]
    fn test_plan_serialises_to_label() {
        let plan = ResourcePlan::FireEnginesAndWaterTankersAndAerialSupport;
        assert_eq!(
            serde_json::to_string(&plan).unwrap(),
            format!("\"{}\"", plan.as_str())
        );
    }
}
