//! Risk tiers and the score thresholds that select them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum composite score of each tier above Very Low.
///
/// Lower bounds are inclusive: a score sitting exactly on a threshold belongs
/// to the higher tier.
pub mod tier_thresholds {
    /// "Extreme" starts at 100
    pub const EXTREME: u32 = 100;

    /// "Very High" covers `[80, 100)`
    pub const VERY_HIGH: u32 = 80;

    /// "High" covers `[60, 80)`
    pub const HIGH: u32 = 60;

    /// "Medium" covers `[40, 60)`
    pub const MEDIUM: u32 = 40;

    /// "Low" covers `[20, 40)`; anything below is "Very Low"
    pub const LOW: u32 = 20;
}

/// Six ordered wildfire danger levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Extreme,
}

/// Threshold cascade, highest first. Evaluated top-down, first match wins.
const CASCADE: [(u32, RiskTier); 5] = [
    (tier_thresholds::EXTREME, RiskTier::Extreme),
    (tier_thresholds::VERY_HIGH, RiskTier::VeryHigh),
    (tier_thresholds::HIGH, RiskTier::High),
    (tier_thresholds::MEDIUM, RiskTier::Medium),
    (tier_thresholds::LOW, RiskTier::Low),
];

impl RiskTier {
    /// All tiers, least severe first
    pub const ALL: [RiskTier; 6] = [
        RiskTier::VeryLow,
        RiskTier::Low,
        RiskTier::Medium,
        RiskTier::High,
        RiskTier::VeryHigh,
        RiskTier::Extreme,
    ];

    /// Tier for a composite score.
    ///
    /// Checks the thresholds from the highest down so a score of 105 lands in
    /// Extreme rather than in a lower band that also admits it.
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        CASCADE
            .iter()
            .find(|(minimum, _)| score >= *minimum)
            .map_or(RiskTier::VeryLow, |&(_, tier)| tier)
    }

    /// Inclusive lower score bound of this tier
    #[must_use]
    pub fn min_score(self) -> u32 {
        CASCADE
            .iter()
            .find(|(_, tier)| *tier == self)
            .map_or(0, |&(minimum, _)| minimum)
    }

    /// Display name ("Very High")
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::VeryLow => "Very Low",
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
            RiskTier::VeryHigh => "Very High",
            RiskTier::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_is_strictly_descending() {
        assert!(
            CASCADE.windows(2).all(|w| w[0].0 > w[1].0 && w[0].1 > w[1].1),
            "tier cascade must be sorted from the highest threshold down"
        );
    }

    #[test]
    fn test_boundaries_land_in_higher_tier() {
        assert_eq!(RiskTier::from_score(100), RiskTier::Extreme);
        assert_eq!(RiskTier::from_score(99), RiskTier::VeryHigh);
        assert_eq!(RiskTier::from_score(80), RiskTier::VeryHigh);
        assert_eq!(RiskTier::from_score(79), RiskTier::High);
        assert_eq!(RiskTier::from_score(60), RiskTier::High);
        assert_eq!(RiskTier::from_score(59), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(40), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(39), RiskTier::Low);
        assert_eq!(RiskTier::from_score(20), RiskTier::Low);
        assert_eq!(RiskTier::from_score(19), RiskTier::VeryLow);
        assert_eq!(RiskTier::from_score(0), RiskTier::VeryLow);
    }

    #[test]
    fn test_scores_above_every_threshold_are_extreme() {
        assert_eq!(RiskTier::from_score(105), RiskTier::Extreme);
        assert_eq!(RiskTier::from_score(130), RiskTier::Extreme);
    }

    #[test]
    fn test_tier_is_monotonic_in_score() {
        let tiers: Vec<RiskTier> = (0..=130).map(RiskTier::from_score).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_min_score_round_trips() {
        for tier in RiskTier::ALL {
            assert_eq!(RiskTier::from_score(tier.min_score()), tier);
        }
    }

    #[test]
    fn test_serialised_names() {
        assert_eq!(
            serde_json::to_string(&RiskTier::VeryHigh).unwrap(),
            "\"Very High\""
        );
        assert_eq!(RiskTier::VeryLow.to_string(), "Very Low");
    }
}
