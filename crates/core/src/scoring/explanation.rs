//! Human-readable rationale for a classification
//!
//! Names the factors that contributed the most points. Ties are broken by
//! table order (fuel moisture first) so the text is deterministic.

use super::tier::RiskTier;
use super::FactorContribution;

/// Number of factors named when no configuration overrides it
pub const DEFAULT_EXPLANATION_FACTORS: usize = 3;

/// Up to `max` highest-scoring factors with non-zero points.
///
/// `contributions` must be in table order; the sort is stable, so equal
/// scores keep that order.
#[must_use]
pub fn dominant_factors(
    contributions: &[FactorContribution],
    max: usize,
) -> Vec<FactorContribution> {
    let mut ranked: Vec<FactorContribution> = contributions
        .iter()
        .filter(|c| c.points > 0)
        .copied()
        .collect();
    ranked.sort_by(|a, b| b.points.cmp(&a.points));
    ranked.truncate(max);
    ranked
}

fn lead_in(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::VeryLow | RiskTier::Low => "Low risk",
        RiskTier::Medium => "Moderate risk",
        RiskTier::High | RiskTier::VeryHigh => "Elevated risk",
        RiskTier::Extreme => "Extreme risk",
    }
}

/// "a", "a and b", "a, b and c"
fn join_phrases(phrases: &[&str]) -> String {
    match phrases {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Compose the explanation sentence for a classification.
///
/// At least one factor is named whenever any factor scored.
#[must_use]
pub fn explain(tier: RiskTier, contributions: &[FactorContribution], max_factors: usize) -> String {
    let dominant = dominant_factors(contributions, max_factors.max(1));
    if dominant.is_empty() {
        return format!("{}: no contributing factor is elevated.", lead_in(tier));
    }

    let phrases: Vec<&str> = dominant.iter().map(|c| c.phrase).collect();
    format!(
        "{} driven primarily by {}.",
        lead_in(tier),
        join_phrases(&phrases)
    )
}
