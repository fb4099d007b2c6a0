//! Wind threshold addition
//!
//! Wind is added to the base index as a step function: each threshold a wind
//! speed reaches adds a larger fixed bonus. A wind speed exactly on a
//! threshold takes that threshold's bonus.

use crate::core_types::units::KilometersPerHour;

/// Wind speed thresholds (km/h), ascending
pub const WIND_THRESHOLDS_KMH: [f32; 8] = [3.0, 9.0, 17.0, 26.0, 33.0, 37.0, 42.0, 46.0];

/// Bonus added once the matching threshold is reached
pub const WIND_ADDITIONS: [f32; 8] = [0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0];

/// Addition for the highest threshold not exceeding `wind_speed`; 0 below
/// the first threshold
#[must_use]
pub fn wind_addition(wind_speed: KilometersPerHour) -> f32 {
    WIND_THRESHOLDS_KMH
        .iter()
        .zip(WIND_ADDITIONS)
        .rev()
        .find(|(threshold, _)| *wind_speed >= **threshold)
        .map_or(0.0, |(_, addition)| addition)
}
