//! Rain adjustment factor lookup
//!
//! Rain damps fire danger, and the damping wears off as fuels dry out again.
//! The table is keyed by the depth of the last rain event; each band lists a
//! multiplier per day elapsed since that rain (day 1 first). Heavier rain
//! means a lower starting multiplier and a longer recovery to 1.0.
//!
//! Bands are contiguous and use **inclusive lower, exclusive upper** bounds
//! `[lower, upper)`.

use crate::core_types::units::Millimeters;

/// Rainfall below this depth is treated as this depth
pub const MIN_EFFECTIVE_RAINFALL_MM: f32 = 1.0;

/// One rainfall band of the adjustment table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainBand {
    /// Inclusive lower bound (mm)
    pub lower: f32,
    /// Exclusive upper bound (mm)
    pub upper: f32,
    /// Multiplier for day 1, day 2, ... since rain; the last entry holds for
    /// every later day
    pub factors: &'static [f32],
}

/// Rain adjustment table, lightest rain first
pub const RAIN_ADJUSTMENT_TABLE: [RainBand; 13] = [
    RainBand {
        lower: 0.0,
        upper: 2.7,
        factors: &[0.7, 0.9, 1.0],
    },
    RainBand {
        lower: 2.7,
        upper: 5.3,
        factors: &[0.6, 0.8, 0.9, 1.0],
    },
    RainBand {
        lower: 5.3,
        upper: 7.7,
        factors: &[0.5, 0.7, 0.9, 0.9, 1.0],
    },
    RainBand {
        lower: 7.7,
        upper: 10.3,
        factors: &[0.4, 0.6, 0.8, 0.9, 0.9, 1.0],
    },
    RainBand {
        lower: 10.3,
        upper: 12.9,
        factors: &[0.4, 0.6, 0.7, 0.8, 0.9, 0.9, 1.0],
    },
    RainBand {
        lower: 12.9,
        upper: 15.4,
        factors: &[0.3, 0.5, 0.7, 0.8, 0.8, 0.9, 1.0],
    },
    RainBand {
        lower: 15.4,
        upper: 20.6,
        factors: &[0.2, 0.5, 0.6, 0.7, 0.8, 0.8, 0.9, 0.9, 1.0],
    },
    RainBand {
        lower: 20.6,
        upper: 25.6,
        factors: &[0.2, 0.4, 0.5, 0.7, 0.7, 0.8, 0.9, 0.9, 1.0],
    },
    RainBand {
        lower: 25.6,
        upper: 38.5,
        factors: &[0.1, 0.3, 0.4, 0.6, 0.6, 0.7, 0.8, 0.8, 0.9, 0.9, 1.0],
    },
    RainBand {
        lower: 38.5,
        upper: 51.2,
        factors: &[
            0.0, 0.2, 0.4, 0.5, 0.5, 0.6, 0.7, 0.7, 0.8, 0.8, 0.9, 0.9, 1.0,
        ],
    },
    RainBand {
        lower: 51.2,
        upper: 63.9,
        factors: &[
            0.0, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.7, 0.7, 0.7, 0.8, 0.8, 0.9, 0.9, 0.9, 1.0,
        ],
    },
    RainBand {
        lower: 63.9,
        upper: 76.6,
        factors: &[
            0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.6, 0.7, 0.7, 0.8, 0.8, 0.8, 0.8, 0.8, 0.9, 0.9,
            0.9, 0.9, 0.9, 1.0,
        ],
    },
    RainBand {
        lower: 76.6,
        upper: f32::INFINITY,
        factors: &[
            0.0, 0.0, 0.1, 0.2, 0.4, 0.5, 0.6, 0.6, 0.6, 0.6, 0.7, 0.7, 0.8, 0.8, 0.8, 0.9, 0.9,
            0.9, 0.9, 0.9, 1.0,
        ],
    },
];

impl RainBand {
    /// Factor for a number of days since rain (day 0 counts as day 1)
    #[must_use]
    pub fn factor_for_day(&self, days_since_rain: u32) -> f32 {
        let day_index = days_since_rain.max(1) as usize - 1;
        let index = day_index.min(self.factors.len() - 1);
        self.factors[index]
    }
}

/// Band containing a rainfall depth.
///
/// Because bands are contiguous, the containing band is the highest one whose
/// lower bound does not exceed the rainfall.
#[must_use]
pub fn rain_band(rainfall: Millimeters) -> &'static RainBand {
    let rain = (*rainfall).max(MIN_EFFECTIVE_RAINFALL_MM);
    RAIN_ADJUSTMENT_TABLE
        .iter()
        .rev()
        .find(|band| rain >= band.lower)
        .unwrap_or(&RAIN_ADJUSTMENT_TABLE[0])
}

/// Rain adjustment factor in `[0, 1]` for the last rain event and the days
/// elapsed since it
#[must_use]
pub fn rain_adjustment_factor(rainfall: Millimeters, days_since_rain: u32) -> f32 {
    rain_band(rainfall).factor_for_day(days_since_rain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_contiguous_and_covers_all_rainfall() {
        assert_eq!(RAIN_ADJUSTMENT_TABLE[0].lower, 0.0);
        assert!(RAIN_ADJUSTMENT_TABLE[RAIN_ADJUSTMENT_TABLE.len() - 1]
            .upper
            .is_infinite());
        for pair in RAIN_ADJUSTMENT_TABLE.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower, "gap or overlap at {}", pair[0].upper);
            assert!(pair[0].lower < pair[0].upper);
        }
    }

    #[test]
    fn test_factor_lists_recover_monotonically_to_one() {
        for band in &RAIN_ADJUSTMENT_TABLE {
            assert!(!band.factors.is_empty(), "band at {} is empty", band.lower);
            assert!(
                band.factors.windows(2).all(|w| w[0] <= w[1]),
                "band at {} decreases",
                band.lower
            );
            assert!(band.factors.iter().all(|f| (0.0..=1.0).contains(f)));
            assert_eq!(band.factors[band.factors.len() - 1], 1.0);
        }
    }

    #[test]
    fn test_no_rain_first_day_uses_first_factor() {
        assert_eq!(rain_adjustment_factor(Millimeters::new(0.0), 1), 0.7);
    }

    #[test]
    fn test_day_zero_is_treated_as_day_one() {
        assert_eq!(rain_adjustment_factor(Millimeters::new(0.0), 0), 0.7);
        assert_eq!(rain_adjustment_factor(Millimeters::new(30.0), 0), 0.1);
    }

    #[test]
    fn test_late_days_clamp_to_last_factor() {
        assert_eq!(rain_adjustment_factor(Millimeters::new(0.0), 3), 1.0);
        assert_eq!(rain_adjustment_factor(Millimeters::new(0.0), 90), 1.0);
        assert_eq!(rain_adjustment_factor(Millimeters::new(100.0), u32::MAX), 1.0);
    }

    #[test]
    fn test_band_edges_are_lower_inclusive() {
        assert_eq!(rain_band(Millimeters::new(2.69)).lower, 0.0);
        assert_eq!(rain_band(Millimeters::new(2.7)).lower, 2.7);
        assert_eq!(rain_band(Millimeters::new(76.6)).lower, 76.6);
        assert_eq!(rain_band(Millimeters::new(5000.0)).lower, 76.6);
    }

    #[test]
    fn test_trace_rainfall_uses_lightest_band() {
        let lightest = &RAIN_ADJUSTMENT_TABLE[0];
        assert_eq!(rain_band(Millimeters::new(0.0)), lightest);
        assert_eq!(rain_band(Millimeters::new(0.4)), lightest);
        assert_eq!(rain_band(Millimeters::new(MIN_EFFECTIVE_RAINFALL_MM)), lightest);
    }

    #[test]
    fn test_heavier_rain_never_raises_the_factor() {
        let depths = [0.0, 3.0, 6.0, 9.0, 11.0, 14.0, 18.0, 22.0, 30.0, 45.0, 55.0, 70.0, 90.0];
        for day in 1..=25 {
            let factors: Vec<f32> = depths
                .iter()
                .map(|d| rain_adjustment_factor(Millimeters::new(*d), day))
                .collect();
            assert!(
                factors.windows(2).all(|w| w[0] >= w[1]),
                "day {day}: {factors:?}"
            );
        }
    }
}
