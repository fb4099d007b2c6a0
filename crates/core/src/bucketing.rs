//! Raw measurement bucketing
//!
//! Turns physical measurements (weather, rain history, terrain, settlement,
//! nearby facilities) into the categorical levels the rule engine scores.
//! Every function here is a fixed threshold lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core_types::levels::{
    FuelMoisture, HumidityLevel, InfrastructureCriticality, PopulationDensity, TemperatureLevel,
    Topography, WindSpeedLevel,
};
use crate::core_types::snapshot::EnvironmentalSnapshot;
use crate::core_types::units::{
    Celsius, Degrees, KilometersPerHour, Meters, Millimeters, Percent,
};
use crate::error::{ValidationError, Violation};
use crate::fdi::FdiInputs;

/// Horizontal distance between the centre and each neighbour elevation sample
pub const DEFAULT_SAMPLE_SPACING: Meters = Meters::new(100.0);

/// Temperature level: <15 low, <25 moderate, <35 high, else very high
#[must_use]
pub fn temperature_level(temperature: Celsius) -> TemperatureLevel {
    match *temperature {
        t if t < 15.0 => TemperatureLevel::Low,
        t if t < 25.0 => TemperatureLevel::Moderate,
        t if t < 35.0 => TemperatureLevel::High,
        _ => TemperatureLevel::VeryHigh,
    }
}

/// Humidity level: >70 high, >50 moderate, >30 low, else very low
#[must_use]
pub fn humidity_level(humidity: Percent) -> HumidityLevel {
    match *humidity {
        h if h > 70.0 => HumidityLevel::High,
        h if h > 50.0 => HumidityLevel::Moderate,
        h if h > 30.0 => HumidityLevel::Low,
        _ => HumidityLevel::VeryLow,
    }
}

/// Wind level: <10 low, <25 moderate, <40 strong, else extreme
#[must_use]
pub fn wind_speed_level(wind_speed: KilometersPerHour) -> WindSpeedLevel {
    match *wind_speed {
        w if w < 10.0 => WindSpeedLevel::Low,
        w if w < 25.0 => WindSpeedLevel::Moderate,
        w if w < 40.0 => WindSpeedLevel::Strong,
        _ => WindSpeedLevel::Extreme,
    }
}

/// Topography from terrain slope: <5° flat, <15° hilly, <30° steep
#[must_use]
pub fn topography_from_slope(slope: Degrees) -> Topography {
    match *slope {
        s if s < 5.0 => Topography::Flat,
        s if s < 15.0 => Topography::Hilly,
        s if s < 30.0 => Topography::Steep,
        _ => Topography::VerySteep,
    }
}

/// Estimate slope from a centre elevation and its neighbours.
///
/// `atan(mean |Δh| / spacing)`. No neighbours, or a non-positive spacing,
/// gives a flat 0°.
#[must_use]
pub fn slope_from_elevations(center: Meters, neighbours: &[Meters], spacing: Meters) -> Degrees {
    if neighbours.is_empty() || *spacing <= 0.0 {
        return Degrees::new(0.0);
    }
    let total_change: f32 = neighbours.iter().map(|h| (**h - *center).abs()).sum();
    let mean_change = total_change / neighbours.len() as f32;
    Degrees::from_radians((mean_change / *spacing).atan())
}

/// Kind of settlement found at a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    City,
    Town,
    Village,
    Suburb,
    Neighbourhood,
    /// Nothing larger than scattered dwellings
    Rural,
}

impl Settlement {
    /// Lenient parse of a place type such as "Town" or "neighborhood";
    /// unrecognised kinds are rural
    #[must_use]
    pub fn from_place_type(place_type: &str) -> Self {
        match place_type.trim().to_ascii_lowercase().as_str() {
            "city" => Settlement::City,
            "town" => Settlement::Town,
            "village" => Settlement::Village,
            "suburb" => Settlement::Suburb,
            "neighbourhood" | "neighborhood" => Settlement::Neighbourhood,
            _ => Settlement::Rural,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Settlement::City => "city",
            Settlement::Town => "town",
            Settlement::Village => "village",
            Settlement::Suburb => "suburb",
            Settlement::Neighbourhood => "neighbourhood",
            Settlement::Rural => "rural",
        }
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Population density: cities and towns high, smaller settlements medium
#[must_use]
pub fn population_density(settlement: Settlement) -> PopulationDensity {
    match settlement {
        Settlement::City | Settlement::Town => PopulationDensity::High,
        Settlement::Village | Settlement::Suburb | Settlement::Neighbourhood => {
            PopulationDensity::Medium
        }
        Settlement::Rural => PopulationDensity::Low,
    }
}

/// Infrastructure criticality from the number of critical facilities
/// (hospitals, fire stations, police, power plants and substations) nearby
#[must_use]
pub fn infrastructure_criticality(critical_facilities: u32) -> InfrastructureCriticality {
    match critical_facilities {
        5.. => InfrastructureCriticality::Critical,
        2..=4 => InfrastructureCriticality::SlightlyCritical,
        1 => InfrastructureCriticality::NoCritical,
        0 => InfrastructureCriticality::No,
    }
}

/// Fuel moisture score, starting at 50; higher is wetter
#[must_use]
pub fn fuel_moisture_score(
    days_since_rain: u32,
    rainfall: Millimeters,
    humidity: Percent,
    temperature: Celsius,
) -> i64 {
    let mut score: i64 = 50;

    score += match days_since_rain {
        0..=1 => 40,
        2..=3 => 30,
        4..=7 => 15,
        8..=14 => 5,
        days => -2 * i64::from(days - 14),
    };

    score += match *rainfall {
        r if r > 10.0 => 15,
        r if r > 5.0 => 10,
        r if r > 1.0 => 5,
        _ => 0,
    };

    score += match *humidity {
        h if h > 70.0 => 10,
        h if h > 50.0 => 5,
        // < 20 is matched before < 30 so very dry air earns the larger penalty
        h if h < 20.0 => -15,
        h if h < 30.0 => -10,
        _ => 0,
    };

    score += match *temperature {
        t if t > 35.0 => -15,
        t if t > 30.0 => -10,
        t if t > 25.0 => -5,
        _ => 0,
    };

    score
}

/// Fuel moisture level: score ≥70 moist, ≥50 moderate, ≥30 dry
#[must_use]
pub fn fuel_moisture(
    days_since_rain: u32,
    rainfall: Millimeters,
    humidity: Percent,
    temperature: Celsius,
) -> FuelMoisture {
    match fuel_moisture_score(days_since_rain, rainfall, humidity, temperature) {
        70.. => FuelMoisture::Moist,
        50..=69 => FuelMoisture::Moderate,
        30..=49 => FuelMoisture::Dry,
        _ => FuelMoisture::ExtremelyDry,
    }
}

/// Physical measurements for one location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawConditions {
    pub temperature: Celsius,
    pub humidity: Percent,
    pub wind_speed: KilometersPerHour,
    /// Depth of the last rain event
    pub rainfall: Millimeters,
    pub days_since_rain: u32,
    /// Terrain slope, `[0, 90]`
    pub slope: Degrees,
    pub settlement: Settlement,
    /// Critical facilities within the facility search radius
    pub critical_facilities: u32,
}

impl RawConditions {
    /// Weather and rain part, as consumed by the FDI model
    #[must_use]
    pub fn fdi_inputs(&self) -> FdiInputs {
        FdiInputs {
            temperature: self.temperature,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            rainfall: self.rainfall,
            days_since_rain: self.days_since_rain,
        }
    }

    /// Check every measurement against its domain.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every offending measurement.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = match self.fdi_inputs().validate() {
            Ok(()) => Vec::new(),
            Err(err) => err.violations,
        };
        if !(0.0..=90.0).contains(&*self.slope) {
            violations.push(Violation::out_of_range(
                "slope_deg",
                *self.slope,
                "must be within [0, 90]",
            ));
        }
        ValidationError::check("raw conditions", violations)
    }

    /// Bucket every measurement into its categorical level.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any measurement is out of domain.
    pub fn snapshot(&self) -> Result<EnvironmentalSnapshot, ValidationError> {
        self.validate()?;
        Ok(EnvironmentalSnapshot::new(
            fuel_moisture(
                self.days_since_rain,
                self.rainfall,
                self.humidity,
                self.temperature,
            ),
            temperature_level(self.temperature),
            humidity_level(self.humidity),
            wind_speed_level(self.wind_speed),
            topography_from_slope(self.slope),
            population_density(self.settlement),
            infrastructure_criticality(self.critical_facilities),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn conditions() -> RawConditions {
        RawConditions {
            temperature: Celsius::new(36.0),
            humidity: Percent::new(15.0),
            wind_speed: KilometersPerHour::new(45.0),
            rainfall: Millimeters::new(0.0),
            days_since_rain: 30,
            slope: Degrees::new(32.0),
            settlement: Settlement::Town,
            critical_facilities: 6,
        }
    }

    #[test]
    fn test_weather_thresholds() {
        assert_eq!(temperature_level(Celsius::new(14.9)), TemperatureLevel::Low);
        assert_eq!(temperature_level(Celsius::new(15.0)), TemperatureLevel::Moderate);
        assert_eq!(temperature_level(Celsius::new(34.9)), TemperatureLevel::High);
        assert_eq!(temperature_level(Celsius::new(35.0)), TemperatureLevel::VeryHigh);

        assert_eq!(humidity_level(Percent::new(70.1)), HumidityLevel::High);
        assert_eq!(humidity_level(Percent::new(70.0)), HumidityLevel::Moderate);
        assert_eq!(humidity_level(Percent::new(50.0)), HumidityLevel::Low);
        assert_eq!(humidity_level(Percent::new(30.0)), HumidityLevel::VeryLow);

        assert_eq!(wind_speed_level(KilometersPerHour::new(9.9)), WindSpeedLevel::Low);
        assert_eq!(wind_speed_level(KilometersPerHour::new(10.0)), WindSpeedLevel::Moderate);
        assert_eq!(wind_speed_level(KilometersPerHour::new(25.0)), WindSpeedLevel::Strong);
        assert_eq!(wind_speed_level(KilometersPerHour::new(40.0)), WindSpeedLevel::Extreme);
    }

    #[test]
    fn test_topography_thresholds() {
        assert_eq!(topography_from_slope(Degrees::new(0.0)), Topography::Flat);
        assert_eq!(topography_from_slope(Degrees::new(5.0)), Topography::Hilly);
        assert_eq!(topography_from_slope(Degrees::new(15.0)), Topography::Steep);
        assert_eq!(topography_from_slope(Degrees::new(30.0)), Topography::VerySteep);
    }

    #[test]
    fn test_slope_from_elevations() {
        let center = Meters::new(200.0);
        let flat = [Meters::new(200.0); 4];
        assert_eq!(*slope_from_elevations(center, &flat, DEFAULT_SAMPLE_SPACING), 0.0);

        // mean |Δh| of 100 m over 100 m spacing is a 45° slope
        let neighbours = [
            Meters::new(300.0),
            Meters::new(100.0),
            Meters::new(250.0),
            Meters::new(50.0),
        ];
        let slope = slope_from_elevations(center, &neighbours, DEFAULT_SAMPLE_SPACING);
        assert_relative_eq!(*slope, 45.0, epsilon = 1e-3);

        assert_eq!(*slope_from_elevations(center, &[], DEFAULT_SAMPLE_SPACING), 0.0);
        assert_eq!(*slope_from_elevations(center, &neighbours, Meters::new(0.0)), 0.0);
    }

    #[test]
    fn test_settlement_population() {
        assert_eq!(Settlement::from_place_type(" City "), Settlement::City);
        assert_eq!(Settlement::from_place_type("neighborhood"), Settlement::Neighbourhood);
        assert_eq!(Settlement::from_place_type("hamlet"), Settlement::Rural);

        assert_eq!(population_density(Settlement::Town), PopulationDensity::High);
        assert_eq!(population_density(Settlement::Suburb), PopulationDensity::Medium);
        assert_eq!(population_density(Settlement::Rural), PopulationDensity::Low);
    }

    #[test]
    fn test_facility_count_thresholds() {
        assert_eq!(infrastructure_criticality(0), InfrastructureCriticality::No);
        assert_eq!(infrastructure_criticality(1), InfrastructureCriticality::NoCritical);
        assert_eq!(
            infrastructure_criticality(4),
            InfrastructureCriticality::SlightlyCritical
        );
        assert_eq!(infrastructure_criticality(5), InfrastructureCriticality::Critical);
    }

    #[test]
    fn test_fuel_moisture_levels() {
        let rain = Millimeters::new;
        // 50 + 40 + 15 + 10
        assert_eq!(
            fuel_moisture_score(1, rain(12.0), Percent::new(80.0), Celsius::new(10.0)),
            115
        );
        assert_eq!(
            fuel_moisture(1, rain(12.0), Percent::new(80.0), Celsius::new(10.0)),
            FuelMoisture::Moist
        );
        // 50 + 5
        assert_eq!(
            fuel_moisture(10, rain(0.0), Percent::new(40.0), Celsius::new(20.0)),
            FuelMoisture::Moderate
        );
        // 50 + 5 - 10 - 10
        assert_eq!(
            fuel_moisture(14, rain(0.0), Percent::new(25.0), Celsius::new(32.0)),
            FuelMoisture::Dry
        );
        // 50 - 32 - 10 - 5
        assert_eq!(
            fuel_moisture_score(30, rain(0.0), Percent::new(20.0), Celsius::new(30.0)),
            3
        );
        assert_eq!(
            fuel_moisture(30, rain(0.0), Percent::new(20.0), Celsius::new(30.0)),
            FuelMoisture::ExtremelyDry
        );
    }

    #[test]
    fn test_very_dry_air_takes_the_larger_penalty() {
        let rain = Millimeters::new(0.0);
        let temperature = Celsius::new(20.0);
        let base = fuel_moisture_score(10, rain, Percent::new(40.0), temperature);
        assert_eq!(fuel_moisture_score(10, rain, Percent::new(25.0), temperature), base - 10);
        assert_eq!(fuel_moisture_score(10, rain, Percent::new(10.0), temperature), base - 15);
    }

    #[test]
    fn test_long_drought_does_not_overflow() {
        let level = fuel_moisture(
            u32::MAX,
            Millimeters::new(0.0),
            Percent::new(50.0),
            Celsius::new(20.0),
        );
        assert_eq!(level, FuelMoisture::ExtremelyDry);
    }

    #[test]
    fn test_hot_dry_conditions_bucket_to_most_severe() {
        assert_eq!(
            conditions().snapshot().unwrap(),
            EnvironmentalSnapshot::most_severe()
        );
    }

    #[test]
    fn test_invalid_conditions_report_every_field() {
        let raw = RawConditions {
            humidity: Percent::new(-5.0),
            slope: Degrees::new(95.0),
            ..conditions()
        };
        let err = raw.snapshot().unwrap_err();
        assert_eq!(err.subject, "raw conditions");
        assert_eq!(err.fields(), vec!["humidity_pct", "slope_deg"]);
    }
}
