//! Categorical factor levels
//!
//! Each of the seven risk factors is an ordinal enum declared from the least
//! to the most dangerous level, so the derived `Ord` follows fire danger.
//! Levels parse from their snake_case names (surrounding whitespace and case
//! are ignored) and serialise back to the same names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The seven factors of an environmental snapshot, in table order.
///
/// Table order is significant: it is the order factors are scored, reported
/// and validated in, and it breaks ties between equally scoring factors when
/// an explanation is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Dryness of the available fuel
    FuelMoisture,
    /// Air temperature band
    Temperature,
    /// Relative humidity band
    Humidity,
    /// Wind speed band
    WindSpeed,
    /// Slope of the terrain
    Topography,
    /// People exposed at the location
    PopulationDensity,
    /// Critical facilities (hospitals, power, emergency services) nearby
    InfrastructureCriticality,
}

impl Factor {
    /// All factors in table order
    pub const ALL: [Factor; 7] = [
        Factor::FuelMoisture,
        Factor::Temperature,
        Factor::Humidity,
        Factor::WindSpeed,
        Factor::Topography,
        Factor::PopulationDensity,
        Factor::InfrastructureCriticality,
    ];

    /// Field name used in inputs and error messages
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Factor::FuelMoisture => "fuel_moisture",
            Factor::Temperature => "temperature",
            Factor::Humidity => "humidity",
            Factor::WindSpeed => "wind_speed",
            Factor::Topography => "topography",
            Factor::PopulationDensity => "population_density",
            Factor::InfrastructureCriticality => "infrastructure_criticality",
        }
    }

    /// Accepted level names for this factor, least dangerous first
    #[must_use]
    pub fn level_names(self) -> &'static [&'static str] {
        match self {
            Factor::FuelMoisture => FuelMoisture::NAMES,
            Factor::Temperature => TemperatureLevel::NAMES,
            Factor::Humidity => HumidityLevel::NAMES,
            Factor::WindSpeed => WindSpeedLevel::NAMES,
            Factor::Topography => Topography::NAMES,
            Factor::PopulationDensity => PopulationDensity::NAMES,
            Factor::InfrastructureCriticality => InfrastructureCriticality::NAMES,
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value that is not one of a factor's level names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {factor} level")]
pub struct UnknownLevel {
    /// Factor the value was parsed for
    pub factor: Factor,
    /// The rejected input, as given
    pub value: String,
}

/// Common interface of the seven level enums
pub trait FactorLevel: Copy + Eq + Ord + FromStr<Err = UnknownLevel> + 'static {
    /// Factor this level belongs to
    const FACTOR: Factor;

    /// Every level, least dangerous first
    const ALL: &'static [Self];

    /// Level names in the same order as [`FactorLevel::ALL`]
    const NAMES: &'static [&'static str];

    /// snake_case name of the level
    fn as_str(self) -> &'static str;

    /// Short noun phrase used in explanations ("extremely dry fuel")
    fn phrase(self) -> &'static str;
}

macro_rules! factor_level {
    (
        $(#[$meta:meta])*
        $name:ident => $factor:ident {
            $( $(#[$vmeta:meta])* $variant:ident = ($label:literal, $phrase:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl FactorLevel for $name {
            const FACTOR: Factor = Factor::$factor;
            const ALL: &'static [Self] = &[$($name::$variant),+];
            const NAMES: &'static [&'static str] = &[$($label),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn phrase(self) -> &'static str {
                match self {
                    $($name::$variant => $phrase),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLevel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($label => Ok($name::$variant),)+
                    _ => Err(UnknownLevel {
                        factor: Factor::$factor,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

factor_level! {
    /// Fuel moisture, from wet to tinder dry
    FuelMoisture => FuelMoisture {
        /// Recently wetted fuel
        Moist = ("moist", "moist fuel"),
        /// Partly dried fuel
        Moderate = ("moderate", "moderately dry fuel"),
        /// Dry fuel
        Dry = ("dry", "dry fuel"),
        /// Fully cured fuel after a long dry spell
        ExtremelyDry = ("extremely_dry", "extremely dry fuel"),
    }
}

factor_level! {
    /// Air temperature band
    TemperatureLevel => Temperature {
        /// Below 15°C
        Low = ("low", "low temperature"),
        /// 15-25°C
        Moderate = ("moderate", "moderate temperature"),
        /// 25-35°C
        High = ("high", "high temperature"),
        /// 35°C and above
        VeryHigh = ("very_high", "very high temperature"),
    }
}

factor_level! {
    /// Relative humidity band (high humidity is the safe end)
    HumidityLevel => Humidity {
        /// Above 70%
        High = ("high", "high humidity"),
        /// 50-70%
        Moderate = ("moderate", "moderate humidity"),
        /// 30-50%
        Low = ("low", "low humidity"),
        /// 30% and below
        VeryLow = ("very_low", "very low humidity"),
    }
}

factor_level! {
    /// Wind speed band
    WindSpeedLevel => WindSpeed {
        /// Below 10 km/h
        Low = ("low", "light wind"),
        /// 10-25 km/h
        Moderate = ("moderate", "moderate wind speed"),
        /// 25-40 km/h
        Strong = ("strong", "strong wind speed"),
        /// 40 km/h and above
        Extreme = ("extreme", "extreme wind speed"),
    }
}

factor_level! {
    /// Terrain slope class
    Topography => Topography {
        /// Under 5°
        Flat = ("flat", "flat terrain"),
        /// 5-15°
        Hilly = ("hilly", "hilly terrain"),
        /// 15-30°
        Steep = ("steep", "steep terrain"),
        /// 30° and above
        VerySteep = ("very_steep", "very steep terrain"),
    }
}

factor_level! {
    /// Population density class
    PopulationDensity => PopulationDensity {
        /// Rural or unsettled
        Low = ("low", "low population density"),
        /// Village or suburb
        Medium = ("medium", "medium population density"),
        /// Town or city
        High = ("high", "high population density"),
    }
}

factor_level! {
    /// Criticality of nearby infrastructure
    InfrastructureCriticality => InfrastructureCriticality {
        /// No facilities nearby
        No = ("no", "no nearby infrastructure"),
        /// A single facility
        NoCritical = ("no_critical", "non-critical infrastructure"),
        /// A handful of facilities
        SlightlyCritical = ("slightly_critical", "slightly critical infrastructure"),
        /// Many facilities, or key ones such as hospitals and substations
        Critical = ("critical", "critical infrastructure"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_parse_their_own_names() {
        for level in FuelMoisture::ALL {
            assert_eq!(level.as_str().parse::<FuelMoisture>(), Ok(*level));
        }
        for level in InfrastructureCriticality::ALL {
            assert_eq!(
                level.as_str().parse::<InfrastructureCriticality>(),
                Ok(*level)
            );
        }
    }

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        assert_eq!(" Extremely_Dry ".parse(), Ok(FuelMoisture::ExtremelyDry));
        assert_eq!("VERY_STEEP".parse(), Ok(Topography::VerySteep));
    }

    #[test]
    fn test_parse_rejects_unknown_level() {
        let err = "soggy".parse::<FuelMoisture>().unwrap_err();
        assert_eq!(err.factor, Factor::FuelMoisture);
        assert_eq!(err.value, "soggy");
        assert_eq!(err.to_string(), "'soggy' is not a valid fuel_moisture level");

        // Names are per factor: "medium" is a population level only
        assert!("medium".parse::<HumidityLevel>().is_err());
        assert!("medium".parse::<PopulationDensity>().is_ok());
    }

    #[test]
    fn test_declared_order_follows_danger() {
        assert!(HumidityLevel::High < HumidityLevel::VeryLow);
        assert!(WindSpeedLevel::Low < WindSpeedLevel::Extreme);
        assert!(InfrastructureCriticality::No < InfrastructureCriticality::Critical);
    }

    #[test]
    fn test_factor_level_names_match_enums() {
        assert_eq!(
            Factor::InfrastructureCriticality.level_names(),
            &["no", "no_critical", "slightly_critical", "critical"]
        );
        assert_eq!(Factor::PopulationDensity.level_names().len(), 3);
        for factor in Factor::ALL {
            assert!(!factor.level_names().is_empty(), "{factor} has no levels");
        }
    }

    #[test]
    fn test_serde_uses_snake_case_names() {
        let json = serde_json::to_string(&FuelMoisture::ExtremelyDry).unwrap();
        assert_eq!(json, "\"extremely_dry\"");
        let level: InfrastructureCriticality = serde_json::from_str("\"no_critical\"").unwrap();
        assert_eq!(level, InfrastructureCriticality::NoCritical);
        assert_eq!(
            serde_json::to_string(&Factor::WindSpeed).unwrap(),
            "\"wind_speed\""
        );
    }
}
