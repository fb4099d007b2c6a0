//! Environmental snapshot: the seven categorical inputs of one assessment

use serde::{Deserialize, Serialize};

use crate::core_types::levels::{
    Factor, FactorLevel, FuelMoisture, HumidityLevel, InfrastructureCriticality,
    PopulationDensity, TemperatureLevel, Topography, UnknownLevel, WindSpeedLevel,
};
use crate::error::{ValidationError, Violation};

/// A fully validated set of factor levels.
///
/// Every field holds one of its enumerated levels; there is no partial
/// snapshot. Untrusted input goes through [`SnapshotInput`] and
/// `EnvironmentalSnapshot::try_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvironmentalSnapshot {
    pub fuel_moisture: FuelMoisture,
    pub temperature: TemperatureLevel,
    pub humidity: HumidityLevel,
    pub wind_speed: WindSpeedLevel,
    pub topography: Topography,
    pub population_density: PopulationDensity,
    pub infrastructure_criticality: InfrastructureCriticality,
}

impl EnvironmentalSnapshot {
    /// Create a snapshot from typed levels
    #[must_use]
    pub fn new(
        fuel_moisture: FuelMoisture,
        temperature: TemperatureLevel,
        humidity: HumidityLevel,
        wind_speed: WindSpeedLevel,
        topography: Topography,
        population_density: PopulationDensity,
        infrastructure_criticality: InfrastructureCriticality,
    ) -> Self {
        Self {
            fuel_moisture,
            temperature,
            humidity,
            wind_speed,
            topography,
            population_density,
            infrastructure_criticality,
        }
    }

    /// The safest possible snapshot (every factor at its lowest level)
    #[must_use]
    pub fn calmest() -> Self {
        Self::new(
            FuelMoisture::Moist,
            TemperatureLevel::Low,
            HumidityLevel::High,
            WindSpeedLevel::Low,
            Topography::Flat,
            PopulationDensity::Low,
            InfrastructureCriticality::No,
        )
    }

    /// The most dangerous possible snapshot (every factor at its highest level)
    #[must_use]
    pub fn most_severe() -> Self {
        Self::new(
            FuelMoisture::ExtremelyDry,
            TemperatureLevel::VeryHigh,
            HumidityLevel::VeryLow,
            WindSpeedLevel::Extreme,
            Topography::VerySteep,
            PopulationDensity::High,
            InfrastructureCriticality::Critical,
        )
    }

    /// Level name of `factor` in this snapshot
    #[must_use]
    pub fn level_name(&self, factor: Factor) -> &'static str {
        match factor {
            Factor::FuelMoisture => self.fuel_moisture.as_str(),
            Factor::Temperature => self.temperature.as_str(),
            Factor::Humidity => self.humidity.as_str(),
            Factor::WindSpeed => self.wind_speed.as_str(),
            Factor::Topography => self.topography.as_str(),
            Factor::PopulationDensity => self.population_density.as_str(),
            Factor::InfrastructureCriticality => self.infrastructure_criticality.as_str(),
        }
    }
}

/// Untrusted snapshot as received from a caller: every field is an optional
/// level name.
///
/// The short aliases (`fuel`, `temp`, `hum`, `wind`, `topo`, `pop`, `infra`)
/// are accepted when deserialising, matching the classify endpoint's
/// parameter names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotInput {
    #[serde(alias = "fuel")]
    pub fuel_moisture: Option<String>,
    #[serde(alias = "temp")]
    pub temperature: Option<String>,
    #[serde(alias = "hum")]
    pub humidity: Option<String>,
    #[serde(alias = "wind")]
    pub wind_speed: Option<String>,
    #[serde(alias = "topo")]
    pub topography: Option<String>,
    #[serde(alias = "pop")]
    pub population_density: Option<String>,
    #[serde(alias = "infra")]
    pub infrastructure_criticality: Option<String>,
}

impl SnapshotInput {
    /// Raw value supplied for `factor`, if any
    #[must_use]
    pub fn get(&self, factor: Factor) -> Option<&str> {
        let value = match factor {
            Factor::FuelMoisture => &self.fuel_moisture,
            Factor::Temperature => &self.temperature,
            Factor::Humidity => &self.humidity,
            Factor::WindSpeed => &self.wind_speed,
            Factor::Topography => &self.topography,
            Factor::PopulationDensity => &self.population_density,
            Factor::InfrastructureCriticality => &self.infrastructure_criticality,
        };
        value.as_deref()
    }

    /// Set the raw value for `factor`
    pub fn set(&mut self, factor: Factor, value: impl Into<String>) {
        let slot = match factor {
            Factor::FuelMoisture => &mut self.fuel_moisture,
            Factor::Temperature => &mut self.temperature,
            Factor::Humidity => &mut self.humidity,
            Factor::WindSpeed => &mut self.wind_speed,
            Factor::Topography => &mut self.topography,
            Factor::PopulationDensity => &mut self.population_density,
            Factor::InfrastructureCriticality => &mut self.infrastructure_criticality,
        };
        *slot = Some(value.into());
    }
}

impl From<&EnvironmentalSnapshot> for SnapshotInput {
    fn from(snapshot: &EnvironmentalSnapshot) -> Self {
        let mut input = SnapshotInput::default();
        for factor in Factor::ALL {
            input.set(factor, snapshot.level_name(factor));
        }
        input
    }
}

/// Parse one field, recording a violation instead of stopping at it
fn parse_field<L: FactorLevel>(
    input: &SnapshotInput,
    violations: &mut Vec<Violation>,
) -> Option<L> {
    let factor = L::FACTOR;
    match input.get(factor).map(str::trim) {
        None | Some("") => {
            violations.push(Violation::missing(factor.name()));
            None
        }
        Some(raw) => match raw.parse::<L>() {
            Ok(level) => Some(level),
            Err(UnknownLevel { value, .. }) => {
                violations.push(Violation::not_in_domain(factor.name(), value, L::NAMES));
                None
            }
        },
    }
}

impl TryFrom<&SnapshotInput> for EnvironmentalSnapshot {
    type Error = ValidationError;

    /// Validate every field, collecting all missing and out-of-domain values.
    fn try_from(input: &SnapshotInput) -> Result<Self, Self::Error> {
        let mut violations = Vec::new();

        let fuel_moisture = parse_field::<FuelMoisture>(input, &mut violations);
        let temperature = parse_field::<TemperatureLevel>(input, &mut violations);
        let humidity = parse_field::<HumidityLevel>(input, &mut violations);
        let wind_speed = parse_field::<WindSpeedLevel>(input, &mut violations);
        let topography = parse_field::<Topography>(input, &mut violations);
        let population_density = parse_field::<PopulationDensity>(input, &mut violations);
        let infrastructure_criticality =
            parse_field::<InfrastructureCriticality>(input, &mut violations);

        match (
            fuel_moisture,
            temperature,
            humidity,
            wind_speed,
            topography,
            population_density,
            infrastructure_criticality,
        ) {
            (Some(f), Some(t), Some(h), Some(w), Some(topo), Some(p), Some(i))
                if violations.is_empty() =>
            {
                Ok(EnvironmentalSnapshot::new(f, t, h, w, topo, p, i))
            }
            _ => Err(ValidationError {
                subject: "environmental snapshot",
                violations,
            }),
        }
    }
}

impl TryFrom<SnapshotInput> for EnvironmentalSnapshot {
    type Error = ValidationError;

    fn try_from(input: SnapshotInput) -> Result<Self, Self::Error> {
        EnvironmentalSnapshot::try_from(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViolationKind;

    fn full_input() -> SnapshotInput {
        SnapshotInput::from(&EnvironmentalSnapshot::most_severe())
    }

    #[test]
    fn test_valid_input_round_trips() {
        let snapshot = EnvironmentalSnapshot::try_from(&full_input()).unwrap();
        assert_eq!(snapshot, EnvironmentalSnapshot::most_severe());
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut input = full_input();
        input.wind_speed = None;

        let err = EnvironmentalSnapshot::try_from(&input).unwrap_err();
        assert_eq!(err.fields(), vec!["wind_speed"]);
        assert!(err.is_missing("wind_speed"));
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut input = full_input();
        input.topography = Some("   ".to_string());

        let err = EnvironmentalSnapshot::try_from(&input).unwrap_err();
        assert!(err.is_missing("topography"));
    }

    #[test]
    fn test_every_offending_field_is_reported_in_table_order() {
        let mut input = full_input();
        input.infrastructure_criticality = Some("very".to_string());
        input.fuel_moisture = None;
        input.humidity = Some("damp".to_string());

        let err = EnvironmentalSnapshot::try_from(&input).unwrap_err();
        assert_eq!(
            err.fields(),
            vec!["fuel_moisture", "humidity", "infrastructure_criticality"]
        );
        assert_eq!(
            err.violations[1].kind,
            ViolationKind::NotInDomain {
                value: "damp".to_string(),
                expected: &["high", "moderate", "low", "very_low"],
            }
        );
    }

    #[test]
    fn test_empty_input_reports_all_seven() {
        let err = EnvironmentalSnapshot::try_from(&SnapshotInput::default()).unwrap_err();
        assert_eq!(err.violations.len(), 7);
        assert!(err.violations.iter().all(|v| v.kind == ViolationKind::Missing));
    }

    #[test]
    fn test_short_aliases_deserialise() {
        let input: SnapshotInput = serde_json::from_str(
            r#"{"fuel":"dry","temp":"moderate","hum":"moderate","wind":"moderate",
                "topo":"hilly","pop":"medium","infra":"slightly_critical"}"#,
        )
        .unwrap();
        let snapshot = EnvironmentalSnapshot::try_from(input).unwrap();
        assert_eq!(snapshot.fuel_moisture, FuelMoisture::Dry);
        assert_eq!(
            snapshot.infrastructure_criticality,
            InfrastructureCriticality::SlightlyCritical
        );
    }
}
