//! Wildfire risk command line
//!
//! Classifies either seven categorical levels or a set of raw measurements
//! and prints a text or JSON report.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wildfire_risk_core::{
    Celsius, ConfidenceLevel, Degrees, EngineConfig, Factor, FireDetection, FireThreatAssessment,
    GeoPoint, KilometersPerHour, LocationReport, Millimeters, Percent, RawConditions,
    RiskAssessment, RiskEngine, Settlement, SnapshotInput, ValidationError,
};

/// Exit code when the input itself was rejected
const EXIT_INVALID_INPUT: u8 = 2;

/// Wildfire risk assessment with configurable inputs
#[derive(Parser, Debug)]
#[command(name = "wildfire-risk")]
#[command(about = "Classify wildfire risk from factor levels or raw measurements", long_about = None)]
struct Args {
    /// Fuel moisture (moist, moderate, dry, extremely_dry)
    #[arg(long)]
    fuel: Option<String>,

    /// Temperature level (low, moderate, high, very_high)
    #[arg(long)]
    temp: Option<String>,

    /// Humidity level (high, moderate, low, very_low)
    #[arg(long)]
    hum: Option<String>,

    /// Wind speed level (low, moderate, strong, extreme)
    #[arg(long)]
    wind: Option<String>,

    /// Topography (flat, hilly, steep, very_steep)
    #[arg(long)]
    topo: Option<String>,

    /// Population density (low, medium, high)
    #[arg(long)]
    pop: Option<String>,

    /// Infrastructure criticality (no, no_critical, slightly_critical, critical)
    #[arg(long)]
    infra: Option<String>,

    /// Air temperature in °C (switches to raw measurements)
    #[arg(
        long,
        allow_negative_numbers = true,
        requires_all = ["humidity", "wind_speed"],
        conflicts_with_all = ["fuel", "temp", "hum", "wind", "topo", "pop", "infra"]
    )]
    temperature: Option<f32>,

    /// Relative humidity in %
    #[arg(long, allow_negative_numbers = true, requires = "temperature")]
    humidity: Option<f32>,

    /// Wind speed in km/h
    #[arg(long, allow_negative_numbers = true, requires = "temperature")]
    wind_speed: Option<f32>,

    /// Depth of the last rain event in mm
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rainfall: f32,

    /// Days since the last rain event
    #[arg(long, default_value_t = 7)]
    days_since_rain: u32,

    /// Terrain slope in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    slope: f32,

    /// Settlement kind (city, town, village, suburb, neighbourhood, rural)
    #[arg(long, default_value = "rural")]
    settlement: String,

    /// Critical facilities nearby (hospitals, fire stations, police, power)
    #[arg(long, default_value_t = 0)]
    facilities: u32,

    /// Latitude of the assessed location (raw measurements only)
    #[arg(long, allow_negative_numbers = true, requires_all = ["lon", "temperature"])]
    lat: Option<f64>,

    /// Longitude of the assessed location (raw measurements only)
    #[arg(long, allow_negative_numbers = true, requires_all = ["lat", "temperature"])]
    lon: Option<f64>,

    /// Active fire detection as LAT,LON[,CONFIDENCE] (repeatable, needs --lat/--lon)
    #[arg(
        long = "fire",
        value_name = "LAT,LON[,CONFIDENCE]",
        allow_hyphen_values = true,
        requires_all = ["lat", "temperature"]
    )]
    fires: Vec<String>,

    /// JSON engine configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> anyhow::Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    info!("Loaded engine configuration from {}", path.display());
    Ok(config)
}

fn parse_fire(raw: &str) -> anyhow::Result<FireDetection> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let (lat, lon, confidence) = match parts.as_slice() {
        [lat, lon] => (*lat, *lon, "nominal"),
        [lat, lon, confidence] => (*lat, *lon, *confidence),
        _ => anyhow::bail!("fire detection must be LAT,LON[,CONFIDENCE], got '{raw}'"),
    };
    let latitude: f64 = lat
        .parse()
        .with_context(|| format!("invalid fire latitude '{lat}'"))?;
    let longitude: f64 = lon
        .parse()
        .with_context(|| format!("invalid fire longitude '{lon}'"))?;
    let location = GeoPoint::new(latitude, longitude);
    location
        .validate()
        .with_context(|| format!("invalid fire detection '{raw}'"))?;
    Ok(FireDetection::new(location, ConfidenceLevel::parse(confidence)))
}

impl Args {
    fn snapshot_input(&self) -> SnapshotInput {
        let mut input = SnapshotInput::default();
        let flags = [
            (Factor::FuelMoisture, &self.fuel),
            (Factor::Temperature, &self.temp),
            (Factor::Humidity, &self.hum),
            (Factor::WindSpeed, &self.wind),
            (Factor::Topography, &self.topo),
            (Factor::PopulationDensity, &self.pop),
            (Factor::InfrastructureCriticality, &self.infra),
        ];
        for (factor, value) in flags {
            if let Some(value) = value {
                input.set(factor, value.as_str());
            }
        }
        input
    }

    /// Raw measurements, when `--temperature` was given
    fn raw_conditions(&self) -> Option<RawConditions> {
        let temperature = self.temperature?;
        Some(RawConditions {
            temperature: Celsius::new(temperature),
            humidity: Percent::new(self.humidity.unwrap_or(f32::NAN)),
            wind_speed: KilometersPerHour::new(self.wind_speed.unwrap_or(f32::NAN)),
            rainfall: Millimeters::new(self.rainfall),
            days_since_rain: self.days_since_rain,
            slope: Degrees::new(self.slope),
            settlement: Settlement::from_place_type(&self.settlement),
            critical_facilities: self.facilities,
        })
    }

    fn location(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.lat?, self.lon?))
    }
}

fn print_assessment(assessment: &RiskAssessment) {
    println!("Risk tier:    {}", assessment.risk_tier);
    println!("Total score:  {}/130", assessment.total_score);
    println!("Evacuation:   {}", assessment.evacuation);
    println!("Resources:    {}", assessment.resources);
    println!("Explanation:  {}", assessment.explanation);
    println!();
    println!("Factor contributions:");
    for contribution in &assessment.contributions {
        println!(
            "  {:<28} {:<18} {:>3}",
            contribution.factor.name(),
            contribution.level,
            contribution.points
        );
    }
}

fn print_fire_threat(threat: &FireThreatAssessment) {
    println!();
    println!("Active fires: {} within check radius", threat.nearby_fire_count);
    if let Some(closest) = threat.closest() {
        println!(
            "  Closest:    {} away ({} confidence)",
            closest.distance, closest.detection.confidence
        );
    }
    println!("  Threat:     {}", threat.threat_level);
    println!(
        "  Tier:       {} -> {}",
        threat.base_tier, threat.elevated_tier
    );
    if threat.evacuation.recommended {
        println!("  {}", threat.evacuation.reason);
    }
}

fn print_report(report: &LocationReport) {
    let snapshot = &report.snapshot;
    println!("Conditions:");
    println!(
        "  {} / {} / {} / {} slope / {} / {} critical facilities",
        report.conditions.temperature,
        report.conditions.humidity,
        report.conditions.wind_speed,
        report.conditions.slope,
        report.conditions.settlement,
        report.conditions.critical_facilities
    );
    println!(
        "  Rain: {} {} day(s) ago -> fuel {}",
        report.conditions.rainfall, report.conditions.days_since_rain, snapshot.fuel_moisture
    );
    println!();
    print_assessment(&report.assessment);
    println!();
    println!(
        "Fire Danger Index: {:.1} ({})",
        report.fdi.value,
        report.fdi.category.label()
    );
    if let Some(threat) = &report.fire_threat {
        print_fire_threat(threat);
    }
    if report.effective_tier() != report.assessment.risk_tier {
        let recommendation = report.effective_recommendation();
        println!();
        println!(
            "Effective tier: {} (evacuation {}, {})",
            report.effective_tier(),
            recommendation.evacuation,
            recommendation.resources
        );
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    let engine = RiskEngine::new(config).context("Invalid engine configuration")?;

    if let Some(conditions) = args.raw_conditions() {
        let detections = args
            .fires
            .iter()
            .map(|raw| parse_fire(raw))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let report = engine.assess_location(&conditions, args.location(), &detections)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
    } else {
        let assessment = engine.classify_input(&args.snapshot_input())?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        } else {
            print_assessment(&assessment);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(validation) = err.downcast_ref::<ValidationError>() {
                eprintln!("Rejected input: {validation}");
                if args.json {
                    if let Ok(json) = serde_json::to_string_pretty(validation) {
                        println!("{json}");
                    }
                }
                ExitCode::from(EXIT_INVALID_INPUT)
            } else {
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        }
    }
}
