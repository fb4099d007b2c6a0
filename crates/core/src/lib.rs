//! Wildfire Risk Core Library
//!
//! A deterministic rule engine for wildfire risk. Seven categorical factor
//! levels are scored, summed and banded into a risk tier that alone decides
//! the evacuation flag and resource plan. Alongside it, a numeric Fire Danger
//! Index (FDI) is computed from weather and rain history.
//!
//! ## Layers
//!
//! - Categorical classification: [`scoring`] over an [`EnvironmentalSnapshot`]
//! - Numeric danger index: [`fdi`]
//! - Raw measurements to levels: [`bucketing`]
//! - Active fire detections: [`hotspots`]
//! - Everything at once for one location: [`RiskEngine::assess_location`]
//!
//! All operations are pure; a [`RiskEngine`] can be shared across threads.

// Core types and utilities
pub mod config;
pub mod core_types;
pub mod error;

// Rule engine
pub mod engine;
pub mod scoring;

// Numeric and raw-data models
pub mod bucketing;
pub mod fdi;
pub mod hotspots;
pub mod report;

// Re-export core types
pub use core_types::{
    Celsius, Degrees, EnvironmentalSnapshot, Factor, FactorLevel, FuelMoisture, HumidityLevel,
    InfrastructureCriticality, Kilometers, KilometersPerHour, Meters, Millimeters, Percent,
    PopulationDensity, SnapshotInput, TemperatureLevel, Topography, WindSpeedLevel,
};

// Re-export engine types
pub use config::EngineConfig;
pub use engine::RiskEngine;
pub use error::{ConfigError, ValidationError, Violation, ViolationKind};
pub use scoring::{classify, Evacuation, Recommendation, ResourcePlan, RiskAssessment, RiskTier};

// Re-export model types
pub use bucketing::{RawConditions, Settlement};
pub use fdi::{calculate_fdi, FdiCategory, FdiInputs, FdiResult};
pub use hotspots::{
    analyze_fire_threat, detection_violations, ConfidenceLevel, FireDetection,
    FireThreatAssessment, GeoPoint, ThreatLevel,
};
pub use report::LocationReport;
