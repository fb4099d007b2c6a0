//! Categorical risk classification across the C ABI

use crate::error::{DefaultWildfireError, WildfireErrorCode};
use crate::helpers::{read_c_str, string_into_raw, track_error, track_result};
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;
use wildfire_risk_core::scoring::DEFAULT_EXPLANATION_FACTORS;
use wildfire_risk_core::{
    EngineConfig, Evacuation, Factor, ResourcePlan, RiskAssessment, RiskEngine, RiskTier,
    SnapshotInput,
};

/// Seven factor levels as null-terminated level names (e.g. `"extremely_dry"`).
///
/// A null field counts as missing.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WildfireSnapshot {
    pub fuel_moisture: *const c_char,
    pub temperature: *const c_char,
    pub humidity: *const c_char,
    pub wind_speed: *const c_char,
    pub topography: *const c_char,
    pub population_density: *const c_char,
    pub infrastructure_criticality: *const c_char,
}

/// Risk tier, lowest first
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildfireRiskTier {
    VeryLow = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    VeryHigh = 4,
    Extreme = 5,
}

impl From<RiskTier> for WildfireRiskTier {
    fn from(tier: RiskTier) -> Self {
        match tier {
            RiskTier::VeryLow => Self::VeryLow,
            RiskTier::Low => Self::Low,
            RiskTier::Medium => Self::Medium,
            RiskTier::High => Self::High,
            RiskTier::VeryHigh => Self::VeryHigh,
            RiskTier::Extreme => Self::Extreme,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildfireEvacuation {
    No = 0,
    Maybe = 1,
    Yes = 2,
}

impl From<Evacuation> for WildfireEvacuation {
    fn from(evacuation: Evacuation) -> Self {
        match evacuation {
            Evacuation::No => Self::No,
            Evacuation::Maybe => Self::Maybe,
            Evacuation::Yes => Self::Yes,
        }
    }
}

/// Resources to dispatch, each plan including the previous one
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildfireResourcePlan {
    FireEngines = 0,
    FireEnginesAndWaterTankers = 1,
    FireEnginesAndWaterTankersAndAerialSupport = 2,
}

impl From<ResourcePlan> for WildfireResourcePlan {
    fn from(plan: ResourcePlan) -> Self {
        match plan {
            ResourcePlan::FireEngines => Self::FireEngines,
            ResourcePlan::FireEnginesAndWaterTankers => Self::FireEnginesAndWaterTankers,
            ResourcePlan::FireEnginesAndWaterTankersAndAerialSupport => {
                Self::FireEnginesAndWaterTankersAndAerialSupport
            }
        }
    }
}

/// Classification outcome (the explanation is fetched separately with
/// `wildfire_explanation`)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WildfireAssessment {
    pub total_score: u32,
    pub risk_tier: WildfireRiskTier,
    pub evacuation: WildfireEvacuation,
    pub resources: WildfireResourcePlan,
}

impl From<&RiskAssessment> for WildfireAssessment {
    fn from(assessment: &RiskAssessment) -> Self {
        Self {
            total_score: assessment.total_score,
            risk_tier: assessment.risk_tier.into(),
            evacuation: assessment.evacuation.into(),
            resources: assessment.resources.into(),
        }
    }
}

impl WildfireSnapshot {
    fn field(&self, factor: Factor) -> *const c_char {
        match factor {
            Factor::FuelMoisture => self.fuel_moisture,
            Factor::Temperature => self.temperature,
            Factor::Humidity => self.humidity,
            Factor::WindSpeed => self.wind_speed,
            Factor::Topography => self.topography,
            Factor::PopulationDensity => self.population_density,
            Factor::InfrastructureCriticality => self.infrastructure_criticality,
        }
    }

    /// Copy the level names into an owned input.
    ///
    /// # Safety
    ///
    /// Every non-null field must point to a null-terminated string.
    unsafe fn to_input(&self) -> Result<SnapshotInput, DefaultWildfireError> {
        let mut input = SnapshotInput::default();
        for factor in Factor::ALL {
            // SAFETY: forwarded from this function's contract.
            if let Some(level) = unsafe { read_c_str(self.field(factor), factor.name()) }? {
                input.set(factor, level);
            }
        }
        Ok(input)
    }
}

/// Validate and classify a snapshot, naming up to `max_factors` factors.
///
/// # Safety
///
/// `snapshot` must point to a valid `WildfireSnapshot` whose non-null fields
/// are null-terminated strings.
unsafe fn classify(
    snapshot: *const WildfireSnapshot,
    max_factors: usize,
) -> Result<RiskAssessment, DefaultWildfireError> {
    if snapshot.is_null() {
        return Err(DefaultWildfireError::null_pointer("snapshot"));
    }
    // SAFETY: checked non-null above; validity is the caller's contract.
    let input = unsafe { (*snapshot).to_input() }?;

    let mut config = EngineConfig::default();
    config.explanation.max_factors = max_factors.clamp(1, Factor::ALL.len());
    let engine = RiskEngine::new(config).unwrap_or_default();
    Ok(engine.classify_input(&input)?)
}

/// Classify a snapshot of factor levels.
///
/// Error Codes
/// - `WildfireErrorCode::Ok` — `out_assessment` was written
/// - `WildfireErrorCode::NullPointer` — `snapshot` or `out_assessment` is null
/// - `WildfireErrorCode::InvalidUtf8` — a level name is not UTF-8
/// - `WildfireErrorCode::ValidationFailed` — levels missing or unknown; call
///   `wildfire_get_last_error()` for the list of fields
///
/// # Safety
///
/// - `snapshot` must point to a valid `WildfireSnapshot` whose non-null fields
///   are null-terminated strings.
/// - `out_assessment` must be a valid, non-null pointer to writable memory.
///
/// Example (C)
/// ```c
/// WildfireSnapshot snapshot = {
///     "dry", "moderate", "moderate", "moderate", "hilly", "medium", "slightly_critical",
/// };
/// WildfireAssessment out;
/// if (wildfire_assess(&snapshot, &out) == Ok) {
///     printf("score %u, tier %d\n", out.total_score, out.risk_tier);
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn wildfire_assess(
    snapshot: *const WildfireSnapshot,
    out_assessment: *mut WildfireAssessment,
) -> WildfireErrorCode {
    if out_assessment.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_assessment"));
    }

    // SAFETY: forwarded from this function's contract.
    match track_result(unsafe { classify(snapshot, DEFAULT_EXPLANATION_FACTORS) }) {
        Ok(assessment) => {
            unsafe {
                *out_assessment = WildfireAssessment::from(&assessment);
            }
            WildfireErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Explanation sentence for a snapshot, naming up to `max_factors` factors
/// (clamped to 1..=7).
///
/// Returns a newly allocated string the caller MUST release with
/// `wildfire_string_free`, or null on failure (see `wildfire_get_last_error`).
///
/// # Safety
///
/// `snapshot` must point to a valid `WildfireSnapshot` whose non-null fields
/// are null-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn wildfire_explanation(
    snapshot: *const WildfireSnapshot,
    max_factors: usize,
) -> *mut c_char {
    // SAFETY: forwarded from this function's contract.
    match track_result(unsafe { classify(snapshot, max_factors) }) {
        Ok(assessment) => string_into_raw(assessment.explanation),
        Err(_) => ptr::null_mut(),
    }
}

/// Release a string returned by this library. Null is a no-op.
///
/// # Safety
///
/// - The pointer MUST have been returned by `wildfire_explanation`.
/// - The pointer MUST NOT be used or freed again afterwards.
#[no_mangle]
pub unsafe extern "C" fn wildfire_string_free(value: *mut c_char) {
    if value.is_null() {
        return;
    }

    // SAFETY: the pointer came from `CString::into_raw` and is released once.
    unsafe {
        drop(CString::from_raw(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{wildfire_get_last_error, wildfire_get_last_error_code};
    use std::ffi::CStr;

    struct Levels(Vec<CString>);

    impl Levels {
        fn new(levels: [&str; 7]) -> Self {
            Self(levels.iter().map(|l| CString::new(*l).unwrap()).collect())
        }

        fn snapshot(&self) -> WildfireSnapshot {
            WildfireSnapshot {
                fuel_moisture: self.0[0].as_ptr(),
                temperature: self.0[1].as_ptr(),
                humidity: self.0[2].as_ptr(),
                wind_speed: self.0[3].as_ptr(),
                topography: self.0[4].as_ptr(),
                population_density: self.0[5].as_ptr(),
                infrastructure_criticality: self.0[6].as_ptr(),
            }
        }
    }

    fn mixed() -> Levels {
        Levels::new([
            "dry",
            "moderate",
            "moderate",
            "moderate",
            "hilly",
            "medium",
            "slightly_critical",
        ])
    }

    #[test]
    fn test_assess_writes_output() {
        let levels = mixed();
        let snapshot = levels.snapshot();
        let mut out = WildfireAssessment {
            total_score: 0,
            risk_tier: WildfireRiskTier::VeryLow,
            evacuation: WildfireEvacuation::No,
            resources: WildfireResourcePlan::FireEngines,
        };

        let code = unsafe { wildfire_assess(&snapshot, &mut out) };
        assert_eq!(code, WildfireErrorCode::Ok);
        assert_eq!(out.total_score, 64);
        assert_eq!(out.risk_tier, WildfireRiskTier::High);
        assert_eq!(out.evacuation, WildfireEvacuation::Maybe);
        assert_eq!(out.resources, WildfireResourcePlan::FireEnginesAndWaterTankers);
        assert!(wildfire_get_last_error().is_null());
    }

    #[test]
    fn test_missing_level_sets_last_error() {
        let levels = mixed();
        let mut snapshot = levels.snapshot();
        snapshot.wind_speed = ptr::null();
        let mut out = WildfireAssessment {
            total_score: 0,
            risk_tier: WildfireRiskTier::VeryLow,
            evacuation: WildfireEvacuation::No,
            resources: WildfireResourcePlan::FireEngines,
        };

        let code = unsafe { wildfire_assess(&snapshot, &mut out) };
        assert_eq!(code, WildfireErrorCode::ValidationFailed);
        assert_eq!(wildfire_get_last_error_code(), WildfireErrorCode::ValidationFailed);
        let message = unsafe { CStr::from_ptr(wildfire_get_last_error()) };
        assert!(message.to_str().unwrap().contains("wind_speed is missing"));
        assert_eq!(out.total_score, 0);
    }

    #[test]
    fn test_null_pointers_are_rejected() {
        let levels = mixed();
        let snapshot = levels.snapshot();
        let code = unsafe { wildfire_assess(&snapshot, ptr::null_mut()) };
        assert_eq!(code, WildfireErrorCode::NullPointer);

        let explanation = unsafe { wildfire_explanation(ptr::null(), 3) };
        assert!(explanation.is_null());
        assert_eq!(wildfire_get_last_error_code(), WildfireErrorCode::NullPointer);
    }

    #[test]
    fn test_explanation_round_trip() {
        let levels = Levels::new([
            "extremely_dry",
            "very_high",
            "very_low",
            "extreme",
            "very_steep",
            "high",
            "critical",
        ]);
        let snapshot = levels.snapshot();
        let explanation = unsafe { wildfire_explanation(&snapshot, 2) };
        assert!(!explanation.is_null());
        let text = unsafe { CStr::from_ptr(explanation) }.to_str().unwrap().to_owned();
        unsafe { wildfire_string_free(explanation) };
        assert_eq!(
            text,
            "Extreme risk driven primarily by extremely dry fuel and very high temperature."
        );
    }
}
