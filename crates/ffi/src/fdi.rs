//! Fire Danger Index across the C ABI

use crate::error::{DefaultWildfireError, WildfireErrorCode};
use crate::helpers::{track_error, track_result};
use wildfire_risk_core::{
    Celsius, FdiCategory, FdiInputs, KilometersPerHour, Millimeters, Percent, RiskEngine,
};

/// Raw weather and rain inputs
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WildfireFdiInputs {
    pub temperature_c: f32,
    /// 0-100
    pub humidity_pct: f32,
    /// Non-negative
    pub wind_speed_kmh: f32,
    /// Depth of the last rain event, non-negative
    pub rainfall_mm: f32,
    pub days_since_rain: u32,
}

impl From<WildfireFdiInputs> for FdiInputs {
    fn from(inputs: WildfireFdiInputs) -> Self {
        Self {
            temperature: Celsius::new(inputs.temperature_c),
            humidity: Percent::new(inputs.humidity_pct),
            wind_speed: KilometersPerHour::new(inputs.wind_speed_kmh),
            rainfall: Millimeters::new(inputs.rainfall_mm),
            days_since_rain: inputs.days_since_rain,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildfireFdiCategory {
    Blue = 0,
    Green = 1,
    Yellow = 2,
    Orange = 3,
    Red = 4,
}

impl From<FdiCategory> for WildfireFdiCategory {
    fn from(category: FdiCategory) -> Self {
        match category {
            FdiCategory::Blue => Self::Blue,
            FdiCategory::Green => Self::Green,
            FdiCategory::Yellow => Self::Yellow,
            FdiCategory::Orange => Self::Orange,
            FdiCategory::Red => Self::Red,
        }
    }
}

/// FDI value (rounded to one decimal) and its category
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WildfireFdiResult {
    pub value: f32,
    pub category: WildfireFdiCategory,
    /// Rain recovery multiplier that was applied
    pub rain_adjustment: f32,
}

/// Compute the Fire Danger Index.
///
/// Error Codes
/// - `WildfireErrorCode::Ok` — `out_result` was written
/// - `WildfireErrorCode::NullPointer` — `out_result` is null
/// - `WildfireErrorCode::ValidationFailed` — humidity outside [0, 100], or
///   negative or non-finite wind or rainfall, or non-finite temperature
///
/// # Safety
///
/// `out_result` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn wildfire_fdi(
    inputs: WildfireFdiInputs,
    out_result: *mut WildfireFdiResult,
) -> WildfireErrorCode {
    if out_result.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_result"));
    }

    let result = RiskEngine::default()
        .fire_danger_index(&inputs.into())
        .map_err(DefaultWildfireError::from);
    match track_result(result) {
        Ok(fdi) => {
            unsafe {
                *out_result = WildfireFdiResult {
                    value: fdi.value,
                    category: fdi.category.into(),
                    rain_adjustment: fdi.rain_adjustment,
                };
            }
            WildfireErrorCode::Ok
        }
        Err(code) => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    fn inputs() -> WildfireFdiInputs {
        WildfireFdiInputs {
            temperature_c: 30.0,
            humidity_pct: 30.0,
            wind_speed_kmh: 20.0,
            rainfall_mm: 0.0,
            days_since_rain: 30,
        }
    }

    #[test]
    fn test_fdi_writes_result() {
        let mut out = WildfireFdiResult {
            value: -1.0,
            category: WildfireFdiCategory::Blue,
            rain_adjustment: 0.0,
        };
        let code = unsafe { wildfire_fdi(inputs(), &mut out) };
        assert_eq!(code, WildfireErrorCode::Ok);
        assert_eq!(out.value, 61.0);
        assert_eq!(out.category, WildfireFdiCategory::Orange);
        assert_eq!(out.rain_adjustment, 1.0);
    }

    #[test]
    fn test_fdi_rejects_bad_humidity() {
        let mut out = WildfireFdiResult {
            value: -1.0,
            category: WildfireFdiCategory::Blue,
            rain_adjustment: 0.0,
        };
        let bad = WildfireFdiInputs {
            humidity_pct: 140.0,
            ..inputs()
        };
        let code = unsafe { wildfire_fdi(bad, &mut out) };
        assert_eq!(code, WildfireErrorCode::ValidationFailed);
        assert_eq!(out.value, -1.0);
    }

    #[test]
    fn test_fdi_null_output() {
        let code = unsafe { wildfire_fdi(inputs(), ptr::null_mut()) };
        assert_eq!(code, WildfireErrorCode::NullPointer);
    }
}
