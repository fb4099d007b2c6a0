//! C ABI for the wildfire risk engine
//!
//! Every fallible function returns a [`WildfireErrorCode`] and records a
//! per-thread message retrievable with `wildfire_get_last_error`. Strings
//! returned to the caller must be released with `wildfire_string_free`.

mod assessment;
mod error;
mod fdi;
mod helpers;

pub use assessment::{
    wildfire_assess, wildfire_explanation, wildfire_string_free, WildfireAssessment,
    WildfireEvacuation, WildfireResourcePlan, WildfireRiskTier, WildfireSnapshot,
};
pub use error::{wildfire_get_last_error, wildfire_get_last_error_code, WildfireErrorCode};
pub use fdi::{wildfire_fdi, WildfireFdiCategory, WildfireFdiInputs, WildfireFdiResult};
