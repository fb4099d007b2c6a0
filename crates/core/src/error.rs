//! Error types for input validation and engine configuration

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Why a single input field was rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// The field was absent or empty
    Missing,
    /// The value is not one of the field's enumerated levels
    NotInDomain {
        /// The rejected value, as given
        value: String,
        /// Accepted values
        expected: &'static [&'static str],
    },
    /// A numeric value outside its permitted range
    OutOfRange {
        /// The rejected value
        value: f32,
        /// Human-readable constraint, e.g. "must be within [0, 100]"
        constraint: &'static str,
    },
}

/// A rejected input field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Name of the offending field, e.g. `humidity` or `fires[2].latitude`
    pub field: Cow<'static, str>,
    /// What was wrong with it
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    /// Field was absent or empty
    #[must_use]
    pub fn missing(field: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::Missing,
        }
    }

    /// Value outside the field's enumerated domain
    #[must_use]
    pub fn not_in_domain(
        field: impl Into<Cow<'static, str>>,
        value: impl Into<String>,
        expected: &'static [&'static str],
    ) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::NotInDomain {
                value: value.into(),
                expected,
            },
        }
    }

    /// Numeric value outside its permitted range
    #[must_use]
    pub fn out_of_range(
        field: impl Into<Cow<'static, str>>,
        value: f32,
        constraint: &'static str,
    ) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::OutOfRange { value, constraint },
        }
    }

    /// The same violation reported under `prefix`, as `prefix.field`
    #[must_use]
    pub fn nested(self, prefix: &str) -> Self {
        Self {
            field: Cow::Owned(format!("{prefix}.{}", self.field)),
            kind: self.kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{} is missing", self.field),
            ViolationKind::NotInDomain { value, expected } => write!(
                f,
                "{} '{}' is not one of [{}]",
                self.field,
                value,
                expected.join(", ")
            ),
            ViolationKind::OutOfRange { value, constraint } => {
                write!(f, "{} {} {}", self.field, value, constraint)
            }
        }
    }
}

/// Input rejected before any classification took place.
///
/// Always carries every offending field, never just the first one found.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("invalid {subject}: {}", join_violations(.violations))]
pub struct ValidationError {
    /// What was being validated ("environmental snapshot", "FDI inputs")
    pub subject: &'static str,
    /// Every rejected field, in declaration order
    pub violations: Vec<Violation>,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// `Ok(())` when nothing was collected, otherwise the collected violations.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when `violations` is non-empty.
    pub fn check(subject: &'static str, violations: Vec<Violation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self {
                subject,
                violations,
            })
        }
    }

    /// Names of the offending fields, in order
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_ref()).collect()
    }

    /// Whether `field` was rejected for being absent
    #[must_use]
    pub fn is_missing(&self, field: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.kind == ViolationKind::Missing)
    }
}

/// Malformed engine configuration.
///
/// Built-in tables are checked by unit tests; this covers values supplied
/// through [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("explanation.max_factors must be between 1 and {max}, got {value}")]
    ExplanationFactorCount { value: usize, max: usize },

    #[error("fdi.rain_horizon_days must be at least 1")]
    ZeroRainHorizon,

    #[error("fdi.precision must be at most {max} decimal places, got {value}")]
    Precision { value: u32, max: u32 },

    #[error("fdi.category_cutoffs must be finite, non-negative and strictly ascending, got {cutoffs:?}")]
    CategoryCutoffs { cutoffs: [f32; 4] },

    #[error("threat.check_radius_km must be finite and positive, got {value}")]
    CheckRadius { value: f32 },
}
