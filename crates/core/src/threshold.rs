//! Confidence threshold value and range validation.
//!
//! The threshold travels to the analysis service as a decimal string in
//! the `confidence_threshold` form field.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Threshold the service falls back to when none is submitted.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Validate that a value falls within `[0.0, 1.0]`.
///
/// Returns a `CoreError::Validation` naming the field if out of range.
pub fn validate_unit_range(value: f64, name: &str) -> Result<(), CoreError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )));
    }
    Ok(())
}

/// Minimum confidence (0-1) for a detection to be listed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceThreshold(f64);

impl ConfidenceThreshold {
    /// Build a threshold the way the slider does: out-of-range input is
    /// pinned to the nearest bound, NaN falls back to the default.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Build a threshold, rejecting values outside `[0.0, 1.0]`.
    pub fn try_new(value: f64) -> Result<Self, CoreError> {
        validate_unit_range(value, "confidence_threshold")?;
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Decimal string sent in the multipart form, e.g. `"0.5"`.
    pub fn as_form_value(self) -> String {
        self.0.to_string()
    }

    /// Readout shown next to the slider, e.g. `"0.50"`.
    pub fn display_value(self) -> String {
        format!("{:.2}", self.0)
    }
}

impl Default for ConfidenceThreshold {
    fn default() -> Self {
        Self(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}
