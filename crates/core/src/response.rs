//! Analysis response schema and validation.
//!
//! The service replies with a single JSON object whose shape depends on
//! `success`. [`AnalysisResponse`] mirrors that object field-for-field with
//! everything optional; [`AnalysisOutcome`] is the validated, tagged form
//! the renderer consumes. Anything that does not fit the schema is
//! rejected as a whole.

use serde::{Deserialize, Serialize};

use crate::detection::Detection;
use crate::error::CoreError;
use crate::threshold::validate_unit_range;

/// Raw JSON body of `POST /analyze`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detections: Option<Vec<Detection>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_detections: Option<Vec<Detection>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_detected: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Validated payload of a successful analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Detections at or above the threshold, in server order.
    pub detections: Vec<Detection>,
    /// Every detection before threshold filtering, when the server sent it.
    pub all_detections: Option<Vec<Detection>>,
    pub total_detected: u64,
    pub filtered_count: u64,
    pub confidence_threshold: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Success(AnalysisReport),
    /// The service handled the request but reported a failure.
    Failure { error: String },
}

impl TryFrom<AnalysisResponse> for AnalysisOutcome {
    type Error = CoreError;

    fn try_from(raw: AnalysisResponse) -> Result<Self, Self::Error> {
        let success = raw.success.ok_or_else(|| missing("success"))?;

        if !success {
            let error = raw.error.ok_or_else(|| missing("error"))?;
            return Ok(AnalysisOutcome::Failure { error });
        }

        let detections = raw.detections.ok_or_else(|| missing("detections"))?;
        let total_detected = raw.total_detected.ok_or_else(|| missing("total_detected"))?;
        let filtered_count = raw.filtered_count.ok_or_else(|| missing("filtered_count"))?;
        let confidence_threshold = raw
            .confidence_threshold
            .ok_or_else(|| missing("confidence_threshold"))?;

        validate_unit_range(confidence_threshold, "confidence_threshold")
            .map_err(|e| CoreError::MalformedResponse(e.to_string()))?;

        if filtered_count != detections.len() as u64 {
            return Err(CoreError::MalformedResponse(format!(
                "filtered_count is {filtered_count} but {} detections were returned",
                detections.len()
            )));
        }
        if filtered_count > total_detected {
            return Err(CoreError::MalformedResponse(format!(
                "filtered_count ({filtered_count}) exceeds total_detected ({total_detected})"
            )));
        }

        for detection in detections.iter().chain(raw.all_detections.iter().flatten()) {
            detection.validate()?;
        }

        Ok(AnalysisOutcome::Success(AnalysisReport {
            detections,
            all_detections: raw.all_detections,
            total_detected,
            filtered_count,
            confidence_threshold,
        }))
    }
}

fn missing(field: &str) -> CoreError {
    CoreError::MalformedResponse(format!("missing required field '{field}'"))
}

/// Parse and validate a response body.
///
/// Returns `CoreError::Json` for bodies that are not JSON objects of the
/// expected field types and `CoreError::MalformedResponse` for schema or
/// invariant violations.
pub fn parse_response(body: &str) -> Result<AnalysisOutcome, CoreError> {
    let raw: AnalysisResponse = serde_json::from_str(body)?;
    AnalysisOutcome::try_from(raw)
}
