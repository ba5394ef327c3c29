//! Request builder for `POST /analyze`.

use crate::error::CoreError;
use crate::selection::ImageSelection;
use crate::threshold::ConfidenceThreshold;

/// Multipart field carrying the image payload.
pub const IMAGE_FIELD: &str = "image";

/// Multipart field carrying the threshold as a decimal string.
pub const THRESHOLD_FIELD: &str = "confidence_threshold";

/// One analysis submission. Built fresh per trigger and dropped after send.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: ImageSelection,
    pub confidence_threshold: ConfidenceThreshold,
}

impl AnalysisRequest {
    /// The text-valued form field. The image part is attached separately
    /// since it carries a file name and MIME type.
    pub fn threshold_field(&self) -> (&'static str, String) {
        (THRESHOLD_FIELD, self.confidence_threshold.as_form_value())
    }
}

/// Package the current selection and threshold into a request.
///
/// Refuses with `CoreError::Validation` when nothing (or an empty file) is
/// selected. The threshold is taken as-is.
pub fn build_request(
    selection: Option<&ImageSelection>,
    confidence_threshold: ConfidenceThreshold,
) -> Result<AnalysisRequest, CoreError> {
    let image = match selection {
        Some(sel) if !sel.is_empty() => sel.clone(),
        Some(sel) => {
            return Err(CoreError::Validation(format!(
                "Selected image '{}' is empty",
                sel.file_name()
            )))
        }
        None => return Err(CoreError::Validation("No image selected".to_string())),
    };

    Ok(AnalysisRequest {
        image,
        confidence_threshold,
    })
}
