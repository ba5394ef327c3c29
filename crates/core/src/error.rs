#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    #[error("Invalid JSON in analysis response: {0}")]
    Json(#[from] serde_json::Error),
}
