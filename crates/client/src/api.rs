//! REST API client for the analysis service HTTP endpoints.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sightline_core::error::CoreError;
use sightline_core::request::{AnalysisRequest, IMAGE_FIELD};
use sightline_core::response::{parse_response, AnalysisOutcome};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for a single analysis service.
#[derive(Debug, Clone)]
pub struct AnalyzerApi {
    client: reqwest::Client,
    api_url: String,
}

/// Response returned by the `/health` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Whether the detection model finished loading on the server.
    pub model_loaded: bool,
}

/// Errors from the analysis REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Analysis API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body arrived but did not match the response schema.
    #[error(transparent)]
    Response(#[from] CoreError),
}

impl AnalyzerApi {
    /// Create a new API client for an analysis service.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://host:5000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client whose requests give up after `timeout`.
    pub fn with_timeout(
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AnalyzerApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Submit an image for analysis.
    ///
    /// Sends `POST /analyze` with a multipart body holding the image file
    /// and the threshold. A `success: false` body is returned as
    /// [`AnalysisOutcome::Failure`], not as an error.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, AnalyzerApiError> {
        let request_id = uuid::Uuid::new_v4().to_string();

        let image = Part::bytes(request.image.bytes().to_vec())
            .file_name(request.image.file_name().to_string())
            .mime_str(request.image.mime_type())?;
        let (threshold_field, threshold_value) = request.threshold_field();
        let form = Form::new()
            .part(IMAGE_FIELD, image)
            .text(threshold_field, threshold_value);

        tracing::debug!(
            request_id = %request_id,
            file_name = %request.image.file_name(),
            bytes = request.image.len(),
            threshold = request.confidence_threshold.value(),
            "Submitting image for analysis",
        );

        let response = self
            .client
            .post(format!("{}/analyze", self.api_url))
            .header(REQUEST_ID_HEADER, &request_id)
            .multipart(form)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        let outcome = parse_response(&body)?;

        tracing::debug!(
            request_id = %request_id,
            success = matches!(outcome, AnalysisOutcome::Success(_)),
            "Analysis response received",
        );

        Ok(outcome)
    }

    /// Query service liveness and model status via `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, AnalyzerApiError> {
        let response = self
            .client
            .get(format!("{}/health", self.api_url))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<HealthStatus>().await?)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`AnalyzerApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AnalyzerApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AnalyzerApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
