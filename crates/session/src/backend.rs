//! Seam between the session and the analysis service.

use async_trait::async_trait;
use sightline_client::api::{AnalyzerApi, AnalyzerApiError};
use sightline_core::request::AnalysisRequest;
use sightline_core::response::AnalysisOutcome;

/// Anything that can turn one request into one outcome.
///
/// Implementations perform exactly one round trip per call and never
/// retry.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest)
        -> Result<AnalysisOutcome, AnalyzerApiError>;
}

#[async_trait]
impl AnalysisBackend for AnalyzerApi {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, AnalyzerApiError> {
        AnalyzerApi::analyze(self, request).await
    }
}
