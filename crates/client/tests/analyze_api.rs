//! Integration tests for [`AnalyzerApi`] against an in-process HTTP server.
//!
//! Each test binds an axum router to `127.0.0.1:0`, points the client at
//! it, and checks both what the server received and what the client made
//! of the reply.

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use sightline_client::api::{AnalyzerApi, AnalyzerApiError};
use sightline_core::error::CoreError;
use sightline_core::request::build_request;
use sightline_core::response::AnalysisOutcome;
use sightline_core::selection::ImageSelection;
use sightline_core::threshold::ConfidenceThreshold;

/// What the fake service saw in one multipart submission.
#[derive(Debug, Default, Clone)]
struct Received {
    image_name: Option<String>,
    image_type: Option<String>,
    image_bytes: Vec<u8>,
    threshold: Option<String>,
    request_id: Option<String>,
}

#[derive(Clone)]
struct FakeService {
    received: Arc<Mutex<Vec<Received>>>,
    reply_status: StatusCode,
    reply_body: String,
}

async fn analyze_handler(
    State(svc): State<FakeService>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut received = Received {
        request_id: headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        ..Default::default()
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                received.image_name = field.file_name().map(str::to_string);
                received.image_type = field.content_type().map(str::to_string);
                received.image_bytes = field.bytes().await.unwrap().to_vec();
            }
            "confidence_threshold" => {
                received.threshold = Some(field.text().await.unwrap());
            }
            _ => {}
        }
    }

    svc.received.lock().unwrap().push(received);
    (
        svc.reply_status,
        [("content-type", "application/json")],
        svc.reply_body.clone(),
    )
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Image Analyzer App is running",
        "model_loaded": true
    }))
}

/// Start a fake service replying with `status` and `body`. Returns the base
/// URL and the log of received submissions.
async fn spawn_service(status: StatusCode, body: &str) -> (String, Arc<Mutex<Vec<Received>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let svc = FakeService {
        received: Arc::clone(&received),
        reply_status: status,
        reply_body: body.to_string(),
    };

    let router = Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .with_state(svc);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}"), received)
}

fn cat_request() -> sightline_core::request::AnalysisRequest {
    let selection = ImageSelection::new("cat.jpg", b"not really a jpeg".to_vec());
    build_request(Some(&selection), ConfidenceThreshold::clamped(0.5)).unwrap()
}

const CAT_RESPONSE: &str = r#"{
    "success": true,
    "detections": [{"class":"cat","confidence":0.92,"bbox":[10,10,110,210]}],
    "all_detections": [{"class":"cat","confidence":0.92,"bbox":[10,10,110,210]}],
    "total_detected": 1,
    "filtered_count": 1,
    "confidence_threshold": 0.5
}"#;

// ---------------------------------------------------------------------------
// Test: multipart body carries the image and the threshold
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analyze_sends_image_and_threshold_fields() {
    let (url, received) = spawn_service(StatusCode::OK, CAT_RESPONSE).await;
    let api = AnalyzerApi::new(url);

    let outcome = api.analyze(&cat_request()).await.unwrap();

    assert_matches!(outcome, AnalysisOutcome::Success(report) => {
        assert_eq!(report.detections[0].class_label, "cat");
        assert_eq!(report.filtered_count, 1);
    });

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1, "exactly one request per analyze call");
    let got = &received[0];
    assert_eq!(got.image_name.as_deref(), Some("cat.jpg"));
    assert_eq!(got.image_type.as_deref(), Some("application/octet-stream"));
    assert_eq!(got.image_bytes, b"not really a jpeg");
    assert_eq!(got.threshold.as_deref(), Some("0.5"));
    assert!(got.request_id.is_some(), "request id header should be set");
}

// ---------------------------------------------------------------------------
// Test: server-reported failure is an outcome, not an error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analyze_returns_server_reported_failure() {
    let (url, _) = spawn_service(
        StatusCode::OK,
        r#"{"success":false,"error":"unsupported file type"}"#,
    )
    .await;
    let api = AnalyzerApi::new(url);

    let outcome = api.analyze(&cat_request()).await.unwrap();

    assert_eq!(
        outcome,
        AnalysisOutcome::Failure {
            error: "unsupported file type".into()
        }
    );
}

// ---------------------------------------------------------------------------
// Test: transport-level failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_2xx_status_is_api_error() {
    let (url, _) = spawn_service(StatusCode::PAYLOAD_TOO_LARGE, "too big").await;
    let api = AnalyzerApi::new(url);

    let err = api.analyze(&cat_request()).await.unwrap_err();

    assert_matches!(err, AnalyzerApiError::ApiError { status: 413, body } => {
        assert_eq!(body, "too big");
    });
}

#[tokio::test]
async fn non_json_body_is_response_error() {
    let (url, _) = spawn_service(StatusCode::OK, "<html>oops</html>").await;
    let api = AnalyzerApi::new(url);

    let err = api.analyze(&cat_request()).await.unwrap_err();

    assert_matches!(err, AnalyzerApiError::Response(CoreError::Json(_)));
}

#[tokio::test]
async fn schema_violation_is_response_error() {
    let (url, _) = spawn_service(StatusCode::OK, r#"{"success":true,"detections":[]}"#).await;
    let api = AnalyzerApi::new(url);

    let err = api.analyze(&cat_request()).await.unwrap_err();

    assert_matches!(err, AnalyzerApiError::Response(CoreError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_service_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = AnalyzerApi::new(format!("http://{addr}"));
    let err = api.analyze(&cat_request()).await.unwrap_err();

    assert_matches!(err, AnalyzerApiError::Request(_));
}

// ---------------------------------------------------------------------------
// Test: health endpoint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_model_status() {
    let (url, _) = spawn_service(StatusCode::OK, "{}").await;
    let api = AnalyzerApi::new(format!("{url}/"));

    let health = api.health().await.unwrap();

    assert_eq!(health.status, "healthy");
    assert!(health.model_loaded);
}
