//! The analysis controller and its state machine.
//!
//! | State              | Entered when                                        |
//! |--------------------|-----------------------------------------------------|
//! | `Idle`             | created, or an image was selected                   |
//! | `AwaitingResponse` | a request was sent and has not completed            |
//! | `Rendered`         | the service returned a successful analysis          |
//! | `Error`            | validation, server-reported or transport failure    |
//!
//! `Rendered` and `Error` accept the same inputs as `Idle`. Transitions take
//! `&mut self`, so a second submit cannot start while one is awaiting.

use serde::Serialize;
use tokio::sync::broadcast;

use sightline_core::detection::Detection;
use sightline_core::locale::Locale;
use sightline_core::render::{
    render, render_selection, render_transport_failure, render_validation_failure, RenderModel,
};
use sightline_core::request::build_request;
use sightline_core::response::AnalysisOutcome;
use sightline_core::selection::ImageSelection;
use sightline_core::threshold::ConfidenceThreshold;

use crate::backend::AnalysisBackend;
use crate::events::SessionEvent;

/// Broadcast channel capacity for session events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    AwaitingResponse,
    Rendered,
    Error,
}

/// Owns everything one analysis screen displays.
pub struct AnalysisSession<B> {
    backend: B,
    locale: Locale,
    selection: Option<ImageSelection>,
    threshold: ConfidenceThreshold,
    state: SessionState,
    view: Option<RenderModel>,
    current_detections: Vec<Detection>,
    all_detections: Vec<Detection>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl<B: AnalysisBackend> AnalysisSession<B> {
    pub fn new(backend: B, locale: Locale) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            backend,
            locale,
            selection: None,
            threshold: ConfidenceThreshold::default(),
            state: SessionState::Idle,
            view: None,
            current_detections: Vec::new(),
            all_detections: Vec::new(),
            event_tx,
        }
    }

    /// Subscribe to session events. Only events sent after this call are
    /// received.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The model currently on screen, if anything has been rendered.
    pub fn view(&self) -> Option<&RenderModel> {
        self.view.as_ref()
    }

    pub fn selection(&self) -> Option<&ImageSelection> {
        self.selection.as_ref()
    }

    pub fn threshold(&self) -> ConfidenceThreshold {
        self.threshold
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Detections from the last successful analysis, at or above threshold.
    pub fn current_detections(&self) -> &[Detection] {
        &self.current_detections
    }

    /// Unfiltered detections from the last successful analysis. Kept for
    /// display only; the session never re-filters them.
    pub fn all_detections(&self) -> &[Detection] {
        &self.all_detections
    }

    /// Whether the analyze trigger is currently usable.
    pub fn trigger_enabled(&self) -> bool {
        self.selection.is_some() && self.state != SessionState::AwaitingResponse
    }

    /// Move the threshold slider. Out-of-range input is clamped.
    pub fn set_threshold(&mut self, value: f64) {
        self.threshold = ConfidenceThreshold::clamped(value);
        self.emit(SessionEvent::ThresholdChanged {
            value: self.threshold.value(),
            display: self.threshold.display_value(),
        });
    }

    /// Pick an image. Clears any previous result and enables the trigger.
    pub fn select_image(&mut self, selection: ImageSelection) -> &RenderModel {
        tracing::info!(
            file_name = %selection.file_name(),
            bytes = selection.len(),
            mime_type = selection.mime_type(),
            "Image selected",
        );

        self.clear_detections();
        self.emit(SessionEvent::ImageSelected {
            file_name: selection.file_name().to_string(),
            dimensions: selection.dimensions(),
        });
        let model = render_selection(selection.file_name(), self.locale);
        self.selection = Some(selection);
        self.apply(SessionState::Idle, model)
    }

    /// Run one analysis of the current selection.
    ///
    /// Always ends with a fresh render model: a result, the server's error,
    /// a generic transport-failure notice, or the select-an-image notice if
    /// nothing is selected (in which case no request is made).
    pub async fn submit(&mut self) -> &RenderModel {
        self.clear_detections();

        let request = match build_request(self.selection.as_ref(), self.threshold) {
            Ok(request) => request,
            Err(e) => {
                tracing::info!(error = %e, "Analysis refused before sending");
                let model = render_validation_failure(self.locale);
                return self.apply(SessionState::Error, model);
            }
        };

        self.state = SessionState::AwaitingResponse;
        self.emit(SessionEvent::TriggerChanged { enabled: false });
        self.emit(SessionEvent::LoadingShown);

        tracing::info!(
            file_name = %request.image.file_name(),
            threshold = request.confidence_threshold.value(),
            "Analysis started",
        );

        let result = self.backend.analyze(&request).await;
        drop(request);

        self.emit(SessionEvent::LoadingDismissed);

        let (state, model) = match result {
            Ok(outcome) => {
                let model = render(&outcome, self.locale);
                match outcome {
                    AnalysisOutcome::Success(report) => {
                        tracing::info!(
                            filtered_count = report.filtered_count,
                            total_detected = report.total_detected,
                            "Analysis complete",
                        );
                        self.current_detections = report.detections;
                        self.all_detections = report.all_detections.unwrap_or_default();
                        (SessionState::Rendered, model)
                    }
                    AnalysisOutcome::Failure { error } => {
                        tracing::warn!(error = %error, "Analysis service reported failure");
                        (SessionState::Error, model)
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Analysis request failed");
                (SessionState::Error, render_transport_failure(self.locale))
            }
        };

        self.apply(state, model)
    }

    // ---- private helpers ----

    fn clear_detections(&mut self) {
        self.current_detections.clear();
        self.all_detections.clear();
    }

    /// Enter `state` and replace the displayed model.
    fn apply(&mut self, state: SessionState, model: RenderModel) -> &RenderModel {
        self.state = state;
        self.emit(SessionEvent::Rendered(model.clone()));
        self.emit(SessionEvent::TriggerChanged {
            enabled: self.trigger_enabled(),
        });
        self.view.insert(model)
    }

    fn emit(&self, event: SessionEvent) {
        // A send error only means nobody is subscribed.
        let _ = self.event_tx.send(event);
    }
}
