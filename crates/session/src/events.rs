//! Events published by an [`AnalysisSession`](crate::session::AnalysisSession).
//!
//! A view layer subscribes and applies them in order. For one submit the
//! sequence is always `TriggerChanged { enabled: false }`, `LoadingShown`,
//! `LoadingDismissed`, `Rendered`, `TriggerChanged { enabled: true }`.

use serde::Serialize;
use sightline_core::render::RenderModel;
use sightline_core::selection::ImageDimensions;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new image was picked; any previous result is gone.
    ImageSelected {
        file_name: String,
        dimensions: Option<ImageDimensions>,
    },

    /// The slider moved. `display` is the readout text, e.g. `"0.50"`.
    ThresholdChanged { value: f64, display: String },

    /// The analyze trigger became enabled or disabled.
    TriggerChanged { enabled: bool },

    /// The loading indicator went up.
    LoadingShown,

    /// The loading indicator came down.
    LoadingDismissed,

    /// Replace whatever is displayed with this model.
    Rendered(RenderModel),
}
