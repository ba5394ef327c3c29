//! Detection and bounding-box types as returned by the analysis service.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Axis-aligned rectangle `(x1, y1)-(x2, y2)` in image pixel coordinates.
///
/// Travels on the wire as a four-element array `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Check the coordinates are finite and the corners are ordered.
    pub fn validate(&self) -> Result<(), CoreError> {
        let coords = [self.x1, self.y1, self.x2, self.y2];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(CoreError::MalformedResponse(format!(
                "bbox has non-finite coordinates: {coords:?}"
            )));
        }
        if self.x2 < self.x1 || self.y2 < self.y1 {
            return Err(CoreError::MalformedResponse(format!(
                "bbox corners out of order: {coords:?}"
            )));
        }
        Ok(())
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// One recognized object instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "class")]
    pub class_label: String,
    pub confidence: f64,
    #[serde(rename = "bbox")]
    pub bounding_box: BoundingBox,
}

impl Detection {
    pub fn new(class_label: impl Into<String>, confidence: f64, bounding_box: BoundingBox) -> Self {
        Self {
            class_label: class_label.into(),
            confidence,
            bounding_box,
        }
    }

    /// Check the confidence is within `[0, 1]` and the box is well formed.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(CoreError::MalformedResponse(format!(
                "confidence for '{}' must be between 0.0 and 1.0, got {}",
                self.class_label, self.confidence
            )));
        }
        self.bounding_box.validate()
    }
}
