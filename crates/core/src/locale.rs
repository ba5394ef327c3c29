//! User-facing message catalogs.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Language used for notices and summary text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

/// Static strings for one locale.
#[derive(Debug)]
pub struct Catalog {
    /// Shown when the trigger fires with no image selected.
    pub select_image: &'static str,
    /// Shown for any transport or parse failure. The cause is never shown.
    pub analysis_failed: &'static str,
    pub summary_title: &'static str,
    pub no_detections: &'static str,
    pub no_detections_hint: &'static str,
    pub detected_label: &'static str,
    pub total_label: &'static str,
    pub threshold_label: &'static str,
    pub confidence_label: &'static str,
    pub position_label: &'static str,
    pub size_label: &'static str,
    pub pixels_unit: &'static str,
    image_selected_prefix: &'static str,
    image_selected_suffix: &'static str,
}

impl Catalog {
    /// Notice text after an image is picked, naming the file.
    pub fn image_selected(&self, file_name: &str) -> String {
        format!(
            "{}\"{file_name}\"{}",
            self.image_selected_prefix, self.image_selected_suffix
        )
    }
}

static EN: Catalog = Catalog {
    select_image: "Please select an image.",
    analysis_failed: "An error occurred during analysis.",
    summary_title: "Analysis complete",
    no_detections: "No objects were detected at or above the confidence threshold.",
    no_detections_hint: "Try lowering the threshold.",
    detected_label: "Detected objects",
    total_label: "total",
    threshold_label: "Confidence threshold",
    confidence_label: "Confidence",
    position_label: "Position",
    size_label: "Size",
    pixels_unit: "px",
    image_selected_prefix: "Image ",
    image_selected_suffix: " selected. Click analyze to start.",
};

static JA: Catalog = Catalog {
    select_image: "画像を選択してください",
    analysis_failed: "分析中にエラーが発生しました",
    summary_title: "分析完了",
    no_detections: "指定された信頼度閾値以上の物体が検出されませんでした。",
    no_detections_hint: "閾値を下げてみてください。",
    detected_label: "検出された物体",
    total_label: "総数",
    threshold_label: "信頼度閾値",
    confidence_label: "信頼度",
    position_label: "位置",
    size_label: "サイズ",
    pixels_unit: "ピクセル",
    image_selected_prefix: "画像 ",
    image_selected_suffix: " が選択されました。分析ボタンをクリックしてください。",
};

impl Locale {
    pub fn catalog(self) -> &'static Catalog {
        match self {
            Locale::En => &EN,
            Locale::Ja => &JA,
        }
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ja" => Ok(Locale::Ja),
            other => Err(CoreError::Validation(format!(
                "Unknown locale: '{other}'. Valid locales: en, ja"
            ))),
        }
    }
}
