//! Render model for analysis results.
//!
//! [`render`] turns a validated [`AnalysisOutcome`] into a description of
//! exactly what to show. It is a pure function: the same outcome always
//! yields an equal model, and a model always replaces whatever was shown
//! before it.

use serde::Serialize;

use crate::detection::Detection;
use crate::locale::Locale;
use crate::notice::Notice;
use crate::response::{AnalysisOutcome, AnalysisReport};
use crate::tier::ConfidenceTier;

/// Header shown above the list for any successful analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub title: String,
    pub filtered_count: u64,
    pub total_detected: u64,
    /// Threshold as a whole percentage, e.g. `50`.
    pub threshold_percent: u32,
}

/// One row of the detection list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionView {
    /// 1-based position in server order.
    pub rank: usize,
    pub label: String,
    /// Confidence as a percentage rounded to one decimal place.
    pub confidence_percent: f64,
    /// `confidence_percent` formatted for display, e.g. `"92.0%"`.
    pub confidence_text: String,
    pub tier: ConfidenceTier,
    pub badge: &'static str,
    pub width: i64,
    pub height: i64,
    /// Rounded corners, e.g. `"(10, 10) - (110, 210)"`.
    pub position: String,
    /// Fill of the confidence bar, in percent.
    pub bar_width_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RenderModel {
    /// Summary plus a non-empty detection list.
    Detections {
        summary: Summary,
        items: Vec<DetectionView>,
    },
    /// Summary plus a notice explaining that nothing passed the threshold.
    NoDetections { summary: Summary, notice: Notice },
    /// A lone notice: validation, server-reported or transport failure, or
    /// a selection hint.
    Notice { notice: Notice },
}

impl RenderModel {
    pub fn is_result(&self) -> bool {
        !matches!(self, RenderModel::Notice { .. })
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            RenderModel::Detections { .. } => None,
            RenderModel::NoDetections { notice, .. } | RenderModel::Notice { notice } => {
                Some(notice)
            }
        }
    }
}

/// Render a validated outcome.
pub fn render(outcome: &AnalysisOutcome, locale: Locale) -> RenderModel {
    match outcome {
        AnalysisOutcome::Failure { error } => RenderModel::Notice {
            notice: Notice::warning(error.clone()),
        },
        AnalysisOutcome::Success(report) => render_report(report, locale),
    }
}

/// Notice for a request that never produced a usable response.
pub fn render_transport_failure(locale: Locale) -> RenderModel {
    RenderModel::Notice {
        notice: Notice::warning(locale.catalog().analysis_failed),
    }
}

/// Notice for a trigger with nothing selected.
pub fn render_validation_failure(locale: Locale) -> RenderModel {
    RenderModel::Notice {
        notice: Notice::warning(locale.catalog().select_image),
    }
}

/// Notice shown right after an image is picked.
pub fn render_selection(file_name: &str, locale: Locale) -> RenderModel {
    RenderModel::Notice {
        notice: Notice::info(locale.catalog().image_selected(file_name)),
    }
}

fn render_report(report: &AnalysisReport, locale: Locale) -> RenderModel {
    let catalog = locale.catalog();
    let summary = Summary {
        title: catalog.summary_title.to_string(),
        filtered_count: report.filtered_count,
        total_detected: report.total_detected,
        threshold_percent: (report.confidence_threshold * 100.0).round() as u32,
    };

    if report.detections.is_empty() {
        return RenderModel::NoDetections {
            summary,
            notice: Notice::info(catalog.no_detections).with_detail(catalog.no_detections_hint),
        };
    }

    let items = report
        .detections
        .iter()
        .enumerate()
        .map(|(idx, d)| detection_view(idx + 1, d))
        .collect();

    RenderModel::Detections { summary, items }
}

fn detection_view(rank: usize, detection: &Detection) -> DetectionView {
    let b = &detection.bounding_box;
    let confidence_percent = (detection.confidence * 1000.0).round() / 10.0;
    let tier = ConfidenceTier::from_confidence(detection.confidence);

    DetectionView {
        rank,
        label: detection.class_label.clone(),
        confidence_percent,
        confidence_text: format!("{confidence_percent:.1}%"),
        tier,
        badge: tier.badge(),
        width: b.width().round() as i64,
        height: b.height().round() as i64,
        position: format!(
            "({}, {}) - ({}, {})",
            b.x1.round() as i64,
            b.y1.round() as i64,
            b.x2.round() as i64,
            b.y2.round() as i64
        ),
        bar_width_percent: confidence_percent,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::detection::BoundingBox;
    use crate::notice::NoticeLevel;
    use crate::response::parse_response;

    fn report(detections: Vec<Detection>, total: u64) -> AnalysisOutcome {
        AnalysisOutcome::Success(AnalysisReport {
            filtered_count: detections.len() as u64,
            detections,
            all_detections: None,
            total_detected: total,
            confidence_threshold: 0.5,
        })
    }

    #[test]
    fn renders_cat_example() {
        let outcome = parse_response(
            r#"{"success":true,"detections":[{"class":"cat","confidence":0.92,"bbox":[10,10,110,210]}],"total_detected":3,"filtered_count":1,"confidence_threshold":0.5}"#,
        )
        .unwrap();

        let model = render(&outcome, Locale::En);
        assert_matches!(model, RenderModel::Detections { summary, items } => {
            assert_eq!(summary.filtered_count, 1);
            assert_eq!(summary.total_detected, 3);
            assert_eq!(summary.threshold_percent, 50);
            assert_eq!(items.len(), 1);
            let item = &items[0];
            assert_eq!(item.rank, 1);
            assert_eq!(item.label, "cat");
            assert_eq!(item.confidence_text, "92.0%");
            assert_eq!(item.tier, ConfidenceTier::High);
            assert_eq!(item.badge, "success");
            assert_eq!(item.width, 100);
            assert_eq!(item.height, 200);
            assert_eq!(item.position, "(10, 10) - (110, 210)");
        });
    }

    #[test]
    fn failure_renders_verbatim_warning() {
        let outcome = AnalysisOutcome::Failure {
            error: "unsupported file type".into(),
        };
        let model = render(&outcome, Locale::En);
        assert!(!model.is_result());
        let notice = model.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "unsupported file type");
        assert!(notice.dismissible);
    }

    #[test]
    fn empty_detections_is_a_distinct_state() {
        let model = render(&report(Vec::new(), 4), Locale::En);
        assert_matches!(model, RenderModel::NoDetections { summary, notice } => {
            assert_eq!(summary.total_detected, 4);
            assert_eq!(summary.filtered_count, 0);
            assert_eq!(notice.level, NoticeLevel::Info);
            assert_eq!(notice.detail.as_deref(), Some("Try lowering the threshold."));
        });
    }

    #[test]
    fn preserves_server_order_and_ranks() {
        let b = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let model = render(
            &report(
                vec![
                    Detection::new("low-first", 0.55, b),
                    Detection::new("high-second", 0.95, b),
                    Detection::new("mid-third", 0.65, b),
                ],
                3,
            ),
            Locale::En,
        );
        assert_matches!(model, RenderModel::Detections { items, .. } => {
            let labels: Vec<_> = items.iter().map(|i| (i.rank, i.label.as_str(), i.tier)).collect();
            assert_eq!(
                labels,
                vec![
                    (1, "low-first", ConfidenceTier::Low),
                    (2, "high-second", ConfidenceTier::High),
                    (3, "mid-third", ConfidenceTier::Medium),
                ]
            );
        });
    }

    #[test]
    fn rounds_fractional_geometry() {
        let b = BoundingBox::new(10.4, 20.6, 50.5, 70.2);
        let model = render(&report(vec![Detection::new("car", 0.6789, b)], 1), Locale::En);
        assert_matches!(model, RenderModel::Detections { items, .. } => {
            let item = &items[0];
            assert_eq!(item.confidence_text, "67.9%");
            assert_eq!(item.bar_width_percent, 67.9);
            assert_eq!(item.width, 40);
            assert_eq!(item.height, 50);
            assert_eq!(item.position, "(10, 21) - (51, 70)");
        });
    }

    #[test]
    fn threshold_percent_rounds() {
        let mut outcome = report(Vec::new(), 0);
        if let AnalysisOutcome::Success(r) = &mut outcome {
            r.confidence_threshold = 0.356;
        }
        assert_matches!(render(&outcome, Locale::En), RenderModel::NoDetections { summary, .. } => {
            assert_eq!(summary.threshold_percent, 36);
        });
    }

    #[test]
    fn rendering_is_idempotent() {
        let b = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let outcome = report(vec![Detection::new("a", 0.7, b), Detection::new("b", 0.81, b)], 5);
        assert_eq!(render(&outcome, Locale::En), render(&outcome, Locale::En));
    }

    #[test]
    fn localized_summary_title() {
        let model = render(&report(Vec::new(), 0), Locale::Ja);
        assert_matches!(model, RenderModel::NoDetections { summary, .. } => {
            assert_eq!(summary.title, "分析完了");
        });
    }

    #[test]
    fn transport_and_validation_notices() {
        let t = render_transport_failure(Locale::En);
        assert_eq!(t.notice().unwrap().message, "An error occurred during analysis.");
        let v = render_validation_failure(Locale::En);
        assert_eq!(v.notice().unwrap().message, "Please select an image.");
        assert_eq!(v.notice().unwrap().level, NoticeLevel::Warning);
    }

    #[test]
    fn serializes_with_state_tag() {
        let v = serde_json::to_value(render_selection("cat.jpg", Locale::En)).unwrap();
        assert_eq!(v["state"], "notice");
        assert_eq!(v["notice"]["level"], "info");
    }
}
