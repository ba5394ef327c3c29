//! Terminal presentation of render models.

use std::fmt::Write;

use sightline_core::locale::Locale;
use sightline_core::notice::{Notice, NoticeLevel};
use sightline_core::render::{DetectionView, RenderModel, Summary};

/// Format a render model as plain text, one block per section.
pub fn render_text(model: &RenderModel, locale: Locale) -> String {
    let mut out = String::new();
    match model {
        RenderModel::Detections { summary, items } => {
            write_summary(&mut out, summary, locale);
            for item in items {
                out.push('\n');
                write_item(&mut out, item, locale);
            }
        }
        RenderModel::NoDetections { summary, notice } => {
            write_summary(&mut out, summary, locale);
            out.push('\n');
            write_notice(&mut out, notice);
        }
        RenderModel::Notice { notice } => write_notice(&mut out, notice),
    }
    out
}

fn write_summary(out: &mut String, summary: &Summary, locale: Locale) {
    let c = locale.catalog();
    let _ = writeln!(out, "{}", summary.title);
    let _ = writeln!(
        out,
        "{}: {} ({}: {})",
        c.detected_label, summary.filtered_count, c.total_label, summary.total_detected
    );
    let _ = writeln!(out, "{}: {}%", c.threshold_label, summary.threshold_percent);
}

fn write_item(out: &mut String, item: &DetectionView, locale: Locale) {
    let c = locale.catalog();
    let _ = writeln!(
        out,
        "{}. {} [{}] ({})",
        item.rank,
        item.label,
        item.confidence_text,
        item.tier.as_str()
    );
    let _ = writeln!(out, "   {}: {}", c.confidence_label, item.confidence_text);
    let _ = writeln!(out, "   {}: {}", c.position_label, item.position);
    let _ = writeln!(
        out,
        "   {}: {} x {} {}",
        c.size_label, item.width, item.height, c.pixels_unit
    );
}

fn write_notice(out: &mut String, notice: &Notice) {
    let marker = match notice.level {
        NoticeLevel::Info => "i",
        NoticeLevel::Warning => "!",
    };
    let _ = writeln!(out, "[{marker}] {}", notice.message);
    if let Some(detail) = &notice.detail {
        let _ = writeln!(out, "    {detail}");
    }
}
