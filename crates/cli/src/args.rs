//! Command-line arguments and image loading.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use sightline_core::selection::ImageSelection;

/// Submit an image to the analysis service and print the detections.
#[derive(Debug, Clone, Parser)]
#[command(name = "sightline", version)]
pub struct Args {
    /// Image file to analyze. Omitting it reproduces an empty submit.
    pub image: Option<PathBuf>,

    /// Minimum confidence (0-1). Values outside the range are clamped.
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Base URL of the analysis service (overrides `ANALYZER_URL`).
    #[arg(long)]
    pub url: Option<String>,

    /// Print the render model as JSON instead of text.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only query the service health endpoint.
    #[arg(long, default_value_t = false)]
    pub health: bool,
}

/// Read an image file into a selection named after the file.
pub async fn load_selection(path: &Path) -> anyhow::Result<ImageSelection> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ImageSelection::new(file_name, bytes))
}
