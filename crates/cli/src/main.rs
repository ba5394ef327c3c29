//! `sightline` -- submit one image to the analysis service and print the
//! detections.
//!
//! Configuration comes from the environment (see
//! [`ClientConfig::from_env`]); a `.env` file in the working directory is
//! honoured. Exit status is 0 when a result was rendered and 1 when only a
//! notice could be shown.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sightline_cli::args::{load_selection, Args};
use sightline_cli::config::ClientConfig;
use sightline_cli::present::render_text;
use sightline_client::api::AnalyzerApi;
use sightline_session::session::AnalysisSession;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sightline_cli=info,sightline_session=info,sightline_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // --- Configuration ---
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = args.url.clone() {
        config.api_url = url;
    }
    tracing::info!(
        api_url = %config.api_url,
        timeout_secs = config.timeout.as_secs(),
        locale = ?config.locale,
        "Loaded client configuration",
    );

    let api = AnalyzerApi::with_timeout(config.api_url.clone(), config.timeout)
        .context("Failed to build HTTP client")?;

    if args.health {
        let health = api.health().await.context("Health check failed")?;
        println!(
            "{} (model loaded: {})",
            health.message.as_deref().unwrap_or(&health.status),
            health.model_loaded
        );
        return Ok(if health.model_loaded {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    // --- Session ---
    let mut session = AnalysisSession::new(api, config.locale);
    session.set_threshold(args.threshold.unwrap_or(config.default_threshold.value()));

    if let Some(path) = &args.image {
        let selection = load_selection(path).await?;
        session.select_image(selection);
    }

    let model = session.submit().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(model)?);
    } else {
        print!("{}", render_text(model, config.locale));
    }

    Ok(if model.is_result() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
