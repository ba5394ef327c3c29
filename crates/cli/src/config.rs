use std::time::Duration;

use sightline_core::locale::Locale;
use sightline_core::threshold::ConfidenceThreshold;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a service running locally.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the analysis service.
    pub api_url: String,
    /// Per-request timeout. Analysis of large images can be slow.
    pub timeout: Duration,
    /// Threshold used when none is given on the command line.
    pub default_threshold: ConfidenceThreshold,
    pub locale: Locale,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `ANALYZER_URL`                 | `http://127.0.0.1:5000` |
    /// | `ANALYZER_TIMEOUT_SECS`        | `60`                    |
    /// | `DEFAULT_CONFIDENCE_THRESHOLD` | `0.5`                   |
    /// | `SIGHTLINE_LOCALE`             | `en`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("ANALYZER_URL").unwrap_or_else(|| "http://127.0.0.1:5000".into());

        let timeout_secs: u64 = match lookup("ANALYZER_TIMEOUT_SECS") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "ANALYZER_TIMEOUT_SECS",
                expected: "a whole number of seconds",
                value: v.clone(),
            })?,
            None => 60,
        };

        let default_threshold = match lookup("DEFAULT_CONFIDENCE_THRESHOLD") {
            Some(v) => v
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(|t| ConfidenceThreshold::try_new(t).ok())
                .ok_or_else(|| ConfigError::Invalid {
                    var: "DEFAULT_CONFIDENCE_THRESHOLD",
                    expected: "a number between 0.0 and 1.0",
                    value: v.clone(),
                })?,
            None => ConfidenceThreshold::default(),
        };

        let locale = match lookup("SIGHTLINE_LOCALE") {
            Some(v) => v.parse::<Locale>().map_err(|_| ConfigError::Invalid {
                var: "SIGHTLINE_LOCALE",
                expected: "one of: en, ja",
                value: v.clone(),
            })?,
            None => Locale::default(),
        };

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            default_threshold,
            locale,
        })
    }
}
