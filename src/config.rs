use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::notify::RetryPolicy;
use crate::similarity::DEFAULT_THRESHOLD;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Root of the corpus store (`links/`, `extracted/`, `unique/` live under it)
    pub data_dir: PathBuf,
    /// Custom stopword list; the built-in English list is used when unset
    pub stopwords_path: Option<PathBuf>,
    /// Uniqueness mode keeps a reference article whose best match is below this
    pub unique_threshold: f64,
    /// Similarity search keeps a candidate scoring above this
    pub similar_threshold: f64,
    /// Completion webhook for background similarity jobs
    pub webhook_url: Option<String>,
    pub webhook_retry: RetryPolicy,
    /// CORS origins for the web service (comma separated in BLOGSIFT_ALLOWED_ORIGINS)
    #[cfg(feature = "web")]
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the webhook URL. A threshold that
    /// isn't a number in [0, 1] is a startup error.
    pub fn load() -> Result<Self> {
        let unique_threshold = parse_threshold(
            "BLOGSIFT_UNIQUE_THRESHOLD",
            env::var("BLOGSIFT_UNIQUE_THRESHOLD").ok().as_deref(),
        )?;
        let similar_threshold = parse_threshold(
            "BLOGSIFT_SIMILAR_THRESHOLD",
            env::var("BLOGSIFT_SIMILAR_THRESHOLD").ok().as_deref(),
        )?;

        let max_attempts = match env::var("BLOGSIFT_WEBHOOK_RETRIES") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("BLOGSIFT_WEBHOOK_RETRIES is not a count: {raw:?}"))?,
            Err(_) => RetryPolicy::default().max_attempts,
        };
        let base_backoff = match env::var("BLOGSIFT_WEBHOOK_BACKOFF_SECS") {
            Ok(raw) => Duration::from_secs(raw.trim().parse::<u64>().with_context(|| {
                format!("BLOGSIFT_WEBHOOK_BACKOFF_SECS is not a number of seconds: {raw:?}")
            })?),
            Err(_) => RetryPolicy::default().base_backoff,
        };

        Ok(Self {
            data_dir: env::var("BLOGSIFT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            stopwords_path: env::var("BLOGSIFT_STOPWORDS_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            unique_threshold,
            similar_threshold,
            webhook_url: env::var("WEBHOOK_URL")
                .ok()
                .filter(|u| !u.trim().is_empty()),
            webhook_retry: RetryPolicy {
                max_attempts: max_attempts.max(1),
                base_backoff,
                ..RetryPolicy::default()
            },
            #[cfg(feature = "web")]
            allowed_origins: env::var("BLOGSIFT_ALLOWED_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or_default(),
        })
    }

    /// Check that a completion webhook is configured.
    /// Call this before delivering results from the CLI.
    pub fn require_webhook(&self) -> Result<&str> {
        match self.webhook_url.as_deref() {
            Some(url) => Ok(url),
            None => anyhow::bail!(
                "WEBHOOK_URL not set. Add it to your .env file to deliver results.\n\
                 See .env.example for the available variables."
            ),
        }
    }
}

/// Parse a threshold setting, falling back to 0.5 when unset.
pub fn parse_threshold(name: &str, raw: Option<&str>) -> Result<f64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_THRESHOLD);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{name} is not a number: {raw:?}"))?;
    if !(0.0..=1.0).contains(&value) {
        anyhow::bail!("{name} must be between 0 and 1, got {value}");
    }
    Ok(value)
}

#[cfg(feature = "web")]
fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
