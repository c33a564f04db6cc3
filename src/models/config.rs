//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::raw::RecordKind;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and scraping behavior settings
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// Cleaning stage settings
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Entry points on ufcstats.com
    #[serde(default)]
    pub event_urls: EventUrls,

    /// Cloud storage settings
    #[serde(default)]
    pub gcs: GcsConfig,

    /// Relative paths for every artifact the pipeline reads or writes
    #[serde(default)]
    pub output_files: OutputFiles,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.scraper.user_agent.trim().is_empty() {
            return Err(AppError::validation("scraper.user_agent is empty"));
        }
        if self.scraper.timeout_secs == 0 {
            return Err(AppError::validation("scraper.timeout_secs must be > 0"));
        }
        if self.scraper.max_concurrent == 0 {
            return Err(AppError::validation("scraper.max_concurrent must be > 0"));
        }
        if self.cleaning.max_rounds == 0 {
            return Err(AppError::validation("cleaning.max_rounds must be > 0"));
        }
        if self.event_urls.all.trim().is_empty() || self.event_urls.one.trim().is_empty() {
            return Err(AppError::validation("event_urls must not be empty"));
        }
        let mut seen = std::collections::HashSet::new();
        for (label, path) in self.output_files.entries() {
            if path.trim().is_empty() {
                return Err(AppError::validation(format!("output_files.{label} is empty")));
            }
            if !seen.insert(path) {
                return Err(AppError::validation(format!(
                    "output_files.{label} duplicates another output path: {path}"
                )));
            }
        }
        Ok(())
    }
}

/// HTTP client and scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Cleaning stage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Highest round number accepted for a fight result or round row
    #[serde(default = "defaults::max_rounds")]
    pub max_rounds: u32,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            max_rounds: defaults::max_rounds(),
        }
    }
}

/// Listing pages used as scrape entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUrls {
    /// Listing of every completed event
    #[serde(default = "defaults::events_all_url")]
    pub all: String,

    /// Listing of only the most recent completed events
    #[serde(default = "defaults::events_one_url")]
    pub one: String,
}

impl Default for EventUrls {
    fn default() -> Self {
        Self {
            all: defaults::events_all_url(),
            one: defaults::events_one_url(),
        }
    }
}

/// Cloud storage settings. Uploads are skipped entirely when no bucket is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcsConfig {
    /// Bucket name, e.g. "ufc-data"
    #[serde(default)]
    pub bucket: Option<String>,

    /// Endpoint for the bucket's S3-compatible API
    #[serde(default = "defaults::gcs_endpoint")]
    pub endpoint: String,
}

impl Default for GcsConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            endpoint: defaults::gcs_endpoint(),
        }
    }
}

/// Storage paths for raw, clean and transformed artifacts. The same path is
/// used locally (relative to the run root) and as the object key in the
/// bucket, so a given artifact lives at one logical location everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFiles {
    /// Raw JSON documents, one per record kind
    #[serde(default = "defaults::raw_paths")]
    pub raw: KindPaths,

    /// Cleaned Parquet tables, one per record kind
    #[serde(default = "defaults::clean_paths")]
    pub clean: KindPaths,

    /// Reshaped Parquet tables built from the cleaned ones
    #[serde(default)]
    pub transformed: TransformedPaths,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            raw: defaults::raw_paths(),
            clean: defaults::clean_paths(),
            transformed: TransformedPaths::default(),
        }
    }
}

impl OutputFiles {
    /// All configured paths with a label for error reporting.
    fn entries(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        for kind in RecordKind::ALL {
            out.push((format!("raw.{kind}"), self.raw.get(kind)));
            out.push((format!("clean.{kind}"), self.clean.get(kind)));
        }
        out.push(("transformed.results".to_string(), &self.transformed.results));
        out.push(("transformed.fights".to_string(), &self.transformed.fights));
        out
    }
}

/// One path per record kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindPaths {
    pub events: String,
    pub results: String,
    pub fighters: String,
    pub rounds: String,
}

impl KindPaths {
    /// Path for the given record kind.
    pub fn get(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Events => &self.events,
            RecordKind::Results => &self.results,
            RecordKind::Fighters => &self.fighters,
            RecordKind::Rounds => &self.rounds,
        }
    }
}

/// Paths for the transform stage outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformedPaths {
    /// Per-fighter long format of the fight results
    #[serde(default = "defaults::transformed_results_path")]
    pub results: String,

    /// Per-fighter totals aggregated over each fight's rounds
    #[serde(default = "defaults::transformed_fights_path")]
    pub fights: String,
}

impl Default for TransformedPaths {
    fn default() -> Self {
        Self {
            results: defaults::transformed_results_path(),
            fights: defaults::transformed_fights_path(),
        }
    }
}

mod defaults {
    use super::KindPaths;

    // Scraper defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; ufc-pipeline/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        100
    }
    pub fn max_concurrent() -> usize {
        5
    }

    // Cleaning defaults
    pub fn max_rounds() -> u32 {
        5
    }

    // Entry point defaults
    pub fn events_all_url() -> String {
        "http://ufcstats.com/statistics/events/completed?page=all".into()
    }
    pub fn events_one_url() -> String {
        "http://ufcstats.com/statistics/events/completed".into()
    }

    // Storage defaults
    pub fn gcs_endpoint() -> String {
        "https://storage.googleapis.com".into()
    }
    pub fn raw_paths() -> KindPaths {
        KindPaths {
            events: "data/raw/events.json".into(),
            results: "data/raw/results.json".into(),
            fighters: "data/raw/fighters.json".into(),
            rounds: "data/raw/rounds.json".into(),
        }
    }
    pub fn clean_paths() -> KindPaths {
        KindPaths {
            events: "data/clean/events.parquet".into(),
            results: "data/clean/results.parquet".into(),
            fighters: "data/clean/fighters.parquet".into(),
            rounds: "data/clean/rounds.parquet".into(),
        }
    }
    pub fn transformed_results_path() -> String {
        "data/transformed/results.parquet".into()
    }
    pub fn transformed_fights_path() -> String {
        "data/transformed/fights.parquet".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.scraper.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.scraper.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_output_paths() {
        let mut config = Config::default();
        config.output_files.clean.events = config.output_files.raw.events.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn kind_paths_cover_every_kind() {
        let files = OutputFiles::default();
        for kind in RecordKind::ALL {
            assert!(!files.raw.get(kind).is_empty());
            assert!(!files.clean.get(kind).is_empty());
        }
        assert_ne!(files.raw.events, files.clean.events);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [gcs]
            bucket = "ufc-data"

            [scraper]
            max_concurrent = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.gcs.bucket.as_deref(), Some("ufc-data"));
        assert_eq!(config.scraper.max_concurrent, 2);
        assert_eq!(config.cleaning.max_rounds, 5);
        assert_eq!(config.output_files.raw.events, "data/raw/events.json");
    }
}
