use marquee_common::fields;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub scrape: ScrapeConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// JSON file holding every fetched field
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("movies.json")
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapeConfig {
    /// Pause after every request, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_delay_ms() -> u64 {
    1500
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!(
        "Mozilla/5.0 (X11; Linux x86_64) marquee/{}",
        env!("CARGO_PKG_VERSION")
    )
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default = "default_imdb_url")]
    pub imdb_url: String,

    /// Base of the IMDb suggestion endpoint used for title search
    #[serde(default = "default_imdb_search_url")]
    pub imdb_search_url: String,

    #[serde(default = "default_letterboxd_url")]
    pub letterboxd_url: String,
}

fn default_imdb_url() -> String {
    "https://www.imdb.com".to_string()
}
fn default_imdb_search_url() -> String {
    "https://v3.sg.media-imdb.com".to_string()
}
fn default_letterboxd_url() -> String {
    "https://letterboxd.com".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            imdb_url: default_imdb_url(),
            imdb_search_url: default_imdb_search_url(),
            letterboxd_url: default_letterboxd_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Columns written to the report, in order
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,

    /// Movies with any of these genres are left out of the report
    #[serde(default = "default_skip_genres")]
    pub skip_genres: Vec<String>,
}

fn default_columns() -> Vec<String> {
    fields::DEFAULT_REPORT_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .collect()
}
fn default_skip_genres() -> Vec<String> {
    fields::DEFAULT_SKIP_GENRES
        .iter()
        .map(|g| g.to_string())
        .collect()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            skip_genres: default_skip_genres(),
        }
    }
}
