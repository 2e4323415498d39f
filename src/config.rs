#![forbid(unsafe_code)]

//! Run configuration and API key loading.
//!
//! Every tunable the pipeline uses lives in [`AnalyzerConfig`] so tests can
//! inject tiny page sizes and zero delays instead of patching module-wide
//! constants. The defaults reproduce the original one-shot run.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::YouTubeError;

/// Environment variable holding the YouTube Data API key.
pub const API_KEY_VAR: &str = "API_KEY";
/// Untracked local file consulted when the variable is absent.
pub const ENV_FILE: &str = ".env";

pub const DEFAULT_TOP_COUNT: usize = 30;
pub const DEFAULT_COMMENTS_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MIN_DURATION_SECS: u64 = 60;
pub const DEFAULT_DATA_DIR: &str = "data";
/// Documented maximum for both playlistItems pages and videos id batches.
pub const DEFAULT_PLAYLIST_PAGE_SIZE: u32 = 50;
pub const DEFAULT_DETAILS_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// How many top-viewed videos to keep before the duration re-rank.
    pub top_count: usize,
    /// Upper bound per commentThreads request.
    pub comments_page_size: u32,
    /// Videos at or below this many seconds are dropped.
    pub min_duration_secs: u64,
    /// Directory the CSV lands in; created on demand.
    pub data_dir: PathBuf,
    pub playlist_page_size: u32,
    pub details_batch_size: usize,
    /// Pause between playlist pages to stay under rate limits.
    pub playlist_page_delay: Duration,
    /// Pause between comment pages; comments get stricter headroom.
    pub comments_page_delay: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            top_count: DEFAULT_TOP_COUNT,
            comments_page_size: DEFAULT_COMMENTS_PAGE_SIZE,
            min_duration_secs: DEFAULT_MIN_DURATION_SECS,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            playlist_page_size: DEFAULT_PLAYLIST_PAGE_SIZE,
            details_batch_size: DEFAULT_DETAILS_BATCH_SIZE,
            playlist_page_delay: Duration::from_millis(100),
            comments_page_delay: Duration::from_secs(1),
        }
    }
}

/// Resolves the API key from the process environment, falling back to the
/// local `.env` file. Fails fast so a misconfigured run never reaches the
/// network.
pub fn load_api_key() -> Result<String, YouTubeError> {
    resolve_api_key(env::var(API_KEY_VAR).ok(), Path::new(ENV_FILE))
}

fn resolve_api_key(env_value: Option<String>, env_file: &Path) -> Result<String, YouTubeError> {
    if let Some(key) = env_value
        && !key.trim().is_empty()
    {
        return Ok(key);
    }
    if let Some(key) = read_env_file(env_file) {
        return Ok(key);
    }
    Err(YouTubeError::MissingApiKey)
}

/// Scans a `KEY=value` file for [`API_KEY_VAR`]. A missing or unreadable file
/// is treated the same as an absent key.
fn read_env_file(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value_raw)) = trimmed.split_once('=') {
            let value = value_raw.trim().trim_matches('"');
            if key.trim() == API_KEY_VAR && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
