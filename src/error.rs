#![forbid(unsafe_code)]

//! Error taxonomy shared by the API client and the pagination loops.
//!
//! Quota exhaustion gets its own variant because the Data API reports it with
//! a distinct status (HTTP 403) and callers want to surface it differently
//! from a flaky network. Everything filesystem-related stays on `anyhow` in
//! the exporter instead of living here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("malformed duration string {0:?}")]
    MalformedDuration(String),

    #[error("API quota exceeded")]
    QuotaExceeded,

    #[error("YouTube API request failed: {0}")]
    RemoteCall(String),

    #[error("unexpected API response: {0}")]
    UnexpectedResponse(String),

    #[error("no channel found matching {0:?}")]
    ChannelNotFound(String),

    #[error("API_KEY is not set; export it or add it to the local .env file")]
    MissingApiKey,
}

/// How a pagination loop ended.
#[derive(Debug)]
pub enum FetchStatus {
    /// The remote side returned no further continuation token.
    Complete,
    /// A call failed mid-run; whatever was gathered before is still usable.
    Aborted(YouTubeError),
}

/// Result of paging a remote listing: the accumulated items plus a flag that
/// distinguishes natural exhaustion from an early abort. The original tooling
/// conflated the two by returning a bare list.
#[derive(Debug)]
pub struct FetchOutcome<T> {
    pub items: Vec<T>,
    pub status: FetchStatus,
}

impl<T> FetchOutcome<T> {
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            status: FetchStatus::Complete,
        }
    }

    pub fn aborted(items: Vec<T>, cause: YouTubeError) -> Self {
        Self {
            items,
            status: FetchStatus::Aborted(cause),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, FetchStatus::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_reports_completion_state() {
        let done: FetchOutcome<u32> = FetchOutcome::complete(vec![1, 2]);
        assert!(done.is_complete());

        let partial: FetchOutcome<u32> =
            FetchOutcome::aborted(vec![1], YouTubeError::QuotaExceeded);
        assert!(!partial.is_complete());
        assert_eq!(partial.items, vec![1]);
    }
}
