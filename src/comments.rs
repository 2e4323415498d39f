#![forbid(unsafe_code)]

//! Comment thread collector for a single video.
//!
//! Pages top-level comment threads in publish-time order, normalizing the
//! API's `2023-07-16T17:02:03Z` timestamps into `2023-07-16 17:02:03`. An
//! optional maximum stops collection immediately, even mid-page. Quota
//! exhaustion is reported separately from generic failures; both end the loop
//! with partial results.

use std::thread;

use chrono::NaiveDateTime;

use crate::config::AnalyzerConfig;
use crate::error::{FetchOutcome, YouTubeError};
use crate::youtube::YouTubeApi;

const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One top-level comment, in arrival order. Row numbers are assigned by the
/// exporter, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub timestamp: String,
    pub author: String,
    pub text: String,
}

/// Collects the video's top-level comment threads, oldest first, up to
/// `max_comments` when given. Each page requests at most the configured page
/// size, shrunk to the remaining quota so the final page is never oversized.
pub fn collect_comments<A: YouTubeApi>(
    api: &A,
    cfg: &AnalyzerConfig,
    video_id: &str,
    max_comments: Option<usize>,
) -> FetchOutcome<CommentRecord> {
    if max_comments == Some(0) {
        return FetchOutcome::complete(Vec::new());
    }

    let mut comments: Vec<CommentRecord> = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page_size = match max_comments {
            Some(max) => cfg
                .comments_page_size
                .min((max - comments.len()) as u32),
            None => cfg.comments_page_size,
        };

        let page = match api.comment_threads_page(video_id, page_size, page_token.as_deref()) {
            Ok(page) => page,
            Err(err) => {
                match &err {
                    YouTubeError::QuotaExceeded => eprintln!("API quota exceeded"),
                    other => eprintln!("Error fetching comments: {other}"),
                }
                return FetchOutcome::aborted(comments, err);
            }
        };

        for item in page.items {
            let snippet = item.snippet.top_level_comment.snippet;
            let timestamp = match normalize_timestamp(&snippet.published_at) {
                Ok(timestamp) => timestamp,
                Err(err) => {
                    eprintln!("Error fetching comments: {err}");
                    return FetchOutcome::aborted(comments, err);
                }
            };
            comments.push(CommentRecord {
                timestamp,
                author: snippet.author_display_name,
                text: snippet.text_display,
            });

            if let Some(max) = max_comments
                && comments.len() >= max
            {
                return FetchOutcome::complete(comments);
            }
        }

        page_token = page.next_page_token;
        if page_token.is_none() {
            break;
        }
        thread::sleep(cfg.comments_page_delay);
    }

    FetchOutcome::complete(comments)
}

/// `2023-07-16T17:02:03Z` -> `2023-07-16 17:02:03`.
fn normalize_timestamp(raw: &str) -> Result<String, YouTubeError> {
    let parsed = NaiveDateTime::parse_from_str(raw, PUBLISHED_AT_FORMAT)
        .map_err(|_| YouTubeError::UnexpectedResponse(format!("bad comment timestamp {raw:?}")))?;
    Ok(parsed.format(EXPORT_TIMESTAMP_FORMAT).to_string())
}
