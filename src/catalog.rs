#![forbid(unsafe_code)]

//! Channel catalog pager and ranking.
//!
//! Walks the uploads playlist page by page, resolves each page's ids to full
//! video details in batches, and keeps only videos longer than the configured
//! minimum. Failures mid-walk end the loop but keep what was gathered, with
//! the abort cause carried in the returned [`FetchOutcome`].

use std::thread;

use crate::config::AnalyzerConfig;
use crate::duration::{format_duration, parse_duration};
use crate::error::{FetchOutcome, YouTubeError};
use crate::youtube::{VideoItem, YouTubeApi};

/// One video that survived the duration filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub view_count: u64,
    pub duration_seconds: u64,
    pub duration_display: String,
}

/// Pages the whole uploads playlist and returns every video whose duration
/// strictly exceeds `cfg.min_duration_secs`.
///
/// Page size and detail batch size both default to 50, the API's documented
/// maximum. A short pause separates playlist pages for rate-limit headroom.
pub fn fetch_channel_videos<A: YouTubeApi>(
    api: &A,
    cfg: &AnalyzerConfig,
    playlist_id: &str,
) -> FetchOutcome<VideoRecord> {
    let mut videos = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = match api.playlist_page(playlist_id, cfg.playlist_page_size, page_token.as_deref())
        {
            Ok(page) => page,
            Err(err) => {
                eprintln!("Error fetching videos: {err}");
                return FetchOutcome::aborted(videos, err);
            }
        };

        let ids: Vec<String> = page
            .items
            .into_iter()
            .map(|item| item.content_details.video_id)
            .collect();

        for batch in ids.chunks(cfg.details_batch_size) {
            let details = match api.video_details(batch) {
                Ok(details) => details,
                Err(err) => {
                    eprintln!("Error fetching videos: {err}");
                    return FetchOutcome::aborted(videos, err);
                }
            };
            for video in details {
                match to_record(video, cfg.min_duration_secs) {
                    Ok(Some(record)) => videos.push(record),
                    Ok(None) => {}
                    Err(err) => {
                        eprintln!("Error fetching videos: {err}");
                        return FetchOutcome::aborted(videos, err);
                    }
                }
            }
        }

        page_token = page.next_page_token;
        if page_token.is_none() {
            break;
        }
        thread::sleep(cfg.playlist_page_delay);
    }

    FetchOutcome::complete(videos)
}

/// Applies the duration filter and flattens the API item into a record.
/// Durations exactly at the threshold are excluded.
fn to_record(video: VideoItem, min_duration_secs: u64) -> Result<Option<VideoRecord>, YouTubeError> {
    let duration_seconds = parse_duration(&video.content_details.duration)?;
    if duration_seconds <= min_duration_secs {
        return Ok(None);
    }

    let view_count = video
        .statistics
        .and_then(|stats| stats.view_count)
        .and_then(|count| count.parse().ok())
        .unwrap_or(0);

    Ok(Some(VideoRecord {
        id: video.id,
        title: video.snippet.title,
        view_count,
        duration_seconds,
        duration_display: format_duration(duration_seconds),
    }))
}

/// Two-stage ranking: keep the `top_count` most viewed videos, then reorder
/// that subset by duration descending. Both sorts are stable, so ties retain
/// their input order and re-ranking an already ranked list is a no-op.
pub fn rank_videos(mut videos: Vec<VideoRecord>, top_count: usize) -> Vec<VideoRecord> {
    videos.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    videos.truncate(top_count);
    videos.sort_by(|a, b| b.duration_seconds.cmp(&a.duration_seconds));
    videos
}
