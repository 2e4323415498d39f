#![forbid(unsafe_code)]

//! Blocking YouTube Data API v3 client.
//!
//! Only the handful of read-only endpoints the pipeline needs are wrapped:
//! channel search, channel contentDetails, playlistItems, videos, and
//! commentThreads. The paged operations sit behind the [`YouTubeApi`] trait so
//! pagination loops can run against an in-memory fake in tests.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::YouTubeError;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// The paged read operations consumed by the catalog pager and the comment
/// collector. Kept minimal on purpose; channel resolution happens once up
/// front and needs no seam.
pub trait YouTubeApi {
    fn playlist_page(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, YouTubeError>;

    /// Batch detail lookup; the API caps the id list at 50 per call.
    fn video_details(&self, video_ids: &[String]) -> Result<Vec<VideoItem>, YouTubeError>;

    fn comment_threads_page(
        &self,
        video_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<CommentThreadsPage, YouTubeError>;
}

pub struct YouTubeClient {
    agent: ureq::Agent,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(CALL_TIMEOUT).build();
        Self {
            agent,
            api_key: api_key.into(),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, YouTubeError> {
        let url = format!("{API_BASE}/{endpoint}");
        let mut request = self.agent.get(&url).query("key", &self.api_key);
        for (name, value) in params {
            request = request.query(name, value);
        }
        let response = request.call().map_err(classify_error)?;
        response
            .into_json()
            .map_err(|err| YouTubeError::UnexpectedResponse(err.to_string()))
    }

    /// Resolves a channel name to a channel id via search, taking the first
    /// hit.
    pub fn find_channel_id(&self, channel_name: &str) -> Result<String, YouTubeError> {
        let response: SearchListResponse = self.get_json(
            "search",
            &[
                ("part", "snippet"),
                ("q", channel_name),
                ("type", "channel"),
                ("maxResults", "1"),
            ],
        )?;
        first_channel_id(response, channel_name)
    }

    /// Looks up the channel's default uploads playlist.
    pub fn uploads_playlist(&self, channel_id: &str) -> Result<String, YouTubeError> {
        let response: ChannelListResponse =
            self.get_json("channels", &[("part", "contentDetails"), ("id", channel_id)])?;
        response
            .items
            .into_iter()
            .next()
            .map(|channel| channel.content_details.related_playlists.uploads)
            .ok_or_else(|| {
                YouTubeError::UnexpectedResponse(format!(
                    "channel {channel_id} returned no content details"
                ))
            })
    }
}

impl YouTubeApi for YouTubeClient {
    fn playlist_page(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, YouTubeError> {
        let page_size = page_size.to_string();
        let mut params = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        self.get_json("playlistItems", &params)
    }

    fn video_details(&self, video_ids: &[String]) -> Result<Vec<VideoItem>, YouTubeError> {
        let ids = video_ids.join(",");
        let response: VideoListResponse = self.get_json(
            "videos",
            &[
                ("part", "snippet,statistics,contentDetails"),
                ("id", ids.as_str()),
            ],
        )?;
        Ok(response.items)
    }

    fn comment_threads_page(
        &self,
        video_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<CommentThreadsPage, YouTubeError> {
        let page_size = page_size.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", page_size.as_str()),
            ("order", "time"),
            ("textFormat", "plainText"),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        self.get_json("commentThreads", &params)
    }
}

/// Picks the first search hit's channel id. An empty result set, or a hit
/// without a channel id, is a proper error rather than an index panic.
fn first_channel_id(
    response: SearchListResponse,
    channel_name: &str,
) -> Result<String, YouTubeError> {
    response
        .items
        .into_iter()
        .next()
        .and_then(|result| result.id.channel_id)
        .ok_or_else(|| YouTubeError::ChannelNotFound(channel_name.to_string()))
}

/// Maps transport-level failures into the crate taxonomy. The Data API signals
/// an exhausted quota with HTTP 403.
fn classify_error(err: ureq::Error) -> YouTubeError {
    match err {
        ureq::Error::Status(403, _) => YouTubeError::QuotaExceeded,
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            YouTubeError::RemoteCall(format!("HTTP {code}: {snippet}"))
        }
        ureq::Error::Transport(transport) => YouTubeError::RemoteCall(transport.to_string()),
    }
}

// Response shapes, limited to the fields the pipeline actually reads.

#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
}

#[derive(Debug, Deserialize)]
pub struct SearchResultId {
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelItem {
    #[serde(rename = "contentDetails")]
    pub content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemsPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    #[serde(rename = "contentDetails")]
    pub content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: Option<VideoStatistics>,
    #[serde(rename = "contentDetails")]
    pub content_details: VideoContentDetails,
}

#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    pub title: String,
}

/// Counters arrive as decimal strings; `viewCount` can be withheld entirely
/// for some videos.
#[derive(Debug, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoContentDetails {
    pub duration: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentThreadsPage {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
pub struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
pub struct CommentSnippet {
    #[serde(rename = "textDisplay")]
    pub text_display: String,
    #[serde(rename = "authorDisplayName")]
    pub author_display_name: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_page_deserializes_api_shape() {
        let page: PlaylistItemsPage = serde_json::from_str(
            r#"{
                "items": [
                    { "contentDetails": { "videoId": "abc" } },
                    { "contentDetails": { "videoId": "def" } }
                ],
                "nextPageToken": "CAUQAA"
            }"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].content_details.video_id, "abc");
        assert_eq!(page.next_page_token.as_deref(), Some("CAUQAA"));
    }

    #[test]
    fn video_item_tolerates_missing_statistics() {
        let response: VideoListResponse = serde_json::from_str(
            r#"{
                "items": [{
                    "id": "abc",
                    "snippet": { "title": "Final" },
                    "contentDetails": { "duration": "PT1H2M3S" }
                }]
            }"#,
        )
        .unwrap();
        assert!(response.items[0].statistics.is_none());
    }

    #[test]
    fn comment_thread_exposes_top_level_snippet() {
        let page: CommentThreadsPage = serde_json::from_str(
            r#"{
                "items": [{
                    "snippet": {
                        "topLevelComment": {
                            "snippet": {
                                "textDisplay": "what a match",
                                "authorDisplayName": "fan",
                                "publishedAt": "2023-07-16T17:02:03Z"
                            }
                        }
                    }
                }]
            }"#,
        )
        .unwrap();
        let snippet = &page.items[0].snippet.top_level_comment.snippet;
        assert_eq!(snippet.author_display_name, "fan");
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn empty_channel_search_is_reported_not_panicked() {
        let response: SearchListResponse = serde_json::from_str(r#"{ "items": [] }"#).unwrap();
        let err = first_channel_id(response, "Wimbledon").unwrap_err();
        match err {
            YouTubeError::ChannelNotFound(name) => assert_eq!(name, "Wimbledon"),
            other => panic!("expected ChannelNotFound, got {other:?}"),
        }
    }

    #[test]
    fn search_hit_without_channel_id_is_also_not_found() {
        let response = SearchListResponse {
            items: vec![SearchResult {
                id: SearchResultId { channel_id: None },
            }],
        };
        assert!(matches!(
            first_channel_id(response, "Wimbledon"),
            Err(YouTubeError::ChannelNotFound(_))
        ));
    }

    #[test]
    fn first_search_hit_wins() {
        let response = SearchListResponse {
            items: vec![
                SearchResult {
                    id: SearchResultId {
                        channel_id: Some("UCfirst".into()),
                    },
                },
                SearchResult {
                    id: SearchResultId {
                        channel_id: Some("UCsecond".into()),
                    },
                },
            ],
        };
        assert_eq!(first_channel_id(response, "Wimbledon").unwrap(), "UCfirst");
    }
}
