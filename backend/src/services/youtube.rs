use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::RankedVideo;
use crate::utils::format_views;

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const WATCH_URL_PREFIX: &str = "https://music.youtube.com/watch?v=";

/// YouTube category 10 is "Music".
const MUSIC_CATEGORY_ID: &str = "10";

/// Both search.list and videos.list accept at most 50 items per call.
const PAGE_SIZE: usize = 50;
const DETAIL_BATCH_SIZE: usize = 50;

pub const DEFAULT_MAX_RESULTS: usize = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("network error: {0}")]
    Network(String),

    #[error("daily quota exceeded")]
    QuotaExceeded,

    #[error("invalid API key or access denied")]
    InvalidApiKey,

    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    #[error("failed to parse API response: {0}")]
    Parse(String),
}

/// One page of search.list results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    pub video_id: Option<String>,
}

/// One item of a videos.list response (part=snippet,statistics).
#[derive(Debug, Clone, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub snippet: Option<Snippet>,
    pub statistics: Option<Statistics>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snippet {
    pub title: String,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnails {
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

/// Error body shape returned by the Data API: {"error": {"code": ..., ...}}
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: u16,
    message: String,
    errors: Option<Vec<ApiErrorDetail>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    reason: String,
}

/// The two remote operations the ranked fetch needs.
#[async_trait]
pub trait VideoApi: Send + Sync {
    async fn search_page(
        &self,
        query: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<SearchPage, YouTubeError>;

    async fn list_videos(&self, ids: &[String]) -> Result<Vec<VideoItem>, YouTubeError>;
}

/// YouTube Data API v3 client.
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Result<Self, YouTubeError> {
        if api_key.trim().is_empty() {
            return Err(YouTubeError::InvalidApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| YouTubeError::Network(e.to_string()))?;

        Ok(Self { client, api_key })
    }

    async fn classify_failure(response: reqwest::Response) -> YouTubeError {
        let code = response.status().as_u16();
        match response.json::<ApiErrorEnvelope>().await {
            Ok(body) => classify_api_error(body.error),
            Err(_) => YouTubeError::Api {
                code,
                message: "unrecognized error response".to_string(),
            },
        }
    }
}

fn classify_api_error(error: ApiError) -> YouTubeError {
    if let Some(details) = &error.errors {
        for detail in details {
            match detail.reason.as_str() {
                "quotaExceeded" | "dailyLimitExceeded" => return YouTubeError::QuotaExceeded,
                "keyInvalid" | "accessNotConfigured" | "ipRefererBlocked" => {
                    return YouTubeError::InvalidApiKey
                }
                _ => {}
            }
        }
    }

    // Without a key-related reason a 400 is just a bad request
    // (malformed pageToken, bad parameter), not a credential problem.
    match error.code {
        403 => YouTubeError::QuotaExceeded,
        401 => YouTubeError::InvalidApiKey,
        code => YouTubeError::Api {
            code,
            message: error.message,
        },
    }
}

#[async_trait]
impl VideoApi for YouTubeClient {
    async fn search_page(
        &self,
        query: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<SearchPage, YouTubeError> {
        debug!("search.list: query='{query}', maxResults={page_size}, pageToken={page_token:?}");

        // Query builder keeps the API key out of logged URLs.
        let mut params = vec![
            ("part", "id".to_string()),
            ("q", query.to_string()),
            ("maxResults", page_size.to_string()),
            ("type", "video".to_string()),
            ("order", "viewCount".to_string()),
            ("videoCategoryId", MUSIC_CATEGORY_ID.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        let response = self
            .client
            .get(format!("{YOUTUBE_API_BASE}/search"))
            .query(&params)
            .send()
            .await
            .map_err(|e| YouTubeError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        response
            .json::<SearchPage>()
            .await
            .map_err(|e| YouTubeError::Parse(e.to_string()))
    }

    async fn list_videos(&self, ids: &[String]) -> Result<Vec<VideoItem>, YouTubeError> {
        let ids_joined = ids.join(",");
        debug!("videos.list: {} IDs", ids.len());

        let response = self
            .client
            .get(format!("{YOUTUBE_API_BASE}/videos"))
            .query(&[
                ("part", "snippet,statistics"),
                ("id", ids_joined.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| YouTubeError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        let body: VideoListResponse = response
            .json()
            .await
            .map_err(|e| YouTubeError::Parse(e.to_string()))?;

        Ok(body.items)
    }
}

/// Fetches up to `max_results` music videos matching `query`, ranked by
/// view count descending.
///
/// The search phase biases which videos are considered (the API's own
/// viewCount ordering); the final order comes from the statistics fetched
/// in the detail phase. Any provider failure aborts the whole fetch; an
/// empty search result is `Ok` with an empty vec.
pub async fn fetch_top_videos<A: VideoApi + ?Sized>(
    api: &A,
    query: &str,
    max_results: usize,
) -> Result<Vec<RankedVideo>, YouTubeError> {
    let video_ids = collect_video_ids(api, query, max_results).await?;
    if video_ids.is_empty() {
        info!("No video results for '{query}'.");
        return Ok(Vec::new());
    }

    info!("Found {} video IDs for '{query}'. Fetching details...", video_ids.len());

    let mut details = Vec::new();
    for chunk in video_ids.chunks(DETAIL_BATCH_SIZE) {
        details.extend(api.list_videos(chunk).await?);
    }

    Ok(rank_videos(details))
}

/// Pages through search.list until `max_results` IDs are collected or the
/// API stops returning a continuation token.
async fn collect_video_ids<A: VideoApi + ?Sized>(
    api: &A,
    query: &str,
    max_results: usize,
) -> Result<Vec<String>, YouTubeError> {
    let mut video_ids: Vec<String> = Vec::new();
    let mut page_token: Option<String> = None;

    while video_ids.len() < max_results {
        let page_size = PAGE_SIZE.min(max_results - video_ids.len());
        let page = api.search_page(query, page_size, page_token.as_deref()).await?;

        for item in page.items {
            if let Some(id) = item.id.video_id {
                video_ids.push(id);
            }
        }

        page_token = page.next_page_token;
        if page_token.is_none() {
            break;
        }
    }

    video_ids.truncate(max_results);
    Ok(video_ids)
}

/// Filters out items without a usable view count, then sorts descending.
/// The sort is stable, so ties keep the detail-response order.
fn rank_videos(items: Vec<VideoItem>) -> Vec<RankedVideo> {
    let mut videos: Vec<RankedVideo> = items.into_iter().filter_map(ranked_video_from_item).collect();
    videos.sort_by(|a, b| b.views.cmp(&a.views));
    videos
}

fn ranked_video_from_item(item: VideoItem) -> Option<RankedVideo> {
    let views: u64 = item.statistics.as_ref()?.view_count.as_ref()?.parse().ok()?;
    let snippet = item.snippet?;
    let thumbnail_url = snippet.thumbnails.and_then(|t| t.medium).map(|t| t.url);

    Some(RankedVideo {
        url: watch_url(&item.id),
        views_formatted: format_views(views),
        id: item.id,
        title: snippet.title,
        thumbnail_url,
        views,
    })
}

pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_PREFIX}{video_id}")
}
