use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Deserializer};

use super::{send_json, ApiError};

/// Channel metadata resolved from one batched lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelMeta {
    pub id: String,
    pub subscribers: u64,
    /// Reference to the channel's "recent uploads" feed, when it has one.
    pub uploads: Option<String>,
}

/// One item of an uploads feed, newest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub channel_id: String,
}

#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Resolve many channel IDs in a single call. Unknown IDs are omitted from the result.
    async fn channels(&self, ids: &[String]) -> Result<Vec<ChannelMeta>, ApiError>;

    /// Most recent `max` items of one uploads feed, in feed order.
    async fn recent_uploads(&self, feed: &str, max: u32) -> Result<Vec<FeedItem>, ApiError>;
}

#[derive(Clone)]
pub struct YouTubeClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into(), api_key: api_key.into() }
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), resource)
    }
}

#[async_trait]
impl VideoSource for YouTubeClient {
    async fn channels(&self, ids: &[String]) -> Result<Vec<ChannelMeta>, ApiError> {
        let joined = ids.join(",");
        let max = ids.len().max(1).to_string();
        let req = self.http.get(self.endpoint("channels")).query(&[
            ("part", "contentDetails,id,statistics"),
            ("id", joined.as_str()),
            ("maxResults", max.as_str()),
            ("key", self.api_key.as_str()),
        ]);
        let resp: ApiChannelList = send_json(req).await?;
        Ok(resp
            .items
            .into_iter()
            .map(|c| ChannelMeta {
                id: c.id,
                subscribers: c.statistics.map(|s| s.subscriber_count).unwrap_or(0),
                uploads: c.content_details.and_then(|d| d.related_playlists.uploads),
            })
            .collect())
    }

    async fn recent_uploads(&self, feed: &str, max: u32) -> Result<Vec<FeedItem>, ApiError> {
        let max = max.to_string();
        let req = self.http.get(self.endpoint("playlistItems")).query(&[
            ("part", "snippet"),
            ("playlistId", feed),
            ("maxResults", max.as_str()),
            ("key", self.api_key.as_str()),
        ]);
        let resp: ApiPlaylistItemList = send_json(req).await?;
        Ok(resp
            .items
            .into_iter()
            .map(|i| FeedItem { title: i.snippet.title, channel_id: i.snippet.channel_id })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct ApiChannelList {
    #[serde(default)]
    items: Vec<ApiChannel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiChannel {
    id: String,
    #[serde(default)]
    statistics: Option<ApiStatistics>,
    #[serde(default)]
    content_details: Option<ApiContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiStatistics {
    // Hidden counts are omitted by the API.
    #[serde(default, deserialize_with = "count")]
    subscriber_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiContentDetails {
    related_playlists: ApiRelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct ApiRelatedPlaylists {
    #[serde(default)]
    uploads: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPlaylistItemList {
    #[serde(default)]
    items: Vec<ApiPlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct ApiPlaylistItem {
    snippet: ApiSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSnippet {
    title: String,
    #[serde(default)]
    channel_id: String,
}

// Counts arrive as decimal strings ("1234"), occasionally as numbers.
fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw { Num(u64), Str(String) }
    match Raw::deserialize(d)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
