//! In-memory stand-ins for the external APIs, shared by the pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::api::youtube::{ChannelMeta, FeedItem};
use crate::api::{ApiError, Translator, VideoSource};
use crate::catalog::types::{Catalog, CatalogEntry, CatalogGroup};

/// One group per slice; display names are the lowercased IDs.
pub fn catalog(groups: &[&[&str]]) -> Catalog {
    Catalog {
        groups: groups
            .iter()
            .enumerate()
            .map(|(i, ids)| CatalogGroup {
                name: format!("G{i}"),
                channels: ids
                    .iter()
                    .map(|id| CatalogEntry { display_name: id.to_lowercase(), external_id: id.to_string(), highlighted: false })
                    .collect(),
            })
            .collect(),
    }
}

pub fn api_failure(msg: &str) -> ApiError {
    ApiError::Status { status: StatusCode::INTERNAL_SERVER_ERROR, message: msg.to_string() }
}

enum FeedBehavior {
    Items { titles: Vec<String>, owner: String, delay: Duration },
    Fail { delay: Duration },
}

#[derive(Default)]
pub struct MockSource {
    channels: Vec<ChannelMeta>,
    fail_channels: bool,
    feeds: HashMap<String, FeedBehavior>,
    channel_calls: Mutex<Vec<Vec<String>>>,
    feed_calls: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, id: &str, subscribers: u64, uploads: Option<&str>) -> Self {
        self.channels.push(ChannelMeta { id: id.into(), subscribers, uploads: uploads.map(Into::into) });
        self
    }

    pub fn failing_channels(mut self) -> Self {
        self.fail_channels = true;
        self
    }

    pub fn with_feed(self, feed: &str, titles: &[&str]) -> Self {
        self.with_slow_feed(feed, titles, Duration::ZERO)
    }

    pub fn with_slow_feed(mut self, feed: &str, titles: &[&str], delay: Duration) -> Self {
        let titles = titles.iter().map(|t| t.to_string()).collect();
        self.feeds.insert(feed.into(), FeedBehavior::Items { titles, owner: String::new(), delay });
        self
    }

    /// Feed whose items report `owner` as their channel.
    pub fn with_owned_feed(mut self, feed: &str, owner: &str, titles: &[&str]) -> Self {
        let titles = titles.iter().map(|t| t.to_string()).collect();
        self.feeds.insert(feed.into(), FeedBehavior::Items { titles, owner: owner.into(), delay: Duration::ZERO });
        self
    }

    pub fn with_failing_feed(mut self, feed: &str) -> Self {
        self.feeds.insert(feed.into(), FeedBehavior::Fail { delay: Duration::ZERO });
        self
    }

    pub fn channel_calls(&self) -> Vec<Vec<String>> {
        self.channel_calls.lock().unwrap().clone()
    }

    pub fn feed_calls(&self) -> Vec<String> {
        self.feed_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSource for MockSource {
    async fn channels(&self, ids: &[String]) -> Result<Vec<ChannelMeta>, ApiError> {
        self.channel_calls.lock().unwrap().push(ids.to_vec());
        if self.fail_channels {
            return Err(api_failure("channels unavailable"));
        }
        Ok(self.channels.iter().filter(|c| ids.contains(&c.id)).cloned().collect())
    }

    async fn recent_uploads(&self, feed: &str, max: u32) -> Result<Vec<FeedItem>, ApiError> {
        self.feed_calls.lock().unwrap().push(feed.to_string());
        match self.feeds.get(feed) {
            Some(FeedBehavior::Items { titles, owner, delay }) => {
                tokio::time::sleep(*delay).await;
                Ok(titles
                    .iter()
                    .take(max as usize)
                    .map(|t| FeedItem { title: t.clone(), channel_id: owner.clone() })
                    .collect())
            }
            Some(FeedBehavior::Fail { delay }) => {
                tokio::time::sleep(*delay).await;
                Err(api_failure(&format!("feed {feed} failed")))
            }
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Clone, Copy)]
pub enum TranslateMode {
    /// `"<target>:<input>"` for each input.
    Tag,
    /// Drops the last result of every batch.
    Short,
    /// Fails any batch containing the marker.
    FailOn(&'static str),
    /// Returns an empty string for the marker, tags the rest.
    BlankOn(&'static str),
}

pub struct MockTranslator {
    mode: TranslateMode,
    delay: Duration,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockTranslator {
    pub fn new(mode: TranslateMode) -> Self {
        Self { mode, delay: Duration::ZERO, calls: Mutex::new(Vec::new()) }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, texts: &[String], _source: &str, target: &str) -> Result<Vec<String>, ApiError> {
        self.calls.lock().unwrap().push(texts.to_vec());
        let tagged = texts.iter().map(|t| format!("{target}:{t}"));
        match self.mode {
            TranslateMode::Tag => Ok(tagged.collect()),
            TranslateMode::Short => Ok(tagged.take(texts.len().saturating_sub(1)).collect()),
            TranslateMode::BlankOn(marker) => Ok(texts
                .iter()
                .map(|t| if t == marker { String::new() } else { format!("{target}:{t}") })
                .collect()),
            TranslateMode::FailOn(marker) => {
                if texts.iter().any(|t| t.contains(marker)) {
                    return Err(api_failure("translate failed"));
                }
                tokio::time::sleep(self.delay).await;
                Ok(tagged.collect())
            }
        }
    }
}
