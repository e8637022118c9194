use std::collections::HashMap;

use crate::api::VideoSource;
use crate::telemetry::{self};

use super::error::ScrapeError;
use super::types::{ChannelRef, FeedRef, ReportData};

/// Most IDs a single metadata lookup can address.
pub const MAX_IDS_PER_LOOKUP: usize = 50;

/// Resolve every catalog channel in one lookup, fill subscriber counts and
/// return the uploads feeds to fetch next. Channels missing from the response
/// keep a zero count and produce no feed.
pub async fn fetch_channels(source: &dyn VideoSource, data: &mut ReportData) -> Result<Vec<FeedRef>, ScrapeError> {
    let mut ids: Vec<String> = Vec::new();
    let mut targets: HashMap<String, Vec<ChannelRef>> = HashMap::new();
    for (at, c) in data.channel_refs() {
        targets
            .entry(c.external_id.clone())
            .or_insert_with(|| {
                ids.push(c.external_id.clone());
                Vec::new()
            })
            .push(at);
    }

    if ids.is_empty() {
        return Ok(Vec::new());
    }
    if ids.len() > MAX_IDS_PER_LOOKUP {
        return Err(ScrapeError::TooManyChannels { count: ids.len(), max: MAX_IDS_PER_LOOKUP });
    }

    let metas = source.channels(&ids).await?;

    let log = telemetry::scrape();
    let mut feeds = Vec::with_capacity(metas.len());
    for meta in metas {
        let Some(refs) = targets.remove(&meta.id) else {
            log.warn_kv("unexpected channel in response", [("id", meta.id.clone())]);
            continue;
        };
        for at in refs {
            let channel = data
                .channel_mut(at)
                .ok_or_else(|| ScrapeError::DanglingHandle(format!("{at:?}")))?;
            channel.subscribers = meta.subscribers;
            if let Some(feed) = &meta.uploads {
                feeds.push(FeedRef { channel: at, feed: feed.clone() });
            }
        }
    }

    for id in targets.keys() {
        log.warn_kv("channel not resolved", [("id", id.clone())]);
    }
    Ok(feeds)
}
