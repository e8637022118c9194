use std::sync::Arc;

use crate::api::VideoSource;

use super::error::ScrapeError;
use super::types::{FeedRef, ReportData, TranslationSlot, VideoRecord, VideoRef};
use super::wave::Wave;

/// Most recent items fetched per uploads feed.
pub const FEED_ITEM_CAP: u32 = 3;

/// Fetch every feed concurrently and write the titles into the tree.
///
/// Nothing is written until the whole wave has succeeded and every item has
/// been checked against the channel it fills, so a failed or cancelled fetch
/// never leaves a channel half-filled. Slots come back in fetch completion
/// order.
pub async fn fetch_feeds(
    source: Arc<dyn VideoSource>,
    feeds: Vec<FeedRef>,
    cap: u32,
    limit: Option<usize>,
    data: &mut ReportData,
) -> Result<Vec<TranslationSlot>, ScrapeError> {
    let mut wave = Wave::new(limit);
    for FeedRef { channel, feed } in feeds {
        let source = source.clone();
        wave.spawn(async move {
            let items = source.recent_uploads(&feed, cap).await?;
            Ok((channel, feed, items))
        });
    }
    let fetched = wave.join().await?;

    for (at, feed, items) in &fetched {
        let channel = data
            .channel(*at)
            .ok_or_else(|| ScrapeError::DanglingHandle(format!("{at:?}")))?;
        // items without an owner id are accepted as-is
        let foreign = items
            .iter()
            .find(|item| !item.channel_id.is_empty() && item.channel_id != channel.external_id);
        if let Some(item) = foreign {
            return Err(ScrapeError::FeedChannelMismatch {
                feed: feed.clone(),
                expected: channel.external_id.clone(),
                got: item.channel_id.clone(),
            });
        }
    }

    let mut slots = Vec::new();
    for (at, _, items) in fetched {
        let channel = data
            .channel_mut(at)
            .ok_or_else(|| ScrapeError::DanglingHandle(format!("{at:?}")))?;
        channel.videos = items
            .into_iter()
            .take(cap as usize)
            .map(|item| VideoRecord { title: item.title, title_translated: String::new() })
            .collect();
        slots.extend(channel.videos.iter().enumerate().map(|(vi, v)| TranslationSlot {
            source: v.title.clone(),
            dest: VideoRef { channel: at, video: vi },
        }));
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::Utc;

    use crate::pipeline::testing::{catalog, MockSource};
    use crate::pipeline::types::ChannelRef;

    fn feed(group: usize, channel: usize, feed: &str) -> FeedRef {
        FeedRef { channel: ChannelRef { group, channel }, feed: feed.into() }
    }

    #[tokio::test]
    async fn titles_land_in_feed_order() {
        let source = Arc::new(MockSource::new()
            .with_feed("UU1", &["c", "b", "a"])
            .with_feed("UU2", &["z"]));
        let mut data = ReportData::from_catalog(&catalog(&[&["UC1", "UC2"]]), Utc::now());

        let slots = fetch_feeds(source.clone(), vec![feed(0, 0, "UU1"), feed(0, 1, "UU2")], 3, None, &mut data)
            .await
            .unwrap();

        let titles: Vec<&str> = data.groups[0].channels[0].videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["c", "b", "a"]);
        assert_eq!(data.groups[0].channels[1].videos.len(), 1);
        assert_eq!(slots.len(), 4);
        for slot in &slots {
            let ch = data.channel(slot.dest.channel).unwrap();
            assert_eq!(ch.videos[slot.dest.video].title, slot.source);
            assert!(ch.videos[slot.dest.video].title_translated.is_empty());
        }
    }

    #[tokio::test]
    async fn empty_feed_leaves_empty_list() {
        let source = Arc::new(MockSource::new().with_feed("UU1", &[]));
        let mut data = ReportData::from_catalog(&catalog(&[&["UC1"]]), Utc::now());
        let slots = fetch_feeds(source, vec![feed(0, 0, "UU1")], 3, None, &mut data).await.unwrap();
        assert!(slots.is_empty());
        assert!(data.groups[0].channels[0].videos.is_empty());
    }

    #[tokio::test]
    async fn items_beyond_cap_are_dropped() {
        let source = Arc::new(MockSource::new().with_feed("UU1", &["1", "2", "3", "4"]));
        let mut data = ReportData::from_catalog(&catalog(&[&["UC1"]]), Utc::now());
        fetch_feeds(source, vec![feed(0, 0, "UU1")], 2, None, &mut data).await.unwrap();
        assert_eq!(data.groups[0].channels[0].videos.len(), 2);
    }

    #[tokio::test]
    async fn item_from_another_channel_is_rejected_before_any_write() {
        let source = Arc::new(MockSource::new()
            .with_owned_feed("UU1", "UC1", &["mine"])
            .with_owned_feed("UU2", "UC9", &["stray"]));
        let mut data = ReportData::from_catalog(&catalog(&[&["UC1", "UC2"]]), Utc::now());
        let before = data.clone();

        let err = fetch_feeds(source, vec![feed(0, 0, "UU1"), feed(0, 1, "UU2")], 3, None, &mut data)
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::FeedChannelMismatch { ref feed, ref expected, ref got }
            if feed == "UU2" && expected == "UC2" && got == "UC9"));
        assert_eq!(data, before);
    }

    #[tokio::test]
    async fn items_owned_by_their_channel_are_accepted() {
        let source = Arc::new(MockSource::new().with_owned_feed("UU1", "UC1", &["a", "b"]));
        let mut data = ReportData::from_catalog(&catalog(&[&["UC1"]]), Utc::now());
        let slots = fetch_feeds(source, vec![feed(0, 0, "UU1")], 3, None, &mut data).await.unwrap();
        assert_eq!(slots.len(), 2);
    }

    #[tokio::test]
    async fn failing_feed_cancels_wave_without_partial_writes() {
        let slow = Duration::from_secs(30);
        let source = Arc::new(MockSource::new()
            .with_slow_feed("UU0", &["a"], slow)
            .with_slow_feed("UU1", &["b"], slow)
            .with_failing_feed("UU2")
            .with_slow_feed("UU3", &["d"], slow)
            .with_slow_feed("UU4", &["e"], slow));
        let mut data = ReportData::from_catalog(&catalog(&[&["UC0", "UC1", "UC2", "UC3", "UC4"]]), Utc::now());
        let before = data.clone();
        let feeds = (0..5).map(|i| feed(0, i, &format!("UU{i}"))).collect();

        let err = tokio::time::timeout(Duration::from_secs(5), fetch_feeds(source, feeds, 3, None, &mut data))
            .await
            .expect("wave should not wait for cancelled siblings")
            .unwrap_err();

        assert!(err.to_string().contains("feed UU2 failed"));
        assert_eq!(data, before);
    }
}
