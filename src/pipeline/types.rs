use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::Catalog;

/// The record tree for one run: built from the catalog, filled by the three
/// fetch waves, then handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportData {
    pub timestamp: DateTime<Utc>,
    pub groups: Vec<Group>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Group {
    pub title: String,
    pub channels: Vec<ChannelRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelRecord {
    pub title: String,
    pub external_id: String,
    pub highlighted: bool,
    pub subscribers: u64,
    pub videos: Vec<VideoRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VideoRecord {
    pub title: String,
    pub title_translated: String,
}

/// Position of a channel in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelRef {
    pub group: usize,
    pub channel: usize,
}

/// Position of a video in the tree; the write-back target of a translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VideoRef {
    pub channel: ChannelRef,
    pub video: usize,
}

/// An uploads feed to fetch, paired with the channel it fills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedRef {
    pub channel: ChannelRef,
    pub feed: String,
}

/// A title waiting for translation and the field that receives the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationSlot {
    pub source: String,
    pub dest: VideoRef,
}

impl ReportData {
    pub fn from_catalog(catalog: &Catalog, timestamp: DateTime<Utc>) -> Self {
        let groups = catalog
            .groups
            .iter()
            .map(|g| Group {
                title: g.name.clone(),
                channels: g
                    .channels
                    .iter()
                    .map(|c| ChannelRecord {
                        title: c.display_name.clone(),
                        external_id: c.external_id.clone(),
                        highlighted: c.highlighted,
                        subscribers: 0,
                        videos: Vec::new(),
                    })
                    .collect(),
            })
            .collect();
        Self { timestamp, groups }
    }

    pub fn channel(&self, at: ChannelRef) -> Option<&ChannelRecord> {
        self.groups.get(at.group)?.channels.get(at.channel)
    }

    pub fn channel_mut(&mut self, at: ChannelRef) -> Option<&mut ChannelRecord> {
        self.groups.get_mut(at.group)?.channels.get_mut(at.channel)
    }

    pub fn video_mut(&mut self, at: VideoRef) -> Option<&mut VideoRecord> {
        self.channel_mut(at.channel)?.videos.get_mut(at.video)
    }

    /// Every channel with its handle, in catalog order.
    pub fn channel_refs(&self) -> impl Iterator<Item = (ChannelRef, &ChannelRecord)> + '_ {
        self.groups.iter().enumerate().flat_map(|(gi, g)| {
            g.channels
                .iter()
                .enumerate()
                .map(move |(ci, c)| (ChannelRef { group: gi, channel: ci }, c))
        })
    }

    pub fn channel_count(&self) -> usize {
        self.groups.iter().map(|g| g.channels.len()).sum()
    }

    pub fn video_count(&self) -> usize {
        self.groups.iter().flat_map(|g| &g.channels).map(|c| c.videos.len()).sum()
    }

    /// Handles of titled videos whose translated title is still empty.
    pub fn untranslated(&self) -> Vec<VideoRef> {
        self.channel_refs()
            .flat_map(|(at, c)| {
                c.videos
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| !v.title.is_empty() && v.title_translated.is_empty())
                    .map(move |(vi, _)| VideoRef { channel: at, video: vi })
            })
            .collect()
    }
}
