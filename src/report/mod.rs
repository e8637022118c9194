//! Plain-text rendering of an enriched record tree.

use std::fmt::Write;

use crate::pipeline::types::ReportData;
use crate::util::time::report_timestamp;

pub mod sink;

pub use sink::{write_reports, FsSink, ReportSink};

pub const REPORT_HEADER: &str = "campfeed report";

/// Which channels a rendered document includes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    All,
    Highlighted,
}

pub fn render(data: &ReportData, selection: Selection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{REPORT_HEADER}");
    let _ = writeln!(out, "{}", report_timestamp(data.timestamp));
    for group in &data.groups {
        let _ = writeln!(out, "\n{}:", group.title);
        let channels = group
            .channels
            .iter()
            .filter(|c| selection == Selection::All || c.highlighted);
        for channel in channels {
            let _ = writeln!(out, "- {} {}", channel.title, channel.subscribers);
            for video in &channel.videos {
                let _ = writeln!(out, "+ {}", video.title_translated);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::pipeline::types::{ChannelRecord, Group, VideoRecord};

    fn channel(title: &str, subs: u64, highlighted: bool, videos: &[&str]) -> ChannelRecord {
        ChannelRecord {
            title: title.into(),
            external_id: format!("UC-{title}"),
            highlighted,
            subscribers: subs,
            videos: videos
                .iter()
                .map(|v| VideoRecord { title: format!("ja:{v}"), title_translated: v.to_string() })
                .collect(),
        }
    }

    fn data() -> ReportData {
        ReportData {
            timestamp: Utc.with_ymd_and_hms(2021, 4, 29, 9, 0, 0).unwrap(),
            groups: vec![
                Group { title: "Gen 0".into(), channels: vec![channel("Sora", 900, false, &["Morning stream"])] },
                Group {
                    title: "Gamers".into(),
                    channels: vec![
                        channel("Mio", 1200, true, &["Tarot", "Karaoke"]),
                        channel("Korone", 1500, false, &[]),
                    ],
                },
            ],
        }
    }

    #[test]
    fn full_report_lists_every_channel() {
        let want = "campfeed report\n\
                    Thu, 29 Apr 2021 09:00:00 UTC\n\
                    \n\
                    Gen 0:\n\
                    - Sora 900\n\
                    + Morning stream\n\
                    \n\
                    Gamers:\n\
                    - Mio 1200\n\
                    + Tarot\n\
                    + Karaoke\n\
                    - Korone 1500\n";
        assert_eq!(render(&data(), Selection::All), want);
    }

    #[test]
    fn highlighted_report_keeps_groups_but_filters_channels() {
        let out = render(&data(), Selection::Highlighted);
        assert!(out.contains("Gen 0:\n"));
        assert!(!out.contains("Sora"));
        assert!(out.contains("- Mio 1200\n+ Tarot\n+ Karaoke\n"));
        assert!(!out.contains("Korone"));
    }
}
