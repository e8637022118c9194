pub mod channels;
pub mod error;
pub mod feeds;
pub mod translate;
pub mod types;
pub mod wave;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use tracing::Instrument;

use crate::api::{translate::{SOURCE_LANG, TARGET_LANG}, GoogleTranslator, Translator, VideoSource, YouTubeClient};
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::report::{self, Selection};
use crate::telemetry::{self};
use crate::telemetry::ops::scrape::Phase as ScrapePhase;

pub use error::ScrapeError;
pub use types::ReportData;

use self::feeds::FEED_ITEM_CAP;
use self::translate::{TranslateOptions, TRANSLATE_BATCH_SIZE};

#[derive(Args)]
pub struct ScrapeCmd {
    #[arg(long, default_value_t = false)] pub apply: bool,
}

#[derive(Clone, Debug)]
pub struct ScrapeOptions {
    pub feed_cap: u32,
    pub translate: TranslateOptions,
}

impl ScrapeOptions {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            feed_cap: FEED_ITEM_CAP,
            translate: TranslateOptions {
                batch_size: TRANSLATE_BATCH_SIZE,
                source_lang: SOURCE_LANG.to_string(),
                target_lang: TARGET_LANG.to_string(),
                limit,
            },
        }
    }

    pub fn plan(&self, catalog: &Catalog) -> ScrapePlan {
        ScrapePlan {
            channels: catalog.channel_count(),
            groups: catalog.groups.len(),
            feed_cap: self.feed_cap,
            batch_size: self.translate.batch_size,
            source_lang: self.translate.source_lang.clone(),
            target_lang: self.translate.target_lang.clone(),
            concurrency: self.translate.limit,
        }
    }
}

#[derive(Serialize)]
pub struct ScrapePlan {
    pub channels: usize,
    pub groups: usize,
    pub feed_cap: u32,
    pub batch_size: usize,
    pub source_lang: String,
    pub target_lang: String,
    pub concurrency: Option<usize>,
}

impl std::fmt::Display for ScrapePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "channels={} groups={} feed_cap={} batch_size={} {}→{}",
            self.channels, self.groups, self.feed_cap, self.batch_size, self.source_lang, self.target_lang
        )
    }
}

/// Catalog → channel metadata → feed items → translations.
pub struct Scraper {
    source: Arc<dyn VideoSource>,
    translator: Arc<dyn Translator>,
    opts: ScrapeOptions,
}

impl Scraper {
    pub fn new(source: Arc<dyn VideoSource>, translator: Arc<dyn Translator>, opts: ScrapeOptions) -> Self {
        Self { source, translator, opts }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let keys = cfg.require_scrape()?;
        let http = cfg.http_client().context("build http client")?;
        let source = YouTubeClient::new(http.clone(), &cfg.youtube_base_url, keys.youtube_api_key);
        let translator = GoogleTranslator::new(http, &cfg.translate_base_url, keys.translate_api_key);
        Ok(Self::new(Arc::new(source), Arc::new(translator), ScrapeOptions::new(cfg.concurrency)))
    }

    /// Build and fully populate a fresh record tree. Any failure fails the whole run.
    pub async fn scrape(&self, catalog: &Catalog) -> Result<ReportData, ScrapeError> {
        let log = telemetry::scrape();
        let mut data = ReportData::from_catalog(catalog, Utc::now());

        let feed_refs = channels::fetch_channels(self.source.as_ref(), &mut data)
            .instrument(log.span(&ScrapePhase::Channels))
            .await?;
        let resolved = feed_refs.len();
        log.wave_summary("channels", 1, resolved);

        let feeds_span = log.span_kv(&ScrapePhase::Feeds, [("feeds", resolved.to_string())]);
        let slots = feeds::fetch_feeds(self.source.clone(), feed_refs, self.opts.feed_cap, self.opts.translate.limit, &mut data)
            .instrument(feeds_span)
            .await?;
        log.wave_summary("feeds", resolved, slots.len());

        let tasks = slots.len().div_ceil(self.opts.translate.batch_size.max(1));
        let translate_span = log.span_kv(&ScrapePhase::Translate, [("slots", slots.len().to_string())]);
        let written = translate::translate_slots(self.translator.clone(), slots, &self.opts.translate, &mut data)
            .instrument(translate_span)
            .await?;
        log.wave_summary("translate", tasks, written);
        translate::ensure_translated(&data)?;

        log.totals(data.channel_count(), resolved, data.video_count());
        Ok(data)
    }
}

pub async fn run(cfg: &AppConfig, catalog: &Catalog, args: ScrapeCmd) -> Result<()> {
    let log = telemetry::scrape();
    let root = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("channels", catalog.channel_count().to_string()),
    ]);

    if !args.apply {
        let _g = root.enter();
        let _sp = log.span(&ScrapePhase::Plan).entered();
        let plan = ScrapeOptions::new(cfg.concurrency).plan(catalog);
        log.info(format!("📝 Scrape plan — {plan}"));
        log.info("   Use --apply to execute.");
        if telemetry::config::json_mode() {
            log.plan(&plan)?;
        }
        return Ok(());
    }

    let scraper = Scraper::from_config(cfg)?;
    let data = scraper.scrape(catalog).instrument(root.clone()).await.context("scrape")?;

    let _g = root.enter();
    let full = {
        let _s = log.span(&ScrapePhase::Render).entered();
        report::render(&data, Selection::All)
    };

    if telemetry::config::json_mode() {
        #[derive(Serialize)]
        struct ScrapeResult<'a> { channels: usize, videos: usize, report: &'a str }
        log.result(&ScrapeResult { channels: data.channel_count(), videos: data.video_count(), report: &full })?;
    } else {
        print!("{full}");
    }
    Ok(())
}
