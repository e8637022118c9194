use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::Instrument;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::deliver::{deliver_report, DEFAULT_SUBJECT};
use crate::output::types::Meta;
use crate::pipeline::{ScrapeOptions, Scraper};
use crate::report::{self, FsSink, ReportSink, Selection};
use crate::telemetry::{self};
use crate::telemetry::ops::run::Phase as RunPhase;

pub const SEND_OK_PREFIX: &str = "AUTO SEND SUCCEEDED";
pub const SEND_FAILED_PREFIX: &str = "AUTO SEND FAILED";

/// campfeed run: scrape, render, deliver, write
#[derive(Args)]
pub struct RunCmd {
    #[arg(long, default_value_t = false)]
    pub apply: bool,
    /// Render and write reports without delivering them
    #[arg(long, default_value_t = false)]
    pub no_send: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Sent { pages: usize },
    Failed { error: String },
    Skipped,
}

impl DeliveryOutcome {
    /// Status line placed at the top of both reports. Skipped adds none.
    pub fn prefix(&self) -> Option<String> {
        match self {
            DeliveryOutcome::Sent { .. } => Some(SEND_OK_PREFIX.to_string()),
            DeliveryOutcome::Failed { error } => Some(format!("{SEND_FAILED_PREFIX}: {error}")),
            DeliveryOutcome::Skipped => None,
        }
    }
}

#[derive(Serialize)]
struct RunResult {
    channels: usize,
    videos: usize,
    delivery: DeliveryOutcome,
    written: Vec<&'static str>,
}

fn with_prefix(outcome: &DeliveryOutcome, body: &str) -> String {
    match outcome.prefix() {
        Some(line) => format!("{line}\n{body}"),
        None => body.to_string(),
    }
}

/// Prefix both reports with the delivery outcome and hand them to the sink.
pub async fn finish(sink: &dyn ReportSink, outcome: &DeliveryOutcome, full: &str, short: &str) -> Result<Vec<&'static str>> {
    let full = with_prefix(outcome, full);
    let short = with_prefix(outcome, short);
    report::write_reports(sink, &full, &short).await
}

pub async fn run(cfg: &AppConfig, catalog: &Catalog, args: RunCmd) -> Result<()> {
    let log = telemetry::run();
    let root = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("send", (!args.no_send).to_string()),
        ("channels", catalog.channel_count().to_string()),
    ]);
    let t0 = Instant::now();

    if !args.apply {
        let _g = root.enter();
        let _sp = log.span(&RunPhase::Plan).entered();
        let plan = ScrapeOptions::new(cfg.concurrency).plan(catalog);
        log.info(format!("📝 Run plan — {plan} send={} dir={}", !args.no_send, cfg.report_dir.display()));
        log.info("   Use --apply to execute.");
        if telemetry::config::json_mode() {
            log.plan(&plan)?;
        }
        return Ok(());
    }

    let scrape_span = root.in_scope(|| log.span(&RunPhase::Scrape));
    let data = Scraper::from_config(cfg)?
        .scrape(catalog)
        .instrument(scrape_span)
        .await
        .context("scrape")?;

    let (full, short) = root.in_scope(|| {
        let _s = log.span(&RunPhase::Render).entered();
        (report::render(&data, Selection::All), report::render(&data, Selection::Highlighted))
    });

    let outcome = if args.no_send {
        DeliveryOutcome::Skipped
    } else {
        let deliver_span = root.in_scope(|| log.span(&RunPhase::Deliver));
        let delivered = deliver_report(cfg, DEFAULT_SUBJECT, &full)
            .instrument(deliver_span)
            .await;
        match delivered {
            Ok(pages) => DeliveryOutcome::Sent { pages },
            Err(e) => {
                root.in_scope(|| log.warn_kv("⚠️ Delivery failed; reports will still be written", [("error", format!("{e:#}"))]));
                DeliveryOutcome::Failed { error: format!("{e:#}") }
            }
        }
    };

    let write_span = root.in_scope(|| log.span_kv(&RunPhase::Write, [("dir", cfg.report_dir.display().to_string())]));
    let written = finish(&FsSink::new(&cfg.report_dir), &outcome, &full, &short)
        .instrument(write_span)
        .await?;

    let _g = root.enter();
    log.info(format!("✅ Run complete — videos={} delivery={:?} wrote={}", data.video_count(), outcome, written.join(",")));
    if telemetry::config::json_mode() {
        let meta = Meta { duration_ms: Some(t0.elapsed().as_millis()) };
        let result = RunResult { channels: data.channel_count(), videos: data.video_count(), delivery: outcome, written };
        log.result_with_meta(&result, meta)?;
    }
    Ok(())
}
