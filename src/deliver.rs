use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::Instrument;

use crate::config::AppConfig;
use crate::telemetry::{self};
use crate::telemetry::ops::send::Phase as SendPhase;
use crate::thecamp::{pages, CampClient};

pub const DEFAULT_SUBJECT: &str = "campfeed";

/// campfeed send --file <path>
#[derive(Args)]
pub struct SendCmd {
    /// Text document to deliver
    #[arg(long)]
    pub file: PathBuf,
    /// Letter subject; each page is titled "<subject>: <n>"
    #[arg(long, default_value = DEFAULT_SUBJECT)]
    pub subject: String,
    #[arg(long, default_value_t = false)]
    pub apply: bool,
}

#[derive(Serialize)]
struct SendPlan<'a> {
    subject: &'a str,
    bytes: usize,
    pages: usize,
    page_bytes: Vec<usize>,
}

#[derive(Serialize)]
struct SendResult<'a> {
    subject: &'a str,
    pages: usize,
}

/// Log in, resolve the recipient, and send `text` as numbered pages.
pub async fn deliver_report(cfg: &AppConfig, subject: &str, text: &str) -> Result<usize> {
    let settings = cfg.require_delivery()?;
    let http = cfg.http_client().context("build http client")?;
    let client = CampClient::login(http, &cfg.camp_base_url, &settings.user, &settings.pass)
        .await
        .context("login")?;
    let code = client.search(&settings.recipient).await.context("recipient search")?;
    let sent = client.send(code, subject, text).await.context("send pages")?;
    Ok(sent)
}

pub async fn run(cfg: &AppConfig, args: SendCmd) -> Result<()> {
    let log = telemetry::send();
    let root = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("file", args.file.display().to_string()),
    ]);

    let text = tokio::fs::read_to_string(&args.file)
        .instrument(root.clone())
        .await
        .with_context(|| format!("read {}", args.file.display()))?;

    if !args.apply {
        let _g = root.enter();
        let _sp = log.span(&SendPhase::Plan).entered();
        let paged = {
            let _s = log.span(&SendPhase::Paginate).entered();
            pages::paginate(&text)
        };
        let plan = SendPlan {
            subject: &args.subject,
            bytes: text.len(),
            pages: paged.len(),
            page_bytes: paged.iter().map(|p| p.text.len()).collect(),
        };
        log.info(format!("📝 Send plan — {} bytes in {} page(s) as {:?}", plan.bytes, plan.pages, plan.subject));
        for p in &paged {
            log.info(format!("   {} ({} bytes)", p.title(&args.subject), p.text.len()));
        }
        log.info("   Use --apply to execute.");
        if telemetry::config::json_mode() {
            log.plan(&plan)?;
        }
        return Ok(());
    }

    let pages = deliver_report(cfg, &args.subject, &text).instrument(root.clone()).await?;
    let _g = root.enter();
    log.info(format!("✅ Delivered {pages} page(s)"));
    if telemetry::config::json_mode() {
        log.result(&SendResult { subject: &args.subject, pages })?;
    }
    Ok(())
}
