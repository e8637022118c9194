use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use tracing::Instrument;

use crate::telemetry::{self};
use crate::telemetry::ops::catalog::Phase as CatalogPhase;

mod seed;
pub mod types;

pub use types::Catalog;

/// campfeed catalog ls
#[derive(Args)]
pub struct CatalogCmd {
    #[command(subcommand)]
    pub cmd: CatalogSub,
}

#[derive(Subcommand)]
pub enum CatalogSub {
    /// List channel groups and channels
    Ls {
        /// Only show highlighted channels
        #[arg(long, default_value_t = false)]
        highlighted: bool,
    },
}

/// Built-in catalog, or the JSON file at `path` when given.
pub async fn load(path: Option<&Path>) -> Result<Catalog> {
    let log = telemetry::catalog();
    let Some(path) = path else { return Ok(seed::builtin()) };

    let span = log.span(&CatalogPhase::Load);
    let raw = tokio::fs::read(path).instrument(span.clone()).await
        .with_context(|| format!("read catalog {}", path.display()))?;
    let _s = span.enter();
    let catalog: Catalog = serde_json::from_slice(&raw)
        .with_context(|| format!("parse catalog {}", path.display()))?;
    validate(&catalog)?;
    log.info_kv("📚 catalog loaded", [("path", path.display().to_string()), ("channels", catalog.channel_count().to_string())]);
    Ok(catalog)
}

fn validate(catalog: &Catalog) -> Result<()> {
    for g in &catalog.groups {
        for c in &g.channels {
            if c.external_id.trim().is_empty() {
                bail!("catalog entry {:?} in group {:?} has an empty external_id", c.display_name, g.name);
            }
        }
    }
    Ok(())
}

pub async fn run(catalog: &Catalog, args: CatalogCmd) -> Result<()> {
    match args.cmd {
        CatalogSub::Ls { highlighted } => ls(catalog, highlighted),
    }
}

fn ls(catalog: &Catalog, highlighted: bool) -> Result<()> {
    let log = telemetry::catalog();
    let _g = log.root_span_kv([("highlighted", highlighted.to_string())]).entered();
    let _s = log.span(&CatalogPhase::List).entered();

    log.info("📡 Catalog:");
    for g in &catalog.groups {
        log.info(format!("{}:", g.name));
        for c in g.channels.iter().filter(|c| !highlighted || c.highlighted) {
            let star = if c.highlighted { " ★" } else { "" };
            log.info(format!("  - {} ({}){}", c.display_name, c.external_id, star));
        }
    }

    if telemetry::config::json_mode() {
        let list = types::CatalogList {
            groups: catalog.groups.len(),
            channels: catalog.channel_count(),
            highlighted: catalog.highlighted_count(),
            catalog,
        };
        log.result(&list)?;
    }
    Ok(())
}
