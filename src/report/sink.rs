use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

/// File names of the two rendered documents.
pub const FULL_REPORT: &str = "report.txt";
pub const SHORT_REPORT: &str = "report-short.txt";

/// Durable storage for rendered reports.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn write(&self, name: &str, contents: &str) -> Result<()>;
}

/// Writes reports as files under one directory, creating it on first use.
pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ReportSink for FsSink {
    async fn write(&self, name: &str, contents: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create {}", self.dir.display()))?;
        let path = self.dir.join(name);
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("write {}", path.display()))
    }
}

/// Write both documents. The second write is attempted even if the first
/// fails; the first error wins.
pub async fn write_reports(sink: &dyn ReportSink, full: &str, short: &str) -> Result<Vec<&'static str>> {
    let full_res = sink.write(FULL_REPORT, full).await;
    let short_res = sink.write(SHORT_REPORT, short).await;
    full_res?;
    short_res?;
    Ok(vec![FULL_REPORT, SHORT_REPORT])
}
