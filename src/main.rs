use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod api;
mod catalog;
mod config;
mod deliver;
mod output;
mod pipeline;
mod report;
mod run;
mod telemetry;
mod thecamp;
mod util;

#[derive(Parser)]
#[command(name = "campfeed", about = "Channel digest: scrape, translate, report, deliver")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,
    /// Load the channel catalog from a JSON file instead of the built-in list
    #[arg(global = true, long)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Catalog(catalog::CatalogCmd),
    Scrape(pipeline::ScrapeCmd),
    Send(deliver::SendCmd),
    Run(run::RunCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // stderr logging; respects RUST_LOG and CAMPFEED_LOG_FORMAT
    telemetry::config::init_tracing();
    let cfg = config::AppConfig::from_env()?;

    match cli.command {
        Commands::Catalog(args) => {
            let catalog = catalog::load(cli.catalog.as_deref()).await?;
            catalog::run(&catalog, args).await?
        }
        Commands::Scrape(args) => {
            let catalog = catalog::load(cli.catalog.as_deref()).await?;
            pipeline::run(&cfg, &catalog, args).await?
        }
        Commands::Send(args) => deliver::run(&cfg, args).await?,
        Commands::Run(args) => {
            let catalog = catalog::load(cli.catalog.as_deref()).await?;
            run::run(&cfg, &catalog, args).await?
        }
    }

    Ok(())
}
