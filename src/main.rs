use clap::Parser;
use jptv_subtitles::config::{cli::Args, Config};
use jptv_subtitles::error::{CrawlError, Result};
use jptv_subtitles::infrastructure::{FileSystemStore, JptvClient};
use jptv_subtitles::services::{CrawlService, DownloadPersister};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level)
        .map_err(|e| CrawlError::Configuration(format!("bad log level: {e}")))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_args(args)?;
    let client = JptvClient::new(config.http_client.clone(), config.base_url.clone());
    let store = Arc::new(FileSystemStore::new(config.args.output_dir.clone()));
    let persister = DownloadPersister::new(client.clone(), store, config.args.on_collision);

    let mut crawl = CrawlService::new(client, persister, config.args.max_pages)?;
    let summary = crawl.run().await?;

    info!(
        "Crawl completed: {} pages, {} records built, {} saved, {} skipped",
        summary.pages_fetched,
        summary.records_built,
        summary.records_saved,
        summary.records_skipped
    );
    Ok(())
}
