pub mod crawl;
pub mod download;

pub use crawl::{CrawlService, CrawlState, CrawlSummary};
pub use download::{DownloadPersister, Persisted};
