use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected status {status} for {url}")]
    HttpStatus { url: String, status: StatusCode },
    #[error("Malformed page: {0}")]
    MalformedPage(String),
    #[error("Malformed row: {0}")]
    MalformedRow(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Refusing to overwrite existing file {}", .0.display())]
    Collision(PathBuf),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Selector error: {0}")]
    Selector(String),
}

impl CrawlError {
    /// Name of the pipeline stage this error belongs to, used in failure logs.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Network(_) | Self::HttpStatus { .. } => "transport",
            Self::MalformedPage(_) | Self::Selector(_) => "extraction",
            Self::MalformedRow(_) => "record",
            Self::Io(_) | Self::Collision(_) | Self::Serialization(_) => "filesystem",
        }
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
