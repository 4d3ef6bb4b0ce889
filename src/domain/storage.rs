use super::SubtitleRecord;
use crate::error::Result;
use clap::ValueEnum;
use std::path::PathBuf;

pub trait Storage: Send + Sync {
    /// Whether a payload for this record is already on disk.
    fn exists(&self, record: &SubtitleRecord) -> bool;
    fn save_subtitle(&self, record: &SubtitleRecord, payload: &[u8]) -> Result<SavedSubtitle>;
}

/// Paths written for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSubtitle {
    pub payload: PathBuf,
    pub sidecar: PathBuf,
}

/// What to do when a record's files already exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CollisionPolicy {
    /// Write over the existing files.
    #[default]
    Overwrite,
    /// Keep the existing files and skip the download.
    Skip,
    /// Abort the crawl.
    Fail,
}

pub struct StorageKeys;

impl StorageKeys {
    pub const SUBTITLES_DIR: &'static str = "subtitles";
    pub const SIDECAR_SUFFIX: &'static str = ".json";
}
