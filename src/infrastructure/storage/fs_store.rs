use crate::domain::{SavedSubtitle, Storage, StorageKeys, SubtitleRecord};
use crate::error::Result;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Clone)]
pub struct FileSystemStore {
    output_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn payload_path(&self, record: &SubtitleRecord) -> PathBuf {
        self.output_dir.join(record.file_name())
    }

    pub fn sidecar_path(&self, record: &SubtitleRecord) -> PathBuf {
        // Append rather than replace: the payload name already ends in the site's extension.
        self.output_dir
            .join(format!("{}{}", record.file_name(), StorageKeys::SIDECAR_SUFFIX))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir)?;
        }
        Ok(())
    }
}

impl Storage for FileSystemStore {
    fn exists(&self, record: &SubtitleRecord) -> bool {
        self.payload_path(record).exists()
    }

    fn save_subtitle(&self, record: &SubtitleRecord, payload: &[u8]) -> Result<SavedSubtitle> {
        self.ensure_dir()?;

        let sidecar = self.sidecar_path(record);
        debug!("Writing json to {:?}", sidecar);
        fs::write(&sidecar, serde_json::to_string_pretty(record)?)?;

        let payload_path = self.payload_path(record);
        debug!("Writing file to {:?}", payload_path);
        fs::write(&payload_path, payload)?;

        Ok(SavedSubtitle {
            payload: payload_path,
            sidecar,
        })
    }
}
