use crate::domain::{CollisionPolicy, SavedSubtitle, Storage, SubtitleRecord};
use crate::error::{CrawlError, Result};
use crate::infrastructure::JptvClient;
use std::sync::Arc;
use tracing::info;

/// Outcome of persisting a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    Saved(SavedSubtitle),
    /// Files were already present and the collision policy said to keep them.
    Skipped,
}

pub struct DownloadPersister {
    client: JptvClient,
    store: Arc<dyn Storage>,
    on_collision: CollisionPolicy,
}

impl DownloadPersister {
    pub fn new(
        client: JptvClient,
        store: Arc<dyn Storage + 'static>,
        on_collision: CollisionPolicy,
    ) -> Self {
        Self {
            client,
            store,
            on_collision,
        }
    }

    /// Downloads the subtitle behind `record` and writes it next to its JSON sidecar.
    ///
    /// The payload is fetched in full before anything touches the disk.
    pub async fn persist(&self, record: &SubtitleRecord) -> Result<Persisted> {
        if self.store.exists(record) {
            match self.on_collision {
                CollisionPolicy::Overwrite => {}
                CollisionPolicy::Skip => {
                    info!(
                        "Skipping subtitle `{}`, {} already exists",
                        record.subtitle_id,
                        record.file_name()
                    );
                    return Ok(Persisted::Skipped);
                }
                CollisionPolicy::Fail => {
                    return Err(CrawlError::Collision(record.file_name().into()));
                }
            }
        }

        info!(
            "Downloading subtitle `{}` - `{}` - `{}`",
            record.subtitle_id, record.language, record.torrent_title
        );
        let payload = self.client.download(&record.subtitle_download_link).await?;

        let saved = self.store.save_subtitle(record, &payload)?;
        Ok(Persisted::Saved(saved))
    }
}
