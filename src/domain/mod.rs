mod record;
pub(crate) mod storage;

pub use record::{
    parse_subtitle_id, safe_title, ListingEntry, RecordBuilder, SubtitleRecord, Uploader,
    ANONYMOUS, MAX_TITLE_CHARS,
};
pub use storage::{CollisionPolicy, SavedSubtitle, Storage, StorageKeys};
