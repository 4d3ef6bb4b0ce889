mod clients;
mod scrapers;
mod storage;

pub use clients::jptv::JptvClient;
pub use scrapers::{
    listing::{Column, ListingPage, ListingRow, COLUMN_COUNT},
    ListingSelectors,
};
pub use storage::fs_store::FileSystemStore;
