//! Mirrors the jptv.club subtitle catalogue: walks the paginated listing, turns every row
//! into a [`domain::SubtitleRecord`] and stores each subtitle next to a JSON sidecar.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod services;
