use crate::domain::{CollisionPolicy, StorageKeys};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:88.0) Gecko/20100101 Firefox/88.0";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// JSON file mapping cookie names to values for an already logged-in session
    #[arg(long, default_value = "cookies.json")]
    pub cookies_file: PathBuf,

    /// Directory the subtitles and their metadata are written to
    #[arg(long, default_value = StorageKeys::SUBTITLES_DIR)]
    pub output_dir: PathBuf,

    /// Site root; listing pages are fetched from `<base-url>/subtitles?page=N`
    #[arg(long, default_value = "https://jptv.club")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Stop after this many listing pages even if the site keeps returning rows
    #[arg(long)]
    pub max_pages: Option<u64>,

    /// What to do when a subtitle's files already exist
    #[arg(long, value_enum, default_value_t = CollisionPolicy::Overwrite)]
    pub on_collision: CollisionPolicy,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
