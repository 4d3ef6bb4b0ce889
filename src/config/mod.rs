use crate::config::cli::Args;
use crate::error::{CrawlError, Result};
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub mod cli;
pub mod cookies;

pub use cookies::CookieStore;

pub struct Config {
    pub args: Args,
    pub base_url: Url,
    pub http_client: Client,
}

impl Config {
    /// Loads the cookie store and builds the shared HTTP session.
    ///
    /// Runs before any network activity, so a bad cookie file never costs a request.
    pub fn from_args(args: Args) -> Result<Self> {
        let base_url = parse_base_url(&args.base_url)?;
        let cookies = CookieStore::load(&args.cookies_file)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(args.user_agent.as_str())
            .cookie_provider(Arc::new(cookies.jar(&base_url)))
            .build()?;

        info!("Session ready for {} with {} cookies", base_url, cookies.len());
        Ok(Self {
            args,
            base_url,
            http_client,
        })
    }
}

// Url::join drops the last path segment unless the base ends with a slash.
fn parse_base_url(raw: &str) -> Result<Url> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash)
        .map_err(|e| CrawlError::Configuration(format!("invalid base url `{raw}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn base_url_gets_trailing_slash() {
        assert_eq!(
            parse_base_url("https://jptv.club").unwrap().as_str(),
            "https://jptv.club/"
        );
        assert_eq!(
            parse_base_url("http://localhost:8080/mirror").unwrap().as_str(),
            "http://localhost:8080/mirror/"
        );
    }

    #[test]
    fn bad_base_url_is_configuration_error() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, CrawlError::Configuration(_)));
    }

    #[test]
    fn defaults_match_the_site() {
        let args = Args::parse_from(["jptv-subtitles"]);
        assert_eq!(args.cookies_file, std::path::PathBuf::from("cookies.json"));
        assert_eq!(args.output_dir, std::path::PathBuf::from("subtitles"));
        assert_eq!(args.base_url, "https://jptv.club");
        assert_eq!(args.max_pages, None);
        assert_eq!(args.on_collision, crate::domain::CollisionPolicy::Overwrite);
    }

    #[test]
    fn missing_cookie_file_fails_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let cookies = dir.path().join("cookies.json");
        let args = Args::parse_from([
            "jptv-subtitles",
            "--cookies-file",
            cookies.to_str().unwrap(),
        ]);
        let err = Config::from_args(args).err().unwrap();
        assert!(matches!(err, CrawlError::Configuration(_)));
    }
}
