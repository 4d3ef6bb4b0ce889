use crate::error::{CrawlError, Result};
use reqwest::cookie::Jar;
use reqwest::Url;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Cookies of a pre-authenticated session, keyed by cookie name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieStore {
    cookies: BTreeMap<String, String>,
}

impl CookieStore {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CrawlError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let cookies: BTreeMap<String, String> = serde_json::from_str(&content).map_err(|e| {
            CrawlError::Configuration(format!("invalid cookie file {}: {e}", path.display()))
        })?;

        debug!("Loaded {} cookies from {:?}", cookies.len(), path);
        Ok(Self { cookies })
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Builds a cookie jar holding every cookie, scoped to `url`.
    pub fn jar(&self, url: &Url) -> Jar {
        let jar = Jar::default();
        for (name, value) in &self.cookies {
            jar.add_cookie_str(&format!("{name}={value}"), url);
        }
        jar
    }
}
