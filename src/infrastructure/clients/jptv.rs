use crate::error::{CrawlError, Result};
use crate::infrastructure::scrapers::listing::ListingPage;
use reqwest::{Client, Response, Url};
use tracing::debug;

/// Thin wrapper over the shared HTTP session for the two endpoints the crawl touches.
#[derive(Debug, Clone)]
pub struct JptvClient {
    client: Client,
    base_url: Url,
}

impl JptvClient {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn listing_url(&self, page: u64) -> Result<Url> {
        let mut url = self
            .base_url
            .join("subtitles")
            .map_err(|e| CrawlError::Configuration(format!("bad base url: {e}")))?;
        url.query_pairs_mut().append_pair("page", &page.to_string());
        Ok(url)
    }

    /// Fetches and parses one page of the subtitle listing.
    pub async fn fetch_page(&self, page: u64) -> Result<ListingPage> {
        let url = self.listing_url(page)?;
        let response = self.get(url).await?;
        let body = response.text().await?;
        debug!(page, bytes = body.len(), "Fetched listing page");

        Ok(ListingPage::parse(&body))
    }

    /// Downloads a subtitle payload as raw bytes.
    pub async fn download(&self, link: &str) -> Result<Vec<u8>> {
        let url = Url::parse(link)
            .map_err(|e| CrawlError::MalformedRow(format!("bad download link `{link}`: {e}")))?;
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn get(&self, url: Url) -> Result<Response> {
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response)
    }
}
