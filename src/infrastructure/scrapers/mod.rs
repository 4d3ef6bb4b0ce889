use crate::error::{CrawlError, Result};
use scraper::Selector;

pub(crate) mod listing;

/// Compiled selectors for the subtitle listing page.
pub struct ListingSelectors {
    pub table: Selector,
    pub rows: Selector,
    pub category_icon: Selector,
    pub anchor: Selector,
    pub uploader_name: Selector,
    pub uploader_group: Selector,
}

impl ListingSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            table: parse("table.table")?,
            rows: parse("table.table > tbody > tr")?,
            category_icon: parse("a > div > i")?,
            anchor: parse("a")?,
            uploader_name: parse("a > span")?,
            uploader_group: parse("a > span > i")?,
        })
    }
}

fn parse(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| CrawlError::Selector(format!("`{selector}`: {e}")))
}
