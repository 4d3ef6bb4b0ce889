use super::ListingSelectors;
use crate::domain::{ListingEntry, Uploader};
use crate::error::{CrawlError, Result};
use scraper::{ElementRef, Html};
use tracing::debug;

pub const COLUMN_COUNT: usize = 9;

/// Fixed column positions of a listing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Category = 0,
    Title,
    Language,
    DownloadLink,
    Extension,
    Size,
    Downloads,
    Uploaded,
    Uploader,
}

/// A parsed listing page.
pub struct ListingPage {
    document: Html,
}

impl ListingPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn has_table(&self, selectors: &ListingSelectors) -> bool {
        self.document.select(&selectors.table).next().is_some()
    }

    /// Every body row of the listing table, in page order.
    pub fn rows<'a>(&'a self, selectors: &'a ListingSelectors) -> Result<Vec<ListingRow<'a>>> {
        self.document
            .select(&selectors.rows)
            .enumerate()
            .map(|(idx, row)| {
                ListingRow::new(row, selectors).map_err(|e| match e {
                    CrawlError::MalformedPage(msg) => {
                        CrawlError::MalformedPage(format!("row {}: {msg}", idx + 1))
                    }
                    other => other,
                })
            })
            .collect()
    }
}

pub struct ListingRow<'a> {
    cells: [ElementRef<'a>; COLUMN_COUNT],
    selectors: &'a ListingSelectors,
}

impl<'a> ListingRow<'a> {
    pub fn new(row: ElementRef<'a>, selectors: &'a ListingSelectors) -> Result<Self> {
        let cells: Vec<ElementRef<'a>> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "td")
            .take(COLUMN_COUNT)
            .collect();

        let found = cells.len();
        let cells = cells.try_into().map_err(|_| {
            CrawlError::MalformedPage(format!(
                "expected {COLUMN_COUNT} columns in listing row, found {found}"
            ))
        })?;

        Ok(Self { cells, selectors })
    }

    fn cell(&self, column: Column) -> ElementRef<'a> {
        self.cells[column as usize]
    }

    fn raw_text(&self, column: Column) -> String {
        self.cell(column).text().collect()
    }

    fn child_anchor(&self, column: Column) -> Result<ElementRef<'a>> {
        self.cell(column)
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "a")
            .ok_or_else(|| CrawlError::MalformedPage(format!("no anchor in {column:?} column")))
    }

    pub fn category(&self) -> Result<String> {
        let icon = self
            .cell(Column::Category)
            .select(&self.selectors.category_icon)
            .next()
            .ok_or_else(|| CrawlError::MalformedPage("no category icon".to_string()))?;

        tooltip(icon)
            .map(str::to_string)
            .ok_or_else(|| CrawlError::MalformedPage("category icon has no tooltip".to_string()))
    }

    pub fn title(&self) -> Result<String> {
        let anchor = self.child_anchor(Column::Title)?;
        Ok(anchor.text().collect::<String>().trim().to_string())
    }

    pub fn language(&self) -> String {
        self.raw_text(Column::Language).trim().to_string()
    }

    pub fn download_link(&self) -> Result<String> {
        self.child_anchor(Column::DownloadLink)?
            .value()
            .attr("href")
            .map(str::to_string)
            .ok_or_else(|| CrawlError::MalformedPage("download anchor has no href".to_string()))
    }

    pub fn extension(&self) -> String {
        self.raw_text(Column::Extension)
    }

    pub fn size(&self) -> String {
        self.raw_text(Column::Size)
    }

    pub fn downloads(&self) -> String {
        self.raw_text(Column::Downloads)
    }

    pub fn uploaded(&self) -> String {
        self.raw_text(Column::Uploaded)
    }

    pub fn uploader(&self) -> Uploader {
        let cell = self.cell(Column::Uploader);

        let profile_link = cell
            .select(&self.selectors.anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);

        let username = cell
            .select(&self.selectors.uploader_name)
            .next()
            .map(|span| span.text().collect::<String>().trim().to_string())
            .unwrap_or_else(|| crate::domain::ANONYMOUS.to_string());

        let group = cell
            .select(&self.selectors.uploader_group)
            .next()
            .and_then(tooltip)
            .map(str::to_string);

        Uploader {
            profile_link,
            group,
            username,
        }
    }

    pub fn extract(&self) -> Result<ListingEntry> {
        let entry = ListingEntry {
            category: self.category()?,
            title: self.title()?,
            language: self.language(),
            download_link: self.download_link()?,
            extension: self.extension(),
            size: self.size(),
            downloads: self.downloads(),
            date_uploaded: self.uploaded(),
            uploader: self.uploader(),
        };

        debug!(
            category = %entry.category,
            title = %entry.title,
            language = %entry.language,
            link = %entry.download_link,
            extension = %entry.extension,
            size = %entry.size,
            downloads = %entry.downloads,
            uploaded = %entry.date_uploaded,
            uploader = ?entry.uploader,
            "Extracted listing row"
        );

        Ok(entry)
    }
}

// Bootstrap tooltips keep their text here once initialised.
fn tooltip(el: ElementRef<'_>) -> Option<&str> {
    el.value().attr("data-original-title")
}
