use crate::error::{CrawlError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Username recorded when a listing row has no uploader profile.
pub const ANONYMOUS: &str = "ANONYMOUS";

/// Longest title prefix (in characters) that goes into a file name.
pub const MAX_TITLE_CHARS: usize = 60;

// Only end, `/`, `?` or `#` may follow `/download`; `/downloads` and the like are rejected.
static DOWNLOAD_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^/\s]+/subtitles/(?P<id>[0-9]+)/download(?:[/?#]|$)").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uploader {
    pub profile_link: Option<String>,
    pub group: Option<String>,
    pub username: String,
}

impl Uploader {
    pub fn anonymous() -> Self {
        Self {
            profile_link: None,
            group: None,
            username: ANONYMOUS.to_string(),
        }
    }
}

/// Fields read off one listing row, before the id and capture time are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub category: String,
    pub title: String,
    pub language: String,
    pub download_link: String,
    pub extension: String,
    pub size: String,
    pub downloads: String,
    pub date_uploaded: String,
    pub uploader: Uploader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleRecord {
    pub subtitle_id: u64,
    pub subtitle_category: String,
    pub torrent_title: String,
    pub language: String,
    pub subtitle_download_link: String,
    pub extension: String,
    pub size: String,
    pub downloads: String,
    pub date_uploaded: String,
    pub current_time: String,
    pub uploader: Uploader,
}

impl SubtitleRecord {
    /// File name shared by the payload and (with `.json` appended) its sidecar.
    ///
    /// The extension is used exactly as the site displays it.
    pub fn file_name(&self) -> String {
        format!(
            "subtitle_{}-{}-{}{}",
            self.subtitle_id,
            safe_title(&self.torrent_title),
            self.language,
            self.extension
        )
    }
}

/// Replaces path separators and cuts the title down to [`MAX_TITLE_CHARS`].
pub fn safe_title(title: &str) -> String {
    title
        .replace('/', "_")
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect()
}

pub fn parse_subtitle_id(link: &str) -> Result<u64> {
    let caps = DOWNLOAD_LINK
        .captures(link)
        .ok_or_else(|| CrawlError::MalformedRow(format!("unexpected download link `{link}`")))?;

    caps["id"]
        .parse::<u64>()
        .map_err(|e| CrawlError::MalformedRow(format!("bad subtitle id in `{link}`: {e}")))
}

/// Turns extracted listing fields into records, stamping each with its capture time.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    last_capture: Option<DateTime<Utc>>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&mut self, entry: ListingEntry) -> Result<SubtitleRecord> {
        let subtitle_id = parse_subtitle_id(&entry.download_link)?;
        let captured = self.capture(Utc::now());

        Ok(SubtitleRecord {
            subtitle_id,
            subtitle_category: entry.category,
            torrent_title: entry.title,
            language: entry.language,
            subtitle_download_link: entry.download_link,
            extension: entry.extension,
            size: entry.size,
            downloads: entry.downloads,
            date_uploaded: entry.date_uploaded,
            current_time: captured.to_rfc3339_opts(SecondsFormat::Micros, false),
            uploader: entry.uploader,
        })
    }

    // Never hand out a time earlier than the previous one, even if the clock steps back.
    fn capture(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let captured = match self.last_capture {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_capture = Some(captured);
        captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(link: &str) -> ListingEntry {
        ListingEntry {
            category: "Movie".to_string(),
            title: "Some.Movie.2021.1080p".to_string(),
            language: "English".to_string(),
            download_link: link.to_string(),
            extension: ".srt".to_string(),
            size: "52.1 KiB".to_string(),
            downloads: "12".to_string(),
            date_uploaded: "2 days ago".to_string(),
            uploader: Uploader::anonymous(),
        }
    }

    #[test]
    fn parses_id_from_download_link() {
        assert_eq!(
            parse_subtitle_id("https://jptv.club/subtitles/4312/download").unwrap(),
            4312
        );
        assert_eq!(
            parse_subtitle_id("http://127.0.0.1:8080/subtitles/7/download?x=1").unwrap(),
            7
        );
    }

    #[test]
    fn rejects_links_outside_the_pattern() {
        for link in [
            "https://jptv.club/subtitles/abc/download",
            "https://jptv.club/subtitles/12",
            "/subtitles/12/download",
            "https://jptv.club/torrents/12/download",
            "https://jptv.club/subtitles/12/downloads",
            "https://jptv.club/subtitles/99999999999999999999999/download",
        ] {
            let err = parse_subtitle_id(link).unwrap_err();
            assert!(matches!(err, CrawlError::MalformedRow(_)), "{link}");
        }
    }

    #[test]
    fn build_copies_fields_and_attaches_id() {
        let mut builder = RecordBuilder::new();
        let record = builder
            .build(entry("https://jptv.club/subtitles/55/download"))
            .unwrap();

        assert_eq!(record.subtitle_id, 55);
        assert_eq!(record.subtitle_category, "Movie");
        assert_eq!(record.torrent_title, "Some.Movie.2021.1080p");
        assert_eq!(record.extension, ".srt");
        assert_eq!(record.uploader.username, ANONYMOUS);
        assert!(DateTime::parse_from_rfc3339(&record.current_time).is_ok());
        assert!(record.current_time.ends_with("+00:00"));
    }

    #[test]
    fn build_fails_on_bad_link() {
        let mut builder = RecordBuilder::new();
        let err = builder
            .build(entry("https://jptv.club/subtitles/x/download"))
            .unwrap_err();
        assert!(matches!(err, CrawlError::MalformedRow(_)));
    }

    #[test]
    fn capture_time_never_goes_backwards() {
        let mut builder = RecordBuilder::new();
        let now = Utc::now();
        let first = builder.capture(now);
        let second = builder.capture(now - Duration::seconds(5));
        let third = builder.capture(now + Duration::seconds(1));

        assert_eq!(first, now);
        assert_eq!(second, now);
        assert_eq!(third, now + Duration::seconds(1));
    }

    #[test]
    fn sequential_builds_are_non_decreasing() {
        let mut builder = RecordBuilder::new();
        let times: Vec<DateTime<Utc>> = (0..20)
            .map(|i| {
                let link = format!("https://jptv.club/subtitles/{i}/download");
                let record = builder.build(entry(&link)).unwrap();
                DateTime::parse_from_rfc3339(&record.current_time)
                    .unwrap()
                    .with_timezone(&Utc)
            })
            .collect();

        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn file_name_replaces_slashes_and_truncates_title() {
        let mut record = RecordBuilder::new()
            .build(entry("https://jptv.club/subtitles/9/download"))
            .unwrap();
        record.torrent_title = format!("AC/DC {}", "x".repeat(100));

        let safe = safe_title(&record.torrent_title);
        assert_eq!(safe.chars().count(), MAX_TITLE_CHARS);
        assert!(!safe.contains('/'));
        assert!(safe.starts_with("AC_DC "));

        assert_eq!(record.file_name(), format!("subtitle_9-{safe}-English.srt"));
    }

    #[test]
    fn safe_title_counts_characters_not_bytes() {
        let title = "字".repeat(70);
        assert_eq!(safe_title(&title), "字".repeat(60));
        assert_eq!(safe_title("short"), "short");
    }

    #[test]
    fn extension_is_used_verbatim() {
        let mut record = RecordBuilder::new()
            .build(entry("https://jptv.club/subtitles/3/download"))
            .unwrap();
        record.extension = "..ass".to_string();
        assert!(record.file_name().ends_with("-English..ass"));
    }

    #[test]
    fn sidecar_json_round_trips() {
        let mut record = RecordBuilder::new()
            .build(entry("https://jptv.club/subtitles/12/download"))
            .unwrap();
        record.uploader = Uploader {
            profile_link: Some("https://jptv.club/users/someone".to_string()),
            group: None,
            username: "someone".to_string(),
        };

        let json = serde_json::to_string_pretty(&record).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["subtitle_id"], 12);
        assert!(value["uploader"]["group"].is_null());

        let parsed: SubtitleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
