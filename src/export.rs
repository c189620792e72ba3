//! Deduplication, keyword filtering and CSV persistence of course links

use chrono::Local;
use indexmap::IndexSet;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ScrapeResult;
use crate::site_registry::MatchMode;
use crate::utils::DISCOVERED_VIA;

/// Column headers of a course-link CSV; the index column is unnamed
pub const CSV_HEADERS: [&str; 10] = [
    "",
    "url",
    "university_id",
    "university_name",
    "discovered_via",
    "link_group_type",
    "confidence_score",
    "status",
    "extracted_at",
    "error_message",
];

/// Initial status of every discovered link
pub const PENDING_STATUS: &str = "pending";

/// One row of a course-link CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLinkRecord {
    #[serde(rename = "")]
    pub index: usize,
    pub url: String,
    pub university_id: u32,
    pub university_name: String,
    pub discovered_via: String,
    pub link_group_type: String,
    pub confidence_score: String,
    pub status: String,
    pub extracted_at: String,
    pub error_message: String,
}

/// Remove repeats, keeping the first occurrence of each string
///
/// Matching is exact: no URL normalization is applied, so `/x` and `/x/`
/// are distinct.
#[must_use]
pub fn dedupe<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(Into::into)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Keep links whose path matches any keyword
///
/// `Contains` tests for a substring of the lower-cased path; `Segment`
/// compares the keyword (stripped of `/`) with each path segment. An empty
/// keyword list keeps nothing.
#[must_use]
pub fn filter_links(links: &[String], keywords: &[String], mode: MatchMode) -> Vec<String> {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return Vec::new();
    }

    links
        .iter()
        .filter(|link| {
            let path = Url::parse(link)
                .map(|u| u.path().to_lowercase())
                .unwrap_or_else(|_| link.to_lowercase());
            keywords.iter().any(|keyword| match mode {
                MatchMode::Contains => path.contains(keyword.as_str()),
                MatchMode::Segment => {
                    let wanted = keyword.trim_matches('/');
                    path.split('/').filter(|s| !s.is_empty()).any(|s| s == wanted)
                }
            })
        })
        .cloned()
        .collect()
}

/// Writes one site's course-link CSVs under `{output_dir}/{folder_name}/`
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
    folder_name: String,
    university_name: String,
    university_id: u32,
}

impl CsvExporter {
    #[must_use]
    pub fn new(
        output_dir: impl Into<PathBuf>,
        folder_name: impl Into<String>,
        university_name: impl Into<String>,
        university_id: u32,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            folder_name: folder_name.into(),
            university_name: university_name.into(),
            university_id,
        }
    }

    #[must_use]
    pub fn site_dir(&self) -> PathBuf {
        self.output_dir.join(&self.folder_name)
    }

    /// `{folder}_courses.csv`
    pub fn write_courses(&self, urls: &[String]) -> ScrapeResult<PathBuf> {
        self.write(&format!("{}_courses.csv", self.folder_name), urls)
    }

    /// `{folder}_filtered_courses.csv`
    pub fn write_filtered(&self, urls: &[String]) -> ScrapeResult<PathBuf> {
        self.write(&format!("{}_filtered_courses.csv", self.folder_name), urls)
    }

    /// Rows for `urls`, sharing one local timestamp
    #[must_use]
    pub fn records(&self, urls: &[String]) -> Vec<CourseLinkRecord> {
        let extracted_at = Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        urls.iter()
            .enumerate()
            .map(|(index, url)| CourseLinkRecord {
                index,
                url: url.clone(),
                university_id: self.university_id,
                university_name: self.university_name.clone(),
                discovered_via: DISCOVERED_VIA.to_string(),
                link_group_type: String::new(),
                confidence_score: String::new(),
                status: PENDING_STATUS.to_string(),
                extracted_at: extracted_at.clone(),
                error_message: String::new(),
            })
            .collect()
    }

    /// Write `urls` to `file_name` in the site directory
    ///
    /// The header row is written even when there are no URLs.
    pub fn write(&self, file_name: &str, urls: &[String]) -> ScrapeResult<PathBuf> {
        let dir = self.site_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(file_name);

        write_records(&path, &self.records(urls))?;
        info!("Saved {} URL(s) to {}", urls.len(), path.display());
        Ok(path)
    }
}

fn write_records(path: &Path, records: &[CourseLinkRecord]) -> ScrapeResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a course-link CSV written by [`CsvExporter`]
pub fn read_records(path: &Path) -> ScrapeResult<Vec<CourseLinkRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}
