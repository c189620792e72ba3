//! Core configuration types for course-link discovery
//!
//! This module contains the main `ScrapeConfig` struct and its associated
//! types that define the parameters of a single discovery run and of the
//! detail-extraction pass.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::{
    DEFAULT_OUTPUT_DIR, DEFAULT_UNIVERSITY_ID, EXTRACTION_POLL_INTERVAL_SECS,
    EXTRACTION_REQUEST_DELAY_SECS, EXTRACTION_TIMEOUT_SECS, FIRECRAWL_API_URL,
    INDICATOR_WAIT_TIMEOUT_SECS, PAGE_LOAD_TIMEOUT_SECS, SELECTOR_WAIT_TIMEOUT_SECS,
};

/// Main configuration struct for a discovery run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Listing page the crawl starts from.
    ///
    /// **INVARIANT:** Always carries an http(s) scheme (normalized in builder).
    pub(crate) start_url: String,

    /// Root directory for CSV output; one sub-directory per site folder.
    pub(crate) output_dir: PathBuf,

    pub(crate) headless: bool,

    /// Timeout in seconds for `page.goto()` operations
    ///
    /// Default: 60 seconds
    pub(crate) page_load_timeout_secs: u64,

    /// Bound in seconds on waiting for a site's wait selector before
    /// extracting. A timeout is swallowed and extraction proceeds.
    ///
    /// Default: 20 seconds
    pub(crate) selector_wait_timeout_secs: u64,

    /// Bound in seconds on waiting for a page-count indicator.
    ///
    /// Default: 30 seconds
    pub(crate) indicator_wait_timeout_secs: u64,

    /// Value written to the `university_id` column
    pub(crate) university_id: u32,

    /// Also write `{folder}_filtered_courses.csv` using the site's keywords
    pub(crate) apply_filters: bool,

    /// Chrome user data directory path for browser profile isolation
    #[serde(skip)]
    pub(crate) chrome_data_dir: Option<PathBuf>,

    pub(crate) timings: PaginationTimings,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            start_url: String::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            headless: true,
            page_load_timeout_secs: PAGE_LOAD_TIMEOUT_SECS,
            selector_wait_timeout_secs: SELECTOR_WAIT_TIMEOUT_SECS,
            indicator_wait_timeout_secs: INDICATOR_WAIT_TIMEOUT_SECS,
            university_id: DEFAULT_UNIVERSITY_ID,
            apply_filters: false,
            chrome_data_dir: None,
            timings: PaginationTimings::default(),
        }
    }
}

/// Politeness pauses between pagination steps.
///
/// None of these are correctness-critical; they only space out requests
/// and give client-side rendering time to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationTimings {
    /// After each accordion toggle click
    pub accordion_settle: Duration,
    /// After clicking an href-less "next" control
    pub click_settle: Duration,
    /// Between generated page-number pages
    pub page_numbers_delay: Duration,
    /// Between generated url-parameter pages
    pub url_params_delay: Duration,
    /// Between next-button pages
    pub next_button_delay: Duration,
    /// After dismissing a consent banner
    pub consent_settle: Duration,
}

impl Default for PaginationTimings {
    fn default() -> Self {
        Self {
            accordion_settle: Duration::from_millis(1000),
            click_settle: Duration::from_millis(1000),
            page_numbers_delay: Duration::from_millis(500),
            url_params_delay: Duration::from_millis(1000),
            next_button_delay: Duration::from_millis(800),
            consent_settle: Duration::from_millis(1000),
        }
    }
}

/// Options for the detail-extraction pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOptions {
    /// Hard bound on a single extraction call
    pub timeout: Duration,
    /// Pause after each successful call, throttling the third-party API
    pub request_delay: Duration,
    /// Interval between job status polls
    pub poll_interval: Duration,
    /// Base URL of the extraction API
    pub api_url: String,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(EXTRACTION_TIMEOUT_SECS),
            request_delay: Duration::from_secs(EXTRACTION_REQUEST_DELAY_SECS),
            poll_interval: Duration::from_secs(EXTRACTION_POLL_INTERVAL_SECS),
            api_url: FIRECRAWL_API_URL.to_string(),
        }
    }
}
