//! Shared configuration constants for coursescrape
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Hard ceiling on listing pages visited by any pagination strategy.
///
/// Guarantees termination even when a site's "next" affordance never
/// reports itself as exhausted.
pub const MAX_PAGES: usize = 100;

/// Default timeout for `page.goto()` navigations (seconds)
pub const PAGE_LOAD_TIMEOUT_SECS: u64 = 60;

/// Default bound on waiting for a site's wait selector (seconds)
pub const SELECTOR_WAIT_TIMEOUT_SECS: u64 = 20;

/// Default bound on waiting for a page-count indicator (seconds)
pub const INDICATOR_WAIT_TIMEOUT_SECS: u64 = 30;

/// Bound on waiting for a consent banner's accept button (seconds)
pub const CONSENT_WAIT_TIMEOUT_SECS: u64 = 5;

/// Root directory for discovered-link CSV files
pub const DEFAULT_OUTPUT_DIR: &str = "output_links_files";

/// Default JSON output for extracted course records
pub const DEFAULT_COURSES_FILE: &str = "courses_full.json";

/// Value written to the `discovered_via` column
pub const DISCOVERED_VIA: &str = "unified-extractor";

/// Default `university_id` column value
pub const DEFAULT_UNIVERSITY_ID: u32 = 1;

/// Hard bound on a single extraction API call (seconds)
pub const EXTRACTION_TIMEOUT_SECS: u64 = 60;

/// Delay between extraction API calls (seconds)
pub const EXTRACTION_REQUEST_DELAY_SECS: u64 = 3;

/// Interval between extraction job status polls (seconds)
pub const EXTRACTION_POLL_INTERVAL_SECS: u64 = 2;

/// Firecrawl API base URL
pub const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev";

/// Chrome user agent string presented by the crawl browser
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
