//! Getter methods for `ScrapeConfig`
//!
//! This module provides all the accessor methods for retrieving configuration
//! values from a `ScrapeConfig` instance.

use std::path::PathBuf;
use std::time::Duration;

use super::types::{PaginationTimings, ScrapeConfig};

impl ScrapeConfig {
    #[must_use]
    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    #[must_use]
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn page_load_timeout_secs(&self) -> u64 {
        self.page_load_timeout_secs
    }

    #[must_use]
    pub fn selector_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.selector_wait_timeout_secs)
    }

    #[must_use]
    pub fn indicator_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.indicator_wait_timeout_secs)
    }

    #[must_use]
    pub fn university_id(&self) -> u32 {
        self.university_id
    }

    #[must_use]
    pub fn apply_filters(&self) -> bool {
        self.apply_filters
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }

    #[must_use]
    pub fn timings(&self) -> &PaginationTimings {
        &self.timings
    }
}
