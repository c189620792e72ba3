//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use std::path::PathBuf;

use super::builder::ScrapeConfigBuilder;
use super::types::PaginationTimings;

impl<State> ScrapeConfigBuilder<State> {
    /// Root directory for CSV output (default: `output_links_files`)
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set browser headless mode (visible vs invisible browser window)
    ///
    /// **Headless mode is enforced in release builds.** Headed mode is only
    /// honored in debug builds, where watching the pagination clicks is
    /// useful while writing a new site entry.
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.page_load_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn selector_wait_timeout_secs(mut self, secs: u64) -> Self {
        self.selector_wait_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn indicator_wait_timeout_secs(mut self, secs: u64) -> Self {
        self.indicator_wait_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn university_id(mut self, id: u32) -> Self {
        self.university_id = id;
        self
    }

    /// Also write the keyword-filtered CSV alongside the full one
    #[must_use]
    pub fn apply_filters(mut self, apply: bool) -> Self {
        self.apply_filters = apply;
        self
    }

    /// Use a dedicated Chrome profile directory for this run
    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.chrome_data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn timings(mut self, timings: PaginationTimings) -> Self {
        self.timings = timings;
        self
    }
}
