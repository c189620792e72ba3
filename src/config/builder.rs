//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! This module provides a fluent builder interface with compile-time validation
//! ensuring that the start URL is set before building a `ScrapeConfig`.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::path::PathBuf;
use url::Url;

use super::types::{PaginationTimings, ScrapeConfig};
use crate::utils::{
    DEFAULT_OUTPUT_DIR, DEFAULT_UNIVERSITY_ID, INDICATOR_WAIT_TIMEOUT_SECS,
    PAGE_LOAD_TIMEOUT_SECS, SELECTOR_WAIT_TIMEOUT_SECS,
};

// Type states for the builder
pub struct WithStartUrl;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) start_url: Option<String>,
    pub(crate) output_dir: PathBuf,
    pub(crate) headless: bool,
    pub(crate) page_load_timeout_secs: u64,
    pub(crate) selector_wait_timeout_secs: u64,
    pub(crate) indicator_wait_timeout_secs: u64,
    pub(crate) university_id: u32,
    pub(crate) apply_filters: bool,
    pub(crate) chrome_data_dir: Option<PathBuf>,
    pub(crate) timings: PaginationTimings,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            start_url: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            headless: true,
            page_load_timeout_secs: PAGE_LOAD_TIMEOUT_SECS,
            selector_wait_timeout_secs: SELECTOR_WAIT_TIMEOUT_SECS,
            indicator_wait_timeout_secs: INDICATOR_WAIT_TIMEOUT_SECS,
            university_id: DEFAULT_UNIVERSITY_ID,
            apply_filters: false,
            chrome_data_dir: None,
            timings: PaginationTimings::default(),
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn start_url(self, url: impl Into<String>) -> ScrapeConfigBuilder<WithStartUrl> {
        let url_string = url.into().trim().to_string();

        // Normalize URL: add https:// if no scheme is present
        let normalized_url =
            if url_string.starts_with("http://") || url_string.starts_with("https://") {
                url_string
            } else {
                format!("https://{url_string}")
            };

        ScrapeConfigBuilder {
            start_url: Some(normalized_url),
            output_dir: self.output_dir,
            headless: self.headless,
            page_load_timeout_secs: self.page_load_timeout_secs,
            selector_wait_timeout_secs: self.selector_wait_timeout_secs,
            indicator_wait_timeout_secs: self.indicator_wait_timeout_secs,
            university_id: self.university_id,
            apply_filters: self.apply_filters,
            chrome_data_dir: self.chrome_data_dir,
            timings: self.timings,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when all required fields are set
impl ScrapeConfigBuilder<WithStartUrl> {
    pub fn build(self) -> Result<ScrapeConfig> {
        let start_url = self
            .start_url
            .ok_or_else(|| anyhow!("start_url is required"))?;

        let parsed =
            Url::parse(&start_url).map_err(|e| anyhow!("Invalid start URL '{start_url}': {e}"))?;
        if parsed.host_str().is_none() {
            return Err(anyhow!("Invalid start URL '{start_url}': no host"));
        }

        // Enforce headless mode in release builds for production safety
        #[cfg(not(debug_assertions))]
        let headless = if !self.headless {
            tracing::warn!(
                "Forcing headless mode in release build. \
                Headed mode is only available in debug builds for development."
            );
            true
        } else {
            self.headless
        };

        #[cfg(debug_assertions)]
        let headless = self.headless;

        Ok(ScrapeConfig {
            start_url,
            output_dir: self.output_dir,
            headless,
            page_load_timeout_secs: self.page_load_timeout_secs,
            selector_wait_timeout_secs: self.selector_wait_timeout_secs,
            indicator_wait_timeout_secs: self.indicator_wait_timeout_secs,
            university_id: self.university_id,
            apply_filters: self.apply_filters,
            chrome_data_dir: self.chrome_data_dir,
            timings: self.timings,
        })
    }
}
