//! Pagination engine
//!
//! Runs one site's pagination strategy to completion against a single
//! browser tab, extracting course links after every listing page. The
//! engine never fails: navigation and extraction problems are logged,
//! reported through the progress trait, and the crawl carries on with
//! whatever pages remain.

pub mod page_count;
pub mod progress;
pub mod state;
mod strategies;

use log::{info, warn};
use std::time::Duration;

use crate::config::{PaginationTimings, ScrapeConfig};
use crate::driver::PageDriver;
use crate::link_extractor::extract_links;
use crate::site_registry::{PaginationStrategy, SiteConfig};
use crate::utils::{CONSENT_WAIT_TIMEOUT_SECS, base_url};

pub use page_count::{parse_page_total, read_page_total};
pub use progress::{NoOpProgress, ProgressReporter};
pub use state::{CrawlOutcome, PaginationState};

/// Strategy runner for one site
pub struct PaginationEngine<'a> {
    site: &'a SiteConfig,
    timings: PaginationTimings,
    selector_wait: Duration,
    indicator_wait: Duration,
    consent_wait: Duration,
}

impl<'a> PaginationEngine<'a> {
    #[must_use]
    pub fn new(site: &'a SiteConfig, config: &ScrapeConfig) -> Self {
        Self {
            site,
            timings: *config.timings(),
            selector_wait: config.selector_wait_timeout(),
            indicator_wait: config.indicator_wait_timeout(),
            consent_wait: Duration::from_secs(CONSENT_WAIT_TIMEOUT_SECS),
        }
    }

    /// Crawl every listing page reachable from `start_url`
    pub async fn run<D, P>(&self, driver: &D, start_url: &str, progress: &P) -> CrawlOutcome
    where
        D: PageDriver,
        P: ProgressReporter + ?Sized,
    {
        let strategy = self.site.pagination();
        let base = base_url(start_url).unwrap_or_else(|_| start_url.to_string());
        let mut state = PaginationState::new();

        info!(
            "Crawling {} with '{}' pagination from {start_url}",
            self.site.domain(),
            strategy.tag()
        );
        progress.report_crawl_started(strategy.tag(), start_url);

        let mut crawl = Crawl {
            engine: self,
            driver,
            progress,
            base: &base,
            state: &mut state,
        };

        match strategy {
            PaginationStrategy::SinglePage => crawl.single_page(start_url).await,
            PaginationStrategy::Accordion { toggle_selector } => {
                crawl.accordion(start_url, toggle_selector).await;
            }
            PaginationStrategy::PageNumbers {
                indicator_selector,
                param,
                extract_pattern,
                zero_based,
            } => {
                crawl
                    .page_numbers(start_url, indicator_selector, param, extract_pattern, *zero_based)
                    .await;
            }
            PaginationStrategy::UrlParams { param, mode } => {
                crawl.url_params(start_url, param, *mode).await;
            }
            PaginationStrategy::NextButton { next_selector } => {
                crawl.next_button(start_url, next_selector).await;
            }
        }

        info!(
            "Finished {}: {} page(s), {} unique course link(s)",
            self.site.domain(),
            state.page_count(),
            state.link_count()
        );
        progress.report_completed(state.page_count(), state.link_count());
        state.into_outcome()
    }
}

/// Borrowed context of one running crawl
struct Crawl<'e, 'a, D: PageDriver, P: ProgressReporter + ?Sized> {
    engine: &'e PaginationEngine<'a>,
    driver: &'e D,
    progress: &'e P,
    /// Start URL without query; resolves relative course links
    base: &'e str,
    state: &'e mut PaginationState,
}

impl<D: PageDriver, P: ProgressReporter + ?Sized> Crawl<'_, '_, D, P> {
    /// Navigate to a listing page; a failure is logged and reported
    async fn load(&mut self, url: &str, page_number: usize) -> bool {
        self.progress.report_page_started(page_number, url);
        match self.driver.navigate(url).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to load page {page_number} ({url}): {e:#}");
                self.progress.report_page_failed(url, &format!("{e:#}"));
                false
            }
        }
    }

    /// Extract from the page currently loaded; returns the links it yielded
    async fn harvest(&mut self, url: &str, page_number: usize) -> usize {
        if let Some(hook) = self.engine.site.before_extract() {
            self.run_hook(hook).await;
        }

        let links = extract_links(self.driver, self.engine.site, self.base, self.engine.selector_wait).await;
        let found = links.len();
        self.state.record_visit(url);
        let added = self.state.add_links(links);

        info!(
            "Page {page_number}: {found} course link(s), {added} new, {} total",
            self.state.link_count()
        );
        self.progress
            .report_page_extracted(page_number, url, found, self.state.link_count());
        found
    }
}
