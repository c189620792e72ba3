//! End-to-end course link discovery for one listing URL
//!
//! Looks the site up, owns a browser session for the duration of the
//! crawl, and persists the unique course URLs. The session is closed on
//! every path out of the crawl.

use log::{debug, info, warn};
use std::path::PathBuf;

use crate::config::ScrapeConfig;
use crate::driver::{BrowserSession, CleanupResult, PageDriver};
use crate::error::ScrapeResult;
use crate::export::{CsvExporter, dedupe, filter_links};
use crate::pagination::{NoOpProgress, PaginationEngine, ProgressReporter};
use crate::site_registry::SiteRegistry;

/// What a discovery run produced
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    /// Number of unique course URLs
    pub count: usize,
    /// Unique course URLs in discovery order
    pub urls: Vec<String>,
    /// `{output_dir}/{folder}/{folder}_courses.csv`
    pub output_path: PathBuf,
    /// Written only when keyword filtering is enabled
    pub filtered_path: Option<PathBuf>,
    pub university_name: String,
    pub pages_visited: Vec<String>,
}

/// Discover and persist every course URL reachable from the configured
/// start URL
///
/// Fails only when the site is not registered, the browser cannot be
/// started, or the output cannot be written.
pub async fn scrape_courses(
    config: &ScrapeConfig,
    registry: &SiteRegistry,
) -> ScrapeResult<ScrapeOutcome> {
    scrape_courses_with_progress(config, registry, &NoOpProgress).await
}

pub async fn scrape_courses_with_progress<P>(
    config: &ScrapeConfig,
    registry: &SiteRegistry,
    progress: &P,
) -> ScrapeResult<ScrapeOutcome>
where
    P: ProgressReporter + ?Sized,
{
    // Unknown sites fail before any browser is started
    registry.lookup(config.start_url())?;

    let session = BrowserSession::launch(config).await?;
    let result = match session.new_driver().await {
        Ok(driver) => scrape_with_driver(&driver, config, registry, progress).await,
        Err(e) => Err(e),
    };

    match session.close().await {
        CleanupResult::Success => debug!("Browser session cleaned up"),
        CleanupResult::PartialFailure(errors) => {
            warn!("Browser cleanup completed with failures: {errors:?}");
        }
    }

    result
}

/// Crawl with an already-open driver and persist the result
pub async fn scrape_with_driver<D, P>(
    driver: &D,
    config: &ScrapeConfig,
    registry: &SiteRegistry,
    progress: &P,
) -> ScrapeResult<ScrapeOutcome>
where
    D: PageDriver,
    P: ProgressReporter + ?Sized,
{
    let site = registry.lookup(config.start_url())?;
    let crawl = PaginationEngine::new(site, config)
        .run(driver, config.start_url(), progress)
        .await;

    let urls = dedupe(crawl.urls);
    let university_name = registry.display_name(config.start_url());
    let exporter = CsvExporter::new(
        config.output_dir(),
        site.folder_name(),
        &university_name,
        config.university_id(),
    );

    let output_path = exporter.write_courses(&urls)?;
    let filtered_path = if config.apply_filters() {
        let filtered = filter_links(&urls, site.filter_keywords(), site.match_mode());
        info!(
            "{} of {} URL(s) match the {} filter keyword(s)",
            filtered.len(),
            urls.len(),
            site.filter_keywords().len()
        );
        Some(exporter.write_filtered(&filtered)?)
    } else {
        None
    };

    info!("Found {} unique course URL(s) for {university_name}", urls.len());

    Ok(ScrapeOutcome {
        count: urls.len(),
        urls,
        output_path,
        filtered_path,
        university_name,
        pages_visited: crawl.pages_visited,
    })
}
