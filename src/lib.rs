pub mod browser_setup;
pub mod config;
pub mod course_extractor;
pub mod driver;
pub mod error;
pub mod export;
pub mod link_extractor;
pub mod pagination;
pub mod scraper;
pub mod site_registry;
pub mod utils;

pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::{ExtractionOptions, PaginationTimings, ScrapeConfig};
pub use course_extractor::{
    CourseRecord, ExtractionClient, ExtractionEvent, FirecrawlClient, extract_all_courses,
    spawn_extraction,
};
pub use driver::{BrowserSession, ChromiumDriver, PageDriver};
pub use error::{ExtractionError, ExtractionResult, ScrapeError, ScrapeResult};
pub use export::{CsvExporter, dedupe, filter_links};
pub use link_extractor::{extract_links, slugify};
pub use pagination::{CrawlOutcome, NoOpProgress, PaginationEngine, ProgressReporter};
pub use scraper::{ScrapeOutcome, scrape_courses, scrape_courses_with_progress, scrape_with_driver};
pub use site_registry::{SiteConfig, SiteRegistry, SiteSpec};
