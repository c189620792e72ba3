//! Progress reporting abstraction for pagination runs
//!
//! Defines the `ProgressReporter` trait for per-page lifecycle events and
//! a no-op implementation for callers that only want the final outcome.

/// Trait for reporting pagination progress at key lifecycle events
///
/// Implementations can forward updates to channels, a terminal, a UI, etc.
/// The engine calls these synchronously between browser operations, so
/// implementations should not block.
pub trait ProgressReporter: Send + Sync {
    /// A crawl has started with the named strategy
    fn report_crawl_started(&self, strategy: &str, start_url: &str);

    /// Navigation to listing page `page_number` (1-based) is starting
    fn report_page_started(&self, page_number: usize, url: &str);

    /// Links were extracted from a listing page
    ///
    /// `found` is what the page yielded, `total` the unique count so far.
    fn report_page_extracted(&self, page_number: usize, url: &str, found: usize, total: usize);

    /// A listing page failed and was skipped
    fn report_page_failed(&self, url: &str, error: &str);

    /// The strategy ran to completion
    fn report_completed(&self, pages_visited: usize, total_links: usize);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_crawl_started(&self, _strategy: &str, _start_url: &str) {}

    #[inline(always)]
    fn report_page_started(&self, _page_number: usize, _url: &str) {}

    #[inline(always)]
    fn report_page_extracted(&self, _page_number: usize, _url: &str, _found: usize, _total: usize) {
    }

    #[inline(always)]
    fn report_page_failed(&self, _url: &str, _error: &str) {}

    #[inline(always)]
    fn report_completed(&self, _pages_visited: usize, _total_links: usize) {}
}
