//! Per-crawl pagination state

use indexmap::IndexSet;

/// Mutable state of one crawl; created fresh per run and consumed into a
/// [`CrawlOutcome`]
///
/// The page currently loaded is tracked by the driver, not here.
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Only grows
    visited: IndexSet<String>,
    page_count: usize,
    course_urls: IndexSet<String>,
}

impl PaginationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a listing page as processed
    pub fn record_visit(&mut self, url: &str) {
        self.visited.insert(url.to_string());
        self.page_count += 1;
    }

    #[must_use]
    pub fn has_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Add links in discovery order; returns how many were new
    pub fn add_links(&mut self, links: Vec<String>) -> usize {
        links
            .into_iter()
            .filter(|link| self.course_urls.insert(link.clone()))
            .count()
    }

    #[must_use]
    pub fn link_count(&self) -> usize {
        self.course_urls.len()
    }

    #[must_use]
    pub fn into_outcome(self) -> CrawlOutcome {
        CrawlOutcome {
            urls: self.course_urls.into_iter().collect(),
            pages_visited: self.visited.into_iter().collect(),
        }
    }
}

/// Result of a pagination run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// Course URLs in first-discovery order, without duplicates
    pub urls: Vec<String>,
    /// Listing pages processed, in visit order
    pub pages_visited: Vec<String>,
}
