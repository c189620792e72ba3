//! Reading the total page count of a numbered listing

use log::{debug, warn};
use regex::Regex;
use std::time::Duration;

use crate::driver::PageDriver;
use crate::utils::MAX_PAGES;

/// Options of a "results per page / jump to page" select, used when the
/// indicator text does not parse
pub const PAGE_SELECT_OPTIONS_SELECTOR: &str = "select[aria-label*='page'] option";

/// Parse a page total out of indicator text such as `"Page 1 of 22"`.
///
/// Non-breaking spaces are normalized and the literal `Page` removed before
/// matching, so the pattern only has to find the number after `of`. The
/// first capture group is used when present, else the whole match.
#[must_use]
pub fn parse_page_total(text: &str, pattern: &Regex) -> Option<usize> {
    let cleaned = text.replace('\u{a0}', " ").replace("Page", "");
    let captures = pattern.captures(&cleaned)?;
    let number = captures.get(1).or_else(|| captures.get(0))?;
    number.as_str().trim().parse::<usize>().ok().filter(|n| *n > 0)
}

/// Determine how many pages a numbered listing has.
///
/// Tries the indicator text, then the page-select option count, then
/// settles on 1. The result never exceeds the page ceiling.
pub async fn read_page_total<D: PageDriver>(
    driver: &D,
    indicator_selector: &str,
    pattern: &Regex,
    indicator_wait: Duration,
) -> usize {
    if let Err(e) = driver.wait_for_selector(indicator_selector, indicator_wait).await {
        debug!("Page-count indicator '{indicator_selector}' not found: {e:#}");
    }

    let text = match driver.query_all(indicator_selector).await {
        Ok(elements) => match elements.first() {
            Some(indicator) => driver.inner_text(indicator).await.unwrap_or_default(),
            None => String::new(),
        },
        Err(e) => {
            debug!("Failed to query page-count indicator: {e:#}");
            String::new()
        }
    };

    let total = match parse_page_total(&text, pattern) {
        Some(total) => total,
        None => {
            let options = driver
                .query_all(PAGE_SELECT_OPTIONS_SELECTOR)
                .await
                .map(|o| o.len())
                .unwrap_or(0);
            if options > 0 {
                debug!("Page count taken from {options} select option(s)");
                options
            } else {
                debug!("No page count found in '{}', assuming 1", text.trim());
                1
            }
        }
    };

    if total > MAX_PAGES {
        warn!("Listing reports {total} pages; capping at {MAX_PAGES}");
        MAX_PAGES
    } else {
        total
    }
}
