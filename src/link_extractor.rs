//! Course link extraction from the currently loaded listing page
//!
//! Extraction is best-effort at every level: a wait selector that never
//! appears is ignored, a failing element is skipped, and a page whose
//! elements cannot be queried yields no links.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

use crate::driver::PageDriver;
use crate::site_registry::{LinkRule, SiteConfig};
use crate::utils::{join_url, origin};

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("Invalid slug character regex"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("Invalid hyphen regex"));

/// Minimum accepted slug length
const MIN_SLUG_LEN: usize = 3;

/// URL-safe slug of a course title, `None` when shorter than three chars
#[must_use]
pub fn slugify(title: &str) -> Option<String> {
    let lowered = title.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    let slug = collapsed.trim_matches('-');

    (slug.len() >= MIN_SLUG_LEN).then(|| slug.to_string())
}

/// Collect course URLs from the page currently loaded in `driver`.
///
/// `base_url` resolves relative links and supplies the origin for
/// synthesized URLs.
pub async fn extract_links<D: PageDriver>(
    driver: &D,
    site: &SiteConfig,
    base_url: &str,
    wait_timeout: Duration,
) -> Vec<String> {
    if let Err(e) = driver.wait_for_selector(site.wait_selector(), wait_timeout).await {
        debug!("Wait selector '{}' not found, extracting anyway: {e:#}", site.wait_selector());
    }

    let elements = match driver.query_all(site.course_selector()).await {
        Ok(elements) => elements,
        Err(e) => {
            warn!("Failed to query course links on {base_url}: {e:#}");
            return Vec::new();
        }
    };

    let mut links = Vec::with_capacity(elements.len());
    for element in &elements {
        match link_from_element(driver, element, site, base_url).await {
            Ok(Some(url)) => links.push(url),
            Ok(None) => {}
            Err(e) => debug!("Skipping course element on {base_url}: {e:#}"),
        }
    }

    debug!("Extracted {} course link(s) from {base_url}", links.len());
    links
}

async fn link_from_element<D: PageDriver>(
    driver: &D,
    element: &D::Element,
    site: &SiteConfig,
    base_url: &str,
) -> anyhow::Result<Option<String>> {
    match site.link_rule() {
        LinkRule::SynthesizeFromTitle { path_prefix } => {
            let title = driver.inner_text(element).await?;
            let Some(slug) = slugify(&title) else {
                return Ok(None);
            };
            let prefix = path_prefix.trim_end_matches('/');
            Ok(Some(format!("{}{prefix}/{slug}", origin(base_url)?)))
        }
        LinkRule::LiveUrlAttribute { attribute } => {
            let value = driver.attribute(element, attribute).await?;
            Ok(value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .and_then(|v| join_url(base_url, &v)))
        }
        LinkRule::Standard => {
            let Some(href) = driver.attribute(element, "href").await? else {
                return Ok(None);
            };
            if href.is_empty() {
                return Ok(None);
            }
            Ok(match site.url_resolution() {
                Some(resolver) => resolver.resolve(&href, base_url),
                None => join_url(base_url, &href),
            })
        }
    }
}
