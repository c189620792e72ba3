//! URL manipulation utilities.
//!
//! This module provides the small set of URL operations the link extractor
//! and the pagination engine share: base/origin derivation, relative joins,
//! and query-parameter rewriting.

use anyhow::{Context, Result};
use url::Url;

/// Strip the query and fragment from a URL, keeping scheme, host and path.
pub fn base_url(url: &str) -> Result<String> {
    let mut parsed = Url::parse(url).with_context(|| format!("Failed to parse URL: {url}"))?;
    parsed.set_query(None);
    parsed.set_fragment(None);
    Ok(parsed.to_string())
}

/// `scheme://host[:port]` of a URL.
pub fn origin(url: &str) -> Result<String> {
    let parsed = Url::parse(url).with_context(|| format!("Failed to parse URL: {url}"))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid URL: no host: {url}"))?;
    Ok(match parsed.port() {
        Some(port) => format!("{}://{host}:{port}", parsed.scheme()),
        None => format!("{}://{host}", parsed.scheme()),
    })
}

/// Resolve `href` against `base` the way a browser would.
///
/// Returns `None` when the base is unparseable or the join fails.
#[must_use]
pub fn join_url(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(String::from)
}

/// Set query parameter `name` to `value`, keeping every other parameter.
///
/// An existing parameter is rewritten in place (later duplicates of the
/// same key are dropped); a missing one is appended.
pub fn with_query_param(url: &str, name: &str, value: &str) -> Result<String> {
    let mut parsed = Url::parse(url).with_context(|| format!("Failed to parse URL: {url}"))?;

    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, existing) in parsed.query_pairs().into_owned() {
        if key == name {
            if !replaced {
                pairs.push((key, value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((key, existing));
        }
    }
    if !replaced {
        pairs.push((name.to_string(), value.to_string()));
    }

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(parsed.to_string())
}

/// Check if a URL is a crawlable http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
