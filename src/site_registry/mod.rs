//! Site registry
//!
//! Maps a listing URL to the immutable configuration of the institution
//! that serves it. The registry is pure data: adding an institution means
//! adding a `SiteSpec`, either to the built-in table or to a JSON sites
//! file merged at startup.

pub mod resolvers;
pub mod sites;
pub mod types;

use std::path::Path;

use log::{debug, error, info};
use url::Url;

use crate::error::{ScrapeError, ScrapeResult};

pub use resolvers::UrlResolver;
pub use sites::{builtin_display_name, builtin_specs};
pub use types::{
    LinkRule, MatchMode, PageHook, PaginationStrategy, SiteConfig, SiteSpec, UrlParamMode,
};

/// Ordered table of compiled site configurations
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: Vec<SiteConfig>,
}

impl SiteRegistry {
    /// Registry holding only the given specs
    pub fn from_specs(specs: impl IntoIterator<Item = SiteSpec>) -> ScrapeResult<Self> {
        let mut registry = Self::default();
        for spec in specs {
            registry.insert(spec.compile()?);
        }
        Ok(registry)
    }

    /// Registry of every built-in institution
    ///
    /// A built-in entry that fails to compile is logged and skipped.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for spec in builtin_specs() {
            let domain = spec.domain.clone();
            match spec.compile() {
                Ok(site) => registry.insert(site),
                Err(e) => error!("Skipping built-in site {domain}: {e}"),
            }
        }
        registry
    }

    /// Add or replace (by domain) a compiled site
    pub fn insert(&mut self, site: SiteConfig) {
        if let Some(existing) = self.sites.iter_mut().find(|s| s.domain == site.domain) {
            debug!("Replacing site configuration for {}", site.domain);
            *existing = site;
        } else {
            self.sites.push(site);
        }
    }

    /// Merge a JSON array of `SiteSpec` entries
    ///
    /// Entries whose domain is already registered replace the existing
    /// configuration. Returns the number of entries merged.
    pub fn merge_json(&mut self, json: &str) -> ScrapeResult<usize> {
        let specs: Vec<SiteSpec> = serde_json::from_str(json)?;
        let count = specs.len();
        for spec in specs {
            self.insert(spec.compile()?);
        }
        Ok(count)
    }

    /// Merge a JSON sites file, see [`Self::merge_json`]
    pub fn merge_file(&mut self, path: &Path) -> ScrapeResult<usize> {
        let json = std::fs::read_to_string(path)?;
        let count = self.merge_json(&json)?;
        info!("Loaded {count} site configuration(s) from {}", path.display());
        Ok(count)
    }

    /// Configuration for the site serving `url`
    ///
    /// An exact host match wins; otherwise the longest registered domain
    /// that occurs in the host is chosen.
    pub fn lookup(&self, url: &str) -> ScrapeResult<&SiteConfig> {
        let not_found = || ScrapeError::SiteNotFound {
            url: url.to_string(),
            known: self.domains(),
        };

        let host = host_of(url).ok_or_else(not_found)?;

        if let Some(site) = self.sites.iter().find(|s| s.domain == host) {
            return Ok(site);
        }

        let mut best: Option<&SiteConfig> = None;
        for site in &self.sites {
            if (host.contains(&site.domain) || host.ends_with(&site.domain))
                && best.is_none_or(|b| site.domain.len() > b.domain.len())
            {
                best = Some(site);
            }
        }
        best.ok_or_else(not_found)
    }

    /// Human-readable institution name for `url`
    ///
    /// Registered sites resolve through their display name or the folder
    /// table; unregistered hosts fall back to their title-cased first label.
    #[must_use]
    pub fn display_name(&self, url: &str) -> String {
        match self.lookup(url) {
            Ok(site) => site_display_name(site),
            Err(_) => {
                let host = host_of(url).unwrap_or_default();
                let label = host
                    .strip_prefix("www.")
                    .unwrap_or(&host)
                    .split('.')
                    .next()
                    .unwrap_or_default()
                    .replace('-', " ");
                title_case(&label)
            }
        }
    }

    /// Registered domains in registry order
    #[must_use]
    pub fn domains(&self) -> Vec<String> {
        self.sites.iter().map(|s| s.domain.clone()).collect()
    }

    /// Compiled sites in registry order
    #[must_use]
    pub fn sites(&self) -> &[SiteConfig] {
        &self.sites
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Display name of a compiled site
#[must_use]
pub fn site_display_name(site: &SiteConfig) -> String {
    if let Some(name) = &site.display_name {
        return name.clone();
    }
    builtin_display_name(&site.folder_name)
        .map(str::to_string)
        .unwrap_or_else(|| title_case(&site.folder_name.replace('_', " ")))
}

fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    parsed.host_str().map(str::to_lowercase)
}

/// Capitalize the first letter of every alphabetic run, lower-case the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
