//! Site configuration types
//!
//! A site is described twice: `SiteSpec` is the flat, serde-friendly form
//! that mirrors how institutions are written down (and how extra sites are
//! loaded from JSON), and `SiteConfig` is the compiled, immutable form the
//! crawl consumes. Compilation resolves the strategy tag, the link rule and
//! the page-count pattern once, so nothing is re-matched per page or per
//! element.

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::resolvers::UrlResolver;
use crate::error::{ScrapeError, ScrapeResult};

/// Default pattern for reading a page total out of an indicator such as
/// `"Page 1 of 22"`
pub const DEFAULT_PAGE_COUNT_PATTERN: &str = r"of\D*(\d+)";

/// Default query parameter rewritten by the generated-URL strategies
pub const DEFAULT_PAGE_PARAM: &str = "page";

/// Default attribute carrying a course's live URL
pub const DEFAULT_LIVE_URL_ATTRIBUTE: &str = "data-live-url";

/// Default path under which title-derived slugs are placed
pub const DEFAULT_SLUG_PATH_PREFIX: &str = "/academics/programs/";

/// How a site's listing is traversed
#[derive(Debug, Clone)]
pub enum PaginationStrategy {
    /// Load once, extract once
    SinglePage,
    /// Expand every collapsed section, then extract once
    Accordion { toggle_selector: String },
    /// Read a page total from an indicator and generate one URL per page
    PageNumbers {
        indicator_selector: String,
        param: String,
        extract_pattern: Regex,
        /// Page N is requested as `N - 1`
        zero_based: bool,
    },
    /// Generate candidate URLs by rewriting a query parameter
    UrlParams { param: String, mode: UrlParamMode },
    /// Follow the "next" control until it is exhausted
    NextButton { next_selector: String },
}

impl PaginationStrategy {
    /// Tag used in `SiteSpec::pagination_type`
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::SinglePage => "single_page",
            Self::Accordion { .. } => "accordion",
            Self::PageNumbers { .. } => "page_numbers",
            Self::UrlParams { .. } => "url_params",
            Self::NextButton { .. } => "next_button",
        }
    }
}

/// Value sequence of the url-params strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlParamMode {
    /// Page N carries `param = N - 1`; runs to the page ceiling
    Increment,
    /// Page N carries `param = start + (N - 1) * step`; stops on the first
    /// page that yields no course links
    Offset { start: u32, step: u32 },
}

/// How a course URL is read off a matched element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRule {
    /// `href`, optionally unwrapped by the site's resolver
    Standard,
    /// A data attribute that already holds the absolute URL
    LiveUrlAttribute { attribute: String },
    /// Slugify the element text and place it under the site origin
    SynthesizeFromTitle { path_prefix: String },
}

/// Site rule run on each generated page before extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageHook {
    /// Click the cookie/consent banner's accept button if one is visible
    DismissConsent,
}

/// Post-hoc URL filtering rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Keyword is a substring of the lower-cased URL path
    #[default]
    Contains,
    /// Keyword equals one of the path segments
    Segment,
}

/// Flat description of one institution, as written in the registry table
/// or in a JSON sites file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSpec {
    /// Registered domain, e.g. `abertay.ac.uk`
    pub domain: String,
    pub folder_name: String,
    /// Overrides the built-in display-name table
    pub display_name: Option<String>,
    pub course_selector: String,
    pub wait_selector: Option<String>,
    pub pagination_type: String,
    pub pagination_selector: Option<String>,
    pub pagination_param: Option<String>,
    pub pagination_increment: Option<u32>,
    pub pagination_start: Option<u32>,
    pub pagination_extract_pattern: Option<String>,
    pub zero_based_pages: bool,
    pub url_resolution: Option<UrlResolver>,
    pub special_logic: Option<String>,
    pub live_url_attribute: Option<String>,
    pub slug_path_prefix: Option<String>,
    pub before_extract: Option<PageHook>,
    pub filter_keywords: Vec<String>,
    pub match_mode: MatchMode,
}

impl SiteSpec {
    /// Resolve tags and patterns into an immutable `SiteConfig`
    pub fn compile(self) -> ScrapeResult<SiteConfig> {
        if self.domain.trim().is_empty() {
            return Err(ScrapeError::InvalidSite {
                domain: self.domain,
                message: "domain is empty".to_string(),
            });
        }
        if self.course_selector.trim().is_empty() {
            return Err(ScrapeError::InvalidSite {
                domain: self.domain,
                message: "course_selector is empty".to_string(),
            });
        }

        let pagination = self.compile_pagination()?;
        let link_rule = self.compile_link_rule();
        let wait_selector = self
            .wait_selector
            .clone()
            .unwrap_or_else(|| self.course_selector.clone());
        let folder_name = if self.folder_name.is_empty() {
            self.domain.split('.').next().unwrap_or_default().to_string()
        } else {
            self.folder_name
        };

        Ok(SiteConfig {
            domain: self.domain.to_lowercase(),
            folder_name,
            display_name: self.display_name,
            course_selector: self.course_selector,
            wait_selector,
            pagination,
            link_rule,
            url_resolution: self.url_resolution,
            before_extract: self.before_extract,
            filter_keywords: self.filter_keywords,
            match_mode: self.match_mode,
        })
    }

    fn compile_pagination(&self) -> ScrapeResult<PaginationStrategy> {
        let param = || {
            self.pagination_param
                .clone()
                .unwrap_or_else(|| DEFAULT_PAGE_PARAM.to_string())
        };
        let selector = self.pagination_selector.clone().filter(|s| !s.trim().is_empty());

        let strategy = match (self.pagination_type.as_str(), selector) {
            ("single_page" | "", _) => PaginationStrategy::SinglePage,
            ("accordion", Some(toggle_selector)) => PaginationStrategy::Accordion { toggle_selector },
            ("page_numbers", Some(indicator_selector)) => {
                let pattern = self
                    .pagination_extract_pattern
                    .as_deref()
                    .unwrap_or(DEFAULT_PAGE_COUNT_PATTERN);
                let extract_pattern =
                    Regex::new(pattern).map_err(|e| ScrapeError::InvalidSite {
                        domain: self.domain.clone(),
                        message: format!("invalid pagination_extract_pattern '{pattern}': {e}"),
                    })?;
                PaginationStrategy::PageNumbers {
                    indicator_selector,
                    param: param(),
                    extract_pattern,
                    zero_based: self.zero_based_pages,
                }
            }
            ("url_params", _) => {
                let mode = match self.pagination_increment {
                    Some(step) => UrlParamMode::Offset {
                        start: self.pagination_start.unwrap_or(1),
                        step: step.max(1),
                    },
                    None => UrlParamMode::Increment,
                };
                PaginationStrategy::UrlParams { param: param(), mode }
            }
            ("next_button", Some(next_selector)) => PaginationStrategy::NextButton { next_selector },
            (tag @ ("accordion" | "page_numbers" | "next_button"), None) => {
                warn!(
                    "Site {} uses '{tag}' pagination without a pagination_selector; treating as single_page",
                    self.domain
                );
                PaginationStrategy::SinglePage
            }
            (other, _) => {
                warn!(
                    "Site {} has unrecognized pagination_type '{other}'; treating as single_page",
                    self.domain
                );
                PaginationStrategy::SinglePage
            }
        };

        Ok(strategy)
    }

    fn compile_link_rule(&self) -> LinkRule {
        match self.special_logic.as_deref() {
            Some("generate_slug_from_title" | "synthesize-from-title" | "synthesize_from_title") => {
                LinkRule::SynthesizeFromTitle {
                    path_prefix: self
                        .slug_path_prefix
                        .clone()
                        .unwrap_or_else(|| DEFAULT_SLUG_PATH_PREFIX.to_string()),
                }
            }
            Some("live_url_attribute" | "live-url-attribute") => LinkRule::LiveUrlAttribute {
                attribute: self
                    .live_url_attribute
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LIVE_URL_ATTRIBUTE.to_string()),
            },
            Some(other) => {
                warn!("Site {} has unrecognized special_logic '{other}'; using href", self.domain);
                LinkRule::Standard
            }
            None => {
                // A selector that targets the live-URL attribute reads it directly
                let attribute = self
                    .live_url_attribute
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LIVE_URL_ATTRIBUTE.to_string());
                if self.course_selector.contains(&format!("[{attribute}]")) {
                    LinkRule::LiveUrlAttribute { attribute }
                } else {
                    LinkRule::Standard
                }
            }
        }
    }
}

/// Compiled, immutable configuration of one institution
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub(crate) domain: String,
    pub(crate) folder_name: String,
    pub(crate) display_name: Option<String>,
    pub(crate) course_selector: String,
    pub(crate) wait_selector: String,
    pub(crate) pagination: PaginationStrategy,
    pub(crate) link_rule: LinkRule,
    pub(crate) url_resolution: Option<UrlResolver>,
    pub(crate) before_extract: Option<PageHook>,
    pub(crate) filter_keywords: Vec<String>,
    pub(crate) match_mode: MatchMode,
}

impl SiteConfig {
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    #[must_use]
    pub fn course_selector(&self) -> &str {
        &self.course_selector
    }

    #[must_use]
    pub fn wait_selector(&self) -> &str {
        &self.wait_selector
    }

    #[must_use]
    pub fn pagination(&self) -> &PaginationStrategy {
        &self.pagination
    }

    #[must_use]
    pub fn link_rule(&self) -> &LinkRule {
        &self.link_rule
    }

    #[must_use]
    pub fn url_resolution(&self) -> Option<UrlResolver> {
        self.url_resolution
    }

    #[must_use]
    pub fn before_extract(&self) -> Option<PageHook> {
        self.before_extract
    }

    #[must_use]
    pub fn filter_keywords(&self) -> &[String] {
        &self.filter_keywords
    }

    #[must_use]
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }
}
