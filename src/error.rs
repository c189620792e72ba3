//! Error types for link discovery and course extraction
//!
//! Only failures that make a whole call meaningless surface here: an
//! unregistered site, a browser that cannot be launched, or output that
//! cannot be written. Page-, element- and URL-level failures are recovered
//! where they happen and only logged.

use thiserror::Error;

/// Result type alias for link discovery operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Error types for link discovery
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The requested site is not registered
    #[error("University URL '{url}' is not configured. Available universities: {}", known.join(", "))]
    SiteNotFound { url: String, known: Vec<String> },

    /// The start URL could not be parsed
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// A site description could not be compiled
    #[error("Invalid site configuration for '{domain}': {message}")]
    InvalidSite { domain: String, message: String },

    /// Browser launch or page creation failed
    #[error("Browser error: {0}")]
    Browser(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Site registry file could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Whether the caller supplied something unusable, as opposed to an
    /// environment fault
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::SiteNotFound { .. } | Self::InvalidUrl { .. })
    }
}

/// Result type alias for course extraction
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Error types for the detail-extraction API
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// `FIRECRAWL_API_KEY` missing from the environment and `.env`
    #[error("FIRECRAWL_API_KEY not set in environment or .env file")]
    MissingApiKey,

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status or `success: false`
    #[error("Extraction API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The extraction job reported failure
    #[error("Extraction job {id} failed: {message}")]
    JobFailed { id: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
