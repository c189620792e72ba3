//! Browser capability contract
//!
//! The pagination engine and the link extractor only ever talk to a page
//! through [`PageDriver`]. `ChromiumDriver` implements it over a live
//! chromiumoxide tab; tests implement it over scripted in-memory pages.

pub mod chromium;
pub mod session;
pub mod timeout;

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

pub use chromium::ChromiumDriver;
pub use session::{BrowserSession, CleanupResult};
pub use timeout::with_timeout;

/// One browser tab, as seen by the crawl
///
/// Every operation may fail; callers decide whether a failure is fatal to
/// the page, the element, or nothing at all.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Handle to a DOM element returned by [`Self::query_all`]
    type Element: Send + Sync;

    /// Load `url` and wait until the document has loaded
    async fn navigate(&self, url: &str) -> Result<()>;

    /// All elements matching a CSS selector, in document order
    async fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>>;

    /// Attribute value, `None` when the attribute is absent
    async fn attribute(&self, element: &Self::Element, name: &str) -> Result<Option<String>>;

    /// Rendered text of an element (empty when it has none)
    async fn inner_text(&self, element: &Self::Element) -> Result<String>;

    async fn click(&self, element: &Self::Element) -> Result<()>;

    /// Resolve once `selector` matches, or fail after `timeout`
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// URL of the document currently loaded in the tab
    async fn current_url(&self) -> Result<String>;

    /// Politeness pause between pagination steps
    async fn wait_for_timeout(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
