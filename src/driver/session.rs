//! Browser session lifecycle
//!
//! A session owns the browser process, its CDP handler task and its
//! profile directory. `close` must run on every exit path of a crawl; it
//! never fails, it only reports what could not be cleaned up.

use chromiumoxide::Browser;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::chromium::ChromiumDriver;
use crate::browser_setup::{LaunchedBrowser, launch_browser};
use crate::config::ScrapeConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// Outcome of tearing a session down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupResult {
    Success,
    /// Teardown finished but some steps failed
    PartialFailure(Vec<String>),
}

pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: PathBuf,
    /// Profile directories supplied by the caller are left in place
    owns_data_dir: bool,
    page_load_timeout: Duration,
}

impl BrowserSession {
    /// Launch a browser configured for `config`
    pub async fn launch(config: &ScrapeConfig) -> ScrapeResult<Self> {
        let owns_data_dir = config.chrome_data_dir().is_none();
        let LaunchedBrowser {
            browser,
            handler,
            user_data_dir,
        } = launch_browser(config.headless(), config.chrome_data_dir().cloned())
            .await
            .map_err(|e| ScrapeError::Browser(format!("{e:#}")))?;

        Ok(Self {
            browser,
            handler,
            user_data_dir,
            owns_data_dir,
            page_load_timeout: Duration::from_secs(config.page_load_timeout_secs()),
        })
    }

    /// Open a fresh tab
    pub async fn new_driver(&self) -> ScrapeResult<ChromiumDriver> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to create page: {e}")))?;
        Ok(ChromiumDriver::new(page, self.page_load_timeout))
    }

    /// Close the browser, stop the handler and remove a temporary profile
    pub async fn close(self) -> CleanupResult {
        let Self {
            mut browser,
            handler,
            user_data_dir,
            owns_data_dir,
            ..
        } = self;
        let mut errors = Vec::new();

        debug!(target: "coursescrape::cleanup", "Closing browser");
        if let Err(e) = browser.close().await {
            warn!(target: "coursescrape::cleanup", "Failed to close browser: {e}");
            errors.push(format!("Browser close failed: {e}"));
        }

        // Chrome must exit before its profile directory can be removed
        if let Err(e) = browser.wait().await {
            warn!(target: "coursescrape::cleanup", "Failed to wait for browser exit: {e}");
            errors.push(format!("Browser wait failed: {e}"));
        }

        handler.abort();
        if let Err(e) = handler.await
            && !e.is_cancelled()
        {
            warn!(target: "coursescrape::cleanup", "Handler task failed during abort: {e}");
            errors.push(format!("Handler task failed: {e}"));
        }

        if owns_data_dir {
            debug!(target: "coursescrape::cleanup", "Removing {}", user_data_dir.display());
            if let Err(e) = std::fs::remove_dir_all(&user_data_dir) {
                warn!(target: "coursescrape::cleanup", "Failed to clean up Chrome data directory: {e}");
                errors.push(format!("Directory cleanup failed: {e}"));
            }
        }

        if errors.is_empty() {
            info!(target: "coursescrape::cleanup", "Browser session closed");
            CleanupResult::Success
        } else {
            CleanupResult::PartialFailure(errors)
        }
    }
}
