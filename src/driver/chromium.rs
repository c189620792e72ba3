//! `PageDriver` over a chromiumoxide tab

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use super::PageDriver;
use super::timeout::with_timeout;

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A live browser tab
pub struct ChromiumDriver {
    page: Page,
    page_load_timeout: Duration,
}

impl ChromiumDriver {
    #[must_use]
    pub fn new(page: Page, page_load_timeout: Duration) -> Self {
        Self {
            page,
            page_load_timeout,
        }
    }
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    type Element = Element;

    async fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {url}");
        with_timeout(
            async {
                self.page
                    .goto(url)
                    .await
                    .with_context(|| format!("Failed to navigate to {url}"))?;
                Ok(())
            },
            self.page_load_timeout,
            "Navigation",
        )
        .await
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Element>> {
        self.page
            .find_elements(selector)
            .await
            .with_context(|| format!("Failed to query '{selector}'"))
    }

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>> {
        element
            .attribute(name)
            .await
            .with_context(|| format!("Failed to read attribute '{name}'"))
    }

    async fn inner_text(&self, element: &Element) -> Result<String> {
        Ok(element
            .inner_text()
            .await
            .context("Failed to read element text")?
            .unwrap_or_default())
    }

    async fn click(&self, element: &Element) -> Result<()> {
        element.click().await.context("Failed to click element")?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            match self.page.find_element(selector).await {
                Ok(_) => {
                    trace!("'{selector}' present after {:?}", start.elapsed());
                    return Ok(());
                }
                Err(_) if start.elapsed() >= timeout => {
                    return Err(anyhow!(
                        "Timeout waiting for '{selector}' after {timeout:?}"
                    ));
                }
                Err(_) => tokio::time::sleep(SELECTOR_POLL_INTERVAL).await,
            }
        }
    }

    async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await
            .context("Failed to read page URL")?
            .ok_or_else(|| anyhow!("Page has no URL"))
    }
}
