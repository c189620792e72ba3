//! The five pagination strategies

use anyhow::Result;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::Crawl;
use super::page_count::read_page_total;
use crate::driver::PageDriver;
use crate::pagination::ProgressReporter;
use crate::site_registry::{PageHook, UrlParamMode};
use crate::utils::{MAX_PAGES, join_url, with_query_param};

static CONSENT_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(accept|agree)\b").expect("Invalid consent label regex")
});

static NEGATED_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(don[’']?t|do not|not|no|never|reject|decline|refuse)\b")
        .expect("Invalid negated label regex")
});

/// Whether a button label accepts a consent banner; "Disagree" and
/// "Don't accept" do not
fn is_consent_label(label: &str) -> bool {
    CONSENT_LABEL.is_match(label) && !NEGATED_LABEL.is_match(label)
}

/// `href` values that mean "handled by script"
fn is_script_href(href: &str) -> bool {
    matches!(href, "" | "#" | "javascript:void(0)" | "javascript:void(0);")
}

/// Value of the page parameter for 1-based listing page `page_number`
fn url_param_value(mode: UrlParamMode, page_number: usize) -> u64 {
    let index = page_number.saturating_sub(1) as u64;
    match mode {
        UrlParamMode::Increment => index,
        UrlParamMode::Offset { start, step } => u64::from(start) + index * u64::from(step),
    }
}

impl<D: PageDriver, P: ProgressReporter + ?Sized> Crawl<'_, '_, D, P> {
    pub(super) async fn single_page(&mut self, start_url: &str) {
        if self.load(start_url, 1).await {
            self.harvest(start_url, 1).await;
        }
    }

    pub(super) async fn accordion(&mut self, start_url: &str, toggle_selector: &str) {
        if !self.load(start_url, 1).await {
            return;
        }
        self.expand_sections(toggle_selector).await;
        self.harvest(start_url, 1).await;
    }

    /// Click every collapsed toggle; a failing toggle is skipped
    async fn expand_sections(&mut self, toggle_selector: &str) {
        let toggles = match self.driver.query_all(toggle_selector).await {
            Ok(toggles) => toggles,
            Err(e) => {
                warn!("Failed to query accordion toggles '{toggle_selector}': {e:#}");
                return;
            }
        };

        let mut expanded = 0usize;
        for toggle in &toggles {
            match self.driver.attribute(toggle, "aria-expanded").await {
                Ok(Some(state)) if state == "true" => continue,
                Ok(_) => {}
                Err(e) => {
                    debug!("Skipping accordion toggle: {e:#}");
                    continue;
                }
            }
            if let Err(e) = self.driver.click(toggle).await {
                debug!("Failed to expand accordion section: {e:#}");
                continue;
            }
            expanded += 1;
            self.driver
                .wait_for_timeout(self.engine.timings.accordion_settle)
                .await;
        }
        info!("Expanded {expanded} of {} accordion section(s)", toggles.len());
    }

    pub(super) async fn page_numbers(
        &mut self,
        start_url: &str,
        indicator_selector: &str,
        param: &str,
        pattern: &Regex,
        zero_based: bool,
    ) {
        if !self.load(start_url, 1).await {
            return;
        }

        let total =
            read_page_total(self.driver, indicator_selector, pattern, self.engine.indicator_wait)
                .await;
        info!("Listing has {total} page(s)");

        // Page 1 is the document already loaded
        self.harvest(start_url, 1).await;

        for page_number in 2..=total {
            let value = if zero_based { page_number - 1 } else { page_number };
            let url = match with_query_param(start_url, param, &value.to_string()) {
                Ok(url) => url,
                Err(e) => {
                    warn!("Cannot build URL for page {page_number}: {e:#}");
                    continue;
                }
            };

            self.driver
                .wait_for_timeout(self.engine.timings.page_numbers_delay)
                .await;
            if self.load(&url, page_number).await {
                self.harvest(&url, page_number).await;
            }
        }
    }

    pub(super) async fn url_params(&mut self, start_url: &str, param: &str, mode: UrlParamMode) {
        for page_number in 1..=MAX_PAGES {
            let url = if page_number == 1 {
                start_url.to_string()
            } else {
                let value = url_param_value(mode, page_number);
                match with_query_param(start_url, param, &value.to_string()) {
                    Ok(url) => url,
                    Err(e) => {
                        warn!("Cannot build URL for page {page_number}: {e:#}");
                        return;
                    }
                }
            };

            if page_number > 1 {
                self.driver
                    .wait_for_timeout(self.engine.timings.url_params_delay)
                    .await;
            }
            if !self.load(&url, page_number).await {
                continue;
            }

            let found = self.harvest(&url, page_number).await;
            if found == 0 && matches!(mode, UrlParamMode::Offset { .. }) {
                info!("No results on page {page_number}; end of listing");
                return;
            }
        }
    }

    pub(super) async fn next_button(&mut self, start_url: &str, next_selector: &str) {
        let mut current = start_url.to_string();
        let mut page_number = 0usize;

        while self.state.page_count() < MAX_PAGES {
            page_number += 1;
            if !self.load(&current, page_number).await {
                break;
            }
            self.harvest(&current, page_number).await;

            let next = match self.next_url(next_selector, &current).await {
                Ok(Some(next)) => next,
                Ok(None) => {
                    debug!("No further page after {current}");
                    break;
                }
                Err(e) => {
                    warn!("Failed to follow next control on {current}: {e:#}");
                    break;
                }
            };

            current = next;
            self.driver
                .wait_for_timeout(self.engine.timings.next_button_delay)
                .await;
        }

        if self.state.page_count() >= MAX_PAGES {
            warn!("Stopped at the {MAX_PAGES}-page ceiling");
        }
    }

    /// URL the "next" control leads to, if it leads anywhere new
    async fn next_url(&mut self, next_selector: &str, current: &str) -> Result<Option<String>> {
        let controls = self.driver.query_all(next_selector).await?;
        let Some(control) = controls.first() else {
            return Ok(None);
        };

        if self.driver.attribute(control, "disabled").await?.is_some() {
            return Ok(None);
        }
        let class = self.driver.attribute(control, "class").await?.unwrap_or_default();
        if class.to_lowercase().contains("disabled") {
            return Ok(None);
        }
        if self.driver.attribute(control, "aria-disabled").await?.as_deref() == Some("true") {
            return Ok(None);
        }

        let href = self.driver.attribute(control, "href").await?.unwrap_or_default();
        let href = href.trim();

        let next = if is_script_href(href) {
            self.driver.click(control).await?;
            self.driver
                .wait_for_timeout(self.engine.timings.click_settle)
                .await;
            self.driver.current_url().await?
        } else {
            match join_url(current, href) {
                Some(next) => next,
                None => return Ok(None),
            }
        };

        if next == current || self.state.has_visited(&next) {
            debug!("Next control leads back to a visited page: {next}");
            return Ok(None);
        }
        Ok(Some(next))
    }

    pub(super) async fn run_hook(&mut self, hook: PageHook) {
        match hook {
            PageHook::DismissConsent => self.dismiss_consent().await,
        }
    }

    /// Click the first visible accept/agree button, if any
    async fn dismiss_consent(&mut self) {
        if self
            .driver
            .wait_for_selector("button", self.engine.consent_wait)
            .await
            .is_err()
        {
            return;
        }
        let Ok(buttons) = self.driver.query_all("button").await else {
            return;
        };

        for button in &buttons {
            let Ok(label) = self.driver.inner_text(button).await else {
                continue;
            };
            if !is_consent_label(label.trim()) {
                continue;
            }
            match self.driver.click(button).await {
                Ok(()) => {
                    debug!("Dismissed consent banner via '{}'", label.trim());
                    self.driver
                        .wait_for_timeout(self.engine.timings.consent_settle)
                        .await;
                }
                Err(e) => debug!("Consent button not clickable: {e:#}"),
            }
            return;
        }
    }
}
