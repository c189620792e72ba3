//! Test utilities for the coursescrape test suite
//!
//! `MockDriver` implements `PageDriver` over scripted in-memory pages so the
//! pagination strategies can be exercised without a browser.
//! `ScriptedExtractor` stands in for the extraction API.

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

use coursescrape::config::PaginationTimings;
use coursescrape::driver::PageDriver;
use coursescrape::error::{ExtractionError, ExtractionResult};
use coursescrape::{ExtractionClient, ScrapeConfig, SiteConfig, SiteRegistry, SiteSpec};

/// Creates a temporary directory for test output
pub fn create_test_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// What clicking an element does to the page
#[derive(Debug, Clone)]
pub enum ClickAction {
    /// The document changes to this URL
    Navigate(String),
    /// More elements start matching `selector`
    Reveal {
        selector: String,
        elements: Vec<MockElement>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct MockElement {
    pub label: String,
    pub attrs: HashMap<String, String>,
    pub text: String,
    pub on_click: Option<ClickAction>,
    /// Every read and click fails, as for a node detached from the document
    pub stale: bool,
    /// Reads succeed but clicks fail
    pub unclickable: bool,
}

impl MockElement {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Self::default()
        }
    }

    /// Anchor with an `href`
    pub fn link(href: &str) -> Self {
        Self::new(href).attr("href", href)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn on_click(mut self, action: ClickAction) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn stale(mut self) -> Self {
        self.stale = true;
        self
    }

    pub fn unclickable(mut self) -> Self {
        self.unclickable = true;
        self
    }

    fn check_attached(&self) -> Result<()> {
        if self.stale {
            return Err(anyhow!("Element '{}' is no longer attached to the page", self.label));
        }
        Ok(())
    }
}

/// Elements of one scripted document, keyed by the exact selector string
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    elements: HashMap<String, Vec<MockElement>>,
}

impl MockPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, selector: &str, elements: Vec<MockElement>) -> Self {
        self.elements
            .entry(selector.to_string())
            .or_default()
            .extend(elements);
        self
    }
}

type PageFactory = Box<dyn Fn(&str) -> Option<MockPage> + Send + Sync>;

#[derive(Default)]
struct DriverState {
    current_url: String,
    current_page: MockPage,
    navigations: Vec<String>,
    clicks: Vec<String>,
}

/// Scripted browser tab
///
/// Unscripted URLs load as empty documents unless a factory is set.
/// `wait_for_timeout` never sleeps.
pub struct MockDriver {
    pages: HashMap<String, MockPage>,
    factory: Option<PageFactory>,
    failing: HashSet<String>,
    state: Mutex<DriverState>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            factory: None,
            failing: HashSet::new(),
            state: Mutex::new(DriverState::default()),
        }
    }

    pub fn page(mut self, url: &str, page: MockPage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    /// Build pages for URLs that are not scripted explicitly
    pub fn factory(mut self, factory: impl Fn(&str) -> Option<MockPage> + Send + Sync + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Navigation to `url` fails
    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().unwrap().clicks.clone()
    }

    fn resolve_page(&self, url: &str) -> MockPage {
        if let Some(page) = self.pages.get(url) {
            return page.clone();
        }
        self.factory
            .as_ref()
            .and_then(|factory| factory(url))
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    type Element = MockElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.navigations.push(url.to_string());
        if self.failing.contains(url) {
            return Err(anyhow!("net::ERR_CONNECTION_RESET at {url}"));
        }
        state.current_url = url.to_string();
        state.current_page = self.resolve_page(url);
        Ok(())
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<MockElement>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .current_page
            .elements
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }

    async fn attribute(&self, element: &MockElement, name: &str) -> Result<Option<String>> {
        element.check_attached()?;
        Ok(element.attrs.get(name).cloned())
    }

    async fn inner_text(&self, element: &MockElement) -> Result<String> {
        element.check_attached()?;
        Ok(element.text.clone())
    }

    /// Only successful clicks are recorded
    async fn click(&self, element: &MockElement) -> Result<()> {
        element.check_attached()?;
        if element.unclickable {
            return Err(anyhow!("Element '{}' is not clickable", element.label));
        }
        let mut state = self.state.lock().unwrap();
        state.clicks.push(element.label.clone());
        match &element.on_click {
            Some(ClickAction::Navigate(url)) => {
                state.current_url = url.clone();
                state.current_page = self.resolve_page(url);
            }
            Some(ClickAction::Reveal { selector, elements }) => {
                state
                    .current_page
                    .elements
                    .entry(selector.clone())
                    .or_default()
                    .extend(elements.iter().cloned());
            }
            None => {}
        }
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<()> {
        let state = self.state.lock().unwrap();
        match state.current_page.elements.get(selector) {
            Some(elements) if !elements.is_empty() => Ok(()),
            _ => Err(anyhow!("Timed out waiting for selector '{selector}'")),
        }
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().current_url.clone())
    }

    async fn wait_for_timeout(&self, _duration: Duration) {}
}

/// Compile a single site spec
pub fn compile_site(spec: SiteSpec) -> SiteConfig {
    spec.compile().expect("test site compiles")
}

/// Registry holding exactly the given specs
pub fn registry_of(specs: Vec<SiteSpec>) -> SiteRegistry {
    SiteRegistry::from_specs(specs).expect("test sites compile")
}

/// Minimal spec for `example.ac.uk`
pub fn example_spec(pagination_type: &str) -> SiteSpec {
    SiteSpec {
        domain: "example.ac.uk".to_string(),
        folder_name: "example".to_string(),
        course_selector: "a.course".to_string(),
        pagination_type: pagination_type.to_string(),
        ..SiteSpec::default()
    }
}

/// Config with zero pauses and short waits
pub fn test_config(start_url: &str, output_dir: &std::path::Path) -> ScrapeConfig {
    let zero = Duration::ZERO;
    ScrapeConfig::builder()
        .start_url(start_url)
        .output_dir(output_dir)
        .selector_wait_timeout_secs(1)
        .indicator_wait_timeout_secs(1)
        .timings(PaginationTimings {
            accordion_settle: zero,
            click_settle: zero,
            page_numbers_delay: zero,
            url_params_delay: zero,
            next_button_delay: zero,
            consent_settle: zero,
        })
        .build()
        .expect("valid test config")
}

/// Scripted outcome of one extraction call
#[derive(Debug, Clone)]
pub enum Scripted {
    Data(Value),
    Empty,
    Fail(String),
    /// Never answers within any reasonable timeout
    Hang,
}

/// Extraction client answering from a per-URL script
pub struct ScriptedExtractor {
    script: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExtractor {
    pub fn new(script: Vec<(&str, Scripted)>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|(url, outcome)| (url.to_string(), outcome))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionClient for ScriptedExtractor {
    async fn extract(
        &self,
        urls: &[String],
        _prompt: &str,
        _schema: &Value,
    ) -> ExtractionResult<Option<Value>> {
        let url = urls.first().cloned().unwrap_or_default();
        self.calls.lock().unwrap().push(url.clone());

        match self.script.get(&url).cloned().unwrap_or(Scripted::Empty) {
            Scripted::Data(data) => Ok(Some(data)),
            Scripted::Empty => Ok(None),
            Scripted::Fail(message) => Err(ExtractionError::Api {
                status: 500,
                message,
            }),
            Scripted::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(None)
            }
        }
    }
}
