//! Pagination strategies driven against scripted pages

mod common;

use common::{
    ClickAction, MockDriver, MockElement, MockPage, compile_site, create_test_dir, example_spec,
    test_config,
};
use coursescrape::pagination::page_count::PAGE_SELECT_OPTIONS_SELECTOR;
use coursescrape::site_registry::PageHook;
use coursescrape::utils::MAX_PAGES;
use coursescrape::{NoOpProgress, PaginationEngine, SiteSpec};
use std::sync::atomic::{AtomicUsize, Ordering};

const START: &str = "https://example.ac.uk/courses";

fn course(path: &str) -> MockElement {
    MockElement::link(path).attr("class", "course")
}

fn listing(paths: &[&str]) -> MockPage {
    MockPage::new().with("a.course", paths.iter().map(|p| course(p)).collect())
}

#[tokio::test]
async fn test_single_page_extracts_once() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(example_spec("single_page"));
    let driver = MockDriver::new().page(START, listing(&["/c/art", "/c/law", "/c/art"]));

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(driver.navigations(), vec![START.to_string()]);
    assert_eq!(
        outcome.urls,
        vec![
            "https://example.ac.uk/c/art".to_string(),
            "https://example.ac.uk/c/law".to_string()
        ]
    );
    assert_eq!(outcome.pages_visited, vec![START.to_string()]);
}

#[tokio::test]
async fn test_single_page_navigation_failure_yields_nothing() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(example_spec("single_page"));
    let driver = MockDriver::new().failing(START);

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert!(outcome.urls.is_empty());
    assert!(outcome.pages_visited.is_empty());
}

#[tokio::test]
async fn test_unreadable_course_element_is_skipped() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(example_spec("single_page"));
    let page = MockPage::new().with(
        "a.course",
        vec![course("/c/art"), course("/c/gone").stale(), course("/c/law")],
    );
    let driver = MockDriver::new().page(START, page);

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(
        outcome.urls,
        vec![
            "https://example.ac.uk/c/art".to_string(),
            "https://example.ac.uk/c/law".to_string()
        ]
    );
    assert_eq!(outcome.pages_visited, vec![START.to_string()]);
}

#[tokio::test]
async fn test_url_params_increment_stops_at_page_ceiling() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(example_spec("url_params"));

    let counter = AtomicUsize::new(0);
    let driver = MockDriver::new().factory(move |_url| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        Some(listing(&[format!("/c/{n}").as_str()]))
    });

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    let navigations = driver.navigations();
    assert_eq!(navigations.len(), MAX_PAGES);
    assert_eq!(navigations[0], START);
    assert_eq!(navigations[1], format!("{START}?page=1"));
    assert_eq!(navigations[MAX_PAGES - 1], format!("{START}?page=99"));
    assert_eq!(outcome.urls.len(), MAX_PAGES);
}

#[tokio::test]
async fn test_url_params_skips_failed_pages() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(example_spec("url_params"));
    let failing = format!("{START}?page=2");
    let driver = MockDriver::new()
        .page(START, listing(&["/c/a"]))
        .page(&format!("{START}?page=1"), listing(&["/c/b"]))
        .page(&format!("{START}?page=3"), listing(&["/c/d"]))
        .failing(&failing);

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(driver.navigations().len(), MAX_PAGES);
    assert!(!outcome.pages_visited.contains(&failing));
    assert_eq!(
        outcome.urls,
        vec![
            "https://example.ac.uk/c/a".to_string(),
            "https://example.ac.uk/c/b".to_string(),
            "https://example.ac.uk/c/d".to_string()
        ]
    );
}

#[tokio::test]
async fn test_url_params_offset_stops_on_first_empty_page() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(SiteSpec {
        pagination_param: Some("start_rank".to_string()),
        pagination_increment: Some(20),
        pagination_start: Some(1),
        ..example_spec("url_params")
    });
    let driver = MockDriver::new()
        .page(START, listing(&["/c/a", "/c/b"]))
        .page(&format!("{START}?start_rank=21"), MockPage::new());

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(
        driver.navigations(),
        vec![START.to_string(), format!("{START}?start_rank=21")]
    );
    assert_eq!(outcome.urls.len(), 2);
}

#[tokio::test]
async fn test_url_params_offset_advances_by_step() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(SiteSpec {
        pagination_param: Some("start_rank".to_string()),
        pagination_increment: Some(20),
        pagination_start: Some(1),
        ..example_spec("url_params")
    });
    let driver = MockDriver::new()
        .page(START, listing(&["/c/a"]))
        .page(&format!("{START}?start_rank=21"), listing(&["/c/b"]))
        .page(&format!("{START}?start_rank=41"), listing(&["/c/c"]));

    PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(
        driver.navigations(),
        vec![
            START.to_string(),
            format!("{START}?start_rank=21"),
            format!("{START}?start_rank=41"),
            format!("{START}?start_rank=61"),
        ]
    );
}

#[tokio::test]
async fn test_consent_banner_dismissed_before_extraction() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(SiteSpec {
        before_extract: Some(PageHook::DismissConsent),
        ..example_spec("single_page")
    });
    let page = listing(&["/c/a"]).with(
        "button",
        vec![
            MockElement::new("search").text("Search"),
            MockElement::new("accept").text("  Accept all cookies "),
            MockElement::new("agree").text("I agree"),
        ],
    );
    let driver = MockDriver::new().page(START, page);

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(driver.clicks(), vec!["accept".to_string()]);
    assert_eq!(outcome.urls.len(), 1);
}

#[tokio::test]
async fn test_consent_banner_ignores_declining_buttons() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(SiteSpec {
        before_extract: Some(PageHook::DismissConsent),
        ..example_spec("single_page")
    });
    let page = listing(&["/c/a"]).with(
        "button",
        vec![
            MockElement::new("dont").text("Don't accept"),
            MockElement::new("disagree").text("Disagree"),
            MockElement::new("detached").stale(),
            MockElement::new("accept").text("Accept all"),
        ],
    );
    let driver = MockDriver::new().page(START, page);

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(driver.clicks(), vec!["accept".to_string()]);
    assert_eq!(outcome.urls, vec!["https://example.ac.uk/c/a".to_string()]);
}

#[tokio::test]
async fn test_page_numbers_reads_total_from_indicator() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(SiteSpec {
        pagination_selector: Some(".pager".to_string()),
        zero_based_pages: true,
        ..example_spec("page_numbers")
    });
    let start_page = listing(&["/c/first"]).with(
        ".pager",
        vec![MockElement::new("pager").text("Page\u{a0}1 of 22")],
    );
    let driver = MockDriver::new().page(START, start_page);

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    let navigations = driver.navigations();
    assert_eq!(navigations.len(), 22);
    assert_eq!(navigations[0], START);
    // Zero-based: the second page is requested as page=1
    assert_eq!(navigations[1], format!("{START}?page=1"));
    assert_eq!(navigations[21], format!("{START}?page=21"));
    assert_eq!(outcome.pages_visited.len(), 22);
    assert_eq!(outcome.urls, vec!["https://example.ac.uk/c/first".to_string()]);
}

#[tokio::test]
async fn test_page_numbers_falls_back_to_select_options() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(SiteSpec {
        pagination_selector: Some(".pager".to_string()),
        ..example_spec("page_numbers")
    });
    let options = (1..=5).map(|n| MockElement::new(&format!("option-{n}"))).collect();
    let start_page = listing(&["/c/a"]).with(PAGE_SELECT_OPTIONS_SELECTOR, options);
    let driver = MockDriver::new().page(START, start_page);

    PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    let navigations = driver.navigations();
    assert_eq!(navigations.len(), 5);
    assert_eq!(navigations[1], format!("{START}?page=2"));
    assert_eq!(navigations[4], format!("{START}?page=5"));
}

#[tokio::test]
async fn test_page_numbers_without_indicator_is_one_page() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(SiteSpec {
        pagination_selector: Some(".pager".to_string()),
        ..example_spec("page_numbers")
    });
    let driver = MockDriver::new().page(START, listing(&["/c/a"]));

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(driver.navigations(), vec![START.to_string()]);
    assert_eq!(outcome.urls.len(), 1);
}

#[tokio::test]
async fn test_page_numbers_total_is_capped() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(SiteSpec {
        pagination_selector: Some(".pager".to_string()),
        ..example_spec("page_numbers")
    });
    let start_page = MockPage::new().with(".pager", vec![MockElement::new("pager").text("Page 1 of 500")]);
    let driver = MockDriver::new().page(START, start_page);

    PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(driver.navigations().len(), MAX_PAGES);
}

#[tokio::test]
async fn test_accordion_expands_only_collapsed_sections() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(SiteSpec {
        pagination_selector: Some("button.toggle".to_string()),
        ..example_spec("accordion")
    });

    let reveal = |path: &str| ClickAction::Reveal {
        selector: "a.course".to_string(),
        elements: vec![course(path)],
    };
    let toggles = vec![
        MockElement::new("undergraduate")
            .attr("aria-expanded", "false")
            .on_click(reveal("/c/ug")),
        MockElement::new("postgraduate")
            .attr("aria-expanded", "true")
            .on_click(reveal("/c/pg")),
        MockElement::new("foundation").on_click(reveal("/c/fd")),
    ];
    let driver = MockDriver::new().page(START, MockPage::new().with("button.toggle", toggles));

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(
        driver.clicks(),
        vec!["undergraduate".to_string(), "foundation".to_string()]
    );
    assert_eq!(
        outcome.urls,
        vec![
            "https://example.ac.uk/c/ug".to_string(),
            "https://example.ac.uk/c/fd".to_string()
        ]
    );
    assert_eq!(driver.navigations().len(), 1);
}

#[tokio::test]
async fn test_accordion_continues_past_failing_toggles() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = compile_site(SiteSpec {
        pagination_selector: Some("button.toggle".to_string()),
        ..example_spec("accordion")
    });

    let reveal = |path: &str| ClickAction::Reveal {
        selector: "a.course".to_string(),
        elements: vec![course(path)],
    };
    let toggles = vec![
        MockElement::new("detached").stale().on_click(reveal("/c/x")),
        MockElement::new("covered")
            .attr("aria-expanded", "false")
            .unclickable()
            .on_click(reveal("/c/y")),
        MockElement::new("masters")
            .attr("aria-expanded", "false")
            .on_click(reveal("/c/msc")),
    ];
    let driver = MockDriver::new().page(START, MockPage::new().with("button.toggle", toggles));

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(driver.clicks(), vec!["masters".to_string()]);
    assert_eq!(outcome.urls, vec!["https://example.ac.uk/c/msc".to_string()]);
}

fn next_button_site() -> coursescrape::SiteConfig {
    compile_site(SiteSpec {
        pagination_selector: Some("a.next".to_string()),
        ..example_spec("next_button")
    })
}

#[tokio::test]
async fn test_next_button_follows_links_until_exhausted() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = next_button_site();
    let page2 = format!("{START}?p=2");
    let driver = MockDriver::new()
        .page(
            START,
            listing(&["/c/a"]).with("a.next", vec![MockElement::link("?p=2")]),
        )
        .page(
            &page2,
            listing(&["/c/b"]).with(
                "a.next",
                vec![MockElement::link("?p=3").attr("class", "next is-disabled")],
            ),
        );

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(driver.navigations(), vec![START.to_string(), page2]);
    assert_eq!(outcome.urls.len(), 2);
}

#[tokio::test]
async fn test_next_button_stops_on_disabled_controls() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = next_button_site();

    for control in [
        MockElement::link("?p=2").attr("disabled", ""),
        MockElement::link("?p=2").attr("aria-disabled", "true"),
    ] {
        let driver = MockDriver::new().page(START, listing(&["/c/a"]).with("a.next", vec![control]));
        PaginationEngine::new(&site, &config)
            .run(&driver, START, &NoOpProgress)
            .await;
        assert_eq!(driver.navigations().len(), 1);
    }
}

#[tokio::test]
async fn test_next_button_cycle_terminates() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = next_button_site();

    // Next points at the page itself
    let driver = MockDriver::new().page(
        START,
        listing(&["/c/a"]).with("a.next", vec![MockElement::link(START)]),
    );
    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;
    assert_eq!(driver.navigations().len(), 1);
    assert_eq!(outcome.pages_visited.len(), 1);

    // A -> B -> A
    let page_b = format!("{START}?p=2");
    let driver = MockDriver::new()
        .page(START, listing(&["/c/a"]).with("a.next", vec![MockElement::link("?p=2")]))
        .page(&page_b, listing(&["/c/b"]).with("a.next", vec![MockElement::link(START)]));
    PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;
    assert_eq!(driver.navigations(), vec![START.to_string(), page_b]);
}

#[tokio::test]
async fn test_next_button_never_exceeds_page_ceiling() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = next_button_site();

    let counter = AtomicUsize::new(0);
    let driver = MockDriver::new().factory(move |_url| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        Some(
            listing(&[format!("/c/{n}").as_str()])
                .with("a.next", vec![MockElement::link(&format!("?p={}", n + 1))]),
        )
    });

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(driver.navigations().len(), MAX_PAGES);
    assert_eq!(outcome.pages_visited.len(), MAX_PAGES);
}

#[tokio::test]
async fn test_next_button_clicks_script_controls() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = next_button_site();
    let page2 = format!("{START}?p=2");

    let driver = MockDriver::new()
        .page(
            START,
            listing(&["/c/a"]).with(
                "a.next",
                vec![
                    MockElement::new("next")
                        .attr("href", "javascript:void(0)")
                        .on_click(ClickAction::Navigate(page2.clone())),
                ],
            ),
        )
        .page(&page2, listing(&["/c/b"]));

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(driver.clicks(), vec!["next".to_string()]);
    assert_eq!(driver.navigations(), vec![START.to_string(), page2]);
    assert_eq!(outcome.urls.len(), 2);
}

#[tokio::test]
async fn test_next_button_navigation_failure_ends_crawl() {
    let dir = create_test_dir().unwrap();
    let config = test_config(START, dir.path());
    let site = next_button_site();
    let page2 = format!("{START}?p=2");
    let driver = MockDriver::new()
        .page(START, listing(&["/c/a"]).with("a.next", vec![MockElement::link("?p=2")]))
        .failing(&page2);

    let outcome = PaginationEngine::new(&site, &config)
        .run(&driver, START, &NoOpProgress)
        .await;

    assert_eq!(driver.navigations().len(), 2);
    assert_eq!(outcome.urls, vec!["https://example.ac.uk/c/a".to_string()]);
}
