//! Tests for the type-safe configuration builder pattern

use coursescrape::config::{PaginationTimings, ScrapeConfig};
use coursescrape::utils::{
    DEFAULT_OUTPUT_DIR, INDICATOR_WAIT_TIMEOUT_SECS, PAGE_LOAD_TIMEOUT_SECS,
    SELECTOR_WAIT_TIMEOUT_SECS,
};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

mod common;

#[test]
fn test_builder_requires_start_url() {
    // This should not compile if uncommented - start_url is required
    // let config = ScrapeConfig::builder().build();

    let config = ScrapeConfig::builder()
        .start_url("https://www.shu.ac.uk/courses")
        .build()
        .unwrap();

    assert_eq!(config.start_url(), "https://www.shu.ac.uk/courses");
}

#[test]
fn test_builder_optional_fields_have_defaults() {
    let config = ScrapeConfig::builder()
        .start_url("https://www.shu.ac.uk/courses")
        .build()
        .unwrap();

    assert_eq!(config.output_dir(), &PathBuf::from(DEFAULT_OUTPUT_DIR));
    assert!(config.headless());
    assert_eq!(config.page_load_timeout_secs(), PAGE_LOAD_TIMEOUT_SECS);
    assert_eq!(
        config.selector_wait_timeout(),
        Duration::from_secs(SELECTOR_WAIT_TIMEOUT_SECS)
    );
    assert_eq!(
        config.indicator_wait_timeout(),
        Duration::from_secs(INDICATOR_WAIT_TIMEOUT_SECS)
    );
    assert_eq!(config.university_id(), 1);
    assert!(!config.apply_filters());
    assert!(config.chrome_data_dir().is_none());
    assert_eq!(config.timings(), &PaginationTimings::default());
}

#[test]
fn test_builder_with_all_optional_fields() {
    let temp_dir = TempDir::new().unwrap();
    let timings = PaginationTimings {
        accordion_settle: Duration::from_millis(10),
        click_settle: Duration::from_millis(20),
        page_numbers_delay: Duration::ZERO,
        url_params_delay: Duration::ZERO,
        next_button_delay: Duration::from_millis(30),
        consent_settle: Duration::ZERO,
    };

    let config = ScrapeConfig::builder()
        .start_url("https://www.coventry.ac.uk/search")
        .output_dir(temp_dir.path())
        .page_load_timeout_secs(15)
        .selector_wait_timeout_secs(5)
        .indicator_wait_timeout_secs(7)
        .university_id(99)
        .apply_filters(true)
        .chrome_data_dir(temp_dir.path().join("profile"))
        .timings(timings)
        .build()
        .unwrap();

    assert_eq!(config.output_dir(), &temp_dir.path().to_path_buf());
    assert_eq!(config.page_load_timeout_secs(), 15);
    assert_eq!(config.selector_wait_timeout(), Duration::from_secs(5));
    assert_eq!(config.indicator_wait_timeout(), Duration::from_secs(7));
    assert_eq!(config.university_id(), 99);
    assert!(config.apply_filters());
    assert_eq!(
        config.chrome_data_dir(),
        Some(&temp_dir.path().join("profile"))
    );
    assert_eq!(config.timings(), &timings);
}

#[test]
fn test_builder_adds_missing_scheme() {
    let config = ScrapeConfig::builder()
        .start_url("  www.abertay.ac.uk/courses  ")
        .build()
        .unwrap();

    assert_eq!(config.start_url(), "https://www.abertay.ac.uk/courses");
}

#[test]
fn test_builder_rejects_unparseable_url() {
    let result = ScrapeConfig::builder().start_url("https://").build();
    assert!(result.is_err());
}

#[cfg(debug_assertions)]
#[test]
fn test_headed_mode_allowed_in_debug_builds() {
    let config = ScrapeConfig::builder()
        .start_url("https://www.shu.ac.uk/courses")
        .headless(false)
        .build()
        .unwrap();

    assert!(!config.headless());
}
