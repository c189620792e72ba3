//! Built-in institution table

use super::resolvers::UrlResolver;
use super::types::{MatchMode, PageHook, SiteSpec};

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn site(domain: &str, folder_name: &str, course_selector: &str, pagination_type: &str) -> SiteSpec {
    SiteSpec {
        domain: domain.to_string(),
        folder_name: folder_name.to_string(),
        course_selector: course_selector.to_string(),
        pagination_type: pagination_type.to_string(),
        ..SiteSpec::default()
    }
}

/// Every institution the scraper ships with, in registry order
#[must_use]
pub fn builtin_specs() -> Vec<SiteSpec> {
    vec![
        SiteSpec {
            pagination_selector: Some("a.next:not(.disabled)".to_string()),
            wait_selector: Some("h3 > a[href*='redirect']".to_string()),
            url_resolution: Some(UrlResolver::Funnelback),
            filter_keywords: keywords(&["/postgraduate-taught/", "/postgraduate-research/", "undergraduate"]),
            match_mode: MatchMode::Segment,
            ..site("abertay.ac.uk", "abertay", "h3 > a[href*='redirect']", "next_button")
        },
        SiteSpec {
            pagination_selector: Some("div.pagination-controls a[title='Next']".to_string()),
            url_resolution: Some(UrlResolver::Derby),
            filter_keywords: keywords(&["undergraduate", "postgraduate"]),
            ..site("derby.ac.uk", "derby", "div.course-teaser-heading a", "next_button")
        },
        site("ucb.ac.uk", "ucb", "a[href*='/study/courses/']", "single_page"),
        SiteSpec {
            pagination_selector: Some(
                "a.hw_course-search__pagination-link--next, a[aria-label='Next']".to_string(),
            ),
            wait_selector: Some("td.hw_course-search__subject".to_string()),
            url_resolution: Some(UrlResolver::HeriotWatt),
            ..site(
                "hw.ac.uk",
                "hw",
                "td.hw_course-search__subject a[href*='/s/redirect']",
                "next_button",
            )
        },
        SiteSpec {
            pagination_param: Some("start_rank".to_string()),
            pagination_increment: Some(20),
            pagination_start: Some(1),
            wait_selector: Some(".cmp-funnelback-search__results-item-title".to_string()),
            url_resolution: Some(UrlResolver::Canterbury),
            before_extract: Some(PageHook::DismissConsent),
            ..site(
                "canterbury.ac.nz",
                "canterbury",
                ".cmp-funnelback-search__results-item-title a.cmp-button[href*='redirect']",
                "url_params",
            )
        },
        SiteSpec {
            pagination_selector: Some("div.pagination__item--next a[rel~='next']".to_string()),
            wait_selector: Some("div.listing-item__header.test".to_string()),
            ..site("otago.ac.nz", "otago", "div.listing-item__header.test a[data-live-url]", "next_button")
        },
        SiteSpec {
            pagination_selector: Some("button.pagination__next-button:not([disabled])".to_string()),
            ..site("mcphs.edu", "mcphs", ".generic-card__heading > a", "next_button")
        },
        SiteSpec {
            pagination_param: Some("page".to_string()),
            special_logic: Some("generate_slug_from_title".to_string()),
            ..site("ycp.edu", "york", "div[x-data*='open'] h2", "url_params")
        },
        SiteSpec {
            pagination_selector: Some("button.levelheader.accordion_title".to_string()),
            wait_selector: Some("button.levelheader.accordion_title".to_string()),
            filter_keywords: keywords(&["undergraduate", "postgraduate", "foundation"]),
            ..site("buckingham.ac.uk", "buckingham", ".courses .courselist-internal > a[href]", "accordion")
        },
        SiteSpec {
            pagination_selector: Some(
                "a[data-test-id='searchstax-pagination-next']:not(.disabled)".to_string(),
            ),
            wait_selector: Some(".card__content".to_string()),
            ..site("staffs.ac.uk", "staffs", "h2.card__title > a.link--stretched", "next_button")
        },
        SiteSpec {
            pagination_selector: Some(
                "button.page-link.course-search-page-link[aria-label='Next']:not([disabled])"
                    .to_string(),
            ),
            wait_selector: Some(".course-search-result".to_string()),
            match_mode: MatchMode::Segment,
            ..site("beds.ac.uk", "bedford", ".course-search-result a[href^='/courses/']", "next_button")
        },
        SiteSpec {
            pagination_selector: Some(
                "nav[aria-label='Pagination Navigation'] li.button > a[rel='next']".to_string(),
            ),
            filter_keywords: keywords(&["foundation", "undergraduate", "postgraduate"]),
            match_mode: MatchMode::Segment,
            ..site("coventry.ac.uk", "coventry", "p.h5.mtm > a", "next_button")
        },
        SiteSpec {
            pagination_selector: Some(".m-pagination".to_string()),
            pagination_param: Some("page".to_string()),
            pagination_extract_pattern: Some(r"of\D*(\d+)".to_string()),
            zero_based_pages: true,
            ..site("shu.ac.uk", "shu", "a.m-snippet__link", "page_numbers")
        },
        SiteSpec {
            pagination_selector: Some("a.pagination__link--next".to_string()),
            wait_selector: Some("ul.search-result-list".to_string()),
            match_mode: MatchMode::Segment,
            ..site(
                "le.ac.uk",
                "leac",
                "li.search-result-list__item h4.search-result-list__title a",
                "next_button",
            )
        },
        SiteSpec {
            pagination_selector: Some(
                "li.uos-pager__item--next a.uos-pager__link[rel='next']".to_string(),
            ),
            filter_keywords: keywords(&["undergraduate", "postgraduate"]),
            match_mode: MatchMode::Segment,
            ..site("salford.ac.uk", "salford", "a.uos-search-card__link", "next_button")
        },
        SiteSpec {
            wait_selector: Some(".search-result-card".to_string()),
            filter_keywords: keywords(&["postgraduate", "undergraduate"]),
            match_mode: MatchMode::Segment,
            ..site("wrexham.ac.uk", "wrexham", ".search-result-card h2 a[href]", "single_page")
        },
        SiteSpec {
            pagination_selector: Some(
                "div.col.pagination-control[data-t4-ajax-link='normal']".to_string(),
            ),
            pagination_param: Some("page".to_string()),
            ..site("uca.ac.uk", "uca", "div.col-12 > a[href^='/study/courses/']", "page_numbers")
        },
    ]
}

/// Human-readable institution name for a site folder
#[must_use]
pub fn builtin_display_name(folder_name: &str) -> Option<&'static str> {
    let name = match folder_name {
        "abertay" => "Abertay University",
        "derby" => "University of Derby",
        "ucb" => "University College Birmingham",
        "hw" => "Heriot-Watt University",
        "canterbury" => "University of Canterbury",
        "otago" => "University of Otago",
        "mcphs" => "MCPHS University",
        "york" => "York College of Pennsylvania",
        "buckingham" => "University of Buckingham",
        "staffs" => "Staffordshire University",
        "bedford" => "University of Bedfordshire",
        "coventry" => "Coventry University",
        "shu" => "Sheffield Hallam University",
        "leac" => "University of Leicester",
        "salford" => "University of Salford",
        "wrexham" => "Wrexham University",
        "uca" => "University for the Creative Arts",
        _ => return None,
    };
    Some(name)
}
