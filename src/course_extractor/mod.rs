//! Course detail extraction
//!
//! Sends each discovered course page to a structured-extraction API, one
//! URL at a time, and collects the unique courses into a JSON file.

pub mod client;
pub mod runner;
pub mod types;

pub use client::{ExtractionClient, FirecrawlClient};
pub use runner::{extract_all_courses, spawn_extraction, write_courses_json};
pub use types::{CourseRecord, EXTRACTION_PROMPT, ExtractionEvent, extraction_schema};
