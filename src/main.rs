// coursescrape: discover university course links and extract course details.
//
// `links` crawls a registered listing page and writes the course URLs as CSV,
// `extract` sends course pages to the extraction API and writes JSON, and
// `sites` lists the registered institutions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursescrape::export::read_records;
use coursescrape::site_registry::site_display_name;
use coursescrape::utils::{
    DEFAULT_COURSES_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_UNIVERSITY_ID, EXTRACTION_TIMEOUT_SECS,
    is_valid_url,
};
use coursescrape::{
    ExtractionOptions, FirecrawlClient, ScrapeConfig, ScrapeError, SiteRegistry,
    extract_all_courses, scrape_courses,
};

#[derive(Parser)]
#[command(name = "coursescrape")]
#[command(about = "University course-catalog link discovery and course detail extraction")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover every course link on a registered university listing
    Links {
        /// Listing page URL
        url: String,
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
        /// Show the browser window (debug builds only)
        #[arg(long)]
        headed: bool,
        /// Also write the keyword-filtered CSV
        #[arg(long)]
        filter: bool,
        /// JSON file of extra site configurations
        #[arg(long)]
        sites_file: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_UNIVERSITY_ID)]
        university_id: u32,
    },

    /// Extract structured details from course pages
    Extract {
        /// Course page URLs
        urls: Vec<String>,
        /// CSV written by `links`, or a text file with one URL per line
        #[arg(long)]
        urls_file: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_COURSES_FILE)]
        output: PathBuf,
        /// Bound on each extraction call
        #[arg(long, default_value_t = EXTRACTION_TIMEOUT_SECS)]
        timeout_secs: u64,
    },

    /// List registered universities
    Sites {
        #[arg(long)]
        sites_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(scrape_error) = e.downcast_ref::<ScrapeError>()
                && scrape_error.is_user_error()
            {
                eprintln!("{scrape_error}");
                return ExitCode::from(2);
            }
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Links {
            url,
            output_dir,
            headed,
            filter,
            sites_file,
            university_id,
        } => {
            let registry = load_registry(sites_file.as_deref())?;
            let config = ScrapeConfig::builder()
                .start_url(url.as_str())
                .output_dir(output_dir)
                .headless(!headed)
                .apply_filters(filter)
                .university_id(university_id)
                .build()
                .map_err(|e| ScrapeError::InvalidUrl {
                    url: url.clone(),
                    message: format!("{e:#}"),
                })?;

            let outcome = scrape_courses(&config, &registry).await?;
            println!(
                "Found {} course URL(s) for {} across {} page(s)",
                outcome.count,
                outcome.university_name,
                outcome.pages_visited.len()
            );
            println!("Saved to {}", outcome.output_path.display());
            if let Some(filtered) = outcome.filtered_path {
                println!("Filtered links saved to {}", filtered.display());
            }
        }

        Commands::Extract {
            urls,
            urls_file,
            output,
            timeout_secs,
        } => {
            let mut all_urls = urls;
            if let Some(path) = urls_file {
                all_urls.extend(read_url_list(&path)?);
            }
            let all_urls = coursescrape::dedupe(all_urls.into_iter().filter(|u| is_valid_url(u)));
            if all_urls.is_empty() {
                anyhow::bail!("No course URLs given");
            }

            let options = ExtractionOptions {
                timeout: Duration::from_secs(timeout_secs),
                ..ExtractionOptions::default()
            };
            let client = Arc::new(FirecrawlClient::from_env(&options)?);
            info!("Extracting {} course page(s)", all_urls.len());

            let courses = extract_all_courses(client, all_urls, &output, options).await?;
            println!("Extracted {} unique course(s) to {}", courses.len(), output.display());
        }

        Commands::Sites { sites_file } => {
            let registry = load_registry(sites_file.as_deref())?;
            for site in registry.sites() {
                println!(
                    "{:<20} {:<14} {:<13} {}",
                    site.domain(),
                    site.folder_name(),
                    site.pagination().tag(),
                    site_display_name(site)
                );
            }
        }
    }
    Ok(())
}

fn load_registry(sites_file: Option<&Path>) -> Result<SiteRegistry> {
    let mut registry = SiteRegistry::builtin();
    if let Some(path) = sites_file {
        registry
            .merge_file(path)
            .with_context(|| format!("Failed to load sites file {}", path.display()))?;
    }
    Ok(registry)
}

/// URLs from a `links` CSV or a plain one-per-line list
fn read_url_list(path: &Path) -> Result<Vec<String>> {
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")) {
        let records = read_records(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(records.into_iter().map(|r| r.url).collect());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
