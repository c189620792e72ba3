//! Sequential per-URL extraction with a hard bound on every call

use log::{info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::client::ExtractionClient;
use super::types::{CourseRecord, EXTRACTION_PROMPT, ExtractionEvent, extraction_schema};
use crate::config::ExtractionOptions;
use crate::error::ExtractionResult;

/// Extract every URL in order, streaming progress as events.
///
/// Each call runs on its own task bounded by `options.timeout`. A call that
/// overruns is aborted and reported as [`ExtractionEvent::Timeout`]; the
/// next URL starts immediately. After a call that returned data the runner
/// pauses for `options.request_delay`.
pub fn spawn_extraction<C>(
    client: Arc<C>,
    urls: Vec<String>,
    options: ExtractionOptions,
) -> (mpsc::UnboundedReceiver<ExtractionEvent>, JoinHandle<()>)
where
    C: ExtractionClient + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        run_extraction(client, urls, options, tx).await;
    });
    (rx, handle)
}

async fn run_extraction<C>(
    client: Arc<C>,
    urls: Vec<String>,
    options: ExtractionOptions,
    tx: mpsc::UnboundedSender<ExtractionEvent>,
) where
    C: ExtractionClient + 'static,
{
    let schema = Arc::new(extraction_schema());
    let total = urls.len();

    for (i, url) in urls.into_iter().enumerate() {
        // A dropped receiver is not an error; the run just goes unobserved
        let _ = tx.send(ExtractionEvent::Started {
            index: i + 1,
            total,
            url: url.clone(),
        });

        let call_client = Arc::clone(&client);
        let call_schema = Arc::clone(&schema);
        let call_urls = vec![url.clone()];
        let mut call = tokio::spawn(async move {
            call_client
                .extract(&call_urls, EXTRACTION_PROMPT, &call_schema)
                .await
        });

        let data = match tokio::time::timeout(options.timeout, &mut call).await {
            Err(_) => {
                call.abort();
                let _ = tx.send(ExtractionEvent::Timeout {
                    url,
                    limit: options.timeout,
                });
                continue;
            }
            Ok(Err(join_error)) => {
                let _ = tx.send(ExtractionEvent::Failed {
                    url,
                    message: format!("extraction task failed: {join_error}"),
                });
                continue;
            }
            Ok(Ok(Err(e))) => {
                let _ = tx.send(ExtractionEvent::Failed {
                    url,
                    message: e.to_string(),
                });
                continue;
            }
            Ok(Ok(Ok(None))) => {
                let _ = tx.send(ExtractionEvent::Empty { url });
                continue;
            }
            Ok(Ok(Ok(Some(data)))) => data,
        };

        let items = match data {
            Value::Array(items) => items,
            single => vec![single],
        };
        for item in items {
            let Value::Object(object) = item else {
                continue;
            };
            match CourseRecord::from_object(object, &url) {
                Ok(record) => {
                    let _ = tx.send(ExtractionEvent::Record(record));
                }
                Err(e) => {
                    let _ = tx.send(ExtractionEvent::Failed {
                        url: url.clone(),
                        message: format!("malformed course record: {e}"),
                    });
                }
            }
        }

        tokio::time::sleep(options.request_delay).await;
    }
}

/// Extract all URLs and return the unique courses, also written to
/// `output_file` as a pretty-printed JSON array
///
/// Records are unique by trimmed, lower-cased course name; unnamed records
/// are dropped. Per-URL failures are logged and skipped.
pub async fn extract_all_courses<C>(
    client: Arc<C>,
    urls: Vec<String>,
    output_file: &Path,
    options: ExtractionOptions,
) -> ExtractionResult<Vec<CourseRecord>>
where
    C: ExtractionClient + 'static,
{
    let (mut events, handle) = spawn_extraction(client, urls, options);

    let mut seen = HashSet::new();
    let mut courses = Vec::new();
    while let Some(event) = events.recv().await {
        match &event {
            ExtractionEvent::Started { .. } | ExtractionEvent::Record(_) => info!("{event}"),
            _ => warn!("{event}"),
        }
        if let ExtractionEvent::Record(record) = event
            && let Some(key) = record.dedupe_key()
            && seen.insert(key)
        {
            courses.push(record);
        }
    }

    if let Err(e) = handle.await {
        warn!("Extraction runner ended abnormally: {e}");
    }

    write_courses_json(output_file, &courses)?;
    info!("Saved {} unique course(s) to {}", courses.len(), output_file.display());
    Ok(courses)
}

/// Write records as a pretty-printed JSON array
pub fn write_courses_json(path: &Path, courses: &[CourseRecord]) -> ExtractionResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(courses)?;
    std::fs::write(path, json)?;
    Ok(())
}
