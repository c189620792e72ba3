//! Timeout wrapper for browser operations

use anyhow::Result;
use std::future::Future;
use std::time::Duration;

/// Run a fallible browser operation under a hard time bound.
///
/// An elapsed bound is reported as an error naming `operation_name`, so a
/// hung navigation and a failed one are handled by the same caller path.
pub async fn with_timeout<F, T>(operation: F, timeout: Duration, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!(
            "{operation_name} timeout after {:.1} seconds",
            timeout.as_secs_f64()
        )),
    }
}
