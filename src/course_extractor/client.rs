//! Extraction API capability and its Firecrawl implementation

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

use crate::config::ExtractionOptions;
use crate::error::{ExtractionError, ExtractionResult};
use crate::utils::CHROME_USER_AGENT;

/// Structured-data extraction from web pages
#[async_trait]
pub trait ExtractionClient: Send + Sync {
    /// Extract data matching `schema` from `urls`
    ///
    /// `Ok(None)` means the call succeeded but produced no data.
    async fn extract(
        &self,
        urls: &[String],
        prompt: &str,
        schema: &Value,
    ) -> ExtractionResult<Option<Value>>;
}

/// Firecrawl `/v1/extract` client
///
/// Extraction is a job: the POST returns an id that is polled until the
/// job completes or fails. No overall bound is applied here; callers bound
/// each call.
pub struct FirecrawlClient {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
    poll_interval: Duration,
}

#[derive(Debug, Deserialize)]
struct StartResponse {
    #[serde(default)]
    success: bool,
    id: Option<String>,
    data: Option<Value>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    success: bool,
    status: Option<String>,
    data: Option<Value>,
    error: Option<String>,
}

impl FirecrawlClient {
    pub fn new(api_key: impl Into<String>, options: &ExtractionOptions) -> ExtractionResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(CHROME_USER_AGENT)
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            api_url: options.api_url.trim_end_matches('/').to_string(),
            poll_interval: options.poll_interval,
        })
    }

    /// Client keyed by `FIRECRAWL_API_KEY`, loading `.env` first
    pub fn from_env(options: &ExtractionOptions) -> ExtractionResult<Self> {
        // A missing .env file is fine; the variable may already be set
        let _ = dotenvy::dotenv();
        let api_key = std::env::var("FIRECRAWL_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ExtractionError::MissingApiKey)?;
        Self::new(api_key, options)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ExtractionResult<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ExtractionClient for FirecrawlClient {
    async fn extract(
        &self,
        urls: &[String],
        prompt: &str,
        schema: &Value,
    ) -> ExtractionResult<Option<Value>> {
        let body = json!({
            "urls": urls,
            "prompt": prompt,
            "schema": schema,
            "enableWebSearch": false,
        });

        let response = self
            .http
            .post(format!("{}/v1/extract", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let started: StartResponse = Self::decode(response).await?;

        if !started.success {
            return Err(ExtractionError::Api {
                status: 200,
                message: started.error.unwrap_or_else(|| "extract request rejected".to_string()),
            });
        }

        let Some(id) = started.id else {
            // Synchronous answer
            return Ok(started.data.filter(|d| !d.is_null()));
        };
        debug!("Extraction job {id} started for {} URL(s)", urls.len());

        loop {
            tokio::time::sleep(self.poll_interval).await;

            let response = self
                .http
                .get(format!("{}/v1/extract/{id}", self.api_url))
                .bearer_auth(&self.api_key)
                .send()
                .await?;
            let status: StatusResponse = Self::decode(response).await?;

            match status.status.as_deref() {
                Some("completed") => return Ok(status.data.filter(|d| !d.is_null())),
                Some("failed" | "cancelled") => {
                    return Err(ExtractionError::JobFailed {
                        id,
                        message: status.error.unwrap_or_else(|| "no reason given".to_string()),
                    });
                }
                _ if !status.success => {
                    return Err(ExtractionError::JobFailed {
                        id,
                        message: status.error.unwrap_or_else(|| "status request rejected".to_string()),
                    });
                }
                other => debug!("Extraction job {id} is {}", other.unwrap_or("pending")),
            }
        }
    }
}
