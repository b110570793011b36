//! HTTP client for the Sanity query API.

use std::time::Duration;

use bcb_core::{AppConfig, Product};
use reqwest::{Client, Url};

use crate::error::CatalogError;
use crate::normalize::normalize_products;
use crate::retry::retry_with_backoff;
use crate::types::QueryResponse;

/// GROQ query for every product document, featured first then by name.
pub const PRODUCT_QUERY: &str = r#"*[_type == "product"] | order(featured desc, name asc) {
  _id, name, category, price, sizes, colors, description, featured,
  "image": image.asset->url
}"#;

/// Seconds to wait on a 429 that carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Builds the API host for a Sanity project.
///
/// The CDN host serves cached reads; the live host bypasses the cache.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidBaseUrl`] if `project_id` is blank or
/// contains anything other than ASCII letters, digits and `-`.
pub fn project_base_url(project_id: &str, use_cdn: bool) -> Result<String, CatalogError> {
    let valid = !project_id.is_empty()
        && project_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid {
        return Err(CatalogError::InvalidBaseUrl {
            url: project_id.to_owned(),
            reason: "project id must be non-empty ASCII alphanumerics".to_owned(),
        });
    }
    let host = if use_cdn { "apicdn.sanity.io" } else { "api.sanity.io" };
    Ok(format!("https://{project_id}.{host}"))
}

/// Client for `GET {base}/v{api_version}/data/query/{dataset}?query=...`.
///
/// Transient errors (network failures, 429, 5xx) are retried with
/// exponential back-off up to `max_retries` additional attempts.
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: Client,
    query_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ContentClient {
    /// Creates a client for the project, dataset and retry policy in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] for an unusable project id or
    /// dataset, or [`CatalogError::Http`] if the `reqwest::Client` cannot be
    /// built.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let base_url = project_base_url(&config.sanity_project_id, config.sanity_use_cdn)?;
        Self::with_base_url(
            &base_url,
            &config.sanity_dataset,
            &config.sanity_api_version,
            config.request_timeout_secs,
            &config.user_agent,
            config.feed_max_retries,
            config.feed_retry_backoff_ms,
        )
    }

    /// Creates a client against an explicit API host. Used by tests to point
    /// at a local mock server.
    ///
    /// # Errors
    ///
    /// Same as [`ContentClient::from_config`].
    pub fn with_base_url(
        base_url: &str,
        dataset: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, CatalogError> {
        let query_url = Self::build_query_url(base_url, dataset, api_version)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            query_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// The query endpoint this client talks to, without the `query` parameter.
    #[must_use]
    pub fn query_url(&self) -> &str {
        self.query_url.as_str()
    }

    /// Fetches and normalizes every product document. Records that fail
    /// normalization are skipped.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`ContentClient::fetch_query`].
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let records = self.fetch_query(PRODUCT_QUERY).await?;
        tracing::debug!(records = records.len(), "product query returned");
        Ok(normalize_products(records))
    }

    /// Runs a GROQ query and returns the raw `result` array.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`] — HTTP 429 after all retries.
    /// - [`CatalogError::UnexpectedStatus`] — any other non-2xx status (5xx retried).
    /// - [`CatalogError::Http`] — network or TLS failure after all retries.
    /// - [`CatalogError::Deserialize`] — body is not a query envelope.
    /// - [`CatalogError::MissingResult`] — envelope has a `null` result.
    pub async fn fetch_query(&self, query: &str) -> Result<Vec<serde_json::Value>, CatalogError> {
        let mut url = self.query_url.clone();
        url.query_pairs_mut().append_pair("query", query);

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    return Err(CatalogError::RateLimited { retry_after_secs });
                }

                if !status.is_success() {
                    return Err(CatalogError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: self.query_url.to_string(),
                    });
                }

                let body = response.text().await?;
                let parsed = serde_json::from_str::<QueryResponse>(&body).map_err(|e| {
                    CatalogError::Deserialize {
                        context: format!("query response from {}", self.query_url),
                        source: e,
                    }
                })?;
                if let Some(ms) = parsed.ms {
                    tracing::debug!(ms, "content backend query time");
                }

                parsed.result.ok_or_else(|| CatalogError::MissingResult {
                    url: self.query_url.to_string(),
                })
            }
        })
        .await
    }

    /// Joins `v{api_version}/data/query/{dataset}` onto `base_url`.
    fn build_query_url(
        base_url: &str,
        dataset: &str,
        api_version: &str,
    ) -> Result<Url, CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: reason.to_owned(),
        };

        let dataset = dataset.trim();
        if dataset.is_empty() {
            return Err(invalid("dataset must not be empty"));
        }
        let api_version = api_version.trim();
        if api_version.is_empty() {
            return Err(invalid("api version must not be empty"));
        }
        let version = if api_version.starts_with('v') {
            api_version.to_owned()
        } else {
            format!("v{api_version}")
        };

        let mut url = Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base"))?
            .pop_if_empty()
            .push(&version)
            .push("data")
            .push("query")
            .push(dataset);
        Ok(url)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
