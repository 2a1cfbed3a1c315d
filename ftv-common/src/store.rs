//! Remote record store client
//!
//! HTTP client for the hosted worker table (a PostgREST-style endpoint:
//! equality predicates as query parameters, exact counts via the
//! `Content-Range` header, partial updates by key). The rest of the crate
//! only ever sees the loaded `Vec<WorkerRecord>`, so nothing outside this
//! module depends on the transport.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

use crate::model::WorkerRecord;

/// Rows fetched per page during `load_all`
pub const PAGE_SIZE: usize = 1000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Store client errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No row matched id {0}")]
    NoRowUpdated(i64),

    #[error("Invalid store configuration: {0}")]
    Config(String),
}

/// Result of a best-effort full-table load
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Everything accumulated before exhaustion or the first failure
    pub records: Vec<WorkerRecord>,
    /// False when a page fetch failed and paging was abandoned
    pub complete: bool,
}

/// Client for the hosted worker table
pub struct WorkerStore {
    http: reqwest::Client,
    base_url: String,
    table: String,
}

impl WorkerStore {
    /// Build a client for `{base_url}/{table}` authenticating with `api_key`
    pub fn new(base_url: &str, api_key: &str, table: &str) -> Result<Self, StoreError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let key_value = reqwest::header::HeaderValue::from_str(api_key)
            .map_err(|e| StoreError::Config(format!("invalid api key: {}", e)))?;
        let bearer = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| StoreError::Config(format!("invalid api key: {}", e)))?;
        headers.insert("apikey", key_value);
        headers.insert(reqwest::header::AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            table: table.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, self.table)
    }

    /// Fetch the full table in sequential pages of [`PAGE_SIZE`] rows.
    ///
    /// Stops on a short or empty page. A failed page abandons further paging
    /// and returns whatever was accumulated, flagged incomplete; callers must
    /// treat such a result as a partial view of the table. No retries, one
    /// outstanding request at a time.
    pub async fn load_all(&self) -> LoadOutcome {
        let mut records: Vec<WorkerRecord> = Vec::new();
        let mut offset = 0usize;

        loop {
            match self.fetch_page(offset).await {
                Ok(page) => {
                    let fetched = page.len();
                    tracing::debug!(offset, fetched, "Fetched worker page");
                    records.extend(page);

                    if fetched < PAGE_SIZE {
                        break;
                    }
                    offset += PAGE_SIZE;
                }
                Err(e) => {
                    tracing::warn!(
                        offset,
                        accumulated = records.len(),
                        error = %e,
                        "Page fetch failed; returning partial collection"
                    );
                    return LoadOutcome {
                        records,
                        complete: false,
                    };
                }
            }
        }

        tracing::info!(total = records.len(), "Loaded worker table");
        LoadOutcome {
            records,
            complete: true,
        }
    }

    async fn fetch_page(&self, offset: usize) -> Result<Vec<WorkerRecord>, StoreError> {
        let params = [
            ("select", "*".to_string()),
            ("order", "id.asc".to_string()),
            ("offset", offset.to_string()),
            ("limit", PAGE_SIZE.to_string()),
        ];

        let response = self
            .http
            .get(self.endpoint())
            .query(&params)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), text));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    /// Exact row count with optional equality predicates
    pub async fn count(
        &self,
        factory: Option<&str>,
        status: Option<bool>,
    ) -> Result<i64, StoreError> {
        let mut params = vec![("select", "id".to_string()), ("limit", "1".to_string())];
        if let Some(factory) = factory {
            params.push(("factory", format!("eq.{}", factory)));
        }
        if let Some(status) = status {
            params.push(("status", format!("eq.{}", status)));
        }

        let response = self
            .http
            .head(self.endpoint())
            .query(&params)
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status_code = response.status();
        if !status_code.is_success() {
            return Err(StoreError::Api(status_code.as_u16(), String::new()));
        }

        let range = response
            .headers()
            .get(reqwest::header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| StoreError::Parse("missing Content-Range header".to_string()))?;

        parse_content_range_total(range)
    }

    /// Set the verified flag and timestamp on exactly one record.
    ///
    /// Returns the updated representation so callers never show a record as
    /// verified unless the remote write was confirmed. With
    /// `only_if_unverified` the update carries a `status = false` predicate,
    /// turning it into a compare-and-swap that loses quietly to a concurrent
    /// verification (surfaced as [`StoreError::NoRowUpdated`]).
    pub async fn mark_verified(
        &self,
        id: i64,
        when: DateTime<Utc>,
        only_if_unverified: bool,
    ) -> Result<WorkerRecord, StoreError> {
        let mut params = vec![("id", format!("eq.{}", id))];
        if only_if_unverified {
            params.push(("status", "eq.false".to_string()));
        }

        let response = self
            .http
            .patch(self.endpoint())
            .query(&params)
            .header("Prefer", "return=representation")
            .json(&json!({
                "status": true,
                "verified_date": when.to_rfc3339(),
            }))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), text));
        }

        let mut rows: Vec<WorkerRecord> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        match rows.pop() {
            Some(record) => {
                tracing::info!(id, "Marked worker verified");
                Ok(record)
            }
            None => Err(StoreError::NoRowUpdated(id)),
        }
    }
}

/// Parse the total from a `Content-Range` value such as `0-24/3573` or `*/0`
fn parse_content_range_total(value: &str) -> Result<i64, StoreError> {
    value
        .rsplit('/')
        .next()
        .and_then(|total| total.parse::<i64>().ok())
        .ok_or_else(|| StoreError::Parse(format!("unparseable Content-Range: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-24/3573").unwrap(), 3573);
        assert_eq!(parse_content_range_total("*/0").unwrap(), 0);
        assert!(parse_content_range_total("bogus").is_err());
    }

    #[test]
    fn test_client_creation() {
        let store = WorkerStore::new("https://example.test/rest/v1/", "key", "workers");
        assert!(store.is_ok());
        assert_eq!(
            store.unwrap().endpoint(),
            "https://example.test/rest/v1/workers"
        );
    }

    #[test]
    fn test_client_rejects_invalid_api_key() {
        let store = WorkerStore::new("https://example.test", "bad\nkey", "workers");
        assert!(matches!(store, Err(StoreError::Config(_))));
    }
}
