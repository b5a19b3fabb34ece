//! Sync client for the remote quote collection.
//!
//! This module provides the HTTP side of synchronization:
//! - Fetch the full remote collection (GET, JSON array)
//! - Push a single locally-created record (POST, one JSON object)
//!
//! The remote schema is adapted to the local one in [`RemoteQuote`]:
//! `title` maps to `text` and an absent category defaults to a fixed
//! server label. Network unavailability, non-2xx responses and malformed
//! bodies are all classified as `QuoteError::SyncUnavailable`; callers
//! treat them identically (skip this cycle, keep local state unchanged).

use std::time::Duration;

use reqwest::Client;

use crate::error::{QuoteError, QuoteResult};
use crate::models::{QuoteRecord, RemoteQuote};

/// HTTP client for the remote collection endpoint
#[derive(Clone)]
pub struct SyncClient {
    client: Client,
    base_url: String,
}

impl SyncClient {
    /// Create a new sync client with a bounded request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> QuoteResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteError::sync_unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// The configured endpoint URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the remote collection and adapt it to the local schema.
    ///
    /// Records are returned in the order the server sent them. Entries
    /// without a text-bearing field are dropped.
    pub async fn fetch_remote(&self) -> QuoteResult<Vec<QuoteRecord>> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| QuoteError::sync_unavailable(format!("fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(QuoteError::sync_unavailable(format!(
                "fetch failed with status {}",
                response.status()
            )));
        }

        let remote: Vec<RemoteQuote> = response
            .json()
            .await
            .map_err(|e| QuoteError::sync_unavailable(format!("malformed remote body: {}", e)))?;

        Ok(remote
            .into_iter()
            .filter_map(RemoteQuote::into_record)
            .collect())
    }

    /// Push one locally-created record to the remote collection.
    ///
    /// Callers treat this as fire-and-forget: a failure is logged, never
    /// retried and never surfaced to the end user. Duplicate pushes for
    /// the same text are possible and accepted.
    pub async fn push_record(&self, record: &QuoteRecord) -> QuoteResult<()> {
        let response = self
            .client
            .post(&self.base_url)
            .json(record)
            .send()
            .await
            .map_err(|e| QuoteError::sync_unavailable(format!("push failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(QuoteError::sync_unavailable(format!(
                "push failed with status {}",
                response.status()
            )));
        }

        Ok(())
    }
}
