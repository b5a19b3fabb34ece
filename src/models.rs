//! Data models for QuoteSync.
//!
//! This module defines the core entity, QuoteRecord, and the wire schema
//! used by remote collections. Identity for merge purposes is the `text`
//! field: two records are "the same quote" iff their texts are equal,
//! exact and case-sensitive. There is no separate identifier.

use serde::{Deserialize, Serialize};

/// Sentinel category meaning "no filter" for category queries.
pub const ALL_CATEGORIES: &str = "all";

/// Category assigned to remote records that arrive without one.
pub const SERVER_CATEGORY: &str = "Server";

/// A quote with its category.
///
/// `text` is identity-bearing and treated as immutable; `category` is the
/// only field that reconciliation may rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// The quote text (non-empty, trimmed by the caller)
    pub text: String,
    /// The category label (non-empty, trimmed by the caller)
    pub category: String,
}

impl QuoteRecord {
    /// Create a new quote record
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// One entry of the remote collection as it appears on the wire.
///
/// The remote schema need not match [`QuoteRecord`]: the text may live in a
/// `title` field, and the category may be absent entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteQuote {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl RemoteQuote {
    /// Adapt the wire shape to the local schema.
    ///
    /// Prefers `text`, falls back to `title`. An absent category defaults to
    /// [`SERVER_CATEGORY`]. Entries with no text-bearing field at all (or a
    /// blank one) have no identity and are dropped.
    pub fn into_record(self) -> Option<QuoteRecord> {
        let text = self.text.or(self.title)?;
        if text.trim().is_empty() {
            return None;
        }
        let category = self
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| SERVER_CATEGORY.to_string());
        Some(QuoteRecord { text, category })
    }
}

/// The fixed default set used to seed an empty collection on first run.
pub fn default_quotes() -> Vec<QuoteRecord> {
    vec![
        QuoteRecord::new(
            "The only limit to our realization of tomorrow is our doubts of today.",
            "Motivational",
        ),
        QuoteRecord::new(
            "Life is really simple, but we insist on making it complicated.",
            "Life",
        ),
        QuoteRecord::new(
            "To be yourself in a world that is constantly trying to make you something else is the greatest accomplishment.",
            "Wisdom",
        ),
    ]
}
