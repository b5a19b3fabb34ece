//! In-memory quote store.
//!
//! The store is an ordered collection of quote records, insertion order
//! preserved. It is the single shared mutable resource of the crate: all
//! mutation funnels through `append` and `update_category`, and higher
//! layers wrap it in `Arc<Mutex<..>>` to keep a single-writer discipline.
//!
//! The store never deduplicates. Duplicate texts can exist transiently
//! (bulk import allows them in); lookups use first-match semantics.

use crate::models::{QuoteRecord, ALL_CATEGORIES};

/// Ordered in-memory collection of quote records
#[derive(Debug, Clone, Default)]
pub struct QuoteStore {
    quotes: Vec<QuoteRecord>,
}

impl QuoteStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an existing collection, preserving order
    pub fn from_records(quotes: Vec<QuoteRecord>) -> Self {
        Self { quotes }
    }

    /// Number of records in the store
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Append a record at the end. Never deduplicates; validation is the
    /// caller's responsibility.
    pub fn append(&mut self, record: QuoteRecord) {
        self.quotes.push(record);
    }

    /// The full ordered collection
    pub fn all(&self) -> &[QuoteRecord] {
        &self.quotes
    }

    /// Records whose category equals `category`, in store order.
    ///
    /// The sentinel [`ALL_CATEGORIES`] returns the full collection. No
    /// match yields an empty vector, not an error.
    pub fn by_category(&self, category: &str) -> Vec<QuoteRecord> {
        if category == ALL_CATEGORIES {
            return self.quotes.clone();
        }
        self.quotes
            .iter()
            .filter(|q| q.category == category)
            .cloned()
            .collect()
    }

    /// First record whose text matches exactly, if any
    pub fn find_by_text(&self, text: &str) -> Option<&QuoteRecord> {
        self.quotes.iter().find(|q| q.text == text)
    }

    /// Overwrite the category of the first record whose text matches
    /// exactly. Returns true if a record was found and its category
    /// actually changed.
    pub fn update_category(&mut self, text: &str, category: &str) -> bool {
        match self.quotes.iter_mut().find(|q| q.text == text) {
            Some(record) if record.category != category => {
                record.category = category.to_string();
                true
            }
            _ => false,
        }
    }

    /// Distinct categories in first-appearance order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for quote in &self.quotes {
            if !categories.iter().any(|c| c == &quote.category) {
                categories.push(quote.category.clone());
            }
        }
        categories
    }
}
