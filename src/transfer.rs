//! Bulk import and export of the quote collection.
//!
//! The interchange format is a JSON array of `{text, category}` objects,
//! identical for both directions. Import is strict about the top-level
//! shape: anything other than an array of such objects is an
//! `ImportFormat` error and nothing is imported. Import does not
//! deduplicate; duplicate texts are allowed in and are resolved (if ever)
//! by reconciliation's first-match rule.

use crate::error::{QuoteError, QuoteResult};
use crate::models::QuoteRecord;

/// Parse a bulk import payload.
///
/// Returns every record in payload order, unfiltered. Fails with
/// `ImportFormat` if the payload does not parse, is not a JSON array, or
/// contains elements that are not `{text, category}` string pairs.
pub fn parse_import(payload: &str) -> QuoteResult<Vec<QuoteRecord>> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| QuoteError::import_format(format!("invalid JSON: {}", e)))?;

    if !value.is_array() {
        return Err(QuoteError::import_format(
            "top-level shape must be a JSON array",
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| QuoteError::import_format(format!("invalid quote entry: {}", e)))
}

/// Serialize the full collection as a pretty-printed JSON array
pub fn export_pretty(quotes: &[QuoteRecord]) -> QuoteResult<String> {
    Ok(serde_json::to_string_pretty(quotes)?)
}
