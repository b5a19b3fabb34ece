//! Input validation for QuoteSync.
//!
//! Validators for user-supplied quote fields. All validators trim their
//! input and return the trimmed value; emptiness is checked after trimming.
//! Validation happens at the call site of a manual add, never inside the
//! store itself.

use crate::error::{QuoteError, QuoteResult};

// Limits
pub const MAX_QUOTE_TEXT_LENGTH: usize = 10_000;
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Validate quote text for a manual add.
///
/// Text must be non-empty after stripping whitespace and no longer than
/// MAX_QUOTE_TEXT_LENGTH characters. Returns the trimmed text.
pub fn validate_quote_text(text: &str) -> QuoteResult<String> {
    let stripped = text.trim();

    if stripped.is_empty() {
        return Err(QuoteError::validation(
            "text",
            "cannot be empty or whitespace only",
        ));
    }

    if stripped.len() > MAX_QUOTE_TEXT_LENGTH {
        return Err(QuoteError::validation(
            "text",
            format!(
                "cannot exceed {} characters (got {})",
                MAX_QUOTE_TEXT_LENGTH,
                stripped.len()
            ),
        ));
    }

    Ok(stripped.to_string())
}

/// Validate a category label for a manual add.
///
/// Categories must be non-empty after stripping whitespace and no longer
/// than MAX_CATEGORY_LENGTH characters. Returns the trimmed label.
pub fn validate_category(category: &str) -> QuoteResult<String> {
    let stripped = category.trim();

    if stripped.is_empty() {
        return Err(QuoteError::validation(
            "category",
            "cannot be empty or whitespace only",
        ));
    }

    if stripped.len() > MAX_CATEGORY_LENGTH {
        return Err(QuoteError::validation(
            "category",
            format!(
                "cannot exceed {} characters (got {})",
                MAX_CATEGORY_LENGTH,
                stripped.len()
            ),
        ));
    }

    Ok(stripped.to_string())
}
