//! Reconciliation of local and remote quote collections.
//!
//! The merge identifies records by exact quote text. For each remote
//! record, in the order the server returned them:
//!
//! 1. No local record with that text: append the remote record (the
//!    server is the sole source for genuinely new quotes).
//! 2. A local record exists with a different category: overwrite the
//!    local category in place. Remote always wins on conflict; there is
//!    no three-way merge, no timestamp comparison, no user prompt.
//! 3. A local record exists with the same category: no-op.
//!
//! Local records with no remote counterpart are left untouched; pushing
//! them is a separate, creation-time concern. When duplicate texts exist
//! locally, the first match is the one consulted and updated.

use crate::models::QuoteRecord;
use crate::store::QuoteStore;

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Remote records appended because their text was unknown locally
    pub added: usize,
    /// Local records whose category was overwritten by the remote value
    pub updated: usize,
}

impl ReconcileOutcome {
    /// Whether the pass mutated the store at all. False means no durable
    /// save and no UI refresh are needed.
    pub fn changed(&self) -> bool {
        self.added > 0 || self.updated > 0
    }
}

/// Merge a fetched remote collection into the local store.
pub fn reconcile(store: &mut QuoteStore, remote: Vec<QuoteRecord>) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    for record in remote {
        if store.find_by_text(&record.text).is_none() {
            store.append(record);
            outcome.added += 1;
        } else if store.update_category(&record.text, &record.category) {
            outcome.updated += 1;
        }
    }

    outcome
}
