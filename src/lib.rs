//! QuoteSync - local-first quote store with HTTP synchronization.
//!
//! This library keeps a small collection of `{text, category}` quote
//! records consistent between a local persistent cache and a remote
//! collection reachable over HTTP:
//!
//! - In-memory ordered store mirrored to a durable JSON cache
//! - Session-scoped "last shown" state in a separate storage scope
//! - Timer-driven reconciliation with remote-wins conflict resolution,
//!   identity by exact quote text
//! - Fire-and-forget push of locally created quotes at creation time
//! - Bulk JSON import/export of the full collection
//!
//! The presentation layer and the transport behind the HTTP client are
//! external collaborators; this crate owns the state and the merge.

pub mod config;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod scheduler;
pub mod service;
pub mod storage;
pub mod store;
pub mod sync_client;
pub mod transfer;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{QuoteError, QuoteResult};
pub use models::{default_quotes, QuoteRecord, RemoteQuote, ALL_CATEGORIES, SERVER_CATEGORY};
pub use reconcile::{reconcile, ReconcileOutcome};
pub use scheduler::{SyncNotice, SyncScheduler};
pub use service::{CycleOutcome, QuoteService};
pub use storage::LocalCache;
pub use store::QuoteStore;
pub use sync_client::SyncClient;
