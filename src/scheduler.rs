//! Timer-driven reconciliation scheduler.
//!
//! A single repeating timer with a fixed, configurable interval drives
//! the fetch-merge-persist cycle independently of user interaction. No
//! backoff, no jitter. Cycles are serialized: they run inline in one
//! spawned task, and a tick that fires while a cycle is still in flight
//! is skipped rather than overlapped.
//!
//! A changed cycle emits a [`SyncNotice`] on the notice channel so the
//! presentation layer can refresh. Sync failures are logged and the cycle
//! is skipped; the next tick is the only retry. Shutdown aborts the task,
//! abandoning (not awaiting) any fetch or push in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::service::QuoteService;

/// Refresh signal emitted after a cycle that changed the collection
#[derive(Debug, Clone)]
pub struct SyncNotice {
    /// Remote records appended during the cycle
    pub added: usize,
    /// Local categories overwritten by the remote value
    pub updated: usize,
    /// The recomputed category list
    pub categories: Vec<String>,
}

/// Handle to the running scheduler task
pub struct SyncScheduler {
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl SyncScheduler {
    /// Start the scheduler, returning its handle and the notice channel.
    ///
    /// The first cycle runs immediately; subsequent cycles follow at the
    /// given interval.
    pub fn start(
        service: Arc<QuoteService>,
        interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SyncNotice>) {
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // Serialize cycles: a tick firing mid-cycle is dropped
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match service.run_sync_cycle().await {
                            Ok(cycle) if cycle.changed() => {
                                tracing::debug!(
                                    "sync cycle: {} added, {} updated",
                                    cycle.added,
                                    cycle.updated
                                );
                                let _ = notice_tx.send(SyncNotice {
                                    added: cycle.added,
                                    updated: cycle.updated,
                                    categories: cycle.categories,
                                });
                            }
                            Ok(_) => {
                                tracing::debug!("sync cycle: no changes");
                            }
                            Err(e) => {
                                tracing::warn!("sync cycle skipped: {}", e);
                            }
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        (
            Self {
                handle,
                shutdown: shutdown_tx,
            },
            notice_rx,
        )
    }

    /// Stop the scheduler. A fetch or push in flight is abandoned.
    pub fn shutdown(self) {
        let _ = self.shutdown.send(true);
        self.handle.abort();
    }
}
