//! History Service Boundary
//!
//! Defines the interface the reconciler consumes poll data through. The
//! service is external (room timeline, sync loop, decryption); this module
//! only fixes the contract: one batch fetch plus a subscription delivering
//! per-poll updates and per-poll error notifications over channels.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::summary::PollSummary;

/// Result type for history service operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors surfaced by a poll history service
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Batch fetch failed: {0}")]
    FetchFailed(String),

    #[error("Update failed for poll '{poll_id}': {reason}")]
    UpdateFailed { poll_id: String, reason: String },

    #[error("Service disconnected")]
    Disconnected,
}

/// Receiver halves of a service subscription.
///
/// Owned by the reconciler's event loop; dropping it tears the subscription
/// down, after which no further reactions fire.
#[derive(Debug)]
pub struct HistorySubscription {
    /// One emission per poll whose known state changed
    pub updates: mpsc::Receiver<PollSummary>,
    /// One emission per poll whose update failed
    pub errors: mpsc::Receiver<PollSummary>,
}

impl HistorySubscription {
    /// Build a subscription from its receiver halves
    pub fn new(
        updates: mpsc::Receiver<PollSummary>,
        errors: mpsc::Receiver<PollSummary>,
    ) -> Self {
        Self { updates, errors }
    }
}

/// Source of poll history data for one room
#[async_trait]
pub trait PollHistoryService: Send + Sync {
    /// Fetch the next batch of poll summaries from the room timeline
    async fn next_batch(&self) -> HistoryResult<Vec<PollSummary>>;

    /// Subscribe to per-poll update and error streams
    async fn subscribe(&self) -> HistorySubscription;
}
