//! poll-history library
//!
//! Reactive poll-history state for messaging clients. A
//! [`history::PollHistoryReconciler`] owns the authoritative collection of
//! poll summaries for one room, ingests batches and incremental updates from
//! a [`history::PollHistoryService`], and publishes a filtered, sorted view
//! state for a renderer to display.

pub mod history;
pub mod logging;
