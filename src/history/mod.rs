//! Poll History Module
//!
//! Maintains a room's poll timeline for display: an authoritative collection
//! of poll summaries fed by a history service, projected into the active or
//! past segment, sorted newest-first.

pub mod config;
pub mod reconciler;
pub mod service;
pub mod summary;

pub use config::{DisplayMode, HistoryConfig};
pub use reconciler::{
    project, ErrorHandler, LoggingErrorHandler, PollHistoryReconciler, ReconcilerHandles,
    ViewAction, ViewState,
};
pub use service::{
    HistoryError, HistoryResult, HistorySubscription, PollHistoryService,
};
pub use summary::{AnswerOption, PollKind, PollSummary};
