//! Poll History Reconciler
//!
//! Owns the authoritative collection of poll summaries for one room, merges
//! incremental updates into it, and publishes the filtered, sorted projection
//! the renderer displays. All mutation happens on the single logical thread
//! of the [`run`](PollHistoryReconciler::run) loop; observers only ever see a
//! fully recomputed view state.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use super::config::{DisplayMode, HistoryConfig};
use super::service::{HistoryError, HistorySubscription, PollHistoryService};
use super::summary::PollSummary;

/// Derived state published to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Segment currently displayed
    pub mode: DisplayMode,
    /// Filtered, sorted polls for `mode`; `None` until the first batch arrives
    pub polls: Option<Vec<PollSummary>>,
    /// True from [`PollHistoryReconciler::start`] until the first batch
    /// fetch completes
    pub is_loading: bool,
}

/// Actions dispatched by the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// Screen became visible: subscribe and fetch the first batch
    ViewAppeared,
    /// User switched segment
    SegmentChanged(DisplayMode),
    /// User selected a poll from the rendered list
    SelectPoll(String),
}

/// Hook for service errors the reconciler does not handle itself
pub trait ErrorHandler: Send + Sync {
    /// The first-batch fetch failed
    fn on_fetch_error(&self, error: &HistoryError);

    /// An individual poll update failed upstream
    fn on_poll_error(&self, poll: &PollSummary);
}

/// Default error hook: logs and takes no further action.
///
/// Whether a failed fetch should retry or surface in the UI is an open
/// product decision; until it lands, errors leave the view state untouched
/// and the user sees an empty or stale list.
#[derive(Debug, Default)]
pub struct LoggingErrorHandler;

impl ErrorHandler for LoggingErrorHandler {
    fn on_fetch_error(&self, error: &HistoryError) {
        warn!(error = %error, "poll history batch fetch failed");
    }

    fn on_poll_error(&self, poll: &PollSummary) {
        warn!(id = %poll.id, "poll update failed");
    }
}

/// Receiver halves handed to the renderer and navigation host
#[derive(Debug)]
pub struct ReconcilerHandles {
    /// View state, atomically replaced on every relevant change
    pub view_state: watch::Receiver<ViewState>,
    /// Show-detail signal: the full summary of each selected poll
    pub detail: mpsc::Receiver<PollSummary>,
}

/// Filter and order polls for display.
///
/// Pure function of its inputs: `None` (never loaded) stays `None`;
/// otherwise keeps open polls for [`DisplayMode::Active`] and ended polls
/// for [`DisplayMode::Past`], sorted by start date descending. The sort is
/// stable, so ties keep their collection order.
pub fn project(polls: Option<&[PollSummary]>, mode: DisplayMode) -> Option<Vec<PollSummary>> {
    let polls = polls?;
    let mut projected: Vec<PollSummary> = polls
        .iter()
        .filter(|poll| match mode {
            DisplayMode::Active => !poll.closed,
            DisplayMode::Past => poll.closed,
        })
        .cloned()
        .collect();
    projected.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    Some(projected)
}

/// Reconciles a room's poll history into displayable view state
pub struct PollHistoryReconciler {
    service: Arc<dyn PollHistoryService>,
    mode: DisplayMode,
    /// Master collection; `None` until the first batch arrives. Entries are
    /// unique by id and never removed, only replaced.
    polls: Option<Vec<PollSummary>>,
    is_loading: bool,
    view_tx: watch::Sender<ViewState>,
    detail_tx: mpsc::Sender<PollSummary>,
    error_handler: Arc<dyn ErrorHandler>,
}

impl PollHistoryReconciler {
    /// Create a reconciler for one room, returning it together with the
    /// receiver halves for the renderer and navigation host
    pub fn new(
        service: Arc<dyn PollHistoryService>,
        config: &HistoryConfig,
    ) -> (Self, ReconcilerHandles) {
        let initial = ViewState {
            mode: config.initial_mode,
            polls: None,
            is_loading: false,
        };
        let (view_tx, view_rx) = watch::channel(initial);
        let (detail_tx, detail_rx) = mpsc::channel(config.detail_queue_size.max(1));

        (
            Self {
                service,
                mode: config.initial_mode,
                polls: None,
                is_loading: false,
                view_tx,
                detail_tx,
                error_handler: Arc::new(LoggingErrorHandler),
            },
            ReconcilerHandles {
                view_state: view_rx,
                detail: detail_rx,
            },
        )
    }

    /// Replace the error hook
    pub fn with_error_handler(mut self, handler: Arc<dyn ErrorHandler>) -> Self {
        self.error_handler = handler;
        self
    }

    /// Segment currently displayed
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Begin consuming the service: subscribe, then fetch the first batch.
    ///
    /// `is_loading` is published as true from here until the fetch completes,
    /// then false permanently, whether or not the fetch succeeded. On failure
    /// the [`ErrorHandler`] fires and the collection stays absent; there is
    /// no retry and no error state.
    ///
    /// Call once per reconciler lifetime. Calling again re-fetches and
    /// replaces the collection, which is a caller error.
    pub async fn start(&mut self) -> HistorySubscription {
        self.is_loading = true;
        self.publish();

        let subscription = self.service.subscribe().await;

        match self.service.next_batch().await {
            Ok(batch) => self.on_batch_received(batch),
            Err(error) => {
                self.error_handler.on_fetch_error(&error);
                self.is_loading = false;
                self.publish();
            }
        }

        subscription
    }

    /// First batch arrival: replaces the master collection and clears the
    /// loading flag, even when the batch is empty
    pub fn on_batch_received(&mut self, batch: Vec<PollSummary>) {
        debug!(count = batch.len(), "poll history batch received");
        self.polls = Some(batch);
        self.is_loading = false;
        self.publish();
    }

    /// Merge one update by replacing the matching entry in place.
    ///
    /// Updates only ever refine polls known from a prior batch; an update
    /// whose id is not in the collection is dropped without inserting.
    pub fn on_poll_updated(&mut self, poll: PollSummary) {
        let Some(polls) = self.polls.as_mut() else {
            debug!(id = %poll.id, "poll update before first batch, dropped");
            return;
        };

        match polls.iter_mut().find(|known| known.id == poll.id) {
            Some(known) => {
                *known = poll;
                self.publish();
            }
            None => debug!(id = %poll.id, "poll update for unknown id, dropped"),
        }
    }

    /// An individual poll update failed upstream. Forwards to the error
    /// hook; the collection and projection are left untouched.
    pub fn on_poll_error(&mut self, poll: PollSummary) {
        self.error_handler.on_poll_error(&poll);
    }

    /// Switch the displayed segment and republish
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
        self.publish();
    }

    /// Emit the show-detail signal for the selected poll.
    ///
    /// `id` comes from the rendered projection, so a miss means renderer and
    /// reconciler disagree; it is logged and nothing is emitted. Reconciler
    /// state never changes here.
    pub async fn select_poll(&mut self, id: &str) {
        let selected = self
            .view_tx
            .borrow()
            .polls
            .as_ref()
            .and_then(|polls| polls.iter().find(|poll| poll.id == id))
            .cloned();

        match selected {
            Some(poll) => {
                if self.detail_tx.send(poll).await.is_err() {
                    debug!(id, "navigation host gone, detail signal dropped");
                }
            }
            None => warn!(id, "selected poll not in current projection"),
        }
    }

    /// Apply one renderer action.
    ///
    /// [`ViewAction::ViewAppeared`] returns the service subscription so the
    /// caller (normally [`run`](Self::run)) can consume it; the other
    /// actions return `None`.
    pub async fn dispatch(&mut self, action: ViewAction) -> Option<HistorySubscription> {
        match action {
            ViewAction::ViewAppeared => Some(self.start().await),
            ViewAction::SegmentChanged(mode) => {
                self.set_mode(mode);
                None
            }
            ViewAction::SelectPoll(id) => {
                self.select_poll(&id).await;
                None
            }
        }
    }

    /// Drive the reconciler from channels until shutdown.
    ///
    /// Consumes renderer actions, the service subscription obtained on
    /// [`ViewAction::ViewAppeared`], and a shutdown flag. Each reaction runs
    /// to completion before the next is processed. Exiting the loop drops
    /// the subscription, so no reaction fires after shutdown.
    pub async fn run(
        mut self,
        mut actions: mpsc::Receiver<ViewAction>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut updates: Option<mpsc::Receiver<PollSummary>> = None;
        let mut errors: Option<mpsc::Receiver<PollSummary>> = None;

        loop {
            tokio::select! {
                // A flag emission only wakes the loop; the post-wake check
                // below decides. A dropped sender means no shutdown can
                // ever arrive, so stop.
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                action = actions.recv() => {
                    let Some(action) = action else { break };
                    if let Some(subscription) = self.dispatch(action).await {
                        updates = Some(subscription.updates);
                        errors = Some(subscription.errors);
                    }
                }
                update = recv_from(&mut updates), if updates.is_some() => {
                    match update {
                        Some(poll) => self.on_poll_updated(poll),
                        None => updates = None,
                    }
                }
                error = recv_from(&mut errors), if errors.is_some() => {
                    match error {
                        Some(poll) => self.on_poll_error(poll),
                        None => errors = None,
                    }
                }
            }

            // Check shutdown after waking
            if *shutdown.borrow() {
                break;
            }
        }
    }

    /// Recompute the projection and atomically replace the published state
    fn publish(&mut self) {
        let state = ViewState {
            mode: self.mode,
            polls: project(self.polls.as_deref(), self.mode),
            is_loading: self.is_loading,
        };
        self.view_tx.send_replace(state);
    }
}

/// Receive from an optional channel; pends forever when absent so the
/// select arm stays quiet until a subscription exists
async fn recv_from(rx: &mut Option<mpsc::Receiver<PollSummary>>) -> Option<PollSummary> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
