//! Poll Summary Model
//!
//! The current known state of one poll on a room's timeline, as delivered by
//! the history service. The reconciler treats most fields as opaque display
//! data; only `id`, `closed`, and `start_date` drive reconciliation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How poll results are revealed to voters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollKind {
    /// Running tallies are visible while the poll is open
    #[default]
    Disclosed,
    /// Tallies are hidden until the poll closes
    Undisclosed,
}

/// One answer option of a poll, carried through unchanged for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Option ID (unique within the poll)
    pub id: String,
    /// Option text/label
    pub text: String,
    /// Number of votes cast for this option
    #[serde(default)]
    pub count: u64,
    /// Whether this option won a closed poll
    #[serde(default)]
    pub winner: bool,
    /// Whether the current user selected this option
    #[serde(default)]
    pub selected: bool,
}

impl AnswerOption {
    /// Create a new answer option
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            count: 0,
            winner: false,
            selected: false,
        }
    }

    /// Set the vote count
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// Mark as the winning option
    pub fn winner(mut self) -> Self {
        self.winner = true;
        self
    }

    /// Mark as selected by the current user
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// A room-timeline poll's current known state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollSummary {
    /// Poll ID, stable across updates; at most one summary per ID exists in
    /// the reconciler's collection
    pub id: String,
    /// Poll question text
    pub question: String,
    /// Ordered answer options
    #[serde(default)]
    pub answer_options: Vec<AnswerOption>,
    /// Whether the poll has ended
    #[serde(default)]
    pub closed: bool,
    /// When the poll was started; sole sort key for display
    pub start_date: DateTime<Utc>,
    /// Whether the poll event was edited after creation
    #[serde(default)]
    pub has_been_edited: bool,
    /// Whether any related event failed to decrypt
    #[serde(default)]
    pub has_decryption_error: bool,
    /// Whether the current user has voted
    #[serde(default)]
    pub has_current_user_voted: bool,
    /// Total number of votes across all options
    #[serde(default)]
    pub total_answer_count: u64,
    /// Disclosed or undisclosed results
    #[serde(default)]
    pub kind: PollKind,
}

impl PollSummary {
    /// Create a new poll summary with the given identity, question, and
    /// start date; all flags default to their open-poll values
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer_options: Vec::new(),
            closed: false,
            start_date,
            has_been_edited: false,
            has_decryption_error: false,
            has_current_user_voted: false,
            total_answer_count: 0,
            kind: PollKind::default(),
        }
    }

    /// Set the answer options
    pub fn with_options(mut self, options: Vec<AnswerOption>) -> Self {
        self.answer_options = options;
        self
    }

    /// Mark the poll as ended
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    /// Set the total vote count
    pub fn with_total_answer_count(mut self, count: u64) -> Self {
        self.total_answer_count = count;
        self
    }

    /// Set the results kind
    pub fn with_kind(mut self, kind: PollKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark the poll event as edited
    pub fn edited(mut self) -> Self {
        self.has_been_edited = true;
        self
    }
}
