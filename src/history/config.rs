//! History Configuration
//!
//! Display segmentation and channel sizing for the poll history screen.

use serde::{Deserialize, Serialize};

/// Which partition of a room's polls is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Polls still open for voting
    #[default]
    Active,
    /// Polls that have ended
    Past,
}

/// Configuration for a poll history reconciler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Segment shown when the screen first appears
    #[serde(default)]
    pub initial_mode: DisplayMode,
    /// Capacity of the show-detail signal channel
    #[serde(default = "default_detail_queue_size")]
    pub detail_queue_size: usize,
}

fn default_detail_queue_size() -> usize {
    8
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            initial_mode: DisplayMode::default(),
            detail_queue_size: default_detail_queue_size(),
        }
    }
}
