//! Completed generations shown in the history sidebar.

use serde::{Deserialize, Serialize};

use crate::chat::GenerationMode;
use crate::types::{EntityId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: EntityId,
    pub prompt: String,
    pub original_image: String,
    pub result_image: String,
    pub timestamp: Timestamp,
    pub mode: GenerationMode,
}

/// Compact age label: `"12m ago"`, `"3h ago"`, `"2d ago"`.
///
/// Timestamps in the future read as `"0m ago"`.
pub fn relative_time(timestamp: Timestamp, now: Timestamp) -> String {
    let minutes = (now - timestamp).num_minutes().max(0);
    if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 60 * 24 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (60 * 24))
    }
}
