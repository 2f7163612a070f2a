use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One "played" event. The history holds at most one entry per `content_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub content_id: String,
    pub timestamp: DateTime<Utc>,
}
