use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One "saved for later" entry. The list holds at most one entry per `content_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedEntry {
    pub content_id: String,
    pub added_at: DateTime<Utc>,
}
