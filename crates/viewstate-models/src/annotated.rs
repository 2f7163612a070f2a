use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::catalog_item::CatalogItem;

/// A catalog item joined with the viewer's state for display.
///
/// Built fresh on every read from the history and saved list; never persisted
/// and never written back onto the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotatedItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_watched: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_to_list: Option<DateTime<Utc>>,
}

impl AnnotatedItem {
    pub fn content_id(&self) -> &str {
        &self.item.content_id
    }

    pub fn is_saved(&self) -> bool {
        self.added_to_list.is_some()
    }
}
