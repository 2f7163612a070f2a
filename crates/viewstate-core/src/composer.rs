use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;
use viewstate_models::AnnotatedItem;
use crate::catalog::CatalogIndex;
use crate::history::HistoryStore;
use crate::saved_list::SavedList;

/// Joins the history and saved list against the catalog for display.
///
/// The stores only hold identifiers and timestamps; titles and other metadata
/// always come from the catalog at read time. Identifiers that no longer
/// resolve are left out.
pub struct ViewComposer<'a> {
    catalog: &'a CatalogIndex,
    history: &'a HistoryStore,
    saved: &'a SavedList,
}

impl<'a> ViewComposer<'a> {
    pub fn new(catalog: &'a CatalogIndex, history: &'a HistoryStore, saved: &'a SavedList) -> Self {
        Self { catalog, history, saved }
    }

    /// Watched items, most recently watched first
    pub fn project_history(&self) -> Vec<AnnotatedItem> {
        let saved_at = self.saved_timestamps();
        let history = self.history.list();

        let mut items: Vec<AnnotatedItem> = history
            .into_iter()
            .filter_map(|entry| {
                let Some(item) = self.catalog.get(&entry.content_id) else {
                    debug!("Dropping history entry {}: not in catalog", entry.content_id);
                    return None;
                };
                Some(AnnotatedItem {
                    item: item.clone(),
                    last_watched: Some(entry.timestamp),
                    added_to_list: saved_at.get(entry.content_id.as_str()).copied(),
                })
            })
            .collect();

        // Stable: equal timestamps keep store order
        items.sort_by(|a, b| b.last_watched.cmp(&a.last_watched));
        items
    }

    /// Saved items, most recently added first
    pub fn project_saved(&self) -> Vec<AnnotatedItem> {
        let watched_at = self.watch_timestamps();
        let saved = self.saved.list();

        let mut items: Vec<AnnotatedItem> = saved
            .into_iter()
            .filter_map(|entry| {
                let Some(item) = self.catalog.get(&entry.content_id) else {
                    debug!("Dropping watchlist entry {}: not in catalog", entry.content_id);
                    return None;
                };
                Some(AnnotatedItem {
                    item: item.clone(),
                    last_watched: watched_at.get(entry.content_id.as_str()).copied(),
                    added_to_list: Some(entry.added_at),
                })
            })
            .collect();

        items.sort_by(|a, b| b.added_to_list.cmp(&a.added_to_list));
        items
    }

    pub fn is_saved(&self, content_id: &str) -> bool {
        self.saved.contains(content_id)
    }

    /// A single catalog item with its current viewing state
    pub fn details(&self, content_id: &str) -> Option<AnnotatedItem> {
        let item = self.catalog.get(content_id)?;
        Some(AnnotatedItem {
            item: item.clone(),
            last_watched: self.history.last_watched(&item.content_id),
            added_to_list: self.saved.added_at(&item.content_id),
        })
    }

    /// Annotate arbitrary catalog items, e.g. search results
    pub fn annotate<'i>(&self, items: impl IntoIterator<Item = &'i viewstate_models::CatalogItem>) -> Vec<AnnotatedItem> {
        let watched_at = self.watch_timestamps();
        let saved_at = self.saved_timestamps();
        items
            .into_iter()
            .map(|item| AnnotatedItem {
                item: item.clone(),
                last_watched: watched_at.get(item.content_id.as_str()).copied(),
                added_to_list: saved_at.get(item.content_id.as_str()).copied(),
            })
            .collect()
    }

    fn watch_timestamps(&self) -> HashMap<String, DateTime<Utc>> {
        self.history
            .list()
            .into_iter()
            .map(|entry| (entry.content_id, entry.timestamp))
            .collect()
    }

    fn saved_timestamps(&self) -> HashMap<String, DateTime<Utc>> {
        self.saved
            .list()
            .into_iter()
            .map(|entry| (entry.content_id, entry.added_at))
            .collect()
    }
}

#[cfg(test)]
mod tests;
