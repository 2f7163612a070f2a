use super::*;
use crate::clock::ManualClock;
use crate::storage::{KeyValueStore, MemoryStore, Storage};
use chrono::{Duration, NaiveDate, TimeZone};
use std::sync::Arc;
use viewstate_models::CatalogItem;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 1, 12, 0, 0).unwrap()
}

fn create_item(id: &str, title: &str) -> CatalogItem {
    CatalogItem {
        content_id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        genre: "Drama".to_string(),
        rating: 8.0,
        release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        duration: "1h 40m".to_string(),
        thumbnail_url: String::new(),
        video_url: String::new(),
    }
}

fn catalog() -> CatalogIndex {
    CatalogIndex::new(vec![
        create_item("1", "One"),
        create_item("2", "Two"),
        create_item("3", "Three"),
    ])
}

struct Fixture {
    backend: Arc<MemoryStore>,
    clock: Arc<ManualClock>,
    history: HistoryStore,
    saved: SavedList,
}

fn fixture() -> Fixture {
    let backend = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(start()));
    let storage = Storage::from_shared(backend.clone());
    Fixture {
        history: HistoryStore::new(storage.clone(), clock.clone(), 20),
        saved: SavedList::new(storage, clock.clone()),
        backend,
        clock,
    }
}

fn ids(items: &[AnnotatedItem]) -> Vec<&str> {
    items.iter().map(|i| i.content_id()).collect()
}

#[test]
fn test_project_history_most_recent_first() {
    let f = fixture();
    let catalog = catalog();
    f.history.record("1");
    f.clock.advance(Duration::minutes(1));
    f.history.record("2");
    f.clock.advance(Duration::minutes(1));
    f.history.record("1");

    let composer = ViewComposer::new(&catalog, &f.history, &f.saved);
    let items = composer.project_history();
    assert_eq!(ids(&items), vec!["1", "2"]);
    assert_eq!(items[0].item.title, "One");
    assert_eq!(items[0].last_watched, Some(start() + Duration::minutes(2)));
    assert_eq!(items[0].added_to_list, None);
}

#[test]
fn test_dangling_references_are_dropped() {
    let f = fixture();
    let catalog = catalog();
    f.history.record("1");
    f.history.record("gone");
    f.saved.add("gone");
    f.saved.add("3");

    // The entries are still persisted...
    assert_eq!(f.history.len(), 2);
    assert!(f.saved.contains("gone"));

    // ...but never surface in projections
    let composer = ViewComposer::new(&catalog, &f.history, &f.saved);
    assert_eq!(ids(&composer.project_history()), vec!["1"]);
    assert_eq!(ids(&composer.project_saved()), vec!["3"]);
    assert!(composer.details("gone").is_none());
}

#[test]
fn test_history_sorted_by_timestamp_with_stable_ties() {
    let f = fixture();
    let catalog = catalog();
    // Stored order disagrees with timestamps; "2" and "3" tie
    f.backend
        .set(
            crate::history::WATCH_HISTORY_KEY,
            r#"[
                {"content_id": "2", "timestamp": "2024-12-01T10:00:00Z"},
                {"content_id": "1", "timestamp": "2024-12-01T11:00:00Z"},
                {"content_id": "3", "timestamp": "2024-12-01T10:00:00Z"}
            ]"#,
        )
        .unwrap();

    let composer = ViewComposer::new(&catalog, &f.history, &f.saved);
    assert_eq!(ids(&composer.project_history()), vec!["1", "2", "3"]);
}

#[test]
fn test_project_saved_most_recently_added_first() {
    let f = fixture();
    let catalog = catalog();
    f.saved.add("2");
    f.clock.advance(Duration::minutes(1));
    f.saved.add("1");
    f.clock.advance(Duration::minutes(1));
    f.history.record("2");

    let composer = ViewComposer::new(&catalog, &f.history, &f.saved);
    let items = composer.project_saved();
    assert_eq!(ids(&items), vec!["1", "2"]);
    assert_eq!(items[1].added_to_list, Some(start()));
    assert_eq!(items[1].last_watched, Some(start() + Duration::minutes(2)));
    assert!(composer.is_saved("1"));
    assert!(!composer.is_saved("3"));
}

#[test]
fn test_saved_sorted_by_added_at() {
    let f = fixture();
    let catalog = catalog();
    f.backend
        .set(
            crate::saved_list::WATCHLIST_KEY,
            r#"[
                {"content_id": "3", "added_at": "2024-12-01T09:00:00Z"},
                {"content_id": "1", "added_at": "2024-12-02T09:00:00Z"}
            ]"#,
        )
        .unwrap();

    let composer = ViewComposer::new(&catalog, &f.history, &f.saved);
    assert_eq!(ids(&composer.project_saved()), vec!["1", "3"]);
}

#[test]
fn test_catalog_edits_show_through() {
    let f = fixture();
    f.history.record("2");

    let before = catalog();
    let composer = ViewComposer::new(&before, &f.history, &f.saved);
    assert_eq!(composer.project_history()[0].item.title, "Two");

    let after = CatalogIndex::new(vec![create_item("2", "Two (Director's Cut)")]);
    let composer = ViewComposer::new(&after, &f.history, &f.saved);
    assert_eq!(composer.project_history()[0].item.title, "Two (Director's Cut)");
}

#[test]
fn test_details_annotations() {
    let f = fixture();
    let catalog = catalog();
    f.history.record("1");
    f.clock.advance(Duration::minutes(3));
    f.saved.add("1");

    let composer = ViewComposer::new(&catalog, &f.history, &f.saved);
    let details = composer.details("1").unwrap();
    assert_eq!(details.last_watched, Some(start()));
    assert_eq!(details.added_to_list, Some(start() + Duration::minutes(3)));

    let untouched = composer.details("3").unwrap();
    assert_eq!(untouched.last_watched, None);
    assert_eq!(untouched.added_to_list, None);

    // Annotations never leak back onto the catalog
    assert_eq!(catalog.get("1").unwrap(), &create_item("1", "One"));
}

#[test]
fn test_annotate_search_results() {
    let f = fixture();
    let catalog = catalog();
    f.saved.add("2");

    let composer = ViewComposer::new(&catalog, &f.history, &f.saved);
    let items = composer.annotate(catalog.search("t"));
    assert_eq!(ids(&items), vec!["2", "3"]);
    assert!(items[0].is_saved());
    assert!(!items[1].is_saved());
}

#[test]
fn test_empty_stores_project_empty() {
    let f = fixture();
    let catalog = catalog();
    let composer = ViewComposer::new(&catalog, &f.history, &f.saved);
    assert!(composer.project_history().is_empty());
    assert!(composer.project_saved().is_empty());
}
