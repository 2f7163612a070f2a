pub mod annotated;
pub mod catalog_item;
pub mod history_entry;
pub mod saved_entry;

pub use annotated::AnnotatedItem;
pub use catalog_item::CatalogItem;
pub use history_entry::HistoryEntry;
pub use saved_entry::SavedEntry;
