use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A streamable title as published by the catalog.
///
/// Items are owned by the catalog and treated as read-only everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub content_id: String,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub rating: f32, // 0.0 - 10.0
    pub release_date: NaiveDate,
    pub duration: String, // "2h 16m", "2h" or "45m"
    pub thumbnail_url: String,
    pub video_url: String,
}

impl CatalogItem {
    /// Runtime in minutes, parsed from `duration`
    pub fn duration_minutes(&self) -> Option<u32> {
        parse_duration_minutes(&self.duration)
    }

    /// Individual genres; multi-genre items store them comma-separated
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genre.split(',').map(str::trim).filter(|g| !g.is_empty())
    }
}

/// Parse a runtime like `"2h 16m"`, `"2h"` or `"45m"` into minutes.
pub fn parse_duration_minutes(s: &str) -> Option<u32> {
    let mut total: u32 = 0;
    let mut seen = false;
    for part in s.split_whitespace() {
        let minutes = if let Some(hours) = part.strip_suffix('h') {
            hours.parse::<u32>().ok()?.checked_mul(60)?
        } else if let Some(minutes) = part.strip_suffix('m') {
            minutes.parse::<u32>().ok()?
        } else {
            return None;
        };
        total = total.checked_add(minutes)?;
        seen = true;
    }
    seen.then_some(total)
}
