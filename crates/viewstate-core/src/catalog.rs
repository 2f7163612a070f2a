use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};
use viewstate_models::catalog_item::parse_duration_minutes;
use viewstate_models::CatalogItem;
use crate::error::{CatalogError, RecordError};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// A catalog record that failed validation and was left out of the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position in the source array
    pub index: usize,
    pub content_id: Option<String>,
    pub reason: RecordError,
}

/// Read-only, in-memory catalog keyed by `content_id`.
///
/// Built once from an external source and never mutated afterwards. Item
/// order is the source order; the first occurrence of an identifier wins.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    items: Vec<CatalogItem>,
    by_id: HashMap<String, usize>,
    rejected: Vec<RejectedRecord>,
}

impl CatalogIndex {
    /// Index already-typed items
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut index = Self::default();
        for (position, item) in items.into_iter().enumerate() {
            index.insert(position, item);
        }
        index
    }

    /// Validate raw records one by one, skipping (and logging) the malformed ones
    pub fn from_records(records: Vec<Value>) -> Self {
        let mut index = Self::default();
        for (position, record) in records.into_iter().enumerate() {
            match parse_record(&record) {
                Ok(item) => index.insert(position, item),
                Err(reason) => {
                    let content_id = record
                        .get("content_id")
                        .and_then(id_from_value);
                    warn!(
                        "Skipping catalog record {} ({:?}): {}",
                        position, content_id, reason
                    );
                    index.rejected.push(RejectedRecord {
                        index: position,
                        content_id,
                        reason,
                    });
                }
            }
        }

        info!(
            "Catalog indexed: {} items ({} rejected)",
            index.items.len(),
            index.rejected.len()
        );
        index
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Array(records) => Ok(Self::from_records(records)),
            _ => Err(CatalogError::NotAnArray),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading catalog from {}", path.display());
        Self::from_json_str(&content)
    }

    /// The catalog bundled with the binary
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_CATALOG).unwrap_or_else(|e| {
            warn!("Bundled catalog failed to load: {}", e);
            Self::default()
        })
    }

    fn insert(&mut self, position: usize, item: CatalogItem) {
        if self.by_id.contains_key(&item.content_id) {
            warn!(
                "Duplicate catalog content_id {:?} at record {}, keeping the first",
                item.content_id, position
            );
            self.rejected.push(RejectedRecord {
                index: position,
                content_id: Some(item.content_id.clone()),
                reason: RecordError::DuplicateId(item.content_id),
            });
            return;
        }
        self.by_id.insert(item.content_id.clone(), self.items.len());
        self.items.push(item);
    }

    pub fn get(&self, content_id: &str) -> Option<&CatalogItem> {
        let content_id = crate::normalize_id(content_id)?;
        self.by_id.get(content_id).map(|&i| &self.items[i])
    }

    pub fn contains(&self, content_id: &str) -> bool {
        self.get(content_id).is_some()
    }

    /// All items in catalog order
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }
}

fn parse_record(record: &Value) -> Result<CatalogItem, RecordError> {
    let fields = record.as_object().ok_or(RecordError::NotAnObject)?;

    let content_id = match fields.get("content_id") {
        None | Some(Value::Null) => return Err(RecordError::MissingField("content_id")),
        Some(value) => id_from_value(value).ok_or_else(|| RecordError::InvalidField {
            field: "content_id",
            reason: "must be a non-empty string or an integer".to_string(),
        })?,
    };

    let title = required_string(fields, "title")?;
    let rating = parse_rating(fields)?;

    let release_date = required_string(fields, "release_date")?;
    let release_date = NaiveDate::parse_from_str(&release_date, "%Y-%m-%d").map_err(|e| {
        RecordError::InvalidField {
            field: "release_date",
            reason: format!("{:?} is not a YYYY-MM-DD date ({})", release_date, e),
        }
    })?;

    let duration = required_string(fields, "duration")?;
    if parse_duration_minutes(&duration).is_none() {
        return Err(RecordError::InvalidField {
            field: "duration",
            reason: format!("{:?} is not of the form \"2h 16m\"", duration),
        });
    }

    Ok(CatalogItem {
        content_id,
        title,
        description: optional_string(fields, "description")?,
        genre: parse_genre(fields)?,
        rating,
        release_date,
        duration,
        thumbnail_url: optional_string(fields, "thumbnail_url")?,
        video_url: optional_string(fields, "video_url")?,
    })
}

/// Identifiers may arrive as strings or as integers (backend primary keys)
fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => crate::normalize_id(s).map(str::to_string),
        Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        _ => None,
    }
}

fn required_string(fields: &Map<String, Value>, field: &'static str) -> Result<String, RecordError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(RecordError::MissingField(field)),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::String(_)) => Err(RecordError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        }),
        Some(other) => Err(RecordError::InvalidField {
            field,
            reason: format!("expected a string, got {}", type_name(other)),
        }),
    }
}

fn optional_string(fields: &Map<String, Value>, field: &'static str) -> Result<String, RecordError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(RecordError::InvalidField {
            field,
            reason: format!("expected a string, got {}", type_name(other)),
        }),
    }
}

/// A single genre string, or a list of genres joined as `"Animation, Sci-Fi"`
fn parse_genre(fields: &Map<String, Value>) -> Result<String, RecordError> {
    match fields.get("genre") {
        Some(Value::Array(genres)) => {
            let mut names = Vec::with_capacity(genres.len());
            for genre in genres {
                match genre {
                    Value::String(s) => names.push(s.as_str()),
                    other => {
                        return Err(RecordError::InvalidField {
                            field: "genre",
                            reason: format!("list entries must be strings, got {}", type_name(other)),
                        })
                    }
                }
            }
            Ok(names.join(", "))
        }
        _ => optional_string(fields, "genre"),
    }
}

fn parse_rating(fields: &Map<String, Value>) -> Result<f32, RecordError> {
    let value = match fields.get("rating") {
        None | Some(Value::Null) => return Err(RecordError::MissingField("rating")),
        Some(Value::Number(n)) => n.as_f64(),
        Some(other) => {
            return Err(RecordError::InvalidField {
                field: "rating",
                reason: format!("expected a number, got {}", type_name(other)),
            })
        }
    };

    match value {
        Some(rating) if rating.is_finite() && (0.0..=10.0).contains(&rating) => Ok(rating as f32),
        _ => Err(RecordError::InvalidField {
            field: "rating",
            reason: "must be between 0 and 10".to_string(),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
