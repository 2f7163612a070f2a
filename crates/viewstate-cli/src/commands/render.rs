use crate::output::Output;
use chrono::{DateTime, Local, Utc};
use comfy_table::{Cell, Table};
use serde_json::json;
use viewstate_models::AnnotatedItem;

pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Render a list of titles; `kind` names the list in JSON output
pub fn render_items(output: &Output, kind: &str, items: &[AnnotatedItem], empty_message: &str) {
    if !output.is_human() {
        output.json(&json!({
            "type": kind,
            "count": items.len(),
            "items": items,
        }));
        return;
    }

    if items.is_empty() {
        output.info(empty_message);
        return;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Genre").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Duration").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Last watched").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Saved").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for annotated in items {
        let item = &annotated.item;
        table.add_row(vec![
            Cell::new(&item.content_id),
            Cell::new(&item.title).fg(comfy_table::Color::Cyan),
            Cell::new(&item.genre),
            Cell::new(format!("{:.1}", item.rating)),
            Cell::new(&item.duration),
            Cell::new(format_timestamp(annotated.last_watched)),
            Cell::new(format_timestamp(annotated.added_to_list)),
        ]);
    }

    output.table(&table);
}

/// Render one title in full
pub fn render_details(output: &Output, annotated: &AnnotatedItem) {
    if !output.is_human() {
        output.json(&json!({
            "type": "details",
            "item": annotated,
        }));
        return;
    }

    let item = &annotated.item;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new(&item.title).fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);
    table.add_row(vec![Cell::new("ID"), Cell::new(&item.content_id)]);
    table.add_row(vec![Cell::new("Genre"), Cell::new(&item.genre)]);
    table.add_row(vec![Cell::new("Rating"), Cell::new(format!("{:.1}/10", item.rating))]);
    table.add_row(vec![Cell::new("Released"), Cell::new(item.release_date.to_string())]);
    table.add_row(vec![Cell::new("Duration"), Cell::new(&item.duration)]);
    table.add_row(vec![Cell::new("Description"), Cell::new(&item.description)]);
    table.add_row(vec![Cell::new("Last watched"), Cell::new(format_timestamp(annotated.last_watched))]);
    table.add_row(vec![Cell::new("In my list"), Cell::new(if annotated.is_saved() { "yes" } else { "no" })]);

    output.table(&table);
}
