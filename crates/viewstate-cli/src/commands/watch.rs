use super::render::{format_timestamp, render_items};
use super::{require_in_catalog, Context};
use crate::output::Output;
use color_eyre::Result;
use serde_json::json;

pub fn run_play(ctx: &Context, content_id: &str, output: &Output) -> Result<()> {
    let state = ctx.open_state()?;
    let item = require_in_catalog(&state, content_id)?;

    let Some(entry) = state.record(&item.content_id) else {
        return Ok(());
    };
    tracing::debug!("Recorded play of {} at {}", entry.content_id, entry.timestamp);

    if output.is_human() {
        output.success(format!(
            "Playing {} ({})",
            item.title,
            format_timestamp(Some(entry.timestamp))
        ));
        if !state.is_persistent() {
            output.warn("Storage is unavailable; this play will not be remembered");
        }
    } else {
        output.json(&json!({
            "type": "played",
            "content_id": entry.content_id,
            "timestamp": entry.timestamp,
            "persisted": state.is_persistent(),
        }));
    }
    Ok(())
}

pub fn run_history(ctx: &Context, output: &Output) -> Result<()> {
    let state = ctx.open_state()?;
    let items = state.project_history();
    render_items(
        output,
        "history",
        &items,
        "Your watch history is empty. Titles you play will appear here.",
    );
    Ok(())
}
