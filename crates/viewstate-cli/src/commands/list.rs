use super::render::render_items;
use super::{require_in_catalog, Context};
use crate::output::Output;
use crate::ListCommands;
use color_eyre::Result;
use serde_json::json;

pub fn run_list(ctx: &Context, cmd: ListCommands, output: &Output) -> Result<()> {
    let state = ctx.open_state()?;

    let (action, content_id, changed, message) = match cmd {
        ListCommands::Show => {
            let items = state.project_saved();
            render_items(
                output,
                "watchlist",
                &items,
                "Your list is empty. Add titles to watch them later.",
            );
            return Ok(());
        }
        ListCommands::Add { content_id } => {
            let item = require_in_catalog(&state, &content_id)?;
            let added = state.add(&item.content_id);
            let message = if added {
                format!("Added {} to your list", item.title)
            } else {
                format!("{} is already in your list", item.title)
            };
            ("added", item.content_id.clone(), added, message)
        }
        ListCommands::Remove { content_id } => {
            // Removal also works for ids the catalog has since dropped
            let removed = state.remove(&content_id);
            let name = state
                .catalog()
                .get(&content_id)
                .map(|item| item.title.clone())
                .unwrap_or_else(|| content_id.clone());
            let message = if removed {
                format!("Removed {} from your list", name)
            } else {
                format!("{} was not in your list", name)
            };
            ("removed", content_id, removed, message)
        }
        ListCommands::Toggle { content_id } => {
            let item = require_in_catalog(&state, &content_id)?;
            let message = if state.toggle(&item.content_id) {
                format!("Added {} to your list", item.title)
            } else {
                format!("Removed {} from your list", item.title)
            };
            ("toggled", item.content_id.clone(), true, message)
        }
    };

    if output.is_human() {
        if changed {
            output.success(message);
        } else {
            output.info(message);
        }
        if !state.is_persistent() {
            output.warn("Storage is unavailable; this change will not be remembered");
        }
    } else {
        output.json(&json!({
            "type": action,
            "content_id": content_id,
            "changed": changed,
            "saved": state.contains(&content_id),
            "persisted": state.is_persistent(),
        }));
    }
    Ok(())
}
