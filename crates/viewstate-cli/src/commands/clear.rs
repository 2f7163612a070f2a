use super::Context;
use crate::output::Output;
use color_eyre::Result;

pub fn run_clear(ctx: &Context, all: bool, history: bool, watchlist: bool, output: &Output) -> Result<()> {
    if !all && !history && !watchlist {
        output.warn("No clear option specified. Use --history, --watchlist, or --all");
        output.info("\nExample: viewstate clear --history");
        return Ok(());
    }

    let state = ctx.open_state()?;
    if !state.is_persistent() {
        output.info("Storage is unavailable; nothing to clear");
        return Ok(());
    }

    if all || history {
        let count = state.history().len();
        if state.clear_history() {
            output.success(format!("Cleared watch history ({} titles)", count));
        } else {
            output.warn("Failed to clear watch history");
        }
    }

    if all || watchlist {
        let count = state.saved().len();
        if state.clear_saved() {
            output.success(format!("Cleared your list ({} titles)", count));
        } else {
            output.warn("Failed to clear your list");
        }
    }

    Ok(())
}
