use super::render::{render_details, render_items};
use super::Context;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;

pub fn run_search(ctx: &Context, query: &str, output: &Output) -> Result<()> {
    let state = ctx.open_state()?;
    let results = state.composer().annotate(state.search(query));
    tracing::debug!("Search {:?} matched {} titles", query, results.len());
    render_items(output, "search", &results, &format!("No titles match {:?}", query));
    Ok(())
}

pub fn run_genre(ctx: &Context, genre: &str, output: &Output) -> Result<()> {
    let state = ctx.open_state()?;
    let results = state.composer().annotate(state.by_genre(genre));
    if results.is_empty() && output.is_human() {
        output.info(format!("No titles in genre {:?}", genre));
        output.info(format!("Known genres: {}", state.catalog().genres().join(", ")));
        return Ok(());
    }
    render_items(output, "genre", &results, "");
    Ok(())
}

pub fn run_show(ctx: &Context, content_id: &str, output: &Output) -> Result<()> {
    let state = ctx.open_state()?;
    let details = state
        .details(content_id)
        .ok_or_else(|| eyre!("No title with content id {:?} in the catalog", content_id))?;
    render_details(output, &details);
    Ok(())
}

pub fn run_catalog(ctx: &Context, output: &Output) -> Result<()> {
    let state = ctx.open_state()?;
    let items = state.composer().annotate(state.catalog().items());
    render_items(output, "catalog", &items, "The catalog is empty");
    Ok(())
}
