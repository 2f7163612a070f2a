use super::Context;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;
use viewstate_config::{Config, StorageBackend};

pub fn run_config(ctx: &Context, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(ctx, output),
        ConfigCommands::Init { force } => init_config(ctx, force, output),
    }
}

fn show_config(ctx: &Context, output: &Output) -> Result<()> {
    let config = &ctx.config;
    let storage_dir = match config.storage.backend {
        StorageBackend::File => Some(config.storage.resolved_dir(&ctx.paths)),
        StorageBackend::Memory | StorageBackend::Disabled => None,
    };
    let backend = format!("{:?}", config.storage.backend).to_lowercase();

    if !output.is_human() {
        output.json(&json!({
            "type": "config",
            "config_file": ctx.config_path,
            "config_file_exists": ctx.config_path.exists(),
            "ephemeral": ctx.ephemeral,
            "storage": {
                "backend": backend,
                "dir": storage_dir,
            },
            "history": { "capacity": config.history.capacity },
            "catalog": { "path": config.catalog.path },
            "logging": { "file": config.logging.file, "json": config.logging.json },
        }));
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
    ]);

    let config_file = if ctx.config_path.exists() {
        ctx.config_path.display().to_string()
    } else {
        format!("{} (not created, using defaults)", ctx.config_path.display())
    };
    table.add_row(vec![Cell::new("Config file"), Cell::new(config_file)]);

    let backend_label = if ctx.ephemeral {
        format!("{} (--ephemeral)", backend)
    } else {
        backend
    };
    table.add_row(vec![Cell::new("Storage backend"), Cell::new(backend_label)]);
    if let Some(dir) = storage_dir {
        table.add_row(vec![Cell::new("Storage directory"), Cell::new(dir.display())]);
    }
    table.add_row(vec![Cell::new("History capacity"), Cell::new(config.history.capacity)]);
    table.add_row(vec![
        Cell::new("Catalog"),
        Cell::new(
            config
                .catalog
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "bundled".to_string()),
        ),
    ]);
    table.add_row(vec![
        Cell::new("Log file"),
        Cell::new(
            config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
    ]);

    output.table(&table);
    Ok(())
}

fn init_config(ctx: &Context, force: bool, output: &Output) -> Result<()> {
    if ctx.config_path.exists() && !force {
        return Err(eyre!(
            "Config file already exists at {}. Use --force to overwrite it.",
            ctx.config_path.display()
        ));
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;

    let config = Config::default();
    config
        .save_to_file(&ctx.config_path)
        .map_err(|e| eyre!("Failed to write config to {}: {}", ctx.config_path.display(), e))?;

    output.success(format!("Wrote default config to {}", ctx.config_path.display()));
    Ok(())
}
