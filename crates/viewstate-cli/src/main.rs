use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, clear, config, list, watch, Context};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "viewstate")]
#[command(about = "viewstate - Remember what you watched and what to watch next")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep viewing state in memory only for this run
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a title (records it in the watch history)
    Play {
        /// Catalog content id
        content_id: String,
    },
    /// Show recently watched titles, most recent first
    History,
    /// Manage the saved-for-later list
    List {
        #[command(subcommand)]
        cmd: Option<ListCommands>,
    },
    /// Show saved titles (same as `list show`)
    Saved,
    /// Search the catalog by title, description or genre
    Search {
        query: String,
    },
    /// List catalog titles in a genre
    Genre {
        genre: String,
    },
    /// Show one title with its viewing state
    Show {
        content_id: String,
    },
    /// List the whole catalog
    Catalog,
    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear persisted viewing state
    #[command(long_about = "Clear persisted viewing state. Use --history to forget watched titles, --watchlist to empty the saved list, or --all for both.")]
    Clear {
        /// Clear history and watchlist
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["history", "watchlist"])]
        all: bool,

        /// Clear the watch history
        #[arg(long, action = ArgAction::SetTrue)]
        history: bool,

        /// Clear the saved list
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,
    },
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Save a title for later
    Add { content_id: String },
    /// Remove a title from the saved list
    Remove { content_id: String },
    /// Save the title if it is not saved, otherwise remove it
    Toggle { content_id: String },
    /// Show saved titles, most recently added first
    Show,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration and paths
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let ctx = Context::load(cli.config, cli.ephemeral)?;

    logging::init_logging(
        cli.verbose,
        cli.quiet,
        ctx.config.logging.file.clone(),
        ctx.config.logging.json,
    )
    .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Play { content_id } => watch::run_play(&ctx, &content_id, &output),
        Commands::History => watch::run_history(&ctx, &output),
        Commands::List { cmd } => list::run_list(&ctx, cmd.unwrap_or(ListCommands::Show), &output),
        Commands::Saved => list::run_list(&ctx, ListCommands::Show, &output),
        Commands::Search { query } => browse::run_search(&ctx, &query, &output),
        Commands::Genre { genre } => browse::run_genre(&ctx, &genre, &output),
        Commands::Show { content_id } => browse::run_show(&ctx, &content_id, &output),
        Commands::Catalog => browse::run_catalog(&ctx, &output),
        Commands::Config { cmd } => config::run_config(&ctx, cmd.unwrap_or(ConfigCommands::Show), &output),
        Commands::Clear { all, history, watchlist } => clear::run_clear(&ctx, all, history, watchlist, &output),
    };

    // Humans get the color-eyre report; JSON consumers also get it on stdout
    if let Err(e) = &result {
        if !output.is_human() {
            output.error(format!("{:#}", e));
        }
    }
    result
}
