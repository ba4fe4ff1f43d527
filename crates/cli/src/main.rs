//! Lull CLI - lull command

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod cmd;
mod render;
mod settings;

/// Lull - Debounced search from the terminal
#[derive(Parser)]
#[command(name = "lull")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (default: <config dir>/lull/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a catalog, one keystroke per stdin line
    Search {
        /// JSON catalog of {id, title, url} entries
        #[arg(long)]
        catalog: PathBuf,

        /// Quiet period before searching (overrides debounce.delay_ms)
        #[arg(long, allow_hyphen_values = true)]
        delay_ms: Option<i64>,

        /// Simulated backend latency (overrides search.latency_ms)
        #[arg(long)]
        latency_ms: Option<u64>,

        /// Maximum results per search (overrides search.limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Read "<offset_ms> <text>" lines and replay them with their timing
        #[arg(long)]
        replay: bool,
    },
    /// View and edit settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all settings
    List,

    /// Print a single setting
    Get {
        /// Dotted key, e.g. debounce.delay_ms
        key: String,
    },

    /// Change a single setting
    Set {
        /// Dotted key, e.g. debounce.delay_ms
        key: String,
        /// New value
        value: String,
    },

    /// Show the settings file path
    Path {
        /// Create the file with defaults if missing
        #[arg(long)]
        create: bool,
    },

    /// Print an annotated example settings file
    Example,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stdout carries results; logs go to stderr
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Search { catalog, delay_ms, latency_ms, limit, replay } => {
            let args = cmd::search::SearchArgs { catalog, delay_ms, latency_ms, limit, replay };
            cmd::search::run(config, args).await
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list(config).await,
            ConfigCommands::Get { key } => cmd::config::run_get(config, &key).await,
            ConfigCommands::Set { key, value } => cmd::config::run_set(config, &key, &value).await,
            ConfigCommands::Path { create } => cmd::config::run_path(config, create).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
