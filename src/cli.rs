use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";
pub const DEFAULT_DOWNLOADS_API: &str = "https://api.npmjs.org/downloads/point/last-month";
pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Parser, Debug)]
#[command(name = "pkgwatch", version, about = "Monthly download statistics for npm packages")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = "config.json",
        help = "Configuration file path"
    )]
    pub config: PathBuf,
    #[arg(
        long,
        global = true,
        default_value = "stats",
        help = "Directory holding per-month statistics files"
    )]
    pub stats_dir: PathBuf,
    #[arg(long, global = true, default_value = DEFAULT_REGISTRY)]
    pub registry: String,
    #[arg(long, global = true, default_value = DEFAULT_DOWNLOADS_API)]
    pub downloads_api: String,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch metadata for every configured package and merge it into the
    /// current month's statistics file. Default command.
    Update {
        /// Restrict the update to a single configured package
        package: Option<String>,
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },
    /// Print the JSON value at a dotted path in the configuration
    Get { path: String },
    /// Assign a value (JSON, or a literal string) at a dotted path in the
    /// configuration and persist it
    Set { path: String, value: String },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Update {
            package: None,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}
