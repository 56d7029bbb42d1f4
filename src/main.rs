//! Binary entry point for etymon.
//!
//! This binary provides the CLI interface over a pre-populated word graph
//! database.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    OutputFormat, cmd_chain, cmd_config, cmd_descendants, cmd_edges, cmd_entry, cmd_lookup,
};
use etymon::observability::{self, LoggingConfig};
use etymon::storage::SqliteLexiconBackend;
use etymon::{EtymonConfig, LexiconService};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Etymon - etymological lineage lookup over a word graph.
#[derive(Parser)]
#[command(name = "etymon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the word graph database (overrides the config file).
    #[arg(long, global = true, env = "ETYMON_DB")]
    db: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List entries for a word.
    Lookup {
        /// The word to look up.
        word: String,

        /// Restrict to one language code (e.g. `en`, `la`).
        #[arg(short, long)]
        lang: Option<String>,

        /// Maximum number of entries.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show one entry by node id.
    Entry {
        /// Node id, e.g. `en:history:noun:0`.
        node_id: String,
    },

    /// Show the edges of a node.
    Edges {
        /// Node id.
        node_id: String,

        /// Show edges entering the node instead of leaving it.
        #[arg(long)]
        incoming: bool,

        /// Show the entries at the other end instead of raw edges.
        #[arg(long)]
        neighbors: bool,
    },

    /// Show everything descending from a word.
    Descendants {
        /// The word to start from.
        word: String,

        /// Depth ceiling.
        #[arg(short, long)]
        max_depth: Option<usize>,
    },

    /// Show where a word came from, newest first.
    Chain {
        /// The word to start from.
        word: String,

        /// Depth ceiling.
        #[arg(short, long)]
        max_depth: Option<usize>,
    },

    /// Show the effective configuration.
    Config,
}

/// Main entry point.
fn main() -> ExitCode {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), cli.db.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig::from_settings(&config.logging, cli.verbose)
        .and_then(observability::init_logging);
    if let Err(e) = logging {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &EtymonConfig) -> Result<(), Box<dyn std::error::Error>> {
    let format = cli.format;

    if matches!(cli.command, Commands::Config) {
        return cmd_config(config, format);
    }

    let backend = SqliteLexiconBackend::open_with_config(&config.storage)?;
    let service = LexiconService::new(backend).with_traversal_config(config.traversal.clone());
    tracing::debug!(db = ?service.backend().db_path(), "word graph ready");

    match cli.command {
        Commands::Lookup { word, lang, limit } => cmd_lookup(&service, &word, lang, limit, format),

        Commands::Entry { node_id } => cmd_entry(&service, &node_id, format),

        Commands::Edges {
            node_id,
            incoming,
            neighbors,
        } => cmd_edges(&service, &node_id, incoming, neighbors, format),

        Commands::Descendants { word, max_depth } => {
            cmd_descendants(&service, &word, max_depth, format)
        },

        Commands::Chain { word, max_depth } => cmd_chain(&service, &word, max_depth, format),

        Commands::Config => cmd_config(config, format),
    }
}

/// Loads configuration: file (explicit or default), then environment, then
/// the `--db` flag.
fn load_config(path: Option<&Path>, db: Option<PathBuf>) -> etymon::Result<EtymonConfig> {
    let config = match path {
        Some(path) => EtymonConfig::load_from_file(path)?,
        None => EtymonConfig::load_default()?,
    };

    let config = config.with_env_overrides();
    let config = match db {
        Some(db) => config.with_db_path(db),
        None => config,
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_db_flag_is_global_and_reads_env() {
        let cli = Cli::try_parse_from(["etymon", "chain", "history", "--db", "/tmp/graph.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/graph.db")));

        let db = Cli::command()
            .get_arguments()
            .find(|arg| arg.get_id() == "db")
            .and_then(|arg| arg.get_env().map(ToOwned::to_owned));
        assert_eq!(db.as_deref(), Some(std::ffi::OsStr::new("ETYMON_DB")));
    }
}
