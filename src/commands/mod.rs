//! Command handlers module.
//!
//! - `lookup.rs`: entry lookups (`lookup`, `entry`)
//! - `graph.rs`: edges and traversals (`edges`, `descendants`, `chain`)
//! - `config.rs`: configuration display

mod config;
mod graph;
mod lookup;

pub use config::cmd_config;
pub use graph::{cmd_chain, cmd_descendants, cmd_edges};
pub use lookup::{cmd_entry, cmd_lookup};

use etymon::Entry;
use std::error::Error;

/// Output format shared by every command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for terminals.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Prints entries as a table.
fn print_entries_table(entries: &[Entry]) {
    println!(
        "{:<40}  {:<20}  {:<8}  {:<10}  {:>3}",
        "NODE ID", "WORD", "LANG", "POS", "ETY"
    );
    println!("{}", "-".repeat(89));
    for entry in entries {
        println!(
            "{:<40}  {:<20}  {:<8}  {:<10}  {:>3}",
            truncate(entry.node_id.as_str(), 40),
            truncate(&entry.word, 20),
            entry.lang_code,
            entry.pos.as_deref().unwrap_or("-"),
            entry.etymology_index()
        );
    }
    println!();
    println!("{} entries", entries.len());
}

/// Prints any serializable value as pretty JSON.
fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Shortens `s` to `width` characters, marking the cut with `...`.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}
