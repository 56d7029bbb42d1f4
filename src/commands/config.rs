//! Config command handler.

use super::{OutputFormat, print_json};
use etymon::EtymonConfig;
use std::error::Error;

/// Shows the effective configuration after file, environment and flag
/// overrides.
pub fn cmd_config(config: &EtymonConfig, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    if format == OutputFormat::Json {
        let output = serde_json::json!({
            "storage": {
                "db_path": config.storage.db_path,
                "pool_size": config.storage.pool_size,
                "busy_timeout_ms": u64::try_from(config.storage.busy_timeout.as_millis()).unwrap_or(u64::MAX),
            },
            "traversal": {
                "max_depth": config.traversal.max_depth,
                "candidate_limit": config.traversal.candidate_limit,
                "canonical_lang_code": config.traversal.canonical_lang_code,
                "default_limit": config.traversal.default_limit,
            },
            "logging": {
                "format": config.logging.format,
                "filter": config.logging.filter,
                "file": config.logging.file,
            },
        });
        return print_json(&output);
    }

    println!("Current Configuration");
    println!("=====================");
    println!();
    println!(
        "Config File: {}",
        EtymonConfig::default_path().map_or_else(
            || "(none - using defaults)".to_string(),
            |p| p.display().to_string()
        )
    );
    println!();
    println!("Storage:");
    println!("  Database: {}", config.storage.db_path.display());
    println!("  Pool Size: {}", config.storage.pool_size);
    println!("  Busy Timeout: {}ms", config.storage.busy_timeout.as_millis());
    println!();
    println!("Traversal:");
    println!("  Max Depth: {}", config.traversal.max_depth);
    println!("  Canonical Language: {}", config.traversal.canonical_lang_code);
    println!("  Candidate Limit: {}", config.traversal.candidate_limit);
    println!("  Default Lookup Limit: {}", config.traversal.default_limit);
    println!();
    println!("Logging:");
    println!(
        "  Format: {}",
        config.logging.format.as_deref().unwrap_or("pretty")
    );
    println!(
        "  Filter: {}",
        config.logging.filter.as_deref().unwrap_or("(default)")
    );
    println!(
        "  File: {}",
        config
            .logging
            .file
            .as_ref()
            .map_or_else(|| "(stderr)".to_string(), |p| p.display().to_string())
    );

    Ok(())
}
