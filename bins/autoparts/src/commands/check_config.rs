//! Check-config command

use crate::context::build_searcher;
use crate::output::{print_json, Status};
use crate::OutputFormat;
use anyhow::Result;
use autoparts_core::config::Config;
use owo_colors::OwoColorize;

/// Validate the effective configuration and print it
pub fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let searcher = build_searcher(&config.schema)?;
    let warnings = config.warnings();

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "path": config.path,
            "config": config.schema,
            "search": searcher.config(),
            "warnings": warnings.warnings(),
        }));
    }

    match &config.path {
        Some(path) => Status::info(&format!("Configuration file: {}", path)),
        None => Status::info("No configuration file found, using defaults"),
    }

    let schema = &config.schema;
    Status::header("Effective configuration");
    println!("  {:<22} {}", "server.bind".dimmed(), schema.server.bind);
    println!("  {:<22} {}", "data.path".dimmed(), schema.data.path);
    println!("  {:<22} {}", "search.threshold".dimmed(), schema.search.threshold);
    println!(
        "  {:<22} {}",
        "search.min_match_length".dimmed(),
        schema.search.min_match_length
    );
    println!("  {:<22} {}", "search.distance".dimmed(), schema.search.distance);
    println!(
        "  {:<22} {}",
        "search.location_weight".dimmed(),
        schema.search.location_weight
    );
    println!(
        "  {:<22} {} / {}",
        "search.weights".dimmed(),
        schema.search.weights.vehicle_brand,
        schema.search.weights.short_description
    );
    println!(
        "  {:<22} {} (max {})",
        "pagination.limit".dimmed(),
        schema.pagination.default_limit,
        schema.pagination.max_limit
    );
    println!("  {:<22} {}", "logging.level".dimmed(), schema.logging.level);
    println!();

    for warning in warnings.warnings() {
        Status::warning(&format!("{}: {}", warning.field, warning.message));
    }
    Status::success("Configuration is valid");
    Ok(())
}
