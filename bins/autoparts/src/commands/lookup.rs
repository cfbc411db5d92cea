//! Lookup command

use crate::context::AppContext;
use crate::output::{format_years, print_json, Status};
use crate::OutputFormat;
use anyhow::Result;
use autoparts_core::validation::validate_product_id;
use autoparts_core::Error;
use owo_colors::OwoColorize;

/// Print one record by product id
pub fn run(ctx: &AppContext, product_id: &str, format: OutputFormat) -> Result<()> {
    validate_product_id(product_id).to_result()?;

    let record = ctx
        .store
        .get(product_id)
        .ok_or_else(|| Error::not_found("Product", product_id))?;

    if format == OutputFormat::Json {
        return print_json(record);
    }

    Status::header(&format!("Product {}", record.product_id));
    println!("  {:<12} {}", "Brand:".dimmed(), record.vehicle_brand);
    println!("  {:<12} {}", "Description:".dimmed(), record.short_description);
    println!("  {:<12} {}", "Condition:".dimmed(), record.condition);
    println!("  {:<12} {}", "Quality:".dimmed(), record.quality);
    println!(
        "  {:<12} {}",
        "Years:".dimmed(),
        format_years(record.year_from, record.year_to)
    );
    Ok(())
}
