//! Stats command

use crate::context::AppContext;
use crate::output::{format_count, print_json, Status};
use crate::OutputFormat;
use anyhow::Result;
use autoparts_catalog::CategoricalField;
use owo_colors::OwoColorize;

/// Print record count and distinct categorical values
pub fn run(ctx: &AppContext, format: OutputFormat) -> Result<()> {
    let brands = ctx.store.distinct_values(CategoricalField::VehicleBrand);
    let conditions = ctx.store.distinct_values(CategoricalField::Condition);
    let qualities = ctx.store.distinct_values(CategoricalField::Quality);

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "count": ctx.store.len(),
            "brands": brands,
            "conditions": conditions,
            "qualities": qualities,
        }));
    }

    Status::header("Inventory");
    println!("  {}", format_count(ctx.store.len(), "record", "records"));
    if !ctx.store.duplicate_ids().is_empty() {
        Status::warning(&format!(
            "{} duplicated",
            format_count(ctx.store.duplicate_ids().len(), "product id", "product ids")
        ));
    }

    for (title, values) in [
        ("Brands", &brands),
        ("Conditions", &conditions),
        ("Qualities", &qualities),
    ] {
        println!();
        println!("  {} {}", title.bold(), format!("({})", values.len()).dimmed());
        for value in values {
            println!("    {}", value);
        }
    }
    Ok(())
}
