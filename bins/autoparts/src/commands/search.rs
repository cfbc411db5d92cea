//! Search command

use crate::context::AppContext;
use crate::output::{format_count, format_years, highlight, print_json, Status};
use crate::OutputFormat;
use anyhow::Result;
use autoparts_catalog::TextField;
use autoparts_core::validation::validate_search_params;
use autoparts_core::Error;
use autoparts_search::{AttributeFilter, ScoredCandidate, SearchRequest, SearchScope};
use owo_colors::OwoColorize;

/// Arguments of `autoparts search`
pub struct SearchArgs {
    pub query: String,
    pub scope: SearchScope,
    pub year: Option<i32>,
    pub condition: Option<String>,
    pub quality: Option<String>,
    pub page: usize,
    pub limit: Option<usize>,
}

/// Run a search against the loaded inventory and print one page
pub fn run(ctx: &AppContext, args: SearchArgs, format: OutputFormat) -> Result<()> {
    validate_search_params(&args.query, Some(args.page), args.limit, args.year)
        .into_result_with(Error::invalid_query)?;

    let request = build_request(args);
    let page = ctx.searcher.search(&ctx.store, &request);

    if format == OutputFormat::Json {
        return print_json(&page);
    }

    if page.items.is_empty() {
        if page.total == 0 {
            Status::info(&format!("No matches for \"{}\"", request.query));
        } else {
            Status::info(&format!(
                "Page {} is past the end ({} total)",
                page.page,
                format_count(page.total_pages, "page", "pages")
            ));
        }
        return Ok(());
    }

    Status::header(&format!(
        "{} for \"{}\" (page {}/{})",
        format_count(page.total, "match", "matches"),
        request.query,
        page.page,
        page.total_pages
    ));

    let offset = (page.page - 1) * page.limit;
    for (i, candidate) in page.items.iter().enumerate() {
        print_candidate(offset + i + 1, candidate);
    }
    Ok(())
}

fn build_request(args: SearchArgs) -> SearchRequest {
    SearchRequest {
        query: args.query,
        scope: args.scope,
        year: args.year,
        filter: AttributeFilter::new(args.condition, args.quality),
        page: Some(args.page),
        limit: args.limit,
    }
}

fn print_candidate(rank: usize, candidate: &ScoredCandidate<'_>) {
    let record = candidate.record;
    let spans_for = |field: TextField| {
        candidate
            .matched_fields
            .iter()
            .find(|m| m.field == field)
            .map(|m| m.matched_spans.as_slice())
            .unwrap_or_default()
    };

    println!(
        "{:>3}. {} {} {}",
        rank,
        format!("[{}]", record.product_id).cyan(),
        highlight(&record.vehicle_brand, spans_for(TextField::VehicleBrand)),
        highlight(&record.short_description, spans_for(TextField::ShortDescription)),
    );
    println!(
        "     {}",
        format!(
            "{} | {} | {} | score {:.3}",
            format_years(record.year_from, record.year_to),
            record.condition,
            record.quality,
            candidate.score
        )
        .dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(condition: Option<&str>, quality: Option<&str>) -> SearchArgs {
        SearchArgs {
            query: "toyota".to_string(),
            scope: SearchScope::All,
            year: None,
            condition: condition.map(str::to_string),
            quality: quality.map(str::to_string),
            page: 1,
            limit: None,
        }
    }

    #[test]
    fn test_blank_filters_are_dropped() {
        let request = build_request(args(Some(""), Some("   ")));
        assert!(request.filter.is_empty());
    }

    #[test]
    fn test_filters_are_kept() {
        let request = build_request(args(Some("usado"), None));
        assert_eq!(request.filter.condition.as_deref(), Some("usado"));
        assert_eq!(request.page, Some(1));
    }
}
