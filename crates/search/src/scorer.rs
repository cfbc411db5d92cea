//! Per-record scoring across the searchable fields.

use crate::config::SearchConfiguration;
use crate::fuzzy::{match_prepared, PreparedQuery, Span};
use crate::normalize::FoldedText;
use autoparts_catalog::{InventoryRecord, TextField};
use serde::Serialize;

/// A field that matched, with the spans that matched in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMatch {
    /// Field name
    pub field: TextField,
    /// Character ranges in the field text
    pub matched_spans: Vec<Span>,
}

/// Score of one record against a query.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordScore {
    /// Weighted mean of the matching fields' costs
    pub score: f64,
    /// Fields that matched, in field order
    pub matched_fields: Vec<FieldMatch>,
}

/// Scores a record against `query`.
pub fn score_record(
    query: &str,
    record: &InventoryRecord,
    config: &SearchConfiguration,
) -> Option<RecordScore> {
    score_prepared(&PreparedQuery::new(query), record, config)
}

/// Scores a record against an already-prepared query.
///
/// Only matching fields contribute, to both the weighted sum and the weight
/// denominator. Fields with zero weight are not searched at all.
pub fn score_prepared(
    query: &PreparedQuery,
    record: &InventoryRecord,
    config: &SearchConfiguration,
) -> Option<RecordScore> {
    if query.is_empty() {
        return None;
    }

    let weights = config.field_weights();
    let mut weighted = 0.0;
    let mut weight_sum = 0.0;
    let mut matched_fields = Vec::new();

    for field in TextField::ALL {
        let weight = weights.get(field);
        if weight <= 0.0 {
            continue;
        }

        let text = FoldedText::new(record.text(field));
        if let Some(m) = match_prepared(query, &text, config) {
            weighted += m.score * weight;
            weight_sum += weight;
            matched_fields.push(FieldMatch {
                field,
                matched_spans: m.spans,
            });
        }
    }

    if matched_fields.is_empty() {
        return None;
    }

    Some(RecordScore {
        score: weighted / weight_sum,
        matched_fields,
    })
}
