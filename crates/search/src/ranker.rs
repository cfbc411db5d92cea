//! Linear-scan ranking with optional parallelism.
//!
//! Every record in the store is scored; matches are sorted by ascending
//! score with store order breaking ties, then truncated to the caller's cap.

use crate::config::SearchConfiguration;
use crate::fuzzy::PreparedQuery;
use crate::scorer::{score_prepared, FieldMatch};
use autoparts_catalog::{InventoryRecord, RecordStore};
use serde::Serialize;

/// A record that matched, with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate<'a> {
    /// The matched record
    pub record: &'a InventoryRecord,
    /// Position of the record in the store
    #[serde(skip)]
    pub index: usize,
    /// Match cost, lower is better
    pub score: f64,
    /// Fields that matched
    pub matched_fields: Vec<FieldMatch>,
}

/// Ranked candidates plus the number of matches before truncation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking<'a> {
    /// Candidates in rank order
    pub candidates: Vec<ScoredCandidate<'a>>,
    /// Matches before the cap was applied
    pub total: usize,
}

impl<'a> Ranking<'a> {
    /// Number of candidates kept.
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if nothing matched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Ranks the whole store against `query`, keeping at most `cap` candidates.
pub fn rank<'a>(
    store: &'a RecordStore,
    query: &str,
    config: &SearchConfiguration,
    cap: usize,
) -> Ranking<'a> {
    rank_where(store, query, config, cap, |_| true)
}

/// Ranks only the records accepted by `keep`.
///
/// `keep` runs before sorting and truncation, so `total` counts every
/// accepted match and the cap never hides one that a later page would show.
pub fn rank_where<'a, F>(
    store: &'a RecordStore,
    query: &str,
    config: &SearchConfiguration,
    cap: usize,
    keep: F,
) -> Ranking<'a>
where
    F: Fn(&InventoryRecord) -> bool + Sync,
{
    let prepared = PreparedQuery::new(query);
    if prepared.is_empty() {
        return Ranking::default();
    }

    let mut candidates = scan(store.records(), &prepared, config, &keep);
    let total = candidates.len();

    candidates.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));
    candidates.truncate(cap);

    Ranking { candidates, total }
}

/// Ranks the whole store with no cap.
pub fn rank_and_score<'a>(
    store: &'a RecordStore,
    query: &str,
    config: &SearchConfiguration,
) -> Vec<ScoredCandidate<'a>> {
    rank(store, query, config, usize::MAX).candidates
}

fn scan<'a, F>(
    records: &'a [InventoryRecord],
    query: &PreparedQuery,
    config: &SearchConfiguration,
    keep: &F,
) -> Vec<ScoredCandidate<'a>>
where
    F: Fn(&InventoryRecord) -> bool + Sync,
{
    let score = |(index, record): (usize, &'a InventoryRecord)| {
        if !keep(record) {
            return None;
        }
        score_prepared(query, record, config).map(|s| ScoredCandidate {
            record,
            index,
            score: s.score,
            matched_fields: s.matched_fields,
        })
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        records.par_iter().enumerate().filter_map(score).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        records.iter().enumerate().filter_map(score).collect()
    }
}
