//! Post-ranking filters, pagination and the full search pipeline.

use crate::config::{SearchConfiguration, SearchScope};
use crate::error::{Result, SearchError};
use crate::normalize::folded_eq;
use crate::ranker::{rank, rank_where, Ranking, ScoredCandidate};
use autoparts_catalog::{InventoryRecord, RecordStore};
use serde::Serialize;
use std::time::Instant;

/// Default page size.
pub const DEFAULT_LIMIT: usize = 10;
/// Default maximum page size.
pub const DEFAULT_MAX_LIMIT: usize = 100;

/// Keeps only candidates whose year range contains `year`.
pub fn filter_by_year(candidates: Vec<ScoredCandidate<'_>>, year: i32) -> Vec<ScoredCandidate<'_>> {
    candidates
        .into_iter()
        .filter(|c| c.record.fits_year(year))
        .collect()
}

/// Exact filters on categorical attributes, ignoring case and accents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeFilter {
    /// Required condition, e.g. "nuevo"
    pub condition: Option<String>,
    /// Required quality, e.g. "original"
    pub quality: Option<String>,
}

impl AttributeFilter {
    /// Builds a filter, treating blank values as unconstrained.
    pub fn new(condition: Option<String>, quality: Option<String>) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            condition: non_blank(condition),
            quality: non_blank(quality),
        }
    }

    /// Returns true if no attribute is constrained.
    pub fn is_empty(&self) -> bool {
        self.condition.is_none() && self.quality.is_none()
    }

    /// Returns true if `record` satisfies every constraint.
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        let condition_ok = self
            .condition
            .as_deref()
            .is_none_or(|c| folded_eq(c, &record.condition));
        let quality_ok = self
            .quality
            .as_deref()
            .is_none_or(|q| folded_eq(q, &record.quality));
        condition_ok && quality_ok
    }
}

/// A page number and size, already clamped to valid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    /// Clamps `page` to at least 1 and `limit` to `1..=max_limit`.
    pub fn new(page: usize, limit: usize, max_limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, max_limit.max(1)),
        }
    }

    /// 1-based page number.
    #[inline]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Page size.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Index of the first item on this page.
    #[inline]
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of ranked candidates needed to fill this page.
    #[inline]
    pub fn end(&self) -> usize {
        self.page.saturating_mul(self.limit)
    }
}

/// One page of ranked results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    /// Candidates on this page
    pub items: Vec<ScoredCandidate<'a>>,
    /// Matching candidates across all pages
    pub total: usize,
    /// 1-based page number
    pub page: usize,
    /// Page size
    pub limit: usize,
    /// `ceil(total / limit)`, 0 when nothing matched
    pub total_pages: usize,
}

/// Slices one page out of a ranking.
///
/// Pages past the end are empty, not errors.
pub fn paginate<'a>(ranking: Ranking<'a>, request: PageRequest) -> Page<'a> {
    let Ranking { candidates, total } = ranking;
    let items = candidates
        .into_iter()
        .skip(request.offset())
        .take(request.limit())
        .collect();

    Page {
        items,
        total,
        page: request.page(),
        limit: request.limit(),
        total_pages: total.div_ceil(request.limit()),
    }
}

/// A text search with optional filters.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Raw query text
    pub query: String,
    /// Fields to search
    pub scope: SearchScope,
    /// Model year the part must fit
    pub year: Option<i32>,
    /// Condition and quality constraints
    pub filter: AttributeFilter,
    /// 1-based page, defaults to 1
    pub page: Option<usize>,
    /// Page size, defaults to the configured default limit
    pub limit: Option<usize>,
}

impl SearchRequest {
    /// A first-page search over all fields.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Restrict to `scope`.
    #[must_use]
    pub fn scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Require a model year.
    #[must_use]
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Select a page.
    #[must_use]
    pub fn page(mut self, page: usize, limit: usize) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    fn has_filters(&self) -> bool {
        self.year.is_some() || !self.filter.is_empty()
    }

    fn accepts(&self, record: &InventoryRecord) -> bool {
        self.year.is_none_or(|year| record.fits_year(year)) && self.filter.matches(record)
    }
}

/// Runs rank, filter and paginate against a store.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfiguration,
    default_limit: usize,
    max_limit: usize,
}

impl Default for Searcher {
    fn default() -> Self {
        Self {
            config: SearchConfiguration::default(),
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl Searcher {
    /// Creates a searcher, rejecting unusable pagination settings.
    pub fn new(
        config: SearchConfiguration,
        default_limit: usize,
        max_limit: usize,
    ) -> Result<Self> {
        if max_limit == 0 {
            return Err(SearchError::InvalidConfig(
                "max_limit must be at least 1".to_string(),
            ));
        }
        if default_limit == 0 || default_limit > max_limit {
            return Err(SearchError::InvalidConfig(format!(
                "default_limit must be within 1..={}, got {}",
                max_limit, default_limit
            )));
        }

        Ok(Self {
            config,
            default_limit,
            max_limit,
        })
    }

    /// The base search configuration.
    pub fn config(&self) -> &SearchConfiguration {
        &self.config
    }

    /// Largest accepted page size.
    pub fn max_limit(&self) -> usize {
        self.max_limit
    }

    /// Executes `request` against `store`.
    pub fn search<'s>(&self, store: &'s RecordStore, request: &SearchRequest) -> Page<'s> {
        let started = Instant::now();
        let page_request = PageRequest::new(
            request.page.unwrap_or(1),
            request.limit.unwrap_or(self.default_limit),
            self.max_limit,
        );
        let config = self.config.for_scope(request.scope);

        let ranking = if request.has_filters() {
            rank_where(store, &request.query, &config, page_request.end(), |record| {
                request.accepts(record)
            })
        } else {
            rank(store, &request.query, &config, page_request.end())
        };
        let page = paginate(ranking, page_request);

        tracing::debug!(
            query = %request.query,
            scope = ?request.scope,
            year = ?request.year,
            total = page.total,
            returned = page.items.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Search completed"
        );

        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        RecordStore::from_json_str(
            r#"[
            {"productId":"A1","vehicleBrand":"Toyota","shortDescription":"sensor oxigeno","condition":"nuevo","quality":"original","yearFrom":2015,"yearTo":2020},
            {"productId":"A2","vehicleBrand":"Toyota","shortDescription":"manguera radiador","condition":"usado","quality":"alternativo","yearFrom":2010,"yearTo":2014}
        ]"#,
        )
        .unwrap()
    }

    fn ids<'a>(page: &Page<'a>) -> Vec<&'a str> {
        page.items.iter().map(|c| c.record.product_id.as_str()).collect()
    }

    #[test]
    fn test_scenario_both_records_match() {
        let store = store();
        let page = Searcher::default().search(&store, &SearchRequest::new("Toyota").page(1, 10));
        assert_eq!(ids(&page), ["A1", "A2"]);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_scenario_year_filter() {
        let store = store();
        let page = Searcher::default().search(&store, &SearchRequest::new("Toyota").year(2012));
        assert_eq!(ids(&page), ["A2"]);
        assert_eq!(page.total, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_scenario_empty_query() {
        let store = store();
        let page = Searcher::default().search(&store, &SearchRequest::new(""));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_scenario_page_out_of_range() {
        let store = RecordStore::from_json_str(
            r#"[
            {"productId":"1","vehicleBrand":"Kia","shortDescription":"a","yearFrom":2000,"yearTo":2001},
            {"productId":"2","vehicleBrand":"Kia","shortDescription":"b","yearFrom":2000,"yearTo":2001},
            {"productId":"3","vehicleBrand":"Kia","shortDescription":"c","yearFrom":2000,"yearTo":2001}
        ]"#,
        )
        .unwrap();
        let ranking = rank(&store, "kia", &SearchConfiguration::default(), usize::MAX);
        let page = paginate(ranking, PageRequest::new(5, 10, 100));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_year_filter_function() {
        let store = store();
        let candidates = crate::ranker::rank_and_score(&store, "toyota", &SearchConfiguration::default());
        let kept = filter_by_year(candidates, 2016);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].record.product_id, "A1");
    }

    #[test]
    fn test_attribute_filter() {
        let store = store();
        let mut request = SearchRequest::new("toyota");
        request.filter.condition = Some("USADO".to_string());
        let page = Searcher::default().search(&store, &request);
        assert_eq!(ids(&page), ["A2"]);

        request.filter.quality = Some("original".to_string());
        let page = Searcher::default().search(&store, &request);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_blank_attribute_values_are_unconstrained() {
        let filter = AttributeFilter::new(Some("  ".to_string()), Some(String::new()));
        assert!(filter.is_empty());

        let filter = AttributeFilter::new(Some("nuevo".to_string()), Some(" ".to_string()));
        assert_eq!(filter.condition.as_deref(), Some("nuevo"));
        assert_eq!(filter.quality, None);
    }

    #[test]
    fn test_page_request_clamping() {
        let req = PageRequest::new(0, 0, 100);
        assert_eq!((req.page(), req.limit()), (1, 1));

        let req = PageRequest::new(3, 500, 100);
        assert_eq!((req.page(), req.limit()), (3, 100));
        assert_eq!(req.offset(), 200);
        assert_eq!(req.end(), 300);

        let huge = PageRequest::new(usize::MAX, 100, 100);
        assert_eq!(huge.end(), usize::MAX);
    }

    #[test]
    fn test_total_counts_beyond_page() {
        let store = store();
        let page = Searcher::default().search(&store, &SearchRequest::new("toyota").page(1, 1));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 2);

        let second = Searcher::default().search(&store, &SearchRequest::new("toyota").page(2, 1));
        assert_eq!(ids(&second), ["A2"]);
    }

    #[test]
    fn test_scope_restricts_fields() {
        let store = store();
        let searcher = Searcher::default();
        let brand = searcher.search(&store, &SearchRequest::new("radiador").scope(SearchScope::Brand));
        assert!(brand.items.is_empty());

        let description =
            searcher.search(&store, &SearchRequest::new("radiador").scope(SearchScope::Description));
        assert_eq!(ids(&description), ["A2"]);
    }

    #[test]
    fn test_searcher_rejects_bad_settings() {
        let config = SearchConfiguration::default();
        assert!(Searcher::new(config.clone(), 10, 0).is_err());
        assert!(Searcher::new(config.clone(), 0, 100).is_err());
        assert!(Searcher::new(config.clone(), 200, 100).is_err());
        assert!(Searcher::new(config, 10, 100).is_ok());
    }

    #[test]
    fn test_page_wire_format() {
        let store = store();
        let page = Searcher::default().search(&store, &SearchRequest::new("Toyota"));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["limit"], 10);
        assert_eq!(json["items"][0]["record"]["productId"], "A1");
    }

    fn toyota_fleet() -> RecordStore {
        let recent = (0..25).map(|i| InventoryRecord {
            product_id: format!("N{}", i),
            vehicle_brand: "Toyota".to_string(),
            short_description: "filtro de aire".to_string(),
            condition: "nuevo".to_string(),
            quality: "original".to_string(),
            year_from: 2015,
            year_to: 2020,
        });
        let old = (0..5).map(|i| InventoryRecord {
            product_id: format!("O{}", i),
            vehicle_brand: "Toyota".to_string(),
            short_description: "filtro de aire".to_string(),
            condition: "usado".to_string(),
            quality: "original".to_string(),
            year_from: 2000,
            year_to: 2001,
        });
        RecordStore::from_records(recent.chain(old).collect())
    }

    #[test]
    fn test_year_filter_reaches_low_ranked_matches() {
        let store = toyota_fleet();
        let searcher = Searcher::default();

        let first = searcher.search(&store, &SearchRequest::new("Toyota").year(2000).page(1, 1));
        assert_eq!(ids(&first), ["O0"]);
        assert_eq!(first.total, 5);
        assert_eq!(first.total_pages, 5);

        let mut all = Vec::new();
        for page in 1..=first.total_pages {
            let p = searcher.search(&store, &SearchRequest::new("Toyota").year(2000).page(page, 1));
            assert_eq!(p.total, 5);
            all.extend(ids(&p));
        }
        assert_eq!(all, ["O0", "O1", "O2", "O3", "O4"]);
    }

    #[test]
    fn test_attribute_filter_reaches_low_ranked_matches() {
        let store = toyota_fleet();
        let mut request = SearchRequest::new("Toyota").page(2, 2);
        request.filter.condition = Some("usado".to_string());
        let page = Searcher::default().search(&store, &request);
        assert_eq!(ids(&page), ["O2", "O3"]);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
    }
}
