//! Fuzzy search over the vehicle-parts inventory.
//!
//! This crate provides:
//! - Case and accent folding
//! - A substring edit-distance matcher with a location penalty
//! - Weighted per-field scoring and stable ranking
//! - Year and attribute filters, pagination, and the `Searcher` pipeline
//!
//! # Example
//!
//! ```
//! use autoparts_catalog::RecordStore;
//! use autoparts_search::{SearchRequest, Searcher};
//!
//! let store = RecordStore::from_json_str(r#"[
//!     {"productId":"A1","vehicleBrand":"Toyota","shortDescription":"sensor oxigeno",
//!      "yearFrom":2015,"yearTo":2020}
//! ]"#).unwrap();
//!
//! let page = Searcher::default().search(&store, &SearchRequest::new("toyta"));
//! assert_eq!(page.total, 1);
//! assert_eq!(page.items[0].record.product_id, "A1");
//! ```

mod config;
mod error;
mod fuzzy;
mod normalize;
mod pipeline;
mod ranker;
mod scorer;


pub use config::{
    FieldWeights, SearchConfiguration, SearchConfigurationBuilder, SearchScope, DEFAULT_DISTANCE,
    DEFAULT_LOCATION_WEIGHT, DEFAULT_MIN_MATCH_LENGTH, DEFAULT_THRESHOLD,
};
pub use error::{Result, SearchError};
pub use fuzzy::{fuzzy_match, match_prepared, MatchResult, PreparedQuery, Span};
pub use normalize::{fold, folded_eq, FoldedText};
pub use pipeline::{
    filter_by_year, paginate, AttributeFilter, Page, PageRequest, SearchRequest, Searcher,
    DEFAULT_LIMIT, DEFAULT_MAX_LIMIT,
};
pub use ranker::{rank, rank_and_score, rank_where, Ranking, ScoredCandidate};
pub use scorer::{score_prepared, score_record, FieldMatch, RecordScore};
