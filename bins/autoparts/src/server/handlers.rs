//! Route handlers

use super::error::ApiError;
use super::AppState;
use autoparts_catalog::CategoricalField;
use autoparts_core::validation::{validate_product_id, validate_search_params};
use autoparts_core::Error;
use autoparts_search::{AttributeFilter, SearchRequest, SearchScope};
use autoparts_telemetry::{metrics, Timer};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Query string of the search routes
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub year: Option<i32>,
    pub condition: Option<String>,
    pub quality: Option<String>,
}

/// Body of `GET /stats`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub count: usize,
    pub brands: Vec<String>,
    pub conditions: Vec<String>,
    pub qualities: Vec<String>,
}

pub async fn search_all(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    run_search(&state, params, SearchScope::All)
}

pub async fn search_brand(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    run_search(&state, params, SearchScope::Brand)
}

pub async fn search_description(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    run_search(&state, params, SearchScope::Description)
}

fn run_search(
    state: &AppState,
    params: SearchParams,
    scope: SearchScope,
) -> Result<Response, ApiError> {
    metrics().increment("search.requests");
    let timer = Timer::start("search.latency_ms");

    let query = params.q.unwrap_or_default();
    validate_search_params(&query, params.page, params.limit, params.year)
        .into_result_with(Error::invalid_query)?;

    let request = SearchRequest {
        query,
        scope,
        year: params.year,
        filter: AttributeFilter::new(params.condition, params.quality),
        page: params.page,
        limit: params.limit,
    };

    let page = state.searcher.search(&state.store, &request);
    if page.total == 0 {
        metrics().increment("search.empty_results");
    }
    let response = Json(&page).into_response();

    timer.stop();
    Ok(response)
}

pub async fn lookup(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Response, ApiError> {
    validate_product_id(&product_id).to_result()?;

    match state.store.get(&product_id) {
        Some(record) => Ok(Json(record).into_response()),
        None => {
            metrics().increment("lookup.not_found");
            Err(Error::not_found("Product", &product_id).into())
        }
    }
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        count: state.store.len(),
        brands: state.store.distinct_values(CategoricalField::VehicleBrand),
        conditions: state.store.distinct_values(CategoricalField::Condition),
        qualities: state.store.distinct_values(CategoricalField::Quality),
    })
}

pub async fn brands(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.distinct_values(CategoricalField::VehicleBrand))
}

pub async fn conditions(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.distinct_values(CategoricalField::Condition))
}

pub async fn qualities(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.distinct_values(CategoricalField::Quality))
}

pub async fn health(State(state): State<AppState>) -> Response {
    let report = state.health.run();
    let status = if report.status.is_operational() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report)).into_response()
}

pub async fn metrics_snapshot() -> Json<serde_json::Value> {
    Json(metrics().export_json())
}

pub async fn fallback(uri: Uri) -> ApiError {
    Error::not_found("Route", uri.path()).into()
}
