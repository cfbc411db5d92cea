//! HTTP API
//!
//! # Routes
//!
//! - `GET /search?q=&page=&limit=&year=&condition=&quality=` - all fields
//! - `GET /search/brand` - `vehicleBrand` only
//! - `GET /search/description` - `shortDescription` only
//! - `GET /products/:id` - lookup by product id
//! - `GET /stats`, `/brands`, `/conditions`, `/qualities` - aggregation
//! - `GET /health`, `/metrics`

mod error;
mod handlers;

use autoparts_catalog::RecordStore;
use autoparts_core::health::{CheckResult, HealthCheck, HealthChecker};
use autoparts_search::Searcher;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub use error::ApiError;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub searcher: Arc<Searcher>,
    pub health: Arc<HealthChecker>,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>, searcher: Searcher) -> Self {
        let health = HealthChecker::new().add_check(CatalogCheck {
            store: Arc::clone(&store),
        });
        Self {
            store,
            searcher: Arc::new(searcher),
            health: Arc::new(health),
        }
    }
}

/// Unhealthy when the inventory is empty, degraded when ids repeat
struct CatalogCheck {
    store: Arc<RecordStore>,
}

impl HealthCheck for CatalogCheck {
    fn check(&self) -> CheckResult {
        let records = self.store.len();
        let duplicates = self.store.duplicate_ids().len();

        let result = if records == 0 {
            CheckResult::unhealthy("catalog", "No records loaded")
        } else if duplicates > 0 {
            CheckResult::degraded("catalog", "Duplicate product ids in inventory")
        } else {
            CheckResult::healthy("catalog")
        };
        result
            .with_detail("records", records)
            .with_detail("duplicate_ids", duplicates)
    }
}

/// Create the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(handlers::search_all))
        .route("/search/brand", get(handlers::search_brand))
        .route("/search/description", get(handlers::search_description))
        .route("/products/:id", get(handlers::lookup))
        .route("/stats", get(handlers::stats))
        .route("/brands", get(handlers::brands))
        .route("/conditions", get(handlers::conditions))
        .route("/qualities", get(handlers::qualities))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_snapshot))
        .fallback(handlers::fallback)
        .with_state(state)
}

/// Bind and serve until Ctrl-C or SIGTERM
pub async fn run(state: AppState, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", bind, e))?;

    tracing::info!(
        bind = %bind,
        records = state.store.len(),
        "HTTP server listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
