//! Startup: configuration, telemetry, inventory and searcher

use autoparts_catalog::{CatalogError, RecordStore};
use autoparts_core::config::{Config, ConfigSchema};
use autoparts_core::Error;
use autoparts_search::{FieldWeights, SearchConfiguration, Searcher};
use autoparts_telemetry::TelemetryConfig;
use std::sync::Arc;

/// Everything a command needs once startup succeeded
pub struct AppContext {
    pub config: Config,
    pub store: Arc<RecordStore>,
    pub searcher: Searcher,
}

impl AppContext {
    /// Build the searcher and load the inventory; both failures are fatal
    pub fn load(config: Config) -> Result<Self, Error> {
        let searcher = build_searcher(&config.schema)?;
        let store = load_store(&config.schema.data.path)?;

        autoparts_telemetry::metrics().gauge("catalog.records", store.len() as u64);

        Ok(Self {
            config,
            store: Arc::new(store),
            searcher,
        })
    }
}

/// Load configuration, then apply the `--data` override
pub fn load_config(path: Option<&str>, data: Option<&str>) -> Result<Config, Error> {
    let mut config = Config::load(path)?;
    if let Some(data) = data {
        config.schema.data.path = data.to_string();
    }
    Ok(config)
}

/// Install the tracing subscriber from the `[logging]` section
pub fn init_telemetry(config: &Config, verbose: bool) -> anyhow::Result<()> {
    let logging = &config.schema.logging;
    let log_level = if verbose {
        "debug".to_string()
    } else {
        logging.level.clone()
    };

    autoparts_telemetry::init_with_config(TelemetryConfig {
        log_level,
        json: logging.json,
        show_target: logging.show_target,
        ..TelemetryConfig::default()
    })
}

/// Build the validated search configuration and pagination policy
pub fn build_searcher(schema: &ConfigSchema) -> Result<Searcher, Error> {
    let settings = &schema.search;
    let config = SearchConfiguration::builder()
        .threshold(settings.threshold)
        .min_match_length(settings.min_match_length)
        .distance(settings.distance)
        .location_weight(settings.location_weight)
        .field_weights(FieldWeights {
            vehicle_brand: settings.weights.vehicle_brand,
            short_description: settings.weights.short_description,
        })
        .build()
        .map_err(|e| Error::invalid_search_config(e.to_string()).with_source(e))?;

    Searcher::new(
        config,
        schema.pagination.default_limit,
        schema.pagination.max_limit,
    )
    .map_err(|e| Error::invalid_search_config(e.to_string()).with_source(e))
}

/// Load the inventory file
pub fn load_store(path: &str) -> Result<RecordStore, Error> {
    RecordStore::load(path).map_err(|e| {
        let suggestion = match &e {
            CatalogError::Io { .. } => "Check [data] path or pass --data <file>",
            CatalogError::Json(_) => "The inventory must be a JSON array of records",
        };
        Error::catalog_load(format!("Failed to load inventory from {}", path))
            .with_context(format!("catalog error {}", e.code() as u32))
            .with_suggestion(suggestion)
            .with_source(e)
    })
}
