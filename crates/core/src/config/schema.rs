//! Configuration schema definitions
//!
//! Every section has serde defaults, so a partial (or missing) file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP API binds to
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// Inventory data source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the JSON inventory file loaded at startup
    #[serde(default = "default_data_path")]
    pub path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> String {
    "data/inventory.json".to_string()
}

/// Raw fuzzy-search tuning values.
///
/// These are validated when the search crate builds its `SearchConfiguration`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Maximum normalized match cost (0 = exact, 1 = anything)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Query tokens shorter than this never match
    #[serde(default = "default_min_match_length")]
    pub min_match_length: usize,

    /// Match start positions up to this many characters incur no location penalty
    #[serde(default = "default_distance")]
    pub distance: usize,

    /// Share of the match cost taken by the location penalty
    #[serde(default = "default_location_weight")]
    pub location_weight: f64,

    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            min_match_length: default_min_match_length(),
            distance: default_distance(),
            location_weight: default_location_weight(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_threshold() -> f64 {
    0.3
}

fn default_min_match_length() -> usize {
    2
}

fn default_distance() -> usize {
    100
}

fn default_location_weight() -> f64 {
    0.2
}

/// Per-field weights for the general search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_brand_weight")]
    pub vehicle_brand: f64,

    #[serde(default = "default_description_weight")]
    pub short_description: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            vehicle_brand: default_brand_weight(),
            short_description: default_description_weight(),
        }
    }
}

fn default_brand_weight() -> f64 {
    0.6
}

fn default_description_weight() -> f64 {
    0.4
}

/// Page size policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the caller does not pass one
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Hard upper bound for any requested page size
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    100
}

/// Logging output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of the compact formatter
    #[serde(default)]
    pub json: bool,

    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            show_target: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
