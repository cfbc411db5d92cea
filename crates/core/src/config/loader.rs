//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use crate::validation::{ValidationResult, Validator};
use std::path::Path;

/// Environment variable naming an explicit config file
pub const ENV_CONFIG: &str = "AUTOPARTS_CONFIG";
/// Environment override for `[server] bind`
pub const ENV_BIND: &str = "AUTOPARTS_BIND";
/// Environment override for `[data] path`
pub const ENV_DATA: &str = "AUTOPARTS_DATA";
/// Environment override for `[logging] level`
pub const ENV_LOG: &str = "AUTOPARTS_LOG";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// Resolution order: explicit `path`, then `AUTOPARTS_CONFIG`, then the
    /// standard candidate locations. Environment overrides are applied last.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(String::from)
            .or_else(|| std::env::var(ENV_CONFIG).ok().filter(|p| !p.trim().is_empty()))
            .or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        let mut config = Self {
            schema,
            path: config_path,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        let config = Self { schema, path: None };
        config.validate()?;
        Ok(config)
    }

    /// Apply `AUTOPARTS_*` overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = non_empty(ENV_BIND) {
            self.schema.server.bind = bind;
        }
        if let Some(path) = non_empty(ENV_DATA) {
            self.schema.data.path = path;
        }
        if let Some(level) = non_empty(ENV_LOG) {
            self.schema.logging.level = level;
        }
    }

    /// Check structural constraints that do not belong to the search crate
    pub fn validate(&self) -> Result<()> {
        let pagination = &self.schema.pagination;

        Validator::new()
            .required("server.bind", &self.schema.server.bind)
            .pattern(
                "server.bind",
                &self.schema.server.bind,
                r"^\S+:\d{1,5}$",
                "host:port address",
            )
            .required("data.path", &self.schema.data.path)
            .range("pagination.max_limit", pagination.max_limit, 1, 10_000)
            .range(
                "pagination.default_limit",
                pagination.default_limit,
                1,
                pagination.max_limit.max(1),
            )
            .validate()
            .into_result_with(|message| Error::new(ErrorCode::ConfigValidationError, message))
    }

    /// Non-fatal observations about the effective configuration
    pub fn warnings(&self) -> ValidationResult {
        let search = &self.schema.search;
        let weight_sum = search.weights.vehicle_brand + search.weights.short_description;

        Validator::new()
            .warn_if(
                "data.path",
                !Path::new(&self.schema.data.path).is_file(),
                "Data file does not exist",
            )
            .warn_if(
                "search.threshold",
                search.threshold >= 0.8,
                "Threshold this high matches nearly every record",
            )
            .warn_if(
                "search.weights",
                weight_sum < 1.0 - f64::EPSILON,
                "Field weights sum to less than 1.0",
            )
            .validate()
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        "autoparts.toml",
        ".autoparts.toml",
        "config/autoparts.toml",
    ];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config_not_found(path)
        } else {
            Error::config(format!("Failed to read config file {}: {}", path, e)).with_source(e)
        }
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::from(e).with_context(format!("While parsing {}", path)))
}
