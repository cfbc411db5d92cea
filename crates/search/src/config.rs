//! Validated search configuration.

use crate::error::{Result, SearchError};
use autoparts_catalog::TextField;
use serde::{Deserialize, Serialize};

/// Default maximum match cost.
pub const DEFAULT_THRESHOLD: f64 = 0.3;
/// Default minimum token length in characters.
pub const DEFAULT_MIN_MATCH_LENGTH: usize = 2;
/// Default penalty-free distance from the start of the text.
pub const DEFAULT_DISTANCE: usize = 100;
/// Default share of the cost taken by the location penalty.
pub const DEFAULT_LOCATION_WEIGHT: f64 = 0.2;

/// Tolerance for weight sums, so `0.6 + 0.4` style inputs pass.
const WEIGHT_EPSILON: f64 = 1e-9;

/// Relative importance of each searchable field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWeights {
    /// Weight of `vehicleBrand`
    pub vehicle_brand: f64,
    /// Weight of `shortDescription`
    pub short_description: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self::general()
    }
}

impl FieldWeights {
    /// Brand 0.6, description 0.4.
    pub const fn general() -> Self {
        Self {
            vehicle_brand: 0.6,
            short_description: 0.4,
        }
    }

    /// Brand only.
    pub const fn brand_only() -> Self {
        Self {
            vehicle_brand: 1.0,
            short_description: 0.0,
        }
    }

    /// Description only.
    pub const fn description_only() -> Self {
        Self {
            vehicle_brand: 0.0,
            short_description: 1.0,
        }
    }

    /// Weight of `field`.
    #[inline]
    pub fn get(&self, field: TextField) -> f64 {
        match field {
            TextField::VehicleBrand => self.vehicle_brand,
            TextField::ShortDescription => self.short_description,
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        TextField::ALL.iter().map(|&f| self.get(f)).sum()
    }

    fn validate(&self) -> Result<()> {
        for field in TextField::ALL {
            let w = self.get(field);
            if !(0.0..=1.0).contains(&w) {
                return Err(SearchError::InvalidConfig(format!(
                    "weight for {} must be within [0, 1], got {}",
                    field, w
                )));
            }
        }

        let total = self.total();
        if total <= 0.0 {
            return Err(SearchError::InvalidConfig(
                "at least one field weight must be positive".to_string(),
            ));
        }
        if total > 1.0 + WEIGHT_EPSILON {
            return Err(SearchError::InvalidConfig(format!(
                "field weights must sum to at most 1.0, got {}",
                total
            )));
        }
        Ok(())
    }
}

/// Which fields a text search runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Both fields with the configured weights
    #[default]
    All,
    /// `vehicleBrand` only
    Brand,
    /// `shortDescription` only
    Description,
}

/// Validated fuzzy-search parameters.
///
/// Constructed through [`SearchConfiguration::builder`]; every instance has
/// passed validation, so ranking never sees out-of-range values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfiguration {
    threshold: f64,
    min_match_length: usize,
    distance: usize,
    location_weight: f64,
    field_weights: FieldWeights,
}

impl Default for SearchConfiguration {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_match_length: DEFAULT_MIN_MATCH_LENGTH,
            distance: DEFAULT_DISTANCE,
            location_weight: DEFAULT_LOCATION_WEIGHT,
            field_weights: FieldWeights::general(),
        }
    }
}

impl SearchConfiguration {
    /// Start from the defaults.
    pub fn builder() -> SearchConfigurationBuilder {
        SearchConfigurationBuilder {
            config: Self::default(),
        }
    }

    /// Maximum accepted match cost.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Shortest query token that can match.
    #[inline]
    pub fn min_match_length(&self) -> usize {
        self.min_match_length
    }

    /// Penalty-free distance from the start of the text.
    #[inline]
    pub fn distance(&self) -> usize {
        self.distance
    }

    /// Share of the match cost taken by the location penalty.
    #[inline]
    pub fn location_weight(&self) -> f64 {
        self.location_weight
    }

    /// Field weights.
    #[inline]
    pub fn field_weights(&self) -> &FieldWeights {
        &self.field_weights
    }

    /// Same configuration with the field weights of `scope`.
    ///
    /// `All` keeps the configured weights.
    #[must_use]
    pub fn for_scope(&self, scope: SearchScope) -> Self {
        let field_weights = match scope {
            SearchScope::All => self.field_weights,
            SearchScope::Brand => FieldWeights::brand_only(),
            SearchScope::Description => FieldWeights::description_only(),
        };
        Self {
            field_weights,
            ..self.clone()
        }
    }
}

/// Builder for [`SearchConfiguration`].
#[derive(Debug, Clone)]
pub struct SearchConfigurationBuilder {
    config: SearchConfiguration,
}

impl SearchConfigurationBuilder {
    /// Set the threshold, in `[0, 1]`.
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Set the minimum token length, at least 1.
    #[must_use]
    pub fn min_match_length(mut self, min_match_length: usize) -> Self {
        self.config.min_match_length = min_match_length;
        self
    }

    /// Set the penalty-free distance.
    #[must_use]
    pub fn distance(mut self, distance: usize) -> Self {
        self.config.distance = distance;
        self
    }

    /// Set the location weight, in `[0, 1]`.
    #[must_use]
    pub fn location_weight(mut self, location_weight: f64) -> Self {
        self.config.location_weight = location_weight;
        self
    }

    /// Set the field weights.
    #[must_use]
    pub fn field_weights(mut self, field_weights: FieldWeights) -> Self {
        self.config.field_weights = field_weights;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<SearchConfiguration> {
        let config = self.config;

        if !(0.0..=1.0).contains(&config.threshold) {
            return Err(SearchError::InvalidConfig(format!(
                "threshold must be within [0, 1], got {}",
                config.threshold
            )));
        }
        if config.min_match_length == 0 {
            return Err(SearchError::InvalidConfig(
                "min_match_length must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&config.location_weight) {
            return Err(SearchError::InvalidConfig(format!(
                "location_weight must be within [0, 1], got {}",
                config.location_weight
            )));
        }
        config.field_weights.validate()?;

        Ok(config)
    }
}
