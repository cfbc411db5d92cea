//! Configuration and input validation
//!
//! Provides fluent validation for:
//! - Configuration values
//! - Search request parameters
//! - Product identifiers
//!
//! # Example
//!
//! ```rust
//! use autoparts_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("q", "toyota")
//!     .max_length("q", "toyota", 200)
//!     .range("page", 1, 1, 10_000)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Longest accepted free-text query, in characters
pub const MAX_QUERY_CHARS: usize = 200;

/// Accepted year window for year filters
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        self.into_result_with(Error::validation)
    }

    /// Convert to Result, building the error from the joined messages
    pub fn into_result_with(self, make_error: impl FnOnce(String) -> Error) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            Err(make_error(format!("Validation failed: {}", messages.join("; "))))
        }
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not empty
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate maximum length in characters
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be at most {} characters", max),
                code: "MAX_LENGTH".to_string(),
                expected: Some(format!("<= {} chars", max)),
                actual: Some(format!("{} chars", len)),
            });
        }
        self
    }

    /// Validate against a regex pattern
    pub fn pattern(mut self, field: &str, value: &str, pattern: &str, description: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => {
                if !re.is_match(value) {
                    self.result.add_error(ValidationError {
                        field: field.to_string(),
                        message: format!("Must match {}", description),
                        code: "PATTERN".to_string(),
                        expected: Some(description.to_string()),
                        actual: Some(value.to_string()),
                    });
                }
            }
            Err(_) => {
                self.result.add_error(ValidationError {
                    field: field.to_string(),
                    message: "Invalid validation pattern".to_string(),
                    code: "INTERNAL".to_string(),
                    expected: None,
                    actual: None,
                });
            }
        }
        self
    }

    /// Validate a numeric range
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        // Written so that NaN falls outside every range
        if !(value >= min && value <= max) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be between {} and {}", min, max),
                code: "RANGE".to_string(),
                expected: Some(format!("{} - {}", min, max)),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Add a warning (non-blocking)
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Validate the parameters of a free-text search request
pub fn validate_search_params(
    query: &str,
    page: Option<usize>,
    limit: Option<usize>,
    year: Option<i32>,
) -> ValidationResult {
    let mut validator = Validator::new()
        .required("q", query)
        .max_length("q", query, MAX_QUERY_CHARS);

    if let Some(page) = page {
        validator = validator.range("page", page, 1, usize::MAX);
    }
    if let Some(limit) = limit {
        validator = validator.range("limit", limit, 1, usize::MAX);
    }
    if let Some(year) = year {
        validator = validator.range("year", year, MIN_YEAR, MAX_YEAR);
    }

    validator.validate()
}

/// Validate a product identifier used for direct lookup
///
/// Any non-blank string may be an id; whether it exists is up to the store.
pub fn validate_product_id(product_id: &str) -> ValidationResult {
    Validator::new()
        .required("productId", product_id)
        .validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_required_validation() {
        let result = Validator::new().required("q", "   ").validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "REQUIRED");
    }

    #[test]
    fn test_max_length_counts_chars() {
        // Two chars, four bytes
        let result = Validator::new().max_length("q", "ñó", 2).validate();
        assert!(result.is_valid());
    }

    #[test]
    fn test_max_length_validation() {
        let result = Validator::new().max_length("q", "abcdefghijk", 5).validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "MAX_LENGTH");
    }

    #[test]
    fn test_pattern_validation() {
        let result = Validator::new()
            .pattern("id", "A1 B2", r"^\w+$", "word characters")
            .validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "PATTERN");
    }

    #[test]
    fn test_range_validation() {
        let result = Validator::new().range("limit", 150, 1, 100).validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "RANGE");
    }

    #[test]
    fn test_range_rejects_nan() {
        let result = Validator::new().range("threshold", f64::NAN, 0.0, 1.0).validate();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let result = Validator::new()
            .warn_if("limit", true, "Limit was clamped")
            .validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_search_params() {
        assert!(validate_search_params("toyota", Some(1), Some(10), Some(2012)).is_valid());
        assert!(!validate_search_params("", None, None, None).is_valid());
        assert!(!validate_search_params("toyota", Some(0), None, None).is_valid());
        assert!(!validate_search_params("toyota", None, None, Some(1200)).is_valid());

        let long = "a".repeat(MAX_QUERY_CHARS + 1);
        assert!(!validate_search_params(&long, None, None, None).is_valid());
    }

    #[test]
    fn test_product_id() {
        assert!(validate_product_id("A1").is_valid());
        assert!(validate_product_id("TOY-2015_07.b").is_valid());
        assert!(validate_product_id("FILTRO 12").is_valid());
        assert!(validate_product_id("ñ-001").is_valid());
        assert!(validate_product_id(&"9".repeat(100)).is_valid());
        assert!(!validate_product_id("").is_valid());
        assert!(!validate_product_id("   ").is_valid());
    }

    #[test]
    fn test_to_result() {
        let err = Validator::new()
            .required("q", "")
            .validate()
            .to_result()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("q: Field is required"));
    }

    #[test]
    fn test_into_result_with_custom_error() {
        let err = validate_search_params("", None, None, None)
            .into_result_with(Error::invalid_query)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuery);
        assert!(err.message.contains("q: Field is required"));

        assert!(validate_search_params("toyota", Some(1), None, None)
            .into_result_with(Error::invalid_query)
            .is_ok());
    }

    #[test]
    fn test_chained_validation() {
        let result = Validator::new()
            .required("q", "sensor")
            .max_length("q", "sensor", 10)
            .validate();
        assert!(result.is_valid());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn query_length_limit_is_in_chars(query in "[a-zñóí]{1,250}") {
            let len = query.chars().count();
            let result = validate_search_params(&query, None, None, None);
            prop_assert_eq!(result.is_valid(), len <= MAX_QUERY_CHARS);
        }

        #[test]
        fn any_non_blank_product_id_is_accepted(id in "\\PC{0,80}") {
            prop_assert_eq!(validate_product_id(&id).is_valid(), !id.trim().is_empty());
        }

        #[test]
        fn years_outside_bounds_are_rejected(year in any::<i32>()) {
            let result = validate_search_params("toyota", None, None, Some(year));
            prop_assert_eq!(result.is_valid(), (MIN_YEAR..=MAX_YEAR).contains(&year));
        }
    }
}
