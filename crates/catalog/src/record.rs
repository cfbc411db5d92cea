//! Inventory record and field selectors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single vehicle part in the inventory.
///
/// Records are immutable once loaded. `year_from <= year_to` is assumed, not
/// checked; inverted ranges simply never pass a year filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// Unique identifier used for direct lookup
    pub product_id: String,
    /// Vehicle make the part belongs to
    pub vehicle_brand: String,
    /// Free-text part description
    pub short_description: String,
    /// Condition label, e.g. "nuevo" or "usado"
    #[serde(default)]
    pub condition: String,
    /// Quality label, e.g. "original" or "alternativo"
    #[serde(default)]
    pub quality: String,
    /// First model year the part fits (inclusive)
    pub year_from: i32,
    /// Last model year the part fits (inclusive)
    pub year_to: i32,
}

impl InventoryRecord {
    /// Returns the text of a fuzzy-searchable field.
    #[inline]
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::VehicleBrand => &self.vehicle_brand,
            TextField::ShortDescription => &self.short_description,
        }
    }

    /// Returns the value of a categorical attribute.
    #[inline]
    pub fn attribute(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::VehicleBrand => &self.vehicle_brand,
            CategoricalField::Condition => &self.condition,
            CategoricalField::Quality => &self.quality,
        }
    }

    /// Returns true if `year` falls inside the record's inclusive year range.
    #[inline]
    pub fn fits_year(&self, year: i32) -> bool {
        self.year_from <= year && year <= self.year_to
    }
}

/// Fields the fuzzy matcher runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    /// `vehicleBrand`
    VehicleBrand,
    /// `shortDescription`
    ShortDescription,
}

impl TextField {
    /// All searchable fields in scoring order.
    pub const ALL: [TextField; 2] = [TextField::VehicleBrand, TextField::ShortDescription];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::VehicleBrand => "vehicleBrand",
            TextField::ShortDescription => "shortDescription",
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields that support distinct-value aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoricalField {
    /// `vehicleBrand`
    VehicleBrand,
    /// `condition`
    Condition,
    /// `quality`
    Quality,
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CategoricalField::VehicleBrand => "vehicleBrand",
            CategoricalField::Condition => "condition",
            CategoricalField::Quality => "quality",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> InventoryRecord {
        InventoryRecord {
            product_id: "A1".to_string(),
            vehicle_brand: "Toyota".to_string(),
            short_description: "sensor oxigeno".to_string(),
            condition: "nuevo".to_string(),
            quality: "original".to_string(),
            year_from: 2015,
            year_to: 2020,
        }
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["productId"], "A1");
        assert_eq!(json["vehicleBrand"], "Toyota");
        assert_eq!(json["yearFrom"], 2015);
    }

    #[test]
    fn test_optional_categoricals_default_to_empty() {
        let parsed: InventoryRecord = serde_json::from_str(
            r#"{"productId":"B2","vehicleBrand":"Kia","shortDescription":"filtro","yearFrom":2001,"yearTo":2003}"#,
        )
        .unwrap();
        assert!(parsed.condition.is_empty());
        assert!(parsed.quality.is_empty());
    }

    #[test]
    fn test_fits_year_is_inclusive() {
        let r = record();
        assert!(r.fits_year(2015));
        assert!(r.fits_year(2020));
        assert!(!r.fits_year(2014));
        assert!(!r.fits_year(2021));
    }

    #[test]
    fn test_inverted_range_never_fits() {
        let mut r = record();
        r.year_from = 2020;
        r.year_to = 2015;
        assert!(!r.fits_year(2017));
    }

    #[test]
    fn test_field_accessors() {
        let r = record();
        assert_eq!(r.text(TextField::ShortDescription), "sensor oxigeno");
        assert_eq!(r.attribute(CategoricalField::Quality), "original");
        assert_eq!(TextField::VehicleBrand.to_string(), "vehicleBrand");
    }
}
