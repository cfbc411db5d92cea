//! Vehicle-parts inventory for the autoparts search service.
//!
//! This crate provides:
//! - The `InventoryRecord` data model
//! - An immutable, load-once `RecordStore`
//! - Lookup by product id and distinct-value aggregation
//!
//! # Example
//!
//! ```
//! use autoparts_catalog::{CategoricalField, RecordStore};
//!
//! let store = RecordStore::from_json_str(r#"[
//!     {"productId":"A1","vehicleBrand":"Toyota","shortDescription":"sensor oxigeno",
//!      "condition":"nuevo","quality":"original","yearFrom":2015,"yearTo":2020}
//! ]"#).unwrap();
//!
//! assert_eq!(store.len(), 1);
//! assert!(store.get("A1").is_some());
//! assert_eq!(store.distinct_values(CategoricalField::VehicleBrand), ["Toyota"]);
//! ```

mod error;
mod record;
mod store;

pub use error::{CatalogError, CatalogErrorCode, Result};
pub use record::{CategoricalField, InventoryRecord, TextField};
pub use store::RecordStore;
