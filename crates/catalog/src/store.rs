//! Immutable record store.
//!
//! Built once at startup and shared read-only afterwards; there is no
//! mutation API, so concurrent readers need no locking.

use crate::error::{CatalogError, Result};
use crate::record::{CategoricalField, InventoryRecord};
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

/// In-memory inventory with a product-id index.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<InventoryRecord>,
    by_id: HashMap<String, usize>,
    duplicate_ids: Vec<String>,
}

impl RecordStore {
    /// Builds a store from records, preserving their order.
    ///
    /// When a product id repeats, lookups resolve to the first occurrence;
    /// all records still take part in search.
    pub fn from_records(records: Vec<InventoryRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut duplicate_ids = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            if by_id.contains_key(&record.product_id) {
                duplicate_ids.push(record.product_id.clone());
            } else {
                by_id.insert(record.product_id.clone(), idx);
            }
        }

        if !duplicate_ids.is_empty() {
            tracing::warn!(
                count = duplicate_ids.len(),
                first = %duplicate_ids[0],
                "Duplicate product ids in inventory; lookups use the first occurrence"
            );
        }

        Self {
            records,
            by_id,
            duplicate_ids,
        }
    }

    /// Parses a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<InventoryRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Parses a JSON array of records from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let records: Vec<InventoryRecord> = serde_json::from_reader(reader)?;
        Ok(Self::from_records(records))
    }

    /// Loads the inventory file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            records = store.len(),
            "Inventory loaded"
        );
        Ok(store)
    }

    /// All records in load order.
    #[inline]
    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are loaded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by product id.
    pub fn get(&self, product_id: &str) -> Option<&InventoryRecord> {
        self.by_id.get(product_id).map(|&idx| &self.records[idx])
    }

    /// Product ids that appeared more than once during load.
    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicate_ids
    }

    /// Sorted, de-duplicated non-empty values of a categorical field.
    pub fn distinct_values(&self, field: CategoricalField) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.attribute(field).trim())
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }
}
