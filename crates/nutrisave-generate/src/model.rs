use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Default destination of the catalog file.
pub const DEFAULT_OUTPUT: &str = "nutrisave_productos.json";

/// Default number of products generated for each store.
pub const DEFAULT_PER_STORE: usize = 75;

/// Retail chains the catalog is generated for by default.
pub const DEFAULT_STORES: [&str; 9] = [
    "Soriana",
    "Walmart",
    "Chedraui",
    "La Comer",
    "HEB",
    "Superama",
    "Bodega Aurrera",
    "Costco",
    "Sam's Club",
];

pub fn default_stores() -> Vec<String> {
    DEFAULT_STORES.iter().map(|store| store.to_string()).collect()
}

/// Convert a user supplied product count, rejecting negative values.
pub fn resolve_per_store(value: i64) -> Result<usize, GenerationError> {
    usize::try_from(value).map_err(|_| {
        GenerationError::InvalidInput(format!("per-store count must be >= 0, got {value}"))
    })
}

/// Options for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Store names, processed in order.
    pub stores: Vec<String>,
    /// Products generated for every store.
    pub per_store: usize,
    /// Seed the random source was built from, recorded in the report.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            stores: default_stores(),
            per_store: DEFAULT_PER_STORE,
            seed: None,
        }
    }
}

/// Summary of the products generated for one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreReport {
    pub store: String,
    pub products_requested: u64,
    pub products_generated: u64,
    pub stock_total: u64,
    pub average_price: Option<f64>,
}

/// Report for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub generated_at: String,
    pub seed: Option<u64>,
    pub per_store: u64,
    pub stores: Vec<StoreReport>,
    pub products_total: u64,
    pub base_item_usage: BTreeMap<String, u64>,
    pub label_usage: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplicate_stores: Vec<String>,
    pub duration_ms: u64,
    pub bytes_written: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: Option<u64>, per_store: usize) -> Self {
        Self {
            run_id,
            generated_at: chrono::Utc::now().to_rfc3339(),
            seed,
            per_store: per_store as u64,
            stores: Vec::new(),
            products_total: 0,
            base_item_usage: BTreeMap::new(),
            label_usage: BTreeMap::new(),
            duplicate_stores: Vec::new(),
            duration_ms: 0,
            bytes_written: 0,
        }
    }

    pub fn record_base_item(&mut self, name: &str) {
        *self.base_item_usage.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn record_label(&mut self, label: &str) {
        *self.label_usage.entry(label.to_string()).or_insert(0) += 1;
    }

    pub fn record_duplicate_store(&mut self, store: &str) {
        if !self.duplicate_stores.iter().any(|existing| existing == store) {
            self.duplicate_stores.push(store.to_string());
        }
    }

    pub fn record_store(&mut self, store: StoreReport) {
        self.products_total += store.products_generated;
        self.stores.push(store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_counts_are_invalid_input() {
        assert!(matches!(
            resolve_per_store(-1),
            Err(GenerationError::InvalidInput(_))
        ));
        assert_eq!(resolve_per_store(0).ok(), Some(0));
        assert_eq!(resolve_per_store(75).ok(), Some(75));
    }

    #[test]
    fn defaults_cover_nine_stores() {
        let options = GenerateOptions::default();
        assert_eq!(options.stores.len(), 9);
        assert_eq!(options.per_store, 75);
        assert_eq!(options.stores[0], "Soriana");
        assert_eq!(options.stores[8], "Sam's Club");
    }

    #[test]
    fn duplicate_stores_are_recorded_once() {
        let mut report = GenerationReport::new("run".to_string(), Some(1), 3);
        report.record_duplicate_store("HEB");
        report.record_duplicate_store("HEB");
        assert_eq!(report.duplicate_stores, vec!["HEB".to_string()]);
    }
}
