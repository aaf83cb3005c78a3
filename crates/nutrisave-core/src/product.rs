use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::nutrition::Nutrition;

/// A generated catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Product {
    /// Base item name followed by a quantity label, e.g. `Manzana 1kg`.
    #[serde(rename = "nombre")]
    pub display_name: String,
    /// Price in currency units, rounded to two decimals.
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: u32,
    /// Copy of the base item's nutrition facts.
    #[serde(rename = "nutricion")]
    pub nutrition: Nutrition,
}

/// Generated products keyed by store name.
///
/// Keys are kept sorted so a seeded run always serializes identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Catalog {
    stores: BTreeMap<String, Vec<Product>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the products of a store, returning the products it replaced.
    pub fn insert(
        &mut self,
        store: impl Into<String>,
        products: Vec<Product>,
    ) -> Option<Vec<Product>> {
        self.stores.insert(store.into(), products)
    }

    pub fn get(&self, store: &str) -> Option<&[Product]> {
        self.stores.get(store).map(Vec::as_slice)
    }

    pub fn contains_store(&self, store: &str) -> bool {
        self.stores.contains_key(store)
    }

    pub fn store_names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Product])> {
        self.stores
            .iter()
            .map(|(store, products)| (store.as_str(), products.as_slice()))
    }

    /// Number of stores in the catalog.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Total number of products across every store.
    pub fn product_count(&self) -> usize {
        self.stores.values().map(Vec::len).sum()
    }
}
