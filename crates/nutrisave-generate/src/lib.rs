//! Mock grocery catalog generation for NutriSave.
//!
//! This crate samples base items from a `ReferenceCatalog`, synthesizes
//! randomized store products, and writes the resulting catalog as JSON.

pub mod checks;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;

pub use checks::{CatalogExpectations, check_catalog};
pub use engine::{CatalogGenerator, GenerationResult, generate_product};
pub use errors::GenerationError;
pub use model::{
    DEFAULT_OUTPUT, DEFAULT_PER_STORE, DEFAULT_STORES, GenerateOptions, GenerationReport,
    StoreReport, default_stores, resolve_per_store,
};
pub use output::json::{read_catalog_json, write_catalog_json, write_json_pretty, write_pretty};
