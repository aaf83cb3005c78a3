//! Core contracts for NutriSave.
//!
//! This crate defines the reference food items, the generated product
//! records, and the JSON contract of the catalog file shared by the
//! generator and the CLI.

pub mod error;
pub mod nutrition;
pub mod product;
pub mod reference;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use nutrition::{BaseItem, Nutrition};
pub use product::{Catalog, Product};
pub use reference::ReferenceCatalog;
pub use schema::catalog_json_schema;
pub use validation::{
    IssueSeverity, ValidationIssue, ValidationReport, validate_catalog_json, validate_reference,
};
