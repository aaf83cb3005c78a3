use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::product::Catalog;

/// Emit the JSON Schema for the generated catalog file.
pub fn catalog_json_schema() -> RootSchema {
    schema_for!(Catalog)
}
