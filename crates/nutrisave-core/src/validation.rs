use jsonschema::JSONSchema;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::reference::ReferenceCatalog;
use crate::schema::catalog_json_schema;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Structured validation issue with its JSON pointer location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        severity: IssueSeverity,
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn error(
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(IssueSeverity::Error, code, path, message)
    }

    pub fn warning(
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(IssueSeverity::Warning, code, path, message)
    }
}

/// Aggregated validation report with errors and warnings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an issue to the list matching its severity.
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            IssueSeverity::Error => self.errors.push(issue),
            IssueSeverity::Warning => self.warnings.push(issue),
        }
    }

    /// Merge another report into this one.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Validate the base items of a reference catalog.
///
/// This checks:
/// - every item has a non-blank name
/// - every nutrition value is finite and non-negative
///
/// An empty catalog passes; generation is what requires at least one item.
pub fn validate_reference(catalog: &ReferenceCatalog) -> Result<()> {
    for (index, item) in catalog.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(Error::InvalidInput(format!(
                "reference item {index} has a blank name"
            )));
        }

        for (field, value) in item.nutrition.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "reference item '{}' has invalid {field}: {value}",
                    item.name
                )));
            }
        }
    }

    Ok(())
}

/// Validate a catalog JSON document against the catalog JSON Schema.
pub fn validate_catalog_json(catalog_json: &Value) -> Result<ValidationReport> {
    let schema = serde_json::to_value(catalog_json_schema())?;
    let compiled = JSONSchema::compile(&schema).map_err(|err| Error::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(catalog_json) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push(ValidationIssue::error(
                "schema_violation",
                path,
                error.to_string(),
            ));
        }
    }

    Ok(report)
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{BaseItem, Nutrition};

    #[test]
    fn rejects_blank_names() {
        let catalog = ReferenceCatalog::new(vec![BaseItem::new(
            "  ",
            Nutrition::new(1.0, 1.0, 1.0, 1.0),
        )]);
        assert!(matches!(
            validate_reference(&catalog),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        let negative = ReferenceCatalog::new(vec![BaseItem::new(
            "Manzana",
            Nutrition::new(52.0, -0.3, 14.0, 0.2),
        )]);
        assert!(validate_reference(&negative).is_err());

        let nan = ReferenceCatalog::new(vec![BaseItem::new(
            "Manzana",
            Nutrition::new(f64::NAN, 0.3, 14.0, 0.2),
        )]);
        assert!(validate_reference(&nan).is_err());
    }

    #[test]
    fn empty_reference_passes_validation() {
        assert!(validate_reference(&ReferenceCatalog::default()).is_ok());
    }

    #[test]
    fn root_pointer_is_normalized() {
        assert_eq!(normalized_json_pointer(""), "/");
        assert_eq!(normalized_json_pointer("/Soriana/0"), "/Soriana/0");
    }
}
