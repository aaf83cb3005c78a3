use std::collections::BTreeSet;

use nutrisave_core::{Catalog, Product, ReferenceCatalog, ValidationIssue, ValidationReport};

use crate::generators::{PRICE_MAX, PRICE_MIN, QUANTITY_LABELS, STOCK_MAX, has_cent_precision};

/// Shape a catalog is expected to have, when known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogExpectations {
    /// Exact set of store keys.
    pub stores: Option<Vec<String>>,
    /// Exact number of products per store.
    pub per_store: Option<usize>,
}

/// Check a catalog against the reference it was generated from.
///
/// This checks:
/// - store keys match the expected stores, with no extras or omissions
/// - every store holds the expected number of products
/// - prices lie in range with at most two decimals
/// - stock lies in range
/// - display names are a reference item name, one space, and a known label
/// - nutrition equals the named reference item's nutrition
pub fn check_catalog(
    catalog: &Catalog,
    reference: &ReferenceCatalog,
    expectations: &CatalogExpectations,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let Some(stores) = &expectations.stores {
        let expected: BTreeSet<&str> = stores.iter().map(String::as_str).collect();
        let actual: BTreeSet<&str> = catalog.store_names().collect();

        for missing in expected.difference(&actual) {
            report.push(ValidationIssue::error(
                "missing_store",
                format!("/{}", escape_pointer(missing)),
                format!("store '{missing}' is missing from the catalog"),
            ));
        }
        for extra in actual.difference(&expected) {
            report.push(ValidationIssue::error(
                "unexpected_store",
                format!("/{}", escape_pointer(extra)),
                format!("store '{extra}' was not expected"),
            ));
        }
    }

    for (store, products) in catalog.iter() {
        let store_path = format!("/{}", escape_pointer(store));

        if let Some(per_store) = expectations.per_store
            && products.len() != per_store
        {
            report.push(ValidationIssue::error(
                "product_count",
                store_path.clone(),
                format!(
                    "store '{store}' has {} products, expected {per_store}",
                    products.len()
                ),
            ));
        }

        for (index, product) in products.iter().enumerate() {
            check_product(product, reference, &format!("{store_path}/{index}"), &mut report);
        }
    }

    report
}

fn check_product(
    product: &Product,
    reference: &ReferenceCatalog,
    path: &str,
    report: &mut ValidationReport,
) {
    if !(PRICE_MIN..=PRICE_MAX).contains(&product.price) {
        report.push(ValidationIssue::error(
            "price_out_of_range",
            format!("{path}/precio"),
            format!(
                "price {} outside [{PRICE_MIN}, {PRICE_MAX}]",
                product.price
            ),
        ));
    } else if !has_cent_precision(product.price) {
        report.push(ValidationIssue::error(
            "price_precision",
            format!("{path}/precio"),
            format!("price {} has more than two decimals", product.price),
        ));
    }

    if product.stock > STOCK_MAX {
        report.push(ValidationIssue::error(
            "stock_out_of_range",
            format!("{path}/stock"),
            format!("stock {} outside [0, {STOCK_MAX}]", product.stock),
        ));
    }

    let Some((base, label)) = product.display_name.rsplit_once(' ') else {
        report.push(ValidationIssue::error(
            "invalid_display_name",
            format!("{path}/nombre"),
            format!("'{}' has no quantity label", product.display_name),
        ));
        return;
    };

    if !QUANTITY_LABELS.contains(&label) {
        report.push(ValidationIssue::error(
            "unknown_label",
            format!("{path}/nombre"),
            format!("'{label}' is not a known quantity label"),
        ));
    }

    let mut named = reference.iter().filter(|item| item.name == base).peekable();
    if named.peek().is_none() {
        report.push(ValidationIssue::error(
            "unknown_base_item",
            format!("{path}/nombre"),
            format!("'{base}' is not a reference item"),
        ));
        return;
    }

    if !named.any(|item| item.nutrition == product.nutrition) {
        report.push(ValidationIssue::error(
            "nutrition_mismatch",
            format!("{path}/nutricion"),
            format!("nutrition does not match reference item '{base}'"),
        ));
    }
}

// RFC 6901 escaping for JSON pointer segments.
fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
