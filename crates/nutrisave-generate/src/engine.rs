use std::collections::BTreeSet;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, warn};

use nutrisave_core::{BaseItem, Catalog, Product, ReferenceCatalog};

use crate::errors::GenerationError;
use crate::generators::{pick_price, pick_quantity_label, pick_stock, round_cents};
use crate::model::{GenerateOptions, GenerationReport, StoreReport};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub catalog: Catalog,
    pub report: GenerationReport,
}

/// Synthesize one product from a base item.
///
/// The base item's nutrition is copied into the product.
pub fn generate_product(base: &BaseItem, rng: &mut impl Rng) -> Product {
    let label = pick_quantity_label(rng);
    let price = pick_price(rng);
    let stock = pick_stock(rng);

    Product {
        display_name: format!("{} {}", base.name, label),
        price,
        stock,
        nutrition: base.nutrition,
    }
}

/// Entry point for generating store catalogs from a reference catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogGenerator<'a> {
    reference: &'a ReferenceCatalog,
}

impl<'a> CatalogGenerator<'a> {
    pub fn new(reference: &'a ReferenceCatalog) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &'a ReferenceCatalog {
        self.reference
    }

    /// Pick a base item uniformly at random, with replacement.
    pub fn sample_base_item(&self, rng: &mut impl Rng) -> Result<&'a BaseItem, GenerationError> {
        if self.reference.is_empty() {
            return Err(GenerationError::InvalidInput(
                "reference catalog is empty".to_string(),
            ));
        }
        let index = rng.random_range(0..self.reference.len());
        self.reference.get(index).ok_or_else(|| {
            GenerationError::InvalidInput(format!("reference index {index} out of range"))
        })
    }

    /// Generate `per_store` products for every store.
    ///
    /// A store name given twice keeps only the products of its last
    /// occurrence.
    pub fn generate_catalog(
        &self,
        stores: &[String],
        per_store: usize,
        rng: &mut impl Rng,
    ) -> Result<Catalog, GenerationError> {
        if self.reference.is_empty() {
            return Err(GenerationError::InvalidInput(
                "reference catalog is empty".to_string(),
            ));
        }

        let mut catalog = Catalog::new();
        for store in stores {
            let mut products = Vec::with_capacity(per_store);
            for _ in 0..per_store {
                let base = self.sample_base_item(rng)?;
                products.push(generate_product(base, rng));
            }

            debug!(store = %store, products = products.len(), "store generated");

            if catalog.insert(store.as_str(), products).is_some() {
                warn!(store = %store, "duplicate store name, earlier products replaced");
            }
        }

        Ok(catalog)
    }

    /// Generate a catalog and summarize it in a report.
    pub fn run(
        &self,
        options: &GenerateOptions,
        rng: &mut impl Rng,
    ) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        info!(
            run_id = %run_id,
            stores = options.stores.len(),
            per_store = options.per_store,
            reference_items = self.reference.len(),
            seed = options.seed,
            "generation started"
        );

        let catalog = self.generate_catalog(&options.stores, options.per_store, rng)?;

        let mut report = GenerationReport::new(run_id.clone(), options.seed, options.per_store);
        let mut seen = BTreeSet::new();
        for store in &options.stores {
            if !seen.insert(store.as_str()) {
                report.record_duplicate_store(store);
            }
        }
        self.summarize(&catalog, options.per_store, &mut report);
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            run_id = %run_id,
            stores = catalog.len(),
            products = report.products_total,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult { catalog, report })
    }

    fn summarize(&self, catalog: &Catalog, per_store: usize, report: &mut GenerationReport) {
        for (store, products) in catalog.iter() {
            let stock_total = products.iter().map(|product| u64::from(product.stock)).sum();
            let average_price = if products.is_empty() {
                None
            } else {
                let total: f64 = products.iter().map(|product| product.price).sum();
                Some(round_cents(total / products.len() as f64))
            };

            for product in products {
                if let Some((base, label)) = self.split_display_name(&product.display_name) {
                    report.record_base_item(base);
                    report.record_label(label);
                }
            }

            report.record_store(StoreReport {
                store: store.to_string(),
                products_requested: per_store as u64,
                products_generated: products.len() as u64,
                stock_total,
                average_price,
            });
        }
    }

    /// Split a display name into its reference item name and quantity label.
    pub fn split_display_name<'n>(&self, display_name: &'n str) -> Option<(&'n str, &'n str)> {
        let (base, label) = display_name.rsplit_once(' ')?;
        self.reference.find(base).map(|_| (base, label))
    }
}

#[cfg(test)]
mod tests {
    use nutrisave_core::Nutrition;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn product_copies_nutrition_and_appends_label() {
        let mut base = BaseItem::new("Queso Panela", Nutrition::new(265.0, 18.0, 2.4, 21.0));
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let product = generate_product(&base, &mut rng);
        base.nutrition.calories = 0.0;

        assert!(product.display_name.starts_with("Queso Panela "));
        assert_eq!(product.nutrition.calories, 265.0);
    }

    #[test]
    fn split_display_name_handles_names_with_spaces() {
        let reference = ReferenceCatalog::builtin();
        let generator = CatalogGenerator::new(&reference);

        assert_eq!(
            generator.split_display_name("Atún en lata 500g"),
            Some(("Atún en lata", "500g"))
        );
        assert_eq!(generator.split_display_name("Desconocido 1kg"), None);
        assert_eq!(generator.split_display_name("Manzana"), None);
    }
}
