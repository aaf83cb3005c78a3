use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::nutrition::{BaseItem, Nutrition};
use crate::validation::validate_reference;

/// Compiled-in base items: name, calories, protein, carbohydrates, fat.
const BUILTIN_ITEMS: &[(&str, f64, f64, f64, f64)] = &[
    // Fruits
    ("Manzana", 52.0, 0.3, 14.0, 0.2),
    ("Plátano", 89.0, 1.1, 23.0, 0.3),
    ("Naranja", 47.0, 0.9, 12.0, 0.1),
    ("Mango", 60.0, 0.8, 15.0, 0.4),
    ("Uva", 69.0, 0.7, 18.0, 0.2),
    // Vegetables
    ("Zanahoria", 41.0, 0.9, 10.0, 0.2),
    ("Tomate", 18.0, 0.9, 3.9, 0.2),
    ("Papa", 77.0, 2.0, 17.0, 0.1),
    ("Espinaca", 23.0, 2.9, 3.6, 0.4),
    ("Brócoli", 34.0, 2.8, 7.0, 0.4),
    // Meats and proteins
    ("Pollo", 239.0, 27.0, 0.0, 14.0),
    ("Carne de Res", 250.0, 26.0, 0.0, 17.0),
    ("Cerdo", 242.0, 27.0, 0.0, 14.0),
    ("Pescado", 206.0, 22.0, 0.0, 12.0),
    ("Atún en lata", 132.0, 28.0, 0.0, 1.0),
    ("Huevo", 155.0, 13.0, 1.1, 11.0),
    ("Jamón", 145.0, 20.0, 1.5, 5.0),
    // Dairy
    ("Leche", 42.0, 3.4, 5.0, 1.0),
    ("Queso Panela", 265.0, 18.0, 2.4, 21.0),
    ("Yogur Natural", 59.0, 10.0, 3.6, 0.4),
    // Cereals and bread
    ("Arroz", 130.0, 2.7, 28.0, 0.3),
    ("Pan Integral", 247.0, 8.4, 41.0, 4.4),
    ("Tortillas de Maíz", 218.0, 6.0, 46.0, 2.8),
    ("Avena", 389.0, 17.0, 66.0, 7.0),
    // Condiments and oils
    ("Aceite de Oliva", 884.0, 0.0, 0.0, 100.0),
    ("Sal", 0.0, 0.0, 0.0, 0.0),
    ("Pimienta Negra", 251.0, 10.0, 64.0, 3.0),
    // Beverages
    ("Agua Mineral", 0.0, 0.0, 0.0, 0.0),
    ("Jugo de Naranja", 45.0, 0.7, 10.0, 0.2),
    ("Café Molido", 2.0, 0.3, 0.0, 0.0),
];

/// Read-only pool of base items that products are sampled from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCatalog {
    items: Vec<BaseItem>,
}

impl ReferenceCatalog {
    pub fn new(items: Vec<BaseItem>) -> Self {
        Self { items }
    }

    /// The base items compiled into the program.
    pub fn builtin() -> Self {
        let items = BUILTIN_ITEMS
            .iter()
            .map(|&(name, calories, protein, carbohydrates, fat)| {
                BaseItem::new(name, Nutrition::new(calories, protein, carbohydrates, fat))
            })
            .collect();
        Self { items }
    }

    /// Load base items from a JSON array of `{"name", "nutrition"}` objects.
    pub fn load_json(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let items: Vec<BaseItem> = serde_json::from_str(&contents)?;
        let catalog = Self::new(items);
        validate_reference(&catalog)?;
        Ok(catalog)
    }

    pub fn items(&self) -> &[BaseItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BaseItem> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&BaseItem> {
        self.items.get(index)
    }

    /// First item with the given name.
    pub fn find(&self, name: &str) -> Option<&BaseItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReferenceCatalog {
    type Item = &'a BaseItem;
    type IntoIter = std::slice::Iter<'a, BaseItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
