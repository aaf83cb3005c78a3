use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use nutrisave_core::{BaseItem, Error, Nutrition, ReferenceCatalog, validate_reference};

#[test]
fn builtin_catalog_has_unique_valid_items() {
    let catalog = ReferenceCatalog::builtin();
    assert_eq!(catalog.len(), 30);
    validate_reference(&catalog).expect("builtin catalog is valid");

    let names: BTreeSet<&str> = catalog.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names.len(), catalog.len(), "builtin names are unique");
}

#[test]
fn builtin_catalog_keeps_reference_values() {
    let catalog = ReferenceCatalog::builtin();

    let oil = catalog.find("Aceite de Oliva").expect("olive oil present");
    assert_eq!(oil.nutrition, Nutrition::new(884.0, 0.0, 0.0, 100.0));

    let first = catalog.get(0).expect("first item");
    assert_eq!(first.name, "Manzana");
    assert!(catalog.find("Café Molido").is_some());
}

#[test]
fn loads_reference_from_json_file() {
    let path = temp_file("reference.json");
    fs::write(
        &path,
        r#"[
    {"name": "Piña", "nutrition": {"calorias": 50, "proteinas": 0.5, "carbohidratos": 13, "grasas": 0.1}},
    {"name": "Frijol", "nutrition": {"calorias": 347, "proteinas": 21, "carbohidratos": 63, "grasas": 1.2}}
]"#,
    )
    .expect("write reference file");

    let catalog = ReferenceCatalog::load_json(&path).expect("load reference");
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get(0),
        Some(&BaseItem::new("Piña", Nutrition::new(50.0, 0.5, 13.0, 0.1)))
    );
}

#[test]
fn load_rejects_invalid_items() {
    let path = temp_file("invalid_reference.json");
    fs::write(
        &path,
        r#"[{"name": "", "nutrition": {"calorias": 1, "proteinas": 1, "carbohidratos": 1, "grasas": 1}}]"#,
    )
    .expect("write reference file");

    let result = ReferenceCatalog::load_json(&path);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn load_reports_missing_and_malformed_files() {
    let missing = temp_file("does_not_exist.json");
    assert!(matches!(
        ReferenceCatalog::load_json(&missing),
        Err(Error::Io(_))
    ));

    let malformed = temp_file("malformed.json");
    fs::write(&malformed, "{ not json").expect("write malformed file");
    assert!(matches!(
        ReferenceCatalog::load_json(&malformed),
        Err(Error::Json(_))
    ));
}

fn temp_file(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("nutrisave_core_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir.join(name)
}
