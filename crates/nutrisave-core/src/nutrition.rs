use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};

/// Nutrition facts per 100 units of a food item.
///
/// Field names on the wire are the ones consumed by the NutriSave app.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Nutrition {
    #[serde(rename = "calorias", serialize_with = "serialize_amount")]
    #[schemars(with = "f64")]
    pub calories: f64,
    #[serde(rename = "proteinas", serialize_with = "serialize_amount")]
    #[schemars(with = "f64")]
    pub protein: f64,
    #[serde(rename = "carbohidratos", serialize_with = "serialize_amount")]
    #[schemars(with = "f64")]
    pub carbohydrates: f64,
    #[serde(rename = "grasas", serialize_with = "serialize_amount")]
    #[schemars(with = "f64")]
    pub fat: f64,
}

impl Nutrition {
    pub const fn new(calories: f64, protein: f64, carbohydrates: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbohydrates,
            fat,
        }
    }

    /// Values paired with their wire names, in serialization order.
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("calorias", self.calories),
            ("proteinas", self.protein),
            ("carbohidratos", self.carbohydrates),
            ("grasas", self.fat),
        ]
    }
}

/// A reference food entry used as the template for generated products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BaseItem {
    pub name: String,
    pub nutrition: Nutrition,
}

impl BaseItem {
    pub fn new(name: impl Into<String>, nutrition: Nutrition) -> Self {
        Self {
            name: name.into(),
            nutrition,
        }
    }
}

// Integral amounts are written as JSON integers (`52`, not `52.0`).
fn serialize_amount<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_amounts_serialize_as_integers() {
        let nutrition = Nutrition::new(52.0, 0.3, 14.0, 0.2);
        let json = serde_json::to_string(&nutrition).expect("serialize nutrition");
        assert_eq!(
            json,
            r#"{"calorias":52,"proteinas":0.3,"carbohidratos":14,"grasas":0.2}"#
        );
    }

    #[test]
    fn integer_amounts_deserialize_as_floats() {
        let nutrition: Nutrition = serde_json::from_str(
            r#"{"calorias":0,"proteinas":0,"carbohidratos":0,"grasas":100}"#,
        )
        .expect("parse nutrition");
        assert_eq!(nutrition, Nutrition::new(0.0, 0.0, 0.0, 100.0));
    }

    #[test]
    fn rejects_unknown_nutrition_fields() {
        let result: Result<Nutrition, _> = serde_json::from_str(
            r#"{"calorias":1,"proteinas":1,"carbohidratos":1,"grasas":1,"fibra":2}"#,
        );
        assert!(result.is_err());
    }
}
