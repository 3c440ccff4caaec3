use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::CategoryKey;

/// Numeric attributes of a food, raw and derived
///
/// Missing or unparseable values are stored as `NaN`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FoodAttributes {
    #[serde(rename = "Calories", default = "nan", deserialize_with = "lenient_f64")]
    pub calories: f64,
    #[serde(rename = "Sugar", default = "nan", deserialize_with = "lenient_f64")]
    pub sugar: f64,
    #[serde(rename = "Fat", default = "nan", deserialize_with = "lenient_f64")]
    pub fat: f64,
    #[serde(rename = "Protein", default = "nan", deserialize_with = "lenient_f64")]
    pub protein: f64,
    #[serde(rename = "Sodium", default = "nan", deserialize_with = "lenient_f64")]
    pub sodium: f64,
    #[serde(rename = "Fiber", default = "nan", deserialize_with = "lenient_f64")]
    pub fiber: f64,
    #[serde(rename = "Vitamin C", default = "nan", deserialize_with = "lenient_f64")]
    pub vitamin_c: f64,
    #[serde(rename = "QuantityGrams", default = "nan", deserialize_with = "lenient_f64")]
    pub quantity_grams: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub fiber_to_sugar: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub protein_density: f64,
}

impl Default for FoodAttributes {
    fn default() -> Self {
        Self {
            calories: f64::NAN,
            sugar: f64::NAN,
            fat: f64::NAN,
            protein: f64::NAN,
            sodium: f64::NAN,
            fiber: f64::NAN,
            vitamin_c: f64::NAN,
            quantity_grams: f64::NAN,
            fiber_to_sugar: f64::NAN,
            protein_density: f64::NAN,
        }
    }
}

fn nan() -> f64 {
    f64::NAN
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

/// One row of the feature table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodRow {
    #[serde(rename = "Food")]
    pub name: String,
    #[serde(flatten)]
    pub attributes: FoodAttributes,
    #[serde(rename = "Allergy", default)]
    pub allergy: Option<String>,
    #[serde(rename = "Label")]
    pub label: String,
}

impl FoodRow {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, attributes: FoodAttributes) -> Self {
        Self {
            name: name.into(),
            attributes,
            allergy: None,
            label: label.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_allergy(mut self, allergy: impl Into<String>) -> Self {
        self.allergy = Some(allergy.into());
        self
    }
}

/// Immutable row-per-food dataset
///
/// Names are not guaranteed to be unique; consumers collapse duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    rows: Vec<FoodRow>,
}

impl FeatureTable {
    pub fn new(rows: Vec<FoodRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[FoodRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&FoodRow> {
        self.rows.get(index)
    }

    /// Distinct category labels in first-seen order
    pub fn labels(&self) -> Vec<CategoryKey> {
        let mut seen = ahash::AHashSet::new();
        self.rows
            .iter()
            .filter(|row| seen.insert(row.label.as_str()))
            .map(|row| CategoryKey::new(row.label.clone()))
            .collect()
    }
}
