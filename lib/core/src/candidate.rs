use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Attributes a candidate can be ranked or capped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Probability,
    Sugar,
    ProteinDensity,
    FiberToSugar,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Probability => "probability",
            Attribute::Sugar => "sugar",
            Attribute::ProteinDensity => "protein_density",
            Attribute::FiberToSugar => "fiber_to_sugar",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A food scored for one category pass
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Row index into the feature table and scoring matrix
    pub row: usize,
    pub name: String,
    pub probability: f64,
    pub sugar: f64,
    pub protein_density: f64,
    pub fiber_to_sugar: f64,
}

impl Candidate {
    pub fn value(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Probability => self.probability,
            Attribute::Sugar => self.sugar,
            Attribute::ProteinDensity => self.protein_density,
            Attribute::FiberToSugar => self.fiber_to_sugar,
        }
    }
}

/// Sort key for descending order with `NaN` last
fn descending_key(value: f64) -> OrderedFloat<f64> {
    if value.is_nan() {
        OrderedFloat(f64::NEG_INFINITY)
    } else {
        OrderedFloat(value)
    }
}

/// Sort candidates best-first by `attribute`
///
/// Ties are broken by name ascending; remaining ties keep table order since
/// the sort is stable.
pub fn rank_candidates(candidates: &mut [Candidate], attribute: Attribute) {
    candidates.sort_by(|a, b| {
        descending_key(b.value(attribute))
            .cmp(&descending_key(a.value(attribute)))
            .then_with(|| match (a.value(attribute).is_nan(), b.value(attribute).is_nan()) {
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                _ => Ordering::Equal,
            })
            .then_with(|| a.name.cmp(&b.name))
    });
}
