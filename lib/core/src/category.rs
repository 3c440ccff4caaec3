use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

use crate::Profile;

/// Identifier of a health category
///
/// Valid keys are exactly the keys of the classifier registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub const HEART_KIDNEY_SAFE: &'static str = "heartKidneySafe";
    pub const METABOLIC_HEALTH: &'static str = "metabolicHealth";
    pub const IMMUNITY_PREGNANCY_SAFE: &'static str = "immunityPregnancySafe";
    pub const CHILD_FAMILY_SAFE: &'static str = "childFamilySafe";
    pub const PLANT_BASED_DIET: &'static str = "plantBasedDiet";
    pub const DIGESTIVE_BONE_SUPPORT: &'static str = "digestiveBoneSupport";

    pub fn new(key: impl Into<String>) -> Self {
        CategoryKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(s: &str) -> Self {
        CategoryKey(s.to_string())
    }
}

impl From<String> for CategoryKey {
    fn from(s: String) -> Self {
        CategoryKey(s)
    }
}

impl Borrow<str> for CategoryKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CategoryKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CategoryKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Map a health profile to the categories it calls for
///
/// Rules are checked in a fixed priority order and each appends at most one
/// key, so the result is ordered and free of duplicates.
pub fn map_categories(profile: &Profile) -> Vec<CategoryKey> {
    let rules: [(bool, &str); 6] = [
        (profile.flag("high_bp"), CategoryKey::HEART_KIDNEY_SAFE),
        (profile.flag("weight_loss"), CategoryKey::METABOLIC_HEALTH),
        (profile.flag("pregnant"), CategoryKey::IMMUNITY_PREGNANCY_SAFE),
        (profile.flag("child"), CategoryKey::CHILD_FAMILY_SAFE),
        (
            profile.text_in("diet", &["vegetarian", "vegan"]),
            CategoryKey::PLANT_BASED_DIET,
        ),
        (
            profile.text_in("allergy", &["dairy", "gluten", "both"]),
            CategoryKey::DIGESTIVE_BONE_SUPPORT,
        ),
    ];

    let mut categories: Vec<CategoryKey> = Vec::with_capacity(rules.len());
    for (applies, key) in rules {
        if applies && !categories.iter().any(|c| c == key) {
            categories.push(CategoryKey::from(key));
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(profile: serde_json::Value) -> Vec<String> {
        map_categories(&Profile::from_value(profile))
            .into_iter()
            .map(|k| k.to_string())
            .collect()
    }

    #[test]
    fn test_high_bp_only() {
        assert_eq!(keys(json!({"high_bp": true})), vec!["heartKidneySafe"]);
    }

    #[test]
    fn test_priority_order() {
        let all = keys(json!({
            "allergy": "both",
            "diet": "vegetarian",
            "child": true,
            "pregnant": true,
            "weight_loss": true,
            "high_bp": true
        }));
        assert_eq!(
            all,
            vec![
                "heartKidneySafe",
                "metabolicHealth",
                "immunityPregnancySafe",
                "childFamilySafe",
                "plantBasedDiet",
                "digestiveBoneSupport",
            ]
        );
    }

    #[test]
    fn test_empty_and_falsy_profiles() {
        assert!(keys(json!({})).is_empty());
        assert!(keys(json!({"high_bp": false, "diet": "omnivore", "allergy": "none"})).is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert_eq!(
            keys(json!({"favourite_colour": "blue", "weight_loss": "yes"})),
            vec!["metabolicHealth"]
        );
    }

    #[test]
    fn test_category_key_comparisons() {
        let key = CategoryKey::from("plantBasedDiet");
        assert_eq!(key, "plantBasedDiet");
        assert_eq!(key.as_str(), CategoryKey::PLANT_BASED_DIET);
        let parsed: CategoryKey = serde_json::from_str("\"metabolicHealth\"").unwrap();
        assert_eq!(parsed.to_string(), "metabolicHealth");
    }
}
