use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{get_filters, map_categories, CategoryKey, Error, Profile, Result, SuggestionContext};

pub const TOP_N_MIN: usize = 2;
pub const TOP_N_MAX: usize = 10;
pub const TOP_N_DEFAULT: usize = 5;

/// Inbound recommendation request
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RecommendRequest {
    #[serde(default)]
    pub basic_profile: Profile,
    /// Fallback category, used only when the profile maps to nothing
    ///
    /// Anything other than a registered key, non-strings included, counts as absent.
    #[serde(default)]
    pub main_goal: Option<Value>,
    #[serde(default)]
    pub extra_profile: Option<Profile>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub top_n: Option<i64>,
}

/// Accepts integers, floats (truncated) and numeric strings
fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid top_n: {}", n))),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid top_n: {:?}", s)))
        }
        Some(other) => Err(D::Error::custom(format!("invalid top_n: {}", other))),
    }
}

/// Result of a recommendation request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub initial: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refined: Option<Vec<String>>,
}

/// Effective list length: default 5, clamped into `[2, 10]`
pub fn clamp_top_n(requested: Option<i64>) -> usize {
    match requested {
        None => TOP_N_DEFAULT,
        Some(n) => n.clamp(TOP_N_MIN as i64, TOP_N_MAX as i64) as usize,
    }
}

/// Categories for a request: the mapped profile, else a registered `main_goal`
pub fn resolve_categories(context: &SuggestionContext, request: &RecommendRequest) -> Result<Vec<CategoryKey>> {
    let categories = map_categories(&request.basic_profile);
    if !categories.is_empty() {
        return Ok(categories);
    }

    match request.main_goal.as_ref().and_then(Value::as_str) {
        Some(goal) if context.registry().contains(goal) => Ok(vec![CategoryKey::from(goal)]),
        _ => Err(Error::NoCategories),
    }
}

/// Run the initial pass and, for a non-empty extra profile, the refined pass
pub fn recommend(context: &SuggestionContext, request: &RecommendRequest) -> Result<Recommendation> {
    let top_n = clamp_top_n(request.top_n);
    let categories = resolve_categories(context, request)?;
    debug!(?categories, top_n, "resolved categories");

    let initial = context.get_suggestions(&categories, top_n, None)?;

    let refined = match request.extra_profile.as_ref().filter(|p| !p.is_empty()) {
        Some(extra) => {
            let directives = get_filters(extra);
            debug!(?directives, "refinement directives");
            Some(context.get_suggestions(&categories, top_n, Some(&directives))?)
        }
        None => None,
    };

    Ok(Recommendation { initial, refined })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClassifierRegistry, Ensemble, FeatureTable, FoodAttributes, FoodRow, ProbabilityModel, ScoringMatrix};
    use serde_json::json;

    #[derive(Debug)]
    struct Fixed(Vec<f64>);

    impl ProbabilityModel for Fixed {
        fn predict_probability(&self, _matrix: &ScoringMatrix) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }
    }

    fn context() -> SuggestionContext {
        let rows = vec![
            ("Lau Ghonto", "heartKidneySafe", 2.0),
            ("Rui Jhol", "heartKidneySafe", 1.0),
            ("Mishti Doi", "childFamilySafe", 18.0),
            ("Payesh", "childFamilySafe", 22.0),
            ("Chicken Roast", "metabolicHealth", 3.0),
            ("Mug Dal", "metabolicHealth", 1.5),
        ];
        let table = FeatureTable::new(
            rows.iter()
                .map(|(name, label, sugar)| {
                    FoodRow::new(
                        *name,
                        *label,
                        FoodAttributes { sugar: *sugar, fiber_to_sugar: 1.0 / sugar, protein_density: 0.1, ..FoodAttributes::default() },
                    )
                })
                .collect(),
        );
        let ensemble = |key: &str, probs: Vec<f64>| {
            Ensemble::new(CategoryKey::from(key), 0.5, vec![Box::new(Fixed(probs)) as Box<dyn ProbabilityModel>]).unwrap()
        };
        let registry: ClassifierRegistry = vec![
            ensemble("heartKidneySafe", vec![0.9, 0.8, 0.1, 0.1, 0.7, 0.2]),
            ensemble("childFamilySafe", vec![0.1, 0.2, 0.9, 0.8, 0.1, 0.3]),
            ensemble("metabolicHealth", vec![0.3, 0.2, 0.1, 0.2, 0.9, 0.8]),
        ]
        .into_iter()
        .collect();
        let matrix = ScoringMatrix::from_rows(vec![vec![0.0]; 6]).unwrap();
        SuggestionContext::new(table, matrix, registry).unwrap()
    }

    fn request(value: serde_json::Value) -> RecommendRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_clamp_top_n() {
        assert_eq!(clamp_top_n(None), 5);
        assert_eq!(clamp_top_n(Some(0)), 2);
        assert_eq!(clamp_top_n(Some(-4)), 2);
        assert_eq!(clamp_top_n(Some(7)), 7);
        assert_eq!(clamp_top_n(Some(999)), 10);
    }

    #[test]
    fn test_lenient_top_n() {
        assert_eq!(request(json!({"top_n": 3})).top_n, Some(3));
        assert_eq!(request(json!({"top_n": 4.9})).top_n, Some(4));
        assert_eq!(request(json!({"top_n": " 8 "})).top_n, Some(8));
        assert_eq!(request(json!({"top_n": null})).top_n, None);
        assert_eq!(request(json!({})).top_n, None);
        assert!(serde_json::from_value::<RecommendRequest>(json!({"top_n": "many"})).is_err());
        assert!(serde_json::from_value::<RecommendRequest>(json!({"top_n": [1]})).is_err());
    }

    #[test]
    fn test_high_bp_initial_only() {
        let ctx = context();
        let result = recommend(&ctx, &request(json!({"basic_profile": {"high_bp": true}, "top_n": 3}))).unwrap();
        assert_eq!(result.initial, vec!["Lau Ghonto", "Rui Jhol", "Chicken Roast"]);
        assert!(result.refined.is_none());
    }

    #[test]
    fn test_main_goal_fallback() {
        let ctx = context();
        let result = recommend(
            &ctx,
            &request(json!({"basic_profile": {}, "main_goal": "metabolicHealth", "top_n": 2})),
        )
        .unwrap();
        assert_eq!(result.initial, vec!["Chicken Roast", "Mug Dal"]);
    }

    #[test]
    fn test_no_categories() {
        let ctx = context();
        assert_eq!(
            recommend(&ctx, &request(json!({"basic_profile": {}, "main_goal": "unknownGoal"}))).unwrap_err(),
            Error::NoCategories
        );
        assert_eq!(recommend(&ctx, &request(json!({}))).unwrap_err(), Error::NoCategories);
    }

    #[test]
    fn test_non_string_main_goal_is_ignored() {
        let ctx = context();
        let result = recommend(
            &ctx,
            &request(json!({"basic_profile": {"high_bp": true}, "main_goal": 0, "top_n": 3})),
        )
        .unwrap();
        assert_eq!(result.initial, vec!["Lau Ghonto", "Rui Jhol", "Chicken Roast"]);

        for goal in [json!(0), json!(true), json!(["metabolicHealth"]), json!({"goal": 1})] {
            assert_eq!(
                recommend(&ctx, &request(json!({"basic_profile": {}, "main_goal": goal}))).unwrap_err(),
                Error::NoCategories
            );
        }
    }

    #[test]
    fn test_low_sugar_refinement() {
        let ctx = context();
        let result = recommend(
            &ctx,
            &request(json!({
                "basic_profile": {"child": true},
                "extra_profile": {"macro": "low_sugar"},
                "top_n": 4
            })),
        )
        .unwrap();

        let refined = result.refined.unwrap();
        assert!(!refined.is_empty());
        for name in &refined {
            let row = ctx.features().rows().iter().find(|r| &r.name == name).unwrap();
            assert!(row.attributes.sugar <= 5.0, "{} has sugar {}", name, row.attributes.sugar);
        }
        assert!(result.initial.contains(&"Mishti Doi".to_string()));
    }

    #[test]
    fn test_hot_spice_skips_child_category() {
        let ctx = context();
        let result = recommend(
            &ctx,
            &request(json!({
                "basic_profile": {"weight_loss": true, "child": true},
                "extra_profile": {"spicy": "hot", "activity": "high"},
                "top_n": 2
            })),
        )
        .unwrap();

        // metabolicHealth is mapped first; hot spice removes childFamilySafe
        assert_eq!(result.initial, vec!["Chicken Roast", "Mug Dal"]);
        // equal protein density everywhere, so names break the tie
        assert_eq!(result.refined.unwrap(), vec!["Chicken Roast", "Mug Dal"]);
    }

    #[test]
    fn test_empty_extra_profile_skips_refinement() {
        let ctx = context();
        let result = recommend(
            &ctx,
            &request(json!({"basic_profile": {"high_bp": true}, "extra_profile": {}})),
        )
        .unwrap();
        assert!(result.refined.is_none());
        assert_eq!(result.initial.len(), 5);
    }

    #[test]
    fn test_response_shape() {
        let body = serde_json::to_value(Recommendation { initial: vec!["a".into()], refined: None }).unwrap();
        assert_eq!(body, json!({"initial": ["a"]}));
    }
}
