//! Refinement filters
//!
//! A secondary profile compiles into an ordered list of [`FilterDirective`]s.
//! Row directives (`MaxAttribute`, `ExcludeKeyword`) commute with each other;
//! `ExcludeCategory` only shrinks the list of categories still to be visited.

use serde::{Deserialize, Serialize};

use crate::{Attribute, Candidate, CategoryKey, Profile};

/// Name fragments of dishes that take long to cook
pub const SLOW_COOK_KEYWORDS: [&str; 3] = ["Bhaja", "Roast", "Fry"];

/// Name fragments of expensive ingredients
pub const PREMIUM_INGREDIENT_KEYWORDS: [&str; 4] = ["Hilsa", "Shrimp", "Duck", "Beef"];

/// Sugar cap applied for a low-sugar macro goal
pub const LOW_SUGAR_MAX: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterDirective {
    RankBy(Attribute),
    ExcludeCategory(CategoryKey),
    MaxAttribute { attribute: Attribute, threshold: f64 },
    ExcludeKeyword(Vec<String>),
}

impl FilterDirective {
    pub fn exclude_keywords(keywords: &[&str]) -> Self {
        FilterDirective::ExcludeKeyword(keywords.iter().map(|k| k.to_string()).collect())
    }

    /// Whether a candidate row survives this directive
    ///
    /// Directives that do not filter rows keep every candidate.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        match self {
            FilterDirective::MaxAttribute { attribute, threshold } => {
                candidate.value(*attribute) <= *threshold
            }
            FilterDirective::ExcludeKeyword(keywords) => {
                !keywords.iter().any(|k| candidate.name.contains(k.as_str()))
            }
            FilterDirective::RankBy(_) | FilterDirective::ExcludeCategory(_) => true,
        }
    }
}

/// Compile a refinement profile into filter directives
///
/// The first directive is always a `RankBy`.
pub fn get_filters(extra: &Profile) -> Vec<FilterDirective> {
    let mut directives = Vec::with_capacity(5);

    let rank_by = if extra.text_in("activity", &["moderate", "high"]) {
        Attribute::ProteinDensity
    } else {
        Attribute::FiberToSugar
    };
    directives.push(FilterDirective::RankBy(rank_by));

    if extra.text("spicy") == Some("hot") {
        directives.push(FilterDirective::ExcludeCategory(CategoryKey::from(
            CategoryKey::CHILD_FAMILY_SAFE,
        )));
    }
    if extra.text("macro") == Some("low_sugar") {
        directives.push(FilterDirective::MaxAttribute {
            attribute: Attribute::Sugar,
            threshold: LOW_SUGAR_MAX,
        });
    }
    if extra.text("cook_time") == Some("under_15") {
        directives.push(FilterDirective::exclude_keywords(&SLOW_COOK_KEYWORDS));
    }
    if extra.flag("budget") {
        directives.push(FilterDirective::exclude_keywords(&PREMIUM_INGREDIENT_KEYWORDS));
    }

    directives
}

/// Apply directives to one category pass
///
/// Takes the working copy of the active categories by value and hands it
/// back with any excluded categories removed.
pub fn apply_filters(
    mut candidates: Vec<Candidate>,
    directives: &[FilterDirective],
    mut active: Vec<CategoryKey>,
) -> (Vec<Candidate>, Vec<CategoryKey>) {
    for directive in directives {
        match directive {
            FilterDirective::ExcludeCategory(key) => active.retain(|c| c != key),
            FilterDirective::RankBy(_) => {}
            row_filter => candidates.retain(|c| row_filter.matches(c)),
        }
    }
    (candidates, active)
}

/// Ranking attribute requested by the directives, probability otherwise
pub fn rank_attribute(directives: &[FilterDirective]) -> Attribute {
    directives
        .iter()
        .find_map(|d| match d {
            FilterDirective::RankBy(attribute) => Some(*attribute),
            _ => None,
        })
        .unwrap_or(Attribute::Probability)
}
