//! Suggestion engine
//!
//! Scores every food against each requested category, ranks and thresholds
//! the candidates, and merges the per-category picks into one deduplicated
//! list bounded by `top_n`.

use ahash::AHashSet;
use rayon::prelude::*;
use tracing::debug;

use crate::candidate::rank_candidates;
use crate::filter::{apply_filters, rank_attribute};
use crate::{
    Attribute, Candidate, CategoryKey, ClassifierRegistry, Ensemble, Error, FeatureTable,
    FilterDirective, Result, ScoringMatrix,
};

/// Everything the engine reads, loaded once at startup
///
/// The context is immutable; share it behind an `Arc` across requests.
#[derive(Debug)]
pub struct SuggestionContext {
    features: FeatureTable,
    matrix: ScoringMatrix,
    registry: ClassifierRegistry,
}

impl SuggestionContext {
    /// Validates that the matrix is row-aligned with the feature table and
    /// that every label in the table has an ensemble.
    pub fn new(
        features: FeatureTable,
        matrix: ScoringMatrix,
        registry: ClassifierRegistry,
    ) -> Result<Self> {
        if features.len() != matrix.n_rows() {
            return Err(Error::RowCountMismatch {
                features: features.len(),
                matrix: matrix.n_rows(),
            });
        }
        if let Some(missing) = features.labels().into_iter().find(|l| !registry.contains(l.as_str())) {
            return Err(Error::UnknownCategory(missing.to_string()));
        }
        Ok(Self { features, matrix, registry })
    }

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    pub fn matrix(&self) -> &ScoringMatrix {
        &self.matrix
    }

    pub fn registry(&self) -> &ClassifierRegistry {
        &self.registry
    }

    /// Unweighted mean of the members' probabilities, one per row
    pub fn average_probabilities(&self, ensemble: &Ensemble) -> Result<Vec<f64>> {
        let n_rows = self.matrix.n_rows();
        let per_member: Vec<Vec<f64>> = ensemble
            .members()
            .par_iter()
            .map(|member| member.predict_probability(&self.matrix))
            .collect::<Result<_>>()?;

        if per_member.is_empty() {
            return Err(Error::EmptyEnsemble(ensemble.category().to_string()));
        }
        if let Some(bad) = per_member.iter().find(|p| p.len() != n_rows) {
            return Err(Error::RowCountMismatch {
                features: n_rows,
                matrix: bad.len(),
            });
        }

        let n_members = per_member.len() as f64;
        Ok((0..n_rows)
            .map(|row| per_member.iter().map(|p| p[row]).sum::<f64>() / n_members)
            .collect())
    }

    /// Join names, probabilities and ranking attributes, keeping the first
    /// row of each duplicated name
    pub fn candidate_table(&self, probabilities: &[f64]) -> Vec<Candidate> {
        let mut seen = AHashSet::with_capacity(self.features.len());
        self.features
            .rows()
            .iter()
            .zip(probabilities.iter())
            .enumerate()
            .filter(|(_, (food, _))| seen.insert(food.name.as_str()))
            .map(|(row, (food, probability))| Candidate {
                row,
                name: food.name.clone(),
                probability: *probability,
                sugar: food.attributes.sugar,
                protein_density: food.attributes.protein_density,
                fiber_to_sugar: food.attributes.fiber_to_sugar,
            })
            .collect()
    }

    /// Suggest up to `top_n` distinct foods for `categories`, in order
    ///
    /// With `directives`, row filters apply to every pass and category
    /// exclusions drop categories from the rest of the walk. Fewer than
    /// `top_n` names is a valid outcome once all categories are exhausted.
    pub fn get_suggestions(
        &self,
        categories: &[CategoryKey],
        top_n: usize,
        directives: Option<&[FilterDirective]>,
    ) -> Result<Vec<String>> {
        let mut used: AHashSet<String> = AHashSet::with_capacity(top_n);
        let mut suggestions: Vec<String> = Vec::with_capacity(top_n);
        if top_n == 0 {
            return Ok(suggestions);
        }

        let mut active: Vec<CategoryKey> = categories.to_vec();

        for category in categories {
            let ensemble = self.registry.get(category.as_str())?;
            if !active.contains(category) {
                debug!(category = %category, "category excluded, skipping");
                continue;
            }

            let probabilities = self.average_probabilities(ensemble)?;
            let mut candidates = self.candidate_table(&probabilities);

            let rank_by = match directives {
                Some(directives) => {
                    let (filtered, remaining) = apply_filters(candidates, directives, active);
                    candidates = filtered;
                    active = remaining;
                    if !active.contains(category) {
                        debug!(category = %category, "category excluded, skipping");
                        continue;
                    }
                    rank_attribute(directives)
                }
                None => Attribute::Probability,
            };

            rank_candidates(&mut candidates, rank_by);

            let threshold = ensemble.threshold();
            let above: Vec<&Candidate> = candidates
                .iter()
                .filter(|c| c.probability >= threshold)
                .collect();
            let selected: Vec<&Candidate> = if above.len() < top_n {
                debug!(
                    category = %category,
                    above = above.len(),
                    top_n,
                    "too few candidates above threshold, using full ranking"
                );
                candidates.iter().collect()
            } else {
                above
            };

            debug!(
                category = %category,
                candidates = candidates.len(),
                selected = selected.len(),
                rank_by = %rank_by,
                threshold,
                "category pass"
            );

            for candidate in selected {
                if used.insert(candidate.name.clone()) {
                    suggestions.push(candidate.name.clone());
                }
                if suggestions.len() >= top_n {
                    return Ok(suggestions);
                }
            }
        }

        Ok(suggestions)
    }
}
