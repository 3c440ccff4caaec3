//! Binary classifiers behind the `predict_probability` capability
//!
//! Ensembles only see [`ProbabilityModel`]; the concrete kinds here exist so
//! that trained artifacts can be deserialized and scored in process.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, ScoringMatrix};

/// A binary classifier producing one positive-class probability per row
pub trait ProbabilityModel: Send + Sync + std::fmt::Debug {
    /// Score every row of `matrix`, in row order
    fn predict_probability(&self, matrix: &ScoringMatrix) -> Result<Vec<f64>>;
}

#[inline]
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Logistic regression: `sigmoid(w · x + b)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LogisticModel {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }
}

impl ProbabilityModel for LogisticModel {
    fn predict_probability(&self, matrix: &ScoringMatrix) -> Result<Vec<f64>> {
        if !matrix.is_empty() && matrix.dim() != self.weights.len() {
            return Err(Error::DimensionMismatch {
                expected: self.weights.len(),
                actual: matrix.dim(),
            });
        }

        Ok(matrix
            .rows()
            .par_iter()
            .map(|row| {
                let z = row.dot(&self.weights).unwrap_or(f64::NAN) + self.intercept;
                sigmoid(z)
            })
            .collect())
    }
}

/// Node of a flattened decision tree; index 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Rows with `feature <= threshold` (or a missing feature) go left
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf { probability: f64 },
}

/// A validated decision tree; construct with [`DecisionTree::new`] or deserialize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDecisionTree")]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

#[derive(Deserialize)]
struct RawDecisionTree {
    nodes: Vec<TreeNode>,
}

impl TryFrom<RawDecisionTree> for DecisionTree {
    type Error = Error;

    fn try_from(raw: RawDecisionTree) -> Result<Self> {
        Self::new(raw.nodes)
    }
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Result<Self> {
        let tree = Self { nodes };
        tree.validate()?;
        Ok(tree)
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Children must point forward, which also rules out cycles
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::InvalidModel("decision tree has no nodes".to_string()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split { left, right, .. } => {
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(Error::InvalidModel(format!(
                                "node {} has invalid child index {}",
                                index, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { probability } => {
                    if !(0.0..=1.0).contains(probability) {
                        return Err(Error::InvalidModel(format!(
                            "leaf {} has probability {} outside [0, 1]",
                            index, probability
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Largest feature index any split reads
    pub fn max_feature(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                TreeNode::Split { feature, .. } => Some(*feature),
                TreeNode::Leaf { .. } => None,
            })
            .max()
    }

    /// Children point forward, so the walk visits each node at most once
    fn predict_row(&self, row: &crate::Vector) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                None => return f64::NAN,
                Some(TreeNode::Leaf { probability }) => return *probability,
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let value = row.get(*feature).unwrap_or(f32::NAN);
                    index = if value.is_nan() || value <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// Random-forest style classifier: mean leaf probability over its trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawForestModel")]
pub struct ForestModel {
    trees: Vec<DecisionTree>,
}

#[derive(Deserialize)]
struct RawForestModel {
    trees: Vec<DecisionTree>,
}

impl TryFrom<RawForestModel> for ForestModel {
    type Error = Error;

    fn try_from(raw: RawForestModel) -> Result<Self> {
        Self::new(raw.trees)
    }
}

impl ForestModel {
    pub fn new(trees: Vec<DecisionTree>) -> Result<Self> {
        let forest = Self { trees };
        forest.validate()?;
        Ok(forest)
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(Error::InvalidModel("forest has no trees".to_string()));
        }
        self.trees.iter().try_for_each(DecisionTree::validate)
    }
}

impl ProbabilityModel for ForestModel {
    fn predict_probability(&self, matrix: &ScoringMatrix) -> Result<Vec<f64>> {
        let max_feature = self.trees.iter().filter_map(DecisionTree::max_feature).max();
        if let Some(feature) = max_feature {
            if !matrix.is_empty() && feature >= matrix.dim() {
                return Err(Error::DimensionMismatch {
                    expected: feature + 1,
                    actual: matrix.dim(),
                });
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(matrix
            .rows()
            .par_iter()
            .map(|row| self.trees.iter().map(|t| t.predict_row(row)).sum::<f64>() / n_trees)
            .collect())
    }
}

/// Serialized form of a classifier artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Logistic(LogisticModel),
    Forest(ForestModel),
}

impl ModelSpec {
    /// Validate the artifact and turn it into a scoring model
    pub fn into_model(self) -> Result<Box<dyn ProbabilityModel>> {
        match self {
            ModelSpec::Logistic(model) => {
                if model.weights.is_empty() {
                    return Err(Error::InvalidModel("logistic model has no weights".to_string()));
                }
                Ok(Box::new(model))
            }
            ModelSpec::Forest(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
        }
    }
}
