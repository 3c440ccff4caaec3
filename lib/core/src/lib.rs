//! # Dishwise Core
//!
//! Core library for the Dishwise food recommender.
//!
//! This crate provides the data model and the decision logic:
//!
//! - [`FeatureTable`] / [`ScoringMatrix`] - read-only food data and classifier input
//! - [`ProbabilityModel`] / [`Ensemble`] / [`ClassifierRegistry`] - per-category classifiers
//! - [`map_categories`] - health profile to category keys
//! - [`get_filters`] / [`apply_filters`] - refinement profile to filter directives
//! - [`SuggestionContext`] - the suggestion engine
//! - [`recommend`] - request orchestration (initial + refined lists)
//!
//! ## Example
//!
//! ```rust
//! use dishwise_core::{
//!     CategoryKey, ClassifierRegistry, Ensemble, FeatureTable, FoodAttributes, FoodRow,
//!     LogisticModel, ProbabilityModel, ScoringMatrix, SuggestionContext,
//! };
//!
//! let features = FeatureTable::new(vec![
//!     FoodRow::new("Lau Ghonto", "heartKidneySafe", FoodAttributes::default()),
//!     FoodRow::new("Rui Jhol", "heartKidneySafe", FoodAttributes::default()),
//! ]);
//! let matrix = ScoringMatrix::from_rows(vec![vec![1.0], vec![-1.0]]).unwrap();
//!
//! let members: Vec<Box<dyn ProbabilityModel>> = vec![Box::new(LogisticModel::new(vec![2.0], 0.0))];
//! let ensemble = Ensemble::new(CategoryKey::from("heartKidneySafe"), 0.5, members).unwrap();
//! let registry: ClassifierRegistry = std::iter::once(ensemble).collect();
//!
//! let context = SuggestionContext::new(features, matrix, registry).unwrap();
//! let foods = context
//!     .get_suggestions(&[CategoryKey::from("heartKidneySafe")], 2, None)
//!     .unwrap();
//! assert_eq!(foods, vec!["Lau Ghonto", "Rui Jhol"]);
//! ```

pub mod candidate;
pub mod category;
pub mod engine;
pub mod ensemble;
pub mod error;
pub mod filter;
pub mod food;
pub mod matrix;
pub mod model;
pub mod profile;
pub mod recommend;
pub mod vector;

pub use candidate::{rank_candidates, Attribute, Candidate};
pub use category::{map_categories, CategoryKey};
pub use engine::SuggestionContext;
pub use ensemble::{ClassifierRegistry, Ensemble};
pub use error::{Error, Result};
pub use filter::{apply_filters, get_filters, rank_attribute, FilterDirective};
pub use food::{FeatureTable, FoodAttributes, FoodRow};
pub use matrix::ScoringMatrix;
pub use model::{DecisionTree, ForestModel, LogisticModel, ModelSpec, ProbabilityModel, TreeNode};
pub use profile::Profile;
pub use recommend::{clamp_top_n, recommend, resolve_categories, RecommendRequest, Recommendation};
pub use vector::Vector;
