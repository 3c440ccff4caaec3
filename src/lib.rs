//! # Dishwise
//!
//! A food recommender driven by a user's health profile and optional
//! preference refinements.
//!
//! A health profile maps to one or more category keys. Each category owns an
//! ensemble of pre-trained classifiers whose averaged probabilities rank every
//! food; categories are walked in priority order until `top_n` distinct
//! foods are collected. A second profile of preferences turns into filter
//! directives that rerank and prune the same walk.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! dishwise --data-dir ./data --static-dir ./web --http-port 5000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use dishwise::prelude::*;
//!
//! let context = ArtifactLoader::new("./data").load().unwrap();
//! let request: RecommendRequest = serde_json::from_value(serde_json::json!({
//!     "basic_profile": {"high_bp": true, "weight_loss": true},
//!     "extra_profile": {"budget": true},
//!     "top_n": 5
//! }))
//! .unwrap();
//!
//! let result = recommend(&context, &request).unwrap();
//! println!("{:?} / {:?}", result.initial, result.refined);
//! ```
//!
//! ## Crate Structure
//!
//! - `dishwise-core` - profiles, category mapping, filters, models and the suggestion engine
//! - `dishwise-storage` - artifact loading (feature table, scoring matrix, ensembles)
//! - `dishwise-api` - REST API and static front-end

// Re-export core types
pub use dishwise_core::{
    apply_filters, clamp_top_n, get_filters, map_categories, recommend,
    Attribute, CategoryKey, ClassifierRegistry, Ensemble, FeatureTable, FilterDirective,
    FoodAttributes, FoodRow, ModelSpec, ProbabilityModel, Profile, RecommendRequest,
    Recommendation, ScoringMatrix, SuggestionContext,
    Error, Result,
};

// Re-export storage
pub use dishwise_storage::{ArtifactLoader, StorageError};

// Re-export API
pub use dishwise_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        apply_filters, get_filters, map_categories, recommend,
        CategoryKey, ClassifierRegistry, Ensemble, FeatureTable, FilterDirective,
        Profile, RecommendRequest, Recommendation, ScoringMatrix, SuggestionContext,
        Error, Result,
        ArtifactLoader, StorageError,
        RestApi,
    };
}
