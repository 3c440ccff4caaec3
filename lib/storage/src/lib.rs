pub mod dataset;
pub mod ensembles;
pub mod error;
pub mod loader;
pub mod matrix;

pub use dataset::load_feature_table;
pub use ensembles::{ensemble_file_name, load_ensemble, EnsembleFile};
pub use error::{Result, StorageError};
pub use loader::ArtifactLoader;
pub use matrix::load_matrix;
