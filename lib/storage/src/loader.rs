use dishwise_core::{ClassifierRegistry, SuggestionContext};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::dataset::load_feature_table;
use crate::ensembles::{ensemble_file_name, load_ensemble};
use crate::error::{Result, StorageError};
use crate::matrix::load_matrix;

pub const FEATURES_FILE: &str = "foods.json";
pub const MATRIX_BIN_FILE: &str = "matrix.bin";
pub const MATRIX_JSON_FILE: &str = "matrix.json";
pub const ENSEMBLES_DIR: &str = "ensembles";

/// Loads the suggestion context from a data directory
///
/// ```text
/// <data_dir>/
///   foods.json
///   matrix.bin | matrix.json
///   ensembles/ensemble_<label>.json
/// ```
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    data_dir: PathBuf,
}

impl ArtifactLoader {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn features_path(&self) -> PathBuf {
        self.data_dir.join(FEATURES_FILE)
    }

    /// The binary matrix wins when both formats are present
    pub fn matrix_path(&self) -> PathBuf {
        let bin = self.data_dir.join(MATRIX_BIN_FILE);
        if bin.exists() {
            bin
        } else {
            self.data_dir.join(MATRIX_JSON_FILE)
        }
    }

    pub fn ensembles_dir(&self) -> PathBuf {
        self.data_dir.join(ENSEMBLES_DIR)
    }

    /// Load everything and validate it into a context
    ///
    /// One ensemble is loaded per distinct label of the feature table.
    pub fn load(&self) -> Result<SuggestionContext> {
        if !self.data_dir.is_dir() {
            return Err(StorageError::NotFound(self.data_dir.clone()));
        }

        let features = load_feature_table(self.features_path())?;
        let matrix = load_matrix(self.matrix_path())?;

        let ensembles_dir = self.ensembles_dir();
        let registry = features
            .labels()
            .into_iter()
            .map(|label| {
                let path = ensembles_dir.join(ensemble_file_name(&label));
                load_ensemble(path, label)
            })
            .collect::<Result<ClassifierRegistry>>()?;

        let context = SuggestionContext::new(features, matrix, registry)?;
        info!(
            data_dir = %self.data_dir.display(),
            foods = context.features().len(),
            categories = context.registry().len(),
            "artifacts loaded"
        );
        Ok(context)
    }
}
