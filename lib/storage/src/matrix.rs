use dishwise_core::ScoringMatrix;
use std::path::Path;
use tracing::info;

use crate::error::{Result, StorageError};

/// Load a scoring matrix from `.bin` (bincode `Vec<Vec<f32>>`) or JSON
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<ScoringMatrix> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| StorageError::io(path, e))?;

    let rows: Vec<Vec<f32>> = if path.extension().and_then(|e| e.to_str()) == Some("bin") {
        bincode::deserialize(&data).map_err(|source| StorageError::Bincode {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_slice(&data).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };

    let matrix = ScoringMatrix::from_rows(rows).map_err(|source| StorageError::Artifact {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = matrix.n_rows(), dim = matrix.dim(), "scoring matrix loaded");
    Ok(matrix)
}
