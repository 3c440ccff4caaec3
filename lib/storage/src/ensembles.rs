use dishwise_core::{CategoryKey, Ensemble, ModelSpec, ProbabilityModel};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{Result, StorageError};

/// On-disk form of one category's ensemble
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnsembleFile {
    pub threshold: f64,
    pub members: Vec<ModelSpec>,
}

impl EnsembleFile {
    pub fn into_ensemble(self, category: CategoryKey) -> dishwise_core::Result<Ensemble> {
        let members = self
            .members
            .into_iter()
            .map(ModelSpec::into_model)
            .collect::<dishwise_core::Result<Vec<Box<dyn ProbabilityModel>>>>()?;
        Ensemble::new(category, self.threshold, members)
    }
}

/// File name holding the ensemble for `category`
pub fn ensemble_file_name(category: &CategoryKey) -> String {
    format!("ensemble_{}.json", category)
}

pub fn load_ensemble<P: AsRef<Path>>(path: P, category: CategoryKey) -> Result<Ensemble> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| StorageError::io(path, e))?;
    let file: EnsembleFile = serde_json::from_slice(&data).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let ensemble = file.into_ensemble(category).map_err(|source| StorageError::Artifact {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        category = %ensemble.category(),
        members = ensemble.len(),
        threshold = ensemble.threshold(),
        "ensemble loaded"
    );
    Ok(ensemble)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_ensemble() {
        let dir = tempfile::tempdir().unwrap();
        let category = CategoryKey::from("metabolicHealth");
        let path = dir.path().join(ensemble_file_name(&category));
        assert!(path.ends_with("ensemble_metabolicHealth.json"));

        std::fs::write(
            &path,
            serde_json::to_vec(&json!({
                "threshold": 0.42,
                "members": [
                    {"kind": "logistic", "weights": [0.3, -0.2], "intercept": 0.1},
                    {"kind": "forest", "trees": [{"nodes": [{"kind": "leaf", "probability": 0.6}]}]}
                ]
            }))
            .unwrap(),
        )
        .unwrap();

        let ensemble = load_ensemble(&path, category).unwrap();
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.threshold(), 0.42);
        assert_eq!(ensemble.category(), "metabolicHealth");
    }

    #[test]
    fn test_empty_members_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ensemble_x.json");
        std::fs::write(&path, br#"{"threshold": 0.5, "members": []}"#).unwrap();

        match load_ensemble(&path, CategoryKey::from("x")) {
            Err(StorageError::Artifact { source, .. }) => {
                assert_eq!(source, dishwise_core::Error::EmptyEnsemble("x".to_string()))
            }
            other => panic!("expected artifact error, got {:?}", other),
        }
    }
}
