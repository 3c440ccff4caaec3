use dishwise_core::{FeatureTable, FoodRow};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Result, StorageError};

/// Load the feature table from a JSON array of dataset rows
///
/// Rows keep file order; duplicate names are kept and only reported, the
/// engine collapses them.
pub fn load_feature_table<P: AsRef<Path>>(path: P) -> Result<FeatureTable> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| StorageError::io(path, e))?;
    let rows: Vec<FoodRow> = serde_json::from_slice(&data).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut seen = ahash::AHashSet::with_capacity(rows.len());
    let duplicates = rows.iter().filter(|r| !seen.insert(r.name.as_str())).count();
    if duplicates > 0 {
        warn!(path = %path.display(), duplicates, "feature table contains duplicate food names");
    }

    let table = FeatureTable::new(rows);
    info!(path = %path.display(), rows = table.len(), labels = table.labels().len(), "feature table loaded");
    Ok(table)
}
