use crate::{Error, Result, Vector};

/// Dense classifier input, row-aligned with the feature table
///
/// Every row has the same dimension. The matrix is built once and only
/// read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringMatrix {
    rows: Vec<Vector>,
    dim: usize,
}

impl ScoringMatrix {
    pub fn new(rows: Vec<Vector>) -> Result<Self> {
        let dim = rows.first().map(Vector::dim).unwrap_or(0);
        if let Some(bad) = rows.iter().find(|r| r.dim() != dim) {
            return Err(Error::DimensionMismatch {
                expected: dim,
                actual: bad.dim(),
            });
        }
        Ok(Self { rows, dim })
    }

    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        Self::new(rows.into_iter().map(Vector::new).collect())
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Vector> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Vector] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_shape() {
        let m = ScoringMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.dim(), 2);
        assert_eq!(m.row(1).unwrap().as_slice(), &[3.0, 4.0]);
        assert!(m.row(3).is_none());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = ScoringMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, Error::DimensionMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_empty_matrix() {
        let m = ScoringMatrix::new(Vec::new()).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.dim(), 0);
    }
}
