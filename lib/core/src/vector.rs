use serde::{Deserialize, Serialize};

/// A dense row of classifier input features
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Feature value at `index`, `None` when out of range
    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.data.get(index).copied()
    }

    /// Dot product accumulated in f64
    ///
    /// Returns `None` when the dimensions differ.
    #[inline]
    pub fn dot(&self, weights: &[f64]) -> Option<f64> {
        if self.dim() != weights.len() {
            return None;
        }

        Some(
            self.data
                .iter()
                .zip(weights.iter())
                .map(|(x, w)| f64::from(*x) * w)
                .sum(),
        )
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Vector::new(data)
    }
}
