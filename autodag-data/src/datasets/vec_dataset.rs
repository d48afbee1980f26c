use super::traits::Dataset;
use autodag_core::{AutodagError, Matrix};

/// An in-memory dataset backed by a `Vec`; `get` clones the sample.
#[derive(Debug, Clone, PartialEq)]
pub struct VecDataset<T: Clone + Send + 'static> {
    data: Vec<T>,
}

impl<T: Clone + Send + 'static> VecDataset<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

impl VecDataset<Vec<Matrix>> {
    /// One sample per row: `[features row (1 x m), targets row (1 x k)]`,
    /// ready to be fed as the two leaves of a per-sample loss graph.
    ///
    /// # Errors
    /// `ShapeMismatch` when `features` and `targets` have different row counts.
    pub fn from_rows(features: &Matrix, targets: &Matrix) -> Result<Self, AutodagError> {
        if features.rows() != targets.rows() {
            return Err(AutodagError::ShapeMismatch {
                expected: vec![features.rows(), targets.cols()],
                actual: targets.shape(),
                operation: "VecDataset::from_rows".to_string(),
            });
        }
        let data = (0..features.rows())
            .map(|i| {
                vec![
                    Matrix::row_vector(features.row(i).to_vec()),
                    Matrix::row_vector(targets.row(i).to_vec()),
                ]
            })
            .collect();
        Ok(Self::new(data))
    }
}

impl<T: Clone + Send + 'static> Dataset for VecDataset<T> {
    type Item = T;

    fn get(&self, index: usize) -> Result<Self::Item, AutodagError> {
        self.data
            .get(index)
            .cloned()
            .ok_or(AutodagError::IndexOutOfBounds {
                index,
                len: self.data.len(),
            })
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
#[path = "vec_dataset_test.rs"]
mod tests;
