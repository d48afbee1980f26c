use crate::error::{AutodagError, Result};
use std::fmt;

/// Dense row-major `f64` matrix.
///
/// Every value flowing through a graph is a `Matrix`: a batch of samples is
/// one row per sample, a scalar is `1 x 1`. Local Jacobians and the
/// per-parameter accumulators of the backward pass use the same type, with
/// the flattened output on the rows and the flattened input (or parameter)
/// on the columns.
///
/// Each `Matrix` owns its buffer; rows are never shared between matrices.
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    /// `ShapeMismatch` if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(AutodagError::ShapeMismatch {
                expected: vec![rows * cols],
                actual: vec![data.len()],
                operation: "Matrix::new".to_string(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// A `1 x 1` matrix.
    pub fn scalar(value: f64) -> Self {
        Matrix {
            rows: 1,
            cols: 1,
            data: vec![value],
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Square matrix with `diag` on its diagonal.
    pub fn diagonal(diag: &[f64]) -> Self {
        let n = diag.len();
        let mut out = Self::zeros(n, n);
        for (i, &d) in diag.iter().enumerate() {
            out.data[i * n + i] = d;
        }
        out
    }

    /// `1 x n` matrix.
    pub fn row_vector(data: Vec<f64>) -> Self {
        Matrix {
            rows: 1,
            cols: data.len(),
            data,
        }
    }

    /// `n x 1` matrix.
    pub fn column_vector(data: Vec<f64>) -> Self {
        Matrix {
            rows: data.len(),
            cols: 1,
            data,
        }
    }

    /// Builds a matrix from per-sample rows, which must all have the same width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let m = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n * m);
        for row in rows {
            if row.len() != m {
                return Err(AutodagError::ShapeMismatch {
                    expected: vec![m],
                    actual: vec![row.len()],
                    operation: "Matrix::from_rows".to_string(),
                });
            }
            data.extend(row);
        }
        Ok(Matrix {
            rows: n,
            cols: m,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Vec<usize> {
        vec![self.rows, self.cols]
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// The single element of a `1 x 1` matrix.
    pub fn as_scalar(&self) -> Option<f64> {
        if self.rows == 1 && self.cols == 1 {
            Some(self.data[0])
        } else {
            None
        }
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&x| x == 0.0)
    }

    pub fn same_shape(&self, other: &Matrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// Matrix product `self · other`.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(AutodagError::ShapeMismatch {
                expected: vec![self.cols, other.cols],
                actual: other.shape(),
                operation: "matmul".to_string(),
            });
        }
        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                let other_row = other.row(k);
                let out_row = &mut out.data[i * other.cols..(i + 1) * other.cols];
                for (o, &b) in out_row.iter_mut().zip(other_row) {
                    *o += a * b;
                }
            }
        }
        Ok(out)
    }

    /// Elementwise `self += other`.
    pub fn add_inplace(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_shape(other, "add_inplace")?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
        Ok(())
    }

    /// Elementwise `self - other`.
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other, "sub")?;
        let data = self.data.iter().zip(&other.data).map(|(a, b)| a - b).collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    pub(crate) fn check_same_shape(&self, other: &Matrix, operation: &str) -> Result<()> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(AutodagError::ShapeMismatch {
                expected: self.shape(),
                actual: other.shape(),
                operation: operation.to_string(),
            })
        }
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix({}x{}, ", self.rows, self.cols)?;
        f.debug_list()
            .entries((0..self.rows).map(|r| self.row(r)))
            .finish()?;
        write!(f, ")")
    }
}

impl From<f64> for Matrix {
    fn from(value: f64) -> Self {
        Matrix::scalar(value)
    }
}

#[cfg(test)]
#[path = "matrix_test.rs"]
mod tests;
