use crate::error::{AutodagError, Result};
use crate::matrix::Matrix;

/// Local Jacobian of a node, `numel(output) x numel(input)`.
///
/// Batched operators act on each sample row independently, so their
/// Jacobians are block diagonal over the batch. Storing only the blocks keeps
/// both memory and the chain-rule products linear in the number of samples.
#[derive(Debug, Clone, PartialEq)]
pub enum Jacobian {
    /// Any Jacobian, stored in full.
    Dense(Matrix),
    /// Elementwise operators: entry `i` is `∂out_i/∂in_i`.
    Diagonal(Vec<f64>),
    /// `count` blocks of `block_rows x block_cols` along the diagonal, stored
    /// one after the other, each row-major. Block `b` maps input elements
    /// `b·block_cols..` to output elements `b·block_rows..`.
    BlockDiagonal {
        count: usize,
        block_rows: usize,
        block_cols: usize,
        blocks: Vec<f64>,
    },
}

impl Jacobian {
    pub fn identity(n: usize) -> Self {
        Jacobian::Diagonal(vec![1.0; n])
    }

    /// `count` copies of the same `block_rows x block_cols` block.
    pub fn repeated_block(count: usize, block: &Matrix) -> Self {
        let mut blocks = Vec::with_capacity(count * block.numel());
        for _ in 0..count {
            blocks.extend_from_slice(block.data());
        }
        Jacobian::BlockDiagonal {
            count,
            block_rows: block.rows(),
            block_cols: block.cols(),
            blocks,
        }
    }

    pub fn rows(&self) -> usize {
        match self {
            Jacobian::Dense(m) => m.rows(),
            Jacobian::Diagonal(d) => d.len(),
            Jacobian::BlockDiagonal {
                count, block_rows, ..
            } => count * block_rows,
        }
    }

    pub fn cols(&self) -> usize {
        match self {
            Jacobian::Dense(m) => m.cols(),
            Jacobian::Diagonal(d) => d.len(),
            Jacobian::BlockDiagonal {
                count, block_cols, ..
            } => count * block_cols,
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        vec![self.rows(), self.cols()]
    }

    /// Number of `f64` values actually held.
    pub fn stored_len(&self) -> usize {
        match self {
            Jacobian::Dense(m) => m.numel(),
            Jacobian::Diagonal(d) => d.len(),
            Jacobian::BlockDiagonal { blocks, .. } => blocks.len(),
        }
    }

    /// Entry `(row, col)`, or `None` outside the shape.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        let value = match self {
            Jacobian::Dense(m) => return m.get(row, col),
            Jacobian::Diagonal(d) => {
                if row == col {
                    d[row]
                } else {
                    0.0
                }
            }
            Jacobian::BlockDiagonal {
                block_rows,
                block_cols,
                blocks,
                ..
            } => {
                let b = row / block_rows;
                if col / block_cols != b {
                    0.0
                } else {
                    let (r, c) = (row % block_rows, col % block_cols);
                    blocks[b * block_rows * block_cols + r * block_cols + c]
                }
            }
        };
        Some(value)
    }

    /// The single entry of a `1 x 1` Jacobian.
    pub fn as_scalar(&self) -> Option<f64> {
        if self.rows() == 1 && self.cols() == 1 {
            self.get(0, 0)
        } else {
            None
        }
    }

    /// Full matrix form. Quadratic in the batch size for the structured
    /// variants, so only meant for tests and small graphs.
    pub fn to_dense(&self) -> Matrix {
        match self {
            Jacobian::Dense(m) => m.clone(),
            Jacobian::Diagonal(d) => Matrix::diagonal(d),
            Jacobian::BlockDiagonal {
                count,
                block_rows,
                block_cols,
                blocks,
            } => {
                let mut out = Matrix::zeros(self.rows(), self.cols());
                let block_len = block_rows * block_cols;
                for b in 0..*count {
                    for r in 0..*block_rows {
                        for c in 0..*block_cols {
                            let v = blocks[b * block_len + r * block_cols + c];
                            out.set(b * block_rows + r, b * block_cols + c, v);
                        }
                    }
                }
                out
            }
        }
    }

    /// `upstream · self`, where `upstream` has one row per output element
    /// of the gradient it carries (`k x rows()`). Gives `k x cols()`.
    pub fn left_mul(&self, upstream: &Matrix) -> Result<Matrix> {
        if upstream.cols() != self.rows() {
            return Err(AutodagError::ShapeMismatch {
                expected: vec![upstream.rows(), self.rows()],
                actual: upstream.shape(),
                operation: "jacobian left_mul".to_string(),
            });
        }
        let k = upstream.rows();
        match self {
            Jacobian::Dense(m) => upstream.matmul(m),
            Jacobian::Diagonal(d) => {
                let mut out = upstream.clone();
                for i in 0..k {
                    let row = &mut out.data_mut()[i * d.len()..(i + 1) * d.len()];
                    for (o, &v) in row.iter_mut().zip(d) {
                        *o *= v;
                    }
                }
                Ok(out)
            }
            Jacobian::BlockDiagonal {
                count,
                block_rows,
                block_cols,
                blocks,
            } => {
                let (rows, cols) = (self.rows(), self.cols());
                let block_len = block_rows * block_cols;
                let mut out = Matrix::zeros(k, cols);
                let up = upstream.data();
                let data = out.data_mut();
                for i in 0..k {
                    for b in 0..*count {
                        let block = &blocks[b * block_len..(b + 1) * block_len];
                        for r in 0..*block_rows {
                            let u = up[i * rows + b * block_rows + r];
                            let block_row = &block[r * block_cols..(r + 1) * block_cols];
                            let start = i * cols + b * block_cols;
                            for (o, &v) in data[start..start + block_cols].iter_mut().zip(block_row) {
                                *o += u * v;
                            }
                        }
                    }
                }
                Ok(out)
            }
        }
    }

    /// `self · downstream`, where `downstream` is `cols() x k`. Gives `rows() x k`.
    pub fn mul(&self, downstream: &Matrix) -> Result<Matrix> {
        if downstream.rows() != self.cols() {
            return Err(AutodagError::ShapeMismatch {
                expected: vec![self.cols(), downstream.cols()],
                actual: downstream.shape(),
                operation: "jacobian mul".to_string(),
            });
        }
        let k = downstream.cols();
        match self {
            Jacobian::Dense(m) => m.matmul(downstream),
            Jacobian::Diagonal(d) => {
                let mut out = downstream.clone();
                for (i, &v) in d.iter().enumerate() {
                    for o in &mut out.data_mut()[i * k..(i + 1) * k] {
                        *o *= v;
                    }
                }
                Ok(out)
            }
            Jacobian::BlockDiagonal {
                count,
                block_rows,
                block_cols,
                blocks,
            } => {
                let block_len = block_rows * block_cols;
                let mut out = Matrix::zeros(self.rows(), k);
                let down = downstream.data();
                let data = out.data_mut();
                for b in 0..*count {
                    let block = &blocks[b * block_len..(b + 1) * block_len];
                    for r in 0..*block_rows {
                        let out_row = b * block_rows + r;
                        let target = &mut data[out_row * k..(out_row + 1) * k];
                        for c in 0..*block_cols {
                            let v = block[r * block_cols + c];
                            let in_row = b * block_cols + c;
                            for (o, &x) in target.iter_mut().zip(&down[in_row * k..(in_row + 1) * k]) {
                                *o += v * x;
                            }
                        }
                    }
                }
                Ok(out)
            }
        }
    }
}

impl From<Matrix> for Jacobian {
    fn from(m: Matrix) -> Self {
        Jacobian::Dense(m)
    }
}

#[cfg(test)]
#[path = "jacobian_test.rs"]
mod tests;
