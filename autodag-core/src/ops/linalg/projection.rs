use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, zero_param_derivative, NodeFunction,
};
use crate::error::{AutodagError, Result};
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

/// Affine projection of each sample onto a trainable weight vector:
/// `x_i ↦ <x_i, w>`, mapping an `N x m` batch to `N x 1`.
#[derive(Debug, Clone)]
pub struct ProjectionOp {
    weights: Parameter,
}

impl ProjectionOp {
    pub fn new(weights: Parameter) -> Self {
        ProjectionOp { weights }
    }

    pub fn weights(&self) -> &Parameter {
        &self.weights
    }

    fn check_width(&self, x: &Matrix) -> Result<()> {
        if x.cols() != self.weights.len() {
            return Err(AutodagError::ShapeMismatch {
                expected: vec![x.rows(), self.weights.len()],
                actual: x.shape(),
                operation: "projection".to_string(),
            });
        }
        Ok(())
    }
}

impl NodeFunction for ProjectionOp {
    fn arity(&self) -> usize {
        1
    }

    fn direct_params(&self) -> Vec<Parameter> {
        vec![self.weights.clone()]
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, 1, "projection")?;
        let x = &inputs[0];
        self.check_width(x)?;
        let w = self.weights.value();
        let out = (0..x.rows())
            .map(|i| x.row(i).iter().zip(&w).map(|(a, b)| a * b).sum::<f64>())
            .collect();
        Ok(Matrix::column_vector(out))
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_inputs(inputs, 1, "projection")?;
        expect_input_index(input_index, 1, "projection")?;
        let x = &inputs[0];
        self.check_width(x)?;
        // Sample i only sees its own row, weighted by w.
        let w = Matrix::row_vector(self.weights.value());
        Ok(Jacobian::repeated_block(x.rows(), &w))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, 1, "projection")?;
        let x = &inputs[0];
        if *param != self.weights {
            return Ok(zero_param_derivative(x.rows(), param));
        }
        self.check_width(x)?;
        // d<x_i, w>/dw_j = x_ij, i.e. the batch itself.
        Ok(x.clone())
    }
}
