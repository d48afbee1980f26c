use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, zero_param_derivative, NodeFunction,
};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

/// Squared Frobenius norm of the batch, `Σ x_ij²`, giving a `1 x 1` value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormSquareOp;

impl NodeFunction for NormSquareOp {
    fn arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, 1, "norm_square")?;
        let total = inputs[0].data().iter().map(|x| x * x).sum();
        Ok(Matrix::scalar(total))
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_inputs(inputs, 1, "norm_square")?;
        expect_input_index(input_index, 1, "norm_square")?;
        Ok(Jacobian::Dense(Matrix::row_vector(
            inputs[0].data().iter().map(|x| 2.0 * x).collect(),
        )))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, 1, "norm_square")?;
        Ok(zero_param_derivative(1, param))
    }
}
