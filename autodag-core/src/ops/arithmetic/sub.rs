use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, expect_same_shapes, zero_param_derivative, NodeFunction,
};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

/// Difference of two batches: the second input is subtracted from the first.
///
/// Both inputs must have the same per-sample shape and the same number of
/// samples; anything else is a `ShapeMismatch`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SubtractOp;

impl NodeFunction for SubtractOp {
    fn arity(&self) -> usize {
        2
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, 2, "subtract")?;
        inputs[0].sub(&inputs[1])
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_inputs(inputs, 2, "subtract")?;
        expect_input_index(input_index, 2, "subtract")?;
        expect_same_shapes(inputs, "subtract")?;
        // +I with respect to the minuend, -I with respect to the subtrahend.
        let parity = if input_index == 0 { 1.0 } else { -1.0 };
        Ok(Jacobian::Diagonal(vec![parity; inputs[0].numel()]))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, 2, "subtract")?;
        expect_same_shapes(inputs, "subtract")?;
        Ok(zero_param_derivative(inputs[0].numel(), param))
    }
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
