use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, zero_param_derivative, NodeFunction,
};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

/// Leaf node: passes the externally supplied value through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputOp;

impl NodeFunction for InputOp {
    fn arity(&self) -> usize {
        0
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, 0, "input")?;
        Ok(inputs[0].clone())
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_inputs(inputs, 0, "input")?;
        expect_input_index(input_index, 0, "input")?;
        Ok(Jacobian::identity(inputs[0].numel()))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, 0, "input")?;
        Ok(zero_param_derivative(inputs[0].numel(), param))
    }
}
