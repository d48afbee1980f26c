use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, zero_param_derivative, NodeFunction,
};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

/// Logistic sigmoid `φ(x) = eˣ / (1 + eˣ)`, applied elementwise. No parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SigmoidOp;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl NodeFunction for SigmoidOp {
    fn arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, 1, "sigmoid")?;
        Ok(inputs[0].map(sigmoid))
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_inputs(inputs, 1, "sigmoid")?;
        expect_input_index(input_index, 1, "sigmoid")?;
        // φ' = φ(1 - φ)
        let diag = inputs[0]
            .data()
            .iter()
            .map(|&x| {
                let phi = sigmoid(x);
                phi * (1.0 - phi)
            })
            .collect();
        Ok(Jacobian::Diagonal(diag))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, 1, "sigmoid")?;
        Ok(zero_param_derivative(inputs[0].numel(), param))
    }
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
