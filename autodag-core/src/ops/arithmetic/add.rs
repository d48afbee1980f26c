use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, zero_param_derivative, NodeFunction,
};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;
use crate::ops::expect_scalar_param;

/// `x ↦ x + a` elementwise, with `a` a trainable scalar.
#[derive(Debug, Clone)]
pub struct AddOp {
    param: Parameter,
}

impl AddOp {
    /// Fails with `ParameterShape` unless `param` is a scalar.
    pub fn new(param: Parameter) -> Result<Self> {
        expect_scalar_param(&param)?;
        Ok(AddOp { param })
    }

    pub fn param(&self) -> &Parameter {
        &self.param
    }
}

impl NodeFunction for AddOp {
    fn arity(&self) -> usize {
        1
    }

    fn direct_params(&self) -> Vec<Parameter> {
        vec![self.param.clone()]
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, 1, "add")?;
        let a = self.param.scalar_value();
        Ok(inputs[0].map(|x| x + a))
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_inputs(inputs, 1, "add")?;
        expect_input_index(input_index, 1, "add")?;
        Ok(Jacobian::identity(inputs[0].numel()))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, 1, "add")?;
        let numel = inputs[0].numel();
        if *param == self.param {
            Ok(Matrix::filled(numel, 1, 1.0))
        } else {
            Ok(zero_param_derivative(numel, param))
        }
    }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
