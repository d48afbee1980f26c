use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, zero_param_derivative, NodeFunction,
};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;
use crate::ops::expect_scalar_param;

/// `x ↦ a · x` elementwise, with `a` a trainable scalar.
#[derive(Debug, Clone)]
pub struct MultOp {
    param: Parameter,
}

impl MultOp {
    /// Fails with `ParameterShape` unless `param` is a scalar.
    pub fn new(param: Parameter) -> Result<Self> {
        expect_scalar_param(&param)?;
        Ok(MultOp { param })
    }

    pub fn param(&self) -> &Parameter {
        &self.param
    }
}

impl NodeFunction for MultOp {
    fn arity(&self) -> usize {
        1
    }

    fn direct_params(&self) -> Vec<Parameter> {
        vec![self.param.clone()]
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, 1, "mult")?;
        let a = self.param.scalar_value();
        Ok(inputs[0].scale(a))
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_inputs(inputs, 1, "mult")?;
        expect_input_index(input_index, 1, "mult")?;
        let a = self.param.scalar_value();
        Ok(Jacobian::Diagonal(vec![a; inputs[0].numel()]))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, 1, "mult")?;
        if *param == self.param {
            Ok(Matrix::column_vector(inputs[0].data().to_vec()))
        } else {
            Ok(zero_param_derivative(inputs[0].numel(), param))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::assert_jacobians_match;

    #[test]
    fn test_mult_scalar() {
        let a = Parameter::scalar("a", 3.0);
        let op = MultOp::new(a.clone()).unwrap();
        let x = Matrix::scalar(4.0);
        assert_eq!(op.evaluate(&[x.clone()]).unwrap().as_scalar(), Some(12.0));
        assert_eq!(op.derivative(&[x.clone()], 0).unwrap().as_scalar(), Some(3.0));
        assert_eq!(op.param_derivative(&[x], &a).unwrap().as_scalar(), Some(4.0));
    }

    #[test]
    fn test_mult_jacobians_batched() {
        let a = Parameter::scalar("a", 0.7);
        let op = MultOp::new(a.clone()).unwrap();
        let x = Matrix::from_rows(vec![vec![1.0, -2.0], vec![0.5, 3.0]]).unwrap();
        assert_jacobians_match(&op, &[x], &[a], 1e-6);
    }

    #[test]
    fn test_mult_bad_input_index() {
        let op = MultOp::new(Parameter::scalar("a", 1.0)).unwrap();
        assert!(op.derivative(&[Matrix::scalar(1.0)], 1).is_err());
    }
}
