use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, zero_param_derivative, NodeFunction,
};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

/// `x ↦ c · x` elementwise for a fixed constant `c`. Owns no parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstMultOp {
    constant: f64,
}

impl ConstMultOp {
    pub fn new(constant: f64) -> Self {
        ConstMultOp { constant }
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }
}

impl NodeFunction for ConstMultOp {
    fn arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, 1, "const_mult")?;
        Ok(inputs[0].scale(self.constant))
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_inputs(inputs, 1, "const_mult")?;
        expect_input_index(input_index, 1, "const_mult")?;
        Ok(Jacobian::Diagonal(vec![self.constant; inputs[0].numel()]))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, 1, "const_mult")?;
        Ok(zero_param_derivative(inputs[0].numel(), param))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_mult() {
        let op = ConstMultOp::new(1.0 / 3.0);
        let x = Matrix::from_rows(vec![vec![3.0], vec![6.0]]).unwrap();
        let y = op.evaluate(&[x.clone()]).unwrap();
        assert_eq!(y.shape(), vec![2, 1]);
        approx::assert_abs_diff_eq!(y.data()[1], 2.0, epsilon = 1e-12);

        let jac = op.derivative(&[x.clone()], 0).unwrap();
        assert_eq!(jac.shape(), vec![2, 2]);
        assert_eq!(jac.get(0, 1), Some(0.0));

        let p = Parameter::scalar("unused", 1.0);
        assert!(op.param_derivative(&[x], &p).unwrap().is_zero());
    }
}
