use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, expect_same_shapes, zero_param_derivative, NodeFunction,
};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

/// `(x0 - x1 - ... - xk)²` elementwise. With a single input this is `x0²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquaredDifferenceOp {
    arity: usize,
}

impl SquaredDifferenceOp {
    pub fn new(arity: usize) -> Self {
        SquaredDifferenceOp {
            arity: arity.max(1),
        }
    }

    fn difference(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, self.arity, "squared_difference")?;
        expect_same_shapes(inputs, "squared_difference")?;
        let mut d = inputs[0].clone();
        for other in &inputs[1..] {
            d = d.sub(other)?;
        }
        Ok(d)
    }
}

impl NodeFunction for SquaredDifferenceOp {
    fn arity(&self) -> usize {
        self.arity
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        Ok(self.difference(inputs)?.map(|d| d * d))
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_input_index(input_index, self.arity, "squared_difference")?;
        let d = self.difference(inputs)?;
        let sign = if input_index == 0 { 2.0 } else { -2.0 };
        Ok(Jacobian::Diagonal(
            d.data().iter().map(|&v| sign * v).collect(),
        ))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, self.arity, "squared_difference")?;
        Ok(zero_param_derivative(inputs[0].numel(), param))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::assert_jacobians_match;

    #[test]
    fn test_squared_difference_values() {
        let op = SquaredDifferenceOp::new(3);
        let inputs = [Matrix::scalar(1.0), Matrix::scalar(0.25), Matrix::scalar(0.25)];
        approx::assert_abs_diff_eq!(
            op.evaluate(&inputs).unwrap().as_scalar().unwrap(),
            0.25,
            epsilon = 1e-12
        );
        assert_eq!(op.derivative(&inputs, 0).unwrap().as_scalar(), Some(1.0));
        assert_eq!(op.derivative(&inputs, 2).unwrap().as_scalar(), Some(-1.0));
    }

    #[test]
    fn test_squared_difference_single_input_is_square() {
        let op = SquaredDifferenceOp::new(1);
        let y = op.evaluate(&[Matrix::scalar(0.3)]).unwrap();
        approx::assert_abs_diff_eq!(y.as_scalar().unwrap(), 0.09, epsilon = 1e-12);
    }

    #[test]
    fn test_squared_difference_jacobians() {
        let op = SquaredDifferenceOp::new(2);
        let a = Matrix::row_vector(vec![0.5, -1.0, 2.0]);
        let b = Matrix::row_vector(vec![0.1, 0.4, -0.3]);
        assert_jacobians_match(&op, &[a, b], &[], 1e-5);
    }
}
