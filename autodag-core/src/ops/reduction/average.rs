use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, zero_param_derivative, NodeFunction,
};
use crate::error::{AutodagError, Result};
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

/// Mean over every element of the batch, `1/(N·m) Σ x_ij`, giving a `1 x 1` value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AverageOp;

fn check_non_empty(x: &Matrix) -> Result<()> {
    if x.numel() == 0 {
        return Err(AutodagError::ShapeMismatch {
            expected: vec![1, 1],
            actual: x.shape(),
            operation: "average".to_string(),
        });
    }
    Ok(())
}

impl NodeFunction for AverageOp {
    fn arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, 1, "average")?;
        let x = &inputs[0];
        check_non_empty(x)?;
        let total: f64 = x.data().iter().sum();
        Ok(Matrix::scalar(total / x.numel() as f64))
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_inputs(inputs, 1, "average")?;
        expect_input_index(input_index, 1, "average")?;
        let x = &inputs[0];
        check_non_empty(x)?;
        Ok(Jacobian::Dense(Matrix::filled(
            1,
            x.numel(),
            1.0 / x.numel() as f64,
        )))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, 1, "average")?;
        Ok(zero_param_derivative(1, param))
    }
}
