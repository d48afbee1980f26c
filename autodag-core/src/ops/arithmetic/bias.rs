use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, zero_param_derivative, NodeFunction,
};
use crate::error::{AutodagError, Result};
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

/// `x_ij ↦ x_ij + b_j`: adds the trainable vector `b` to every sample row.
#[derive(Debug, Clone)]
pub struct BiasOp {
    biases: Parameter,
}

impl BiasOp {
    pub fn new(biases: Parameter) -> Self {
        BiasOp { biases }
    }

    pub fn biases(&self) -> &Parameter {
        &self.biases
    }

    fn check_width(&self, x: &Matrix) -> Result<()> {
        if x.cols() != self.biases.len() {
            return Err(AutodagError::ShapeMismatch {
                expected: vec![x.rows(), self.biases.len()],
                actual: x.shape(),
                operation: "bias".to_string(),
            });
        }
        Ok(())
    }
}

impl NodeFunction for BiasOp {
    fn arity(&self) -> usize {
        1
    }

    fn direct_params(&self) -> Vec<Parameter> {
        vec![self.biases.clone()]
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, 1, "bias")?;
        let x = &inputs[0];
        self.check_width(x)?;
        let b = self.biases.value();
        let mut out = x.clone();
        for i in 0..x.rows() {
            for (j, bj) in b.iter().enumerate() {
                out.set(i, j, x.row(i)[j] + bj);
            }
        }
        Ok(out)
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_inputs(inputs, 1, "bias")?;
        expect_input_index(input_index, 1, "bias")?;
        self.check_width(&inputs[0])?;
        Ok(Jacobian::identity(inputs[0].numel()))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, 1, "bias")?;
        let x = &inputs[0];
        if *param != self.biases {
            return Ok(zero_param_derivative(x.numel(), param));
        }
        self.check_width(x)?;
        // Output element (i, j) moves one-for-one with b_j.
        let m = x.cols();
        let mut out = Matrix::zeros(x.numel(), m);
        for i in 0..x.rows() {
            for j in 0..m {
                out.set(i * m + j, j, 1.0);
            }
        }
        Ok(out)
    }
}
