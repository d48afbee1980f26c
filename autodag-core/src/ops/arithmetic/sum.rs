use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::{
    expect_input_index, expect_inputs, expect_same_shapes, zero_param_derivative, NodeFunction,
};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

/// Elementwise sum of `arity` equally shaped inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SumOp {
    arity: usize,
}

impl SumOp {
    /// A sum over `arity` inputs (at least one).
    pub fn new(arity: usize) -> Self {
        SumOp {
            arity: arity.max(1),
        }
    }
}

impl NodeFunction for SumOp {
    fn arity(&self) -> usize {
        self.arity
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        expect_inputs(inputs, self.arity, "sum")?;
        expect_same_shapes(inputs, "sum")?;
        let mut out = inputs[0].clone();
        for other in &inputs[1..] {
            out.add_inplace(other)?;
        }
        Ok(out)
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        expect_inputs(inputs, self.arity, "sum")?;
        expect_input_index(input_index, self.arity, "sum")?;
        expect_same_shapes(inputs, "sum")?;
        Ok(Jacobian::identity(inputs[input_index].numel()))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        expect_inputs(inputs, self.arity, "sum")?;
        Ok(zero_param_derivative(inputs[0].numel(), param))
    }
}
