//! # Operators (`ops`)
//!
//! The closed set of node functions a graph can be built from. Every operator
//! is a small struct implementing [`NodeFunction`]; [`Op`] gathers them into
//! one enum so a graph stores its nodes by value and picks the variant at
//! construction time.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: elementwise operators (add, mult, sum, subtract, bias, ...).
//! - [`linalg`]: per-sample projection onto a weight vector.
//! - [`reduction`]: operators collapsing a batch to a scalar (average, norm square).
//! - [`activation`]: sigmoid.

pub mod activation;
pub mod arithmetic;
pub mod input;
pub mod linalg;
pub mod reduction;

use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::NodeFunction;
use crate::error::{AutodagError, Result};
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

pub use activation::SigmoidOp;
pub use arithmetic::{AddOp, BiasOp, ConstMultOp, MultOp, SquaredDifferenceOp, SubtractOp, SumOp};
pub use input::InputOp;
pub use linalg::ProjectionOp;
pub use reduction::{AverageOp, NormSquareOp};

/// Fails with `ParameterShape` unless `param` holds a single value.
pub(crate) fn expect_scalar_param(param: &Parameter) -> Result<()> {
    if !param.is_scalar() {
        return Err(AutodagError::ParameterShape {
            name: param.name(),
            expected: 1,
            actual: param.len(),
        });
    }
    Ok(())
}

/// A node's operation.
#[derive(Debug, Clone)]
pub enum Op {
    Input(InputOp),
    Sum(SumOp),
    SquaredDifference(SquaredDifferenceOp),
    Add(AddOp),
    Mult(MultOp),
    ConstMult(ConstMultOp),
    Projection(ProjectionOp),
    Bias(BiasOp),
    Subtract(SubtractOp),
    NormSquare(NormSquareOp),
    Average(AverageOp),
    Sigmoid(SigmoidOp),
}

macro_rules! dispatch {
    ($self:ident, $op:ident => $body:expr) => {
        match $self {
            Op::Input($op) => $body,
            Op::Sum($op) => $body,
            Op::SquaredDifference($op) => $body,
            Op::Add($op) => $body,
            Op::Mult($op) => $body,
            Op::ConstMult($op) => $body,
            Op::Projection($op) => $body,
            Op::Bias($op) => $body,
            Op::Subtract($op) => $body,
            Op::NormSquare($op) => $body,
            Op::Average($op) => $body,
            Op::Sigmoid($op) => $body,
        }
    };
}

impl Op {
    /// Leaf receiving an external value.
    pub fn input() -> Op {
        Op::Input(InputOp)
    }

    /// Elementwise sum of `arity` inputs.
    pub fn sum(arity: usize) -> Op {
        Op::Sum(SumOp::new(arity))
    }

    /// `(x0 - x1 - ... )²` over `arity` inputs.
    pub fn squared_difference(arity: usize) -> Op {
        Op::SquaredDifference(SquaredDifferenceOp::new(arity))
    }

    /// `x + a` for a scalar parameter `a`.
    pub fn add(param: Parameter) -> Result<Op> {
        Ok(Op::Add(AddOp::new(param)?))
    }

    /// `a · x` for a scalar parameter `a`.
    pub fn mult(param: Parameter) -> Result<Op> {
        Ok(Op::Mult(MultOp::new(param)?))
    }

    pub fn const_mult(constant: f64) -> Op {
        Op::ConstMult(ConstMultOp::new(constant))
    }

    /// Per-sample dot product with `weights`.
    pub fn projection(weights: Parameter) -> Op {
        Op::Projection(ProjectionOp::new(weights))
    }

    /// Adds `biases` to every sample row.
    pub fn bias(biases: Parameter) -> Op {
        Op::Bias(BiasOp::new(biases))
    }

    pub fn subtract() -> Op {
        Op::Subtract(SubtractOp)
    }

    pub fn norm_square() -> Op {
        Op::NormSquare(NormSquareOp)
    }

    pub fn average() -> Op {
        Op::Average(AverageOp)
    }

    pub fn sigmoid() -> Op {
        Op::Sigmoid(SigmoidOp)
    }

    /// Short operator name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Op::Input(_) => "input",
            Op::Sum(_) => "sum",
            Op::SquaredDifference(_) => "squared_difference",
            Op::Add(_) => "add",
            Op::Mult(_) => "mult",
            Op::ConstMult(_) => "const_mult",
            Op::Projection(_) => "projection",
            Op::Bias(_) => "bias",
            Op::Subtract(_) => "subtract",
            Op::NormSquare(_) => "norm_square",
            Op::Average(_) => "average",
            Op::Sigmoid(_) => "sigmoid",
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Op::Input(_))
    }
}

impl NodeFunction for Op {
    fn arity(&self) -> usize {
        dispatch!(self, op => op.arity())
    }

    fn direct_params(&self) -> Vec<Parameter> {
        dispatch!(self, op => op.direct_params())
    }

    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix> {
        dispatch!(self, op => op.evaluate(inputs))
    }

    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian> {
        dispatch!(self, op => op.derivative(inputs, input_index))
    }

    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix> {
        dispatch!(self, op => op.param_derivative(inputs, param))
    }
}
