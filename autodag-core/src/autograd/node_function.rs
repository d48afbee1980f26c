use crate::autograd::jacobian::Jacobian;
use crate::error::{AutodagError, Result};
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;
use std::fmt::Debug;

/// Defines the local, differentiable behaviour of a graph node.
///
/// All three evaluation methods are called at a fixed input point taken from
/// the forward store, and may be called repeatedly at that point by both
/// propagation algorithms. Implementations must therefore be pure: no hidden
/// state may change between calls.
///
/// Shapes follow a single convention. An input or output value is a
/// `rows x cols` [`Matrix`] (one row per sample). Jacobians relate the
/// *flattened* output (row-major) to a flattened input or parameter:
///
/// * `derivative(inputs, k)` is `numel(output) x numel(inputs[k])`, returned
///   as a [`Jacobian`] so per-sample operators can keep their block structure;
/// * `param_derivative(inputs, p)` is `numel(output) x p.len()`.
///
/// The `Send + Sync` bounds let a sealed graph be moved to, or shared with,
/// a training thread.
pub trait NodeFunction: Debug + Send + Sync {
    /// Number of graph inputs this function consumes. Leaves have arity 0
    /// and receive their externally supplied value as the single element of
    /// `inputs`.
    fn arity(&self) -> usize;

    /// Parameters referenced explicitly by this function.
    fn direct_params(&self) -> Vec<Parameter> {
        Vec::new()
    }

    /// Output value at `inputs`.
    fn evaluate(&self, inputs: &[Matrix]) -> Result<Matrix>;

    /// Jacobian of the output with respect to input `input_index`, holding all
    /// parameters fixed.
    fn derivative(&self, inputs: &[Matrix], input_index: usize) -> Result<Jacobian>;

    /// Partial derivative of the output with respect to `param`.
    ///
    /// Must be exactly zero, with shape `numel(output) x param.len()`, when
    /// `param` is not one of [`direct_params`](Self::direct_params).
    fn param_derivative(&self, inputs: &[Matrix], param: &Parameter) -> Result<Matrix>;
}

/// Checks the number of values handed to an operation.
///
/// Leaves (arity 0) still receive exactly one value: the leaf itself.
pub(crate) fn expect_inputs(inputs: &[Matrix], arity: usize, operation: &str) -> Result<()> {
    let expected = arity.max(1);
    if inputs.len() != expected {
        return Err(AutodagError::ArityMismatch {
            name: operation.to_string(),
            expected,
            actual: inputs.len(),
        });
    }
    Ok(())
}

/// Checks that `input_index` addresses one of the operation's inputs.
pub(crate) fn expect_input_index(input_index: usize, arity: usize, operation: &str) -> Result<()> {
    if input_index >= arity.max(1) {
        return Err(AutodagError::InvalidInputIndex {
            index: input_index,
            arity,
            operation: operation.to_string(),
        });
    }
    Ok(())
}

/// Checks that every input shares the shape of the first one.
pub(crate) fn expect_same_shapes(inputs: &[Matrix], operation: &str) -> Result<()> {
    if let Some((first, rest)) = inputs.split_first() {
        for other in rest {
            first.check_same_shape(other, operation)?;
        }
    }
    Ok(())
}

/// Zero derivative for a parameter the node does not own.
pub(crate) fn zero_param_derivative(output_numel: usize, param: &Parameter) -> Matrix {
    Matrix::zeros(output_numel, param.len())
}
