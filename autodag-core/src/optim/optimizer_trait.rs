use crate::error::AutodagError;
use crate::nn::parameter::Parameter;

/// Common interface for the parameter update rules used by the training loops.
///
/// Gradients are not stored on the parameters: backward propagation returns
/// them and the caller hands them to [`step`](Optimizer::step) together with
/// the parameter they belong to.
pub trait Optimizer {
    /// Performs a single optimization step.
    ///
    /// # Arguments
    ///
    /// * `grads`: each parameter paired with `∂loss/∂parameter`, one entry per
    ///   parameter element.
    ///
    /// # Returns
    ///
    /// `Ok(())` if every parameter was updated, or an `AutodagError` if a
    /// gradient's length does not match its parameter or a lock fails.
    fn step(&mut self, grads: &[(Parameter, Vec<f64>)]) -> Result<(), AutodagError>;

    /// The step size currently in use.
    fn learning_rate(&self) -> f64;

    /// Changes the step size for subsequent steps.
    fn set_learning_rate(&mut self, lr: f64);

    /// Forgets any per-parameter state (momentum buffers and the like).
    fn reset_state(&mut self) {}
}
