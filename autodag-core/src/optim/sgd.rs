use crate::error::AutodagError;
use crate::nn::parameter::Parameter;
use crate::optim::optimizer_trait::Optimizer;
use std::collections::HashMap;

/// Stochastic gradient descent.
///
/// Without momentum each step applies `value -= lr * gradient`. With a
/// non-zero momentum a per-parameter velocity is kept:
/// `v = momentum * v + gradient`, `value -= lr * v`.
///
/// Velocities are keyed by the parameter handle itself, so a buffer keeps its
/// parameter alive and can never be picked up by a later allocation.
#[derive(Debug, Clone)]
pub struct Sgd {
    lr: f64,
    momentum: f64,
    momentum_buffers: HashMap<Parameter, Vec<f64>>,
}

impl Sgd {
    /// Plain SGD with learning rate `lr`.
    pub fn new(lr: f64) -> Self {
        Sgd {
            lr,
            momentum: 0.0,
            momentum_buffers: HashMap::new(),
        }
    }

    /// SGD with a momentum factor.
    pub fn with_momentum(lr: f64, momentum: f64) -> Self {
        if !(0.0..1.0).contains(&momentum) {
            log::warn!(
                "SGD momentum {} is outside [0, 1); updates may diverge.",
                momentum
            );
        }
        Sgd {
            lr,
            momentum,
            momentum_buffers: HashMap::new(),
        }
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Drops the velocity kept for `param`, if any.
    pub fn forget(&mut self, param: &Parameter) {
        self.momentum_buffers.remove(param);
    }

    /// Number of parameters with a velocity buffer.
    pub fn tracked_parameters(&self) -> usize {
        self.momentum_buffers.len()
    }

    fn direction(&mut self, param: &Parameter, grad: &[f64]) -> Vec<f64> {
        if self.momentum == 0.0 {
            return grad.to_vec();
        }
        let momentum = self.momentum;
        let buffer = self
            .momentum_buffers
            .entry(param.clone())
            .or_insert_with(|| vec![0.0; grad.len()]);
        for (v, g) in buffer.iter_mut().zip(grad) {
            *v = momentum * *v + g;
        }
        buffer.clone()
    }
}

impl Default for Sgd {
    fn default() -> Self {
        Sgd::new(1e-3)
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, grads: &[(Parameter, Vec<f64>)]) -> Result<(), AutodagError> {
        for (param, grad) in grads {
            let len = param.len();
            if grad.len() != len {
                return Err(AutodagError::ShapeMismatch {
                    expected: vec![len],
                    actual: vec![grad.len()],
                    operation: format!("SGD step for parameter '{}'", param.name()),
                });
            }
            let delta: Vec<f64> = self
                .direction(param, grad)
                .into_iter()
                .map(|d| -self.lr * d)
                .collect();
            param.apply_delta(&delta)?;
        }
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f64) {
        log::debug!("SGD learning rate {} -> {}", self.lr, lr);
        self.lr = lr;
    }

    fn reset_state(&mut self) {
        self.momentum_buffers.clear();
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
