/// Hyper-parameters of the full-batch training loops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    /// Step size handed to the optimizer.
    pub learning_rate: f64,
    /// Number of forward/backward/update rounds.
    pub iterations: usize,
    /// Sampling period of the loss history and of `info` logging. `0` disables both.
    pub log_every: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            learning_rate: 1e-3,
            iterations: 10_000,
            log_every: 1_000,
        }
    }
}

impl TrainingConfig {
    pub fn new(learning_rate: f64, iterations: usize) -> Self {
        TrainingConfig {
            learning_rate,
            iterations,
            ..Default::default()
        }
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub(crate) fn should_log(&self, iteration: usize) -> bool {
        self.log_every != 0 && iteration % self.log_every == 0
    }
}
