use crate::autograd::graph::Graph;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;
use crate::optim::{Optimizer, Sgd};
use crate::train::config::TrainingConfig;
use std::fmt;

/// State handed to the observer after each update's gradients are known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport {
    /// Number of updates applied before this one.
    pub iteration: usize,
    /// Loss before the update (mean loss for a mini-batch).
    pub loss: f64,
    /// Euclidean norm of all gradients of this update.
    pub gradient_norm: f64,
}

/// Result of [`Trainer::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    /// Number of updates applied
    pub iterations: usize,
    /// Loss before the first update
    pub initial_loss: f64,
    /// Loss after the last update
    pub final_loss: f64,
    /// `(iteration, loss)` sampled every `log_every` iterations
    pub history: Vec<(usize, f64)>,
}

type Observer = Box<dyn FnMut(&IterationReport)>;

/// Drives repeated forward/backward/update rounds over a sealed graph.
///
/// # Example
///
/// ```no_run
/// use autodag_core::{Graph, Matrix, Op, Parameter, Trainer, TrainingConfig};
///
/// let a = Parameter::scalar("a", 1.0);
/// let mut graph = Graph::new();
/// let x = graph.input("x");
/// let m = graph.node("m", Op::mult(a.clone())?, &[x])?;
/// graph.node("add", Op::add(a.clone())?, &[m])?;
/// graph.seal()?;
///
/// let mut trainer = Trainer::new(TrainingConfig::default());
/// let report = trainer.fit(&graph, &[Matrix::scalar(4.0)], &[a])?;
/// println!("final loss {}", report.final_loss);
/// # Ok::<(), autodag_core::AutodagError>(())
/// ```
pub struct Trainer<O: Optimizer = Sgd> {
    config: TrainingConfig,
    optimizer: O,
    observer: Option<Observer>,
    steps: usize,
}

impl Trainer<Sgd> {
    /// A trainer using plain SGD at the configured learning rate.
    pub fn new(config: TrainingConfig) -> Self {
        Self::with_optimizer(config, Sgd::new(config.learning_rate))
    }
}

impl<O: Optimizer> Trainer<O> {
    /// A trainer using `optimizer`. The optimizer keeps its own learning rate.
    pub fn with_optimizer(config: TrainingConfig, optimizer: O) -> Self {
        Trainer {
            config,
            optimizer,
            observer: None,
            steps: 0,
        }
    }

    /// Registers a callback invoked once per update.
    pub fn with_observer(mut self, observer: impl FnMut(&IterationReport) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    pub fn optimizer_mut(&mut self) -> &mut O {
        &mut self.optimizer
    }

    /// Total number of updates applied so far, across all calls.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Full-batch gradient descent on the graph's root.
    ///
    /// Each iteration runs one forward pass with `leaves`, one backward query
    /// per parameter, then one optimizer step. Runs `config.iterations`
    /// iterations; the final loss is measured after the last update.
    pub fn fit(
        &mut self,
        graph: &Graph,
        leaves: &[Matrix],
        params: &[Parameter],
    ) -> Result<TrainingReport> {
        let mut history = Vec::new();
        let mut initial_loss = None;

        for iteration in 0..self.config.iterations {
            let store = graph.forward(leaves)?;
            let loss = store.scalar_output()?;
            let grads = graph.backward_params(&store, params)?;
            initial_loss.get_or_insert(loss);

            if self.config.should_log(iteration) {
                log::info!("iteration {}: loss = {:.6}", iteration, loss);
                history.push((iteration, loss));
            }
            self.notify(loss, &grads);
            self.optimizer.step(&grads)?;
            self.steps += 1;
        }

        let final_loss = graph.forward(leaves)?.scalar_output()?;
        log::info!(
            "training finished after {} iterations: loss = {:.6}",
            self.config.iterations,
            final_loss
        );
        Ok(TrainingReport {
            iterations: self.config.iterations,
            initial_loss: initial_loss.unwrap_or(final_loss),
            final_loss,
            history,
        })
    }

    /// One mini-batch update.
    ///
    /// `samples` holds the leaf values of each sample. Gradients are averaged
    /// over the batch before a single optimizer step. Returns the mean loss of
    /// the batch measured before the update; an empty batch applies no update
    /// and returns `0.0`.
    pub fn fit_batch(
        &mut self,
        graph: &Graph,
        samples: &[Vec<Matrix>],
        params: &[Parameter],
    ) -> Result<f64> {
        if samples.is_empty() {
            log::warn!("fit_batch called with an empty batch; no update applied.");
            return Ok(0.0);
        }

        let mut sums: Vec<Vec<f64>> = params.iter().map(|p| vec![0.0; p.len()]).collect();
        let mut total_loss = 0.0;
        for leaves in samples {
            let store = graph.forward(leaves)?;
            total_loss += store.scalar_output()?;
            for (sum, param) in sums.iter_mut().zip(params) {
                let grad = graph.backward_param(&store, param)?;
                for (s, g) in sum.iter_mut().zip(grad) {
                    *s += g;
                }
            }
        }

        let n = samples.len() as f64;
        let grads: Vec<(Parameter, Vec<f64>)> = params
            .iter()
            .cloned()
            .zip(sums.into_iter().map(|s| s.into_iter().map(|v| v / n).collect()))
            .collect();
        let loss = total_loss / n;
        log::debug!("batch of {} samples: mean loss = {:.6}", samples.len(), loss);

        self.notify(loss, &grads);
        self.optimizer.step(&grads)?;
        self.steps += 1;
        Ok(loss)
    }

    fn notify(&mut self, loss: f64, grads: &[(Parameter, Vec<f64>)]) {
        if let Some(observer) = self.observer.as_mut() {
            let gradient_norm = grads
                .iter()
                .flat_map(|(_, g)| g.iter())
                .map(|g| g * g)
                .sum::<f64>()
                .sqrt();
            observer(&IterationReport {
                iteration: self.steps,
                loss,
                gradient_norm,
            });
        }
    }
}

impl<O: Optimizer + fmt::Debug> fmt::Debug for Trainer<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trainer")
            .field("config", &self.config)
            .field("optimizer", &self.optimizer)
            .field("has_observer", &self.observer.is_some())
            .field("steps", &self.steps)
            .finish()
    }
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
