//! Mini-batch training on top of [`Trainer::fit_batch`].

use crate::dataloader::DataLoader;
use crate::datasets::Dataset;
use crate::samplers::{RandomSampler, Sampler, SequentialSampler};
use autodag_core::{AutodagError, Graph, Matrix, Optimizer, Parameter, Trainer};

/// How a dataset is cut into mini-batches and for how long it is trained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchConfig {
    pub batch_size: usize,
    pub epochs: usize,
    /// Visit samples in a new random order every epoch.
    pub shuffle: bool,
    /// Seed of the shuffling order; `None` draws from the thread generator.
    pub seed: Option<u64>,
    pub drop_last: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            batch_size: 32,
            epochs: 10,
            shuffle: true,
            seed: None,
            drop_last: false,
        }
    }
}

/// Runs `epochs` passes over `loader`, one [`Trainer::fit_batch`] update per batch.
///
/// Each sample of the dataset is the list of leaf values fed to `graph`.
/// Returns the mean per-sample loss of every epoch, measured batch by batch
/// before each update.
pub fn train_epochs<D, S, O>(
    trainer: &mut Trainer<O>,
    graph: &Graph,
    loader: &mut DataLoader<D, S>,
    params: &[Parameter],
    epochs: usize,
) -> Result<Vec<f64>, AutodagError>
where
    D: Dataset<Item = Vec<Matrix>>,
    S: Sampler,
    O: Optimizer,
{
    let mut epoch_losses = Vec::with_capacity(epochs);
    for epoch in 0..epochs {
        loader.reset();
        let mut weighted_loss = 0.0;
        let mut samples = 0usize;
        for batch in loader.by_ref() {
            let batch = batch?;
            let loss = trainer.fit_batch(graph, &batch, params)?;
            weighted_loss += loss * batch.len() as f64;
            samples += batch.len();
        }
        let mean = if samples == 0 {
            0.0
        } else {
            weighted_loss / samples as f64
        };
        log::info!("epoch {}: mean loss = {:.6} over {} samples", epoch, mean, samples);
        epoch_losses.push(mean);
    }
    Ok(epoch_losses)
}

/// Builds the loader described by `config` around `dataset` and trains on it.
pub fn fit_minibatches<D, O>(
    trainer: &mut Trainer<O>,
    graph: &Graph,
    dataset: D,
    params: &[Parameter],
    config: &BatchConfig,
) -> Result<Vec<f64>, AutodagError>
where
    D: Dataset<Item = Vec<Matrix>>,
    O: Optimizer,
{
    log::debug!(
        "mini-batch training: {} samples, batch size {}, {} epochs",
        dataset.len(),
        config.batch_size,
        config.epochs
    );
    if config.shuffle {
        let sampler = match config.seed {
            Some(seed) => RandomSampler::seeded(seed),
            None => RandomSampler::new(false, None),
        };
        let mut loader = DataLoader::new(dataset, config.batch_size, sampler, config.drop_last, None);
        train_epochs(trainer, graph, &mut loader, params, config.epochs)
    } else {
        let mut loader = DataLoader::new(
            dataset,
            config.batch_size,
            SequentialSampler::new(),
            config.drop_last,
            None,
        );
        train_epochs(trainer, graph, &mut loader, params, config.epochs)
    }
}

#[cfg(test)]
#[path = "training_test.rs"]
mod tests;
