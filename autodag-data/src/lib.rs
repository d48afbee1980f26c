//! Datasets, samplers and mini-batch loading for `autodag-core` training loops.
//!
//! A [`DataLoader`] draws batches of samples from a [`Dataset`] in the order
//! chosen by a [`Sampler`]; [`train_epochs`] feeds those batches to
//! [`Trainer::fit_batch`](autodag_core::Trainer::fit_batch).

pub mod dataloader;
pub mod datasets;
pub mod samplers;
pub mod training;

pub use dataloader::DataLoader;
pub use datasets::{Dataset, VecDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
pub use training::{fit_minibatches, train_epochs, BatchConfig};
