//! # DataLoader
//!
//! Groups the samples of a [`Dataset`] into batches, in the order chosen by a
//! [`Sampler`].
//!
//! ```rust
//! use autodag_data::dataloader::DataLoader;
//! use autodag_data::datasets::VecDataset;
//! use autodag_data::samplers::SequentialSampler;
//!
//! let dataset = VecDataset::new(vec![1, 2, 3, 4, 5, 6]);
//! let loader = DataLoader::new(dataset, 4, SequentialSampler::new(), false, None);
//! let batches: Vec<Vec<i32>> = loader.map(|b| b.unwrap()).collect();
//! assert_eq!(batches, vec![vec![1, 2, 3, 4], vec![5, 6]]);
//! ```
//!
//! The loader is an `Iterator` over one epoch. Call
//! [`reset`](DataLoader::reset) to start the next epoch, which asks the
//! sampler for a fresh order.

use crate::datasets::Dataset;
use crate::samplers::Sampler;
use autodag_core::AutodagError;

/// Turns the samples of one batch into the batch handed to the caller.
pub type CollateFn<D> = Box<
    dyn Fn(Vec<<D as Dataset>::Item>) -> Result<Vec<<D as Dataset>::Item>, AutodagError>
        + Send
        + Sync,
>;

pub struct DataLoader<D: Dataset, S: Sampler> {
    pub dataset: D,
    pub batch_size: usize,
    pub sampler: S,
    /// Skip the final batch of an epoch when it is smaller than `batch_size`.
    pub drop_last: bool,
    pub collate_fn: Option<CollateFn<D>>,
    indices_iter: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// A `batch_size` of zero is treated as one.
    pub fn new(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
        collate_fn: Option<CollateFn<D>>,
    ) -> Self {
        if batch_size == 0 {
            log::warn!("DataLoader: batch_size 0 requested, using 1.");
        }
        let indices_iter = sampler.iter(dataset.len());
        Self {
            dataset,
            batch_size: batch_size.max(1),
            sampler,
            drop_last,
            collate_fn,
            indices_iter,
        }
    }

    /// Starts a new epoch.
    pub fn reset(&mut self) {
        self.indices_iter = self.sampler.iter(self.dataset.len());
    }

    /// Number of batches one epoch yields.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }
}

impl<D: Dataset, S: Sampler> Iterator for DataLoader<D, S> {
    type Item = Result<Vec<<D as Dataset>::Item>, AutodagError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.batch_size);
        for idx in self.indices_iter.by_ref().take(self.batch_size) {
            match self.dataset.get(idx) {
                Ok(item) => batch.push(item),
                Err(e) => return Some(Err(e)),
            }
        }
        if batch.is_empty() || (self.drop_last && batch.len() < self.batch_size) {
            return None;
        }
        match self.collate_fn {
            Some(ref collate_fn) => Some(collate_fn(batch)),
            None => Some(Ok(batch)),
        }
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
