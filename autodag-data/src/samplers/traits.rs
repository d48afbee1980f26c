use std::fmt::Debug;

/// Decides the order in which a [`DataLoader`](crate::DataLoader) visits a dataset.
pub trait Sampler: Debug + Send + Sync {
    /// Indices of one pass over a dataset of `dataset_len` samples.
    ///
    /// Called once per epoch; randomized samplers may return a different
    /// order on every call.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Number of indices [`iter`](Sampler::iter) yields for `dataset_len` samples.
    fn len(&self, dataset_len: usize) -> usize;
}
