use super::traits::Sampler;

/// Visits `0..n` in order, optionally stopping after `limit` samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSampler {
    limit: Option<usize>,
}

impl SequentialSampler {
    pub fn new() -> Self {
        SequentialSampler { limit: None }
    }

    /// Only the first `limit` samples of each pass.
    pub fn with_limit(limit: usize) -> Self {
        SequentialSampler { limit: Some(limit) }
    }
}

impl Sampler for SequentialSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        Box::new(0..self.len(dataset_len))
    }

    fn len(&self, dataset_len: usize) -> usize {
        self.limit.map_or(dataset_len, |limit| limit.min(dataset_len))
    }
}

#[cfg(test)]
#[path = "sequential_sampler_test.rs"]
mod tests;
