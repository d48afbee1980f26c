use super::traits::Sampler;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};

/// Visits samples in random order.
///
/// Without replacement every pass is a permutation (truncated to
/// `num_samples`); with replacement indices are drawn independently. A seeded
/// sampler is reproducible: pass `k` always uses the generator seeded with
/// `seed + k`, so successive epochs still differ.
#[derive(Debug)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    seed: Option<u64>,
    passes: AtomicU64,
}

impl RandomSampler {
    /// # Arguments
    ///
    /// * `replacement`: if `true`, an index can be drawn several times per pass.
    /// * `num_samples`: indices per pass; defaults to the dataset size.
    pub fn new(replacement: bool, num_samples: Option<usize>) -> Self {
        RandomSampler {
            replacement,
            num_samples,
            seed: None,
            passes: AtomicU64::new(0),
        }
    }

    /// A shuffling sampler (no replacement) with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(false, None).with_seed(seed)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn draw(&self, dataset_len: usize, rng: &mut impl Rng) -> Vec<usize> {
        let count = self.len(dataset_len);
        if self.replacement {
            return (0..count).map(|_| rng.gen_range(0..dataset_len)).collect();
        }
        let mut indices: Vec<usize> = (0..dataset_len).collect();
        indices.shuffle(rng);
        indices.truncate(count);
        indices
    }
}

impl Clone for RandomSampler {
    fn clone(&self) -> Self {
        RandomSampler {
            replacement: self.replacement,
            num_samples: self.num_samples,
            seed: self.seed,
            passes: AtomicU64::new(self.passes.load(Ordering::Relaxed)),
        }
    }
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }
        if !self.replacement && self.num_samples.map_or(false, |n| n > dataset_len) {
            log::warn!(
                "RandomSampler: num_samples ({:?}) > dataset_len ({}) without replacement; yielding every sample once.",
                self.num_samples,
                dataset_len
            );
        }
        let pass = self.passes.fetch_add(1, Ordering::Relaxed);
        let indices = match self.seed {
            Some(seed) => self.draw(dataset_len, &mut StdRng::seed_from_u64(seed.wrapping_add(pass))),
            None => self.draw(dataset_len, &mut rand::thread_rng()),
        };
        Box::new(indices.into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        let requested = self.num_samples.unwrap_or(dataset_len);
        if self.replacement {
            requested
        } else {
            requested.min(dataset_len)
        }
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
