use super::*;
use crate::datasets::VecDataset;
use crate::samplers::{RandomSampler, SequentialSampler};

fn collect_epoch<D: Dataset, S: Sampler>(loader: &mut DataLoader<D, S>) -> Vec<Vec<D::Item>> {
    loader.by_ref().map(|b| b.expect("batch should not error")).collect()
}

#[test]
fn test_sequential_batches() {
    let dataset = VecDataset::new(vec![1, 2, 3, 4, 5, 6]);
    let mut loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false, None);
    assert_eq!(loader.num_batches(), 3);
    assert_eq!(collect_epoch(&mut loader), vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    assert!(loader.next().is_none());
}

#[test]
fn test_partial_last_batch() {
    let dataset = VecDataset::new(vec![1, 2, 3, 4, 5]);
    let mut loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false, None);
    assert_eq!(loader.num_batches(), 3);
    assert_eq!(collect_epoch(&mut loader).last(), Some(&vec![5]));
}

#[test]
fn test_drop_last() {
    let dataset = VecDataset::new(vec![1, 2, 3, 4, 5]);
    let mut loader = DataLoader::new(dataset, 2, SequentialSampler::new(), true, None);
    assert_eq!(loader.num_batches(), 2);
    assert_eq!(collect_epoch(&mut loader), vec![vec![1, 2], vec![3, 4]]);
}

#[test]
fn test_reset_starts_a_new_epoch() {
    let dataset = VecDataset::new(vec![1, 2, 3]);
    let mut loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false, None);
    let first = collect_epoch(&mut loader);
    loader.reset();
    assert_eq!(collect_epoch(&mut loader), first);
}

#[test]
fn test_shuffled_epoch_covers_every_sample() {
    let dataset = VecDataset::new((0..10).collect::<Vec<i32>>());
    let mut loader = DataLoader::new(dataset, 3, RandomSampler::seeded(3), false, None);
    let mut seen: Vec<i32> = collect_epoch(&mut loader).into_iter().flatten().collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_collate_fn_is_applied() {
    let dataset = VecDataset::new(vec![1, 2, 3, 4]);
    let collate: CollateFn<VecDataset<i32>> =
        Box::new(|batch: Vec<i32>| Ok(batch.into_iter().map(|v| v * 10).collect()));
    let mut loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false, Some(collate));
    assert_eq!(collect_epoch(&mut loader), vec![vec![10, 20], vec![30, 40]]);
}

#[test]
fn test_dataset_errors_are_forwarded() {
    #[derive(Debug)]
    struct OutOfRange;
    impl Sampler for OutOfRange {
        fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
            Box::new(std::iter::once(dataset_len))
        }
        fn len(&self, _dataset_len: usize) -> usize {
            1
        }
    }

    let dataset = VecDataset::new(vec![1, 2]);
    let mut loader = DataLoader::new(dataset, 2, OutOfRange, false, None);
    assert_eq!(
        loader.next().unwrap().unwrap_err(),
        AutodagError::IndexOutOfBounds { index: 2, len: 2 }
    );
}

#[test]
fn test_zero_batch_size_is_clamped() {
    let dataset = VecDataset::new(vec![1, 2]);
    let mut loader = DataLoader::new(dataset, 0, SequentialSampler::new(), false, None);
    assert_eq!(collect_epoch(&mut loader), vec![vec![1], vec![2]]);
}
