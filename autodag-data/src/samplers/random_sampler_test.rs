use super::*;
use std::collections::HashSet;

#[test]
fn test_len() {
    assert_eq!(RandomSampler::new(false, None).len(10), 10);
    assert_eq!(RandomSampler::new(false, Some(5)).len(10), 5);
    assert_eq!(RandomSampler::new(false, Some(20)).len(10), 10);
    assert_eq!(RandomSampler::new(true, Some(20)).len(10), 20);
}

#[test]
fn test_without_replacement_is_a_permutation() {
    let sampler = RandomSampler::new(false, None);
    let indices: Vec<usize> = sampler.iter(10).collect();
    assert_eq!(indices.len(), 10);
    let unique: HashSet<usize> = indices.into_iter().collect();
    assert_eq!(unique, (0..10).collect());
}

#[test]
fn test_truncated_pass_has_unique_indices() {
    let sampler = RandomSampler::new(false, Some(4));
    let indices: Vec<usize> = sampler.iter(10).collect();
    assert_eq!(indices.len(), 4);
    let unique: HashSet<usize> = indices.iter().copied().collect();
    assert_eq!(unique.len(), 4);
    assert!(indices.iter().all(|&i| i < 10));
}

#[test]
fn test_more_samples_than_data_without_replacement() {
    let sampler = RandomSampler::new(false, Some(10));
    assert_eq!(sampler.iter(5).count(), 5);
}

#[test]
fn test_with_replacement_stays_in_range() {
    let sampler = RandomSampler::new(true, Some(50));
    let indices: Vec<usize> = sampler.iter(3).collect();
    assert_eq!(indices.len(), 50);
    assert!(indices.iter().all(|&i| i < 3));
}

#[test]
fn test_empty_dataset() {
    let sampler = RandomSampler::new(true, Some(5));
    assert_eq!(sampler.iter(0).count(), 0);
}

#[test]
fn test_seeded_sampler_is_reproducible_per_pass() {
    let a = RandomSampler::seeded(17);
    let b = RandomSampler::seeded(17);

    let first_a: Vec<usize> = a.iter(32).collect();
    let first_b: Vec<usize> = b.iter(32).collect();
    assert_eq!(first_a, first_b);

    let second_a: Vec<usize> = a.iter(32).collect();
    let second_b: Vec<usize> = b.iter(32).collect();
    assert_eq!(second_a, second_b);
    assert_ne!(first_a, second_a);
}
