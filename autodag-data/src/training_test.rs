use super::*;
use crate::datasets::VecDataset;
use approx::assert_abs_diff_eq;
use autodag_core::{Op, TrainingConfig};

fn squared_error_graph(w: &Parameter, b: &Parameter) -> Graph {
    let mut g = Graph::new();
    let x = g.input("x");
    let y = g.input("y");
    let p = g.node("projection", Op::projection(w.clone()), &[x]).unwrap();
    let q = g.node("bias", Op::bias(b.clone()), &[p]).unwrap();
    let r = g.node("residual", Op::subtract(), &[q, y]).unwrap();
    g.node("loss", Op::norm_square(), &[r]).unwrap();
    g.seal().unwrap();
    g
}

fn regression_dataset() -> VecDataset<Vec<Matrix>> {
    let x = Matrix::from_rows(vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![1.0, 1.0, 1.0],
    ])
    .unwrap();
    let y = Matrix::column_vector(vec![4.0, -1.0, 1.5, 2.5]);
    VecDataset::from_rows(&x, &y).unwrap()
}

#[test]
fn test_default_batch_config() {
    let config = BatchConfig::default();
    assert_eq!(config.batch_size, 32);
    assert!(config.shuffle);
    assert_eq!(config.seed, None);
}

#[test]
fn test_shuffled_minibatches_recover_weights() {
    let w = Parameter::new("w", vec![0.0, 0.0, 0.0]);
    let b = Parameter::new("b", vec![0.0]);
    let graph = squared_error_graph(&w, &b);
    let mut trainer = Trainer::new(TrainingConfig::new(0.05, 0));
    let config = BatchConfig {
        batch_size: 2,
        epochs: 1_500,
        shuffle: true,
        seed: Some(5),
        drop_last: false,
    };

    let losses = fit_minibatches(
        &mut trainer,
        &graph,
        regression_dataset(),
        &[w.clone(), b.clone()],
        &config,
    )
    .unwrap();

    assert_eq!(losses.len(), 1_500);
    assert!(losses[losses.len() - 1] < losses[0]);
    for (got, want) in w.value().iter().zip([3.0, -2.0, 0.5].iter()) {
        assert_abs_diff_eq!(*got, *want, epsilon = 1e-3);
    }
    assert_abs_diff_eq!(b.scalar_value(), 1.0, epsilon = 1e-3);
    assert_eq!(trainer.steps(), 3_000);
}

#[test]
fn test_sequential_epochs_count_updates() {
    let w = Parameter::new("w", vec![0.0, 0.0, 0.0]);
    let b = Parameter::new("b", vec![0.0]);
    let graph = squared_error_graph(&w, &b);
    let mut trainer = Trainer::new(TrainingConfig::new(0.01, 0));
    let mut loader = DataLoader::new(regression_dataset(), 3, SequentialSampler::new(), false, None);

    let losses = train_epochs(&mut trainer, &graph, &mut loader, &[w, b], 4).unwrap();

    assert_eq!(losses.len(), 4);
    // batches of 3 and 1 per epoch
    assert_eq!(trainer.steps(), 8);
    assert!(losses[3] < losses[0]);
}

#[test]
fn test_drop_last_skips_partial_batches() {
    let w = Parameter::new("w", vec![0.0, 0.0, 0.0]);
    let b = Parameter::new("b", vec![0.0]);
    let graph = squared_error_graph(&w, &b);
    let mut trainer = Trainer::new(TrainingConfig::new(0.01, 0));
    let config = BatchConfig {
        batch_size: 3,
        epochs: 2,
        shuffle: false,
        seed: None,
        drop_last: true,
    };
    fit_minibatches(&mut trainer, &graph, regression_dataset(), &[w, b], &config).unwrap();
    assert_eq!(trainer.steps(), 2);
}

#[test]
fn test_graph_errors_stop_training() {
    let w = Parameter::new("w", vec![0.0, 0.0, 0.0]);
    let b = Parameter::new("b", vec![0.0]);
    let graph = squared_error_graph(&w, &b);
    let mut trainer = Trainer::new(TrainingConfig::new(0.01, 0));
    let features_only = VecDataset::new(vec![vec![Matrix::row_vector(vec![1.0, 2.0, 3.0])]]);
    let config = BatchConfig {
        shuffle: false,
        ..Default::default()
    };

    let err = fit_minibatches(&mut trainer, &graph, features_only, &[w, b], &config).unwrap_err();
    assert_eq!(err, AutodagError::LeafCountMismatch { expected: 2, actual: 1 });
    assert_eq!(trainer.steps(), 0);
}
