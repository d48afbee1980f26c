use super::*;
use crate::ops::Op;
use approx::assert_abs_diff_eq;
use std::collections::HashMap;

fn sum_diamond() -> Graph {
    let reverse_adj: HashMap<usize, Vec<usize>> =
        [(5, vec![3, 4]), (3, vec![0, 1]), (4, vec![2])].into_iter().collect();
    let ops = vec![
        Op::input(),
        Op::input(),
        Op::input(),
        Op::sum(2),
        Op::sum(1),
        Op::sum(2),
    ];
    let mut g = Graph::from_reverse_adjacency(ops, &reverse_adj).unwrap();
    g.seal().unwrap();
    g
}

#[test]
fn test_sum_graph_leaves_move_by_learning_rate_times_iterations() {
    let g = sum_diamond();
    let mut leaves = vec![Matrix::scalar(0.5), Matrix::scalar(0.1), Matrix::scalar(0.3)];
    let config = TrainingConfig::new(1e-3, 100).with_log_every(0);

    let report = descend_leaves(&g, &mut leaves, &[0, 1, 2], &config).unwrap();

    // Every leaf has gradient 1 throughout, so each moves by -0.1.
    let expected = [0.4, 0.0, 0.2];
    for (leaf, want) in leaves.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(leaf.as_scalar().unwrap(), *want, epsilon = 1e-12);
    }
    assert_abs_diff_eq!(report.initial_loss, 0.9, epsilon = 1e-12);
    assert_abs_diff_eq!(report.final_loss, 0.6, epsilon = 1e-12);
    assert!(report.history.is_empty());
}

#[test]
fn test_unselected_leaves_are_fixed() {
    let g = sum_diamond();
    let mut leaves = vec![Matrix::scalar(0.5), Matrix::scalar(0.1), Matrix::scalar(0.3)];
    let config = TrainingConfig::new(0.01, 10).with_log_every(5);

    let report = descend_leaves(&g, &mut leaves, &[2], &config).unwrap();

    assert_eq!(leaves[0], Matrix::scalar(0.5));
    assert_eq!(leaves[1], Matrix::scalar(0.1));
    assert_abs_diff_eq!(leaves[2].as_scalar().unwrap(), 0.2, epsilon = 1e-12);
    assert_eq!(report.history.len(), 2);
    assert_eq!(report.history[1].0, 5);
}

#[test]
fn test_squared_difference_graph_decreases_loss() {
    let reverse_adj: HashMap<usize, Vec<usize>> =
        [(5, vec![3, 4]), (3, vec![0, 1]), (4, vec![2])].into_iter().collect();
    let ops = vec![
        Op::input(),
        Op::input(),
        Op::input(),
        Op::squared_difference(2),
        Op::squared_difference(1),
        Op::squared_difference(2),
    ];
    let mut g = Graph::from_reverse_adjacency(ops, &reverse_adj).unwrap();
    g.seal().unwrap();

    let mut leaves = vec![Matrix::scalar(0.5), Matrix::scalar(0.1), Matrix::scalar(0.3)];
    let config = TrainingConfig::new(1e-2, 200).with_log_every(0);
    let report = descend_leaves(&g, &mut leaves, &[0, 1, 2], &config).unwrap();
    assert!(report.final_loss < report.initial_loss);
}

#[test]
fn test_out_of_range_leaf_position() {
    let g = sum_diamond();
    let mut leaves = vec![Matrix::scalar(0.5), Matrix::scalar(0.1), Matrix::scalar(0.3)];
    let err = descend_leaves(&g, &mut leaves, &[3], &TrainingConfig::default()).unwrap_err();
    assert_eq!(err, AutodagError::UnknownLeaf { position: 3, count: 3 });
}

#[test]
fn test_leaf_count_is_checked() {
    let g = sum_diamond();
    let mut leaves = vec![Matrix::scalar(0.5), Matrix::scalar(0.1)];
    let err = descend_leaves(&g, &mut leaves, &[0], &TrainingConfig::new(0.1, 1)).unwrap_err();
    assert_eq!(err, AutodagError::LeafCountMismatch { expected: 3, actual: 2 });
}
