use super::*;
use crate::ops::Op;

const EPSILON: f64 = 1e-6;
const TOLERANCE: f64 = 1e-5;

fn regression_graph(w: &Parameter, b: &Parameter) -> Graph {
    let mut g = Graph::new();
    let x = g.input("x");
    let y = g.input("y");
    let proj = g.node("projection", Op::projection(w.clone()), &[x]).unwrap();
    let biased = g.node("bias", Op::bias(b.clone()), &[proj]).unwrap();
    let residual = g.node("residual", Op::subtract(), &[biased, y]).unwrap();
    let sq = g.node("norm", Op::norm_square(), &[residual]).unwrap();
    g.node("loss", Op::const_mult(0.25), &[sq]).unwrap();
    g.seal().unwrap();
    g
}

fn regression_leaves() -> Vec<Matrix> {
    vec![
        Matrix::from_rows(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ])
        .unwrap(),
        Matrix::column_vector(vec![4.0, -1.0, 1.5, 2.5]),
    ]
}

#[test]
fn test_regression_gradients_match_finite_differences() {
    let w = Parameter::new("w", vec![0.2, -0.4, 1.1]);
    let b = Parameter::new("b", vec![0.3]);
    let g = regression_graph(&w, &b);
    let leaves = regression_leaves();

    check_param_grad(&g, &leaves, &w, EPSILON, TOLERANCE).unwrap();
    check_param_grad(&g, &leaves, &b, EPSILON, TOLERANCE).unwrap();
}

#[test]
fn test_check_restores_parameter() {
    let w = Parameter::new("w", vec![0.2, -0.4, 1.1]);
    let b = Parameter::new("b", vec![0.3]);
    let g = regression_graph(&w, &b);

    check_param_grad(&g, &regression_leaves(), &w, 1e-3, TOLERANCE).unwrap();
    assert_eq!(w.value(), vec![0.2, -0.4, 1.1]);
}

#[test]
fn test_sigmoid_chain() {
    // average(sigmoid(a·x) + b)
    let a = Parameter::scalar("a", 0.7);
    let b = Parameter::scalar("b", -0.2);
    let mut g = Graph::new();
    let x = g.input("x");
    let scaled = g.node("scaled", Op::mult(a.clone()).unwrap(), &[x]).unwrap();
    let act = g.node("act", Op::sigmoid(), &[scaled]).unwrap();
    let shifted = g.node("shifted", Op::add(b.clone()).unwrap(), &[act]).unwrap();
    g.node("avg", Op::average(), &[shifted]).unwrap();
    g.seal().unwrap();

    let leaves = vec![Matrix::row_vector(vec![-1.0, 0.5, 2.0])];
    check_param_grad(&g, &leaves, &a, EPSILON, TOLERANCE).unwrap();
    check_param_grad(&g, &leaves, &b, EPSILON, TOLERANCE).unwrap();
}

#[test]
fn test_unrelated_parameter_passes_with_zero_gradient() {
    let w = Parameter::new("w", vec![0.2, -0.4, 1.1]);
    let b = Parameter::new("b", vec![0.3]);
    let g = regression_graph(&w, &b);
    let other = Parameter::new("other", vec![1.0, 2.0]);
    check_param_grad(&g, &regression_leaves(), &other, EPSILON, TOLERANCE).unwrap();
}

#[test]
fn test_propagation_errors_are_wrapped() {
    let a = Parameter::scalar("a", 1.0);
    let mut g = Graph::new();
    let x = g.input("x");
    g.node("scaled", Op::mult(a.clone()).unwrap(), &[x]).unwrap();

    let err = check_param_grad(&g, &[Matrix::scalar(1.0)], &a, EPSILON, TOLERANCE).unwrap_err();
    assert_eq!(err, GradCheckError::Propagation(AutodagError::NotSealed));
}

#[test]
fn test_non_finite_loss_is_reported() {
    let a = Parameter::scalar("a", 1.0);
    let mut g = Graph::new();
    let x = g.input("x");
    let scaled = g.node("scaled", Op::mult(a.clone()).unwrap(), &[x]).unwrap();
    g.node("norm", Op::norm_square(), &[scaled]).unwrap();
    g.seal().unwrap();

    let leaves = vec![Matrix::scalar(f64::MAX)];
    match check_param_grad(&g, &leaves, &a, EPSILON, TOLERANCE) {
        Err(GradCheckError::NumericalGradNaNOrInfinite { param, element_index, .. }) => {
            assert_eq!(param, "a");
            assert_eq!(element_index, 0);
        }
        other => panic!("Expected NumericalGradNaNOrInfinite, got {:?}", other),
    }
    assert_eq!(a.scalar_value(), 1.0);
}
