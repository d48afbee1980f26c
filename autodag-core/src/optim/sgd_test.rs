use super::*;
use approx::assert_relative_eq;

fn assert_vec_eq(a: &[f64], b: &[f64], epsilon: f64) {
    assert_eq!(a.len(), b.len(), "Vector lengths differ: A has {}, B has {}", a.len(), b.len());
    for (val_a, val_b) in a.iter().zip(b.iter()) {
        assert_relative_eq!(*val_a, *val_b, epsilon = epsilon);
    }
}

#[test]
fn test_sgd_basic_step() -> Result<(), AutodagError> {
    let param = Parameter::new("w", vec![1.0, 2.0, 3.0, 4.0]);
    let grad = vec![0.1, 0.2, 0.3, 0.4];
    let mut optimizer = Sgd::new(0.1);

    optimizer.step(&[(param.clone(), grad.clone())])?;

    assert_vec_eq(&param.value(), &[0.99, 1.98, 2.97, 3.96], 1e-12);
    Ok(())
}

#[test]
fn test_sgd_momentum_accumulates() -> Result<(), AutodagError> {
    let param = Parameter::scalar("a", 1.0);
    let mut optimizer = Sgd::with_momentum(0.1, 0.9);

    optimizer.step(&[(param.clone(), vec![1.0])])?;
    // v = 1
    assert_relative_eq!(param.scalar_value(), 0.9, epsilon = 1e-12);

    optimizer.step(&[(param.clone(), vec![1.0])])?;
    // v = 0.9 * 1 + 1 = 1.9
    assert_relative_eq!(param.scalar_value(), 0.9 - 0.19, epsilon = 1e-12);

    optimizer.reset_state();
    optimizer.step(&[(param.clone(), vec![1.0])])?;
    assert_relative_eq!(param.scalar_value(), 0.71 - 0.1, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_sgd_momentum_is_per_parameter() -> Result<(), AutodagError> {
    let a = Parameter::scalar("a", 0.0);
    let b = Parameter::scalar("b", 0.0);
    let mut optimizer = Sgd::with_momentum(1.0, 0.5);

    optimizer.step(&[(a.clone(), vec![1.0])])?;
    optimizer.step(&[(a.clone(), vec![1.0]), (b.clone(), vec![1.0])])?;

    assert_relative_eq!(a.scalar_value(), -2.5, epsilon = 1e-12);
    assert_relative_eq!(b.scalar_value(), -1.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_sgd_rejects_wrong_gradient_length() {
    let param = Parameter::new("w", vec![1.0, 2.0]);
    let mut optimizer = Sgd::new(0.1);
    let err = optimizer.step(&[(param.clone(), vec![1.0])]).unwrap_err();
    match err {
        AutodagError::ShapeMismatch { expected, actual, .. } => {
            assert_eq!(expected, vec![2]);
            assert_eq!(actual, vec![1]);
        }
        e => panic!("Expected ShapeMismatch, got {:?}", e),
    }
    assert_eq!(param.value(), vec![1.0, 2.0]);
}

#[test]
fn test_sgd_learning_rate_accessors() {
    let mut optimizer = Sgd::default();
    assert_eq!(optimizer.learning_rate(), 1e-3);
    optimizer.set_learning_rate(0.5);
    assert_eq!(optimizer.learning_rate(), 0.5);
    assert_eq!(optimizer.momentum(), 0.0);
}

#[test]
fn test_momentum_buffers_follow_parameter_handles() -> Result<(), AutodagError> {
    let mut optimizer = Sgd::with_momentum(1.0, 0.9);
    let old = Parameter::scalar("old", 0.0);
    optimizer.step(&[(old.clone(), vec![1.0])])?;
    drop(old);

    // Fresh parameters start from a zero velocity, whatever address they get.
    for i in 0..64 {
        let p = Parameter::scalar(format!("p{}", i), 0.0);
        optimizer.step(&[(p.clone(), vec![1.0])])?;
        assert_relative_eq!(p.scalar_value(), -1.0, epsilon = 1e-12);
        optimizer.forget(&p);
    }
    assert_eq!(optimizer.tracked_parameters(), 1);
    Ok(())
}
