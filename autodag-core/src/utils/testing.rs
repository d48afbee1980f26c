use crate::autograd::node_function::NodeFunction;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;

/// Checks if a matrix is approximately equal to the expected shape and data.
/// Panics if shapes differ or data differs by more than `tolerance`.
pub fn check_matrix_near(
    actual: &Matrix,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.numel(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual.data().iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Central finite-difference Jacobian of `f` with respect to `inputs[input_index]`.
///
/// Shape matches [`NodeFunction::derivative`]: `numel(output) x numel(input)`.
pub fn numeric_jacobian<F: NodeFunction + ?Sized>(
    f: &F,
    inputs: &[Matrix],
    input_index: usize,
    epsilon: f64,
) -> Matrix {
    let out_numel = f
        .evaluate(inputs)
        .expect("evaluate failed at the base point")
        .numel();
    let in_numel = inputs[input_index].numel();
    let mut jac = Matrix::zeros(out_numel, in_numel);
    for col in 0..in_numel {
        let mut plus = inputs.to_vec();
        plus[input_index].data_mut()[col] += epsilon;
        let mut minus = inputs.to_vec();
        minus[input_index].data_mut()[col] -= epsilon;
        let f_plus = f.evaluate(&plus).expect("evaluate failed at x + eps");
        let f_minus = f.evaluate(&minus).expect("evaluate failed at x - eps");
        for row in 0..out_numel {
            let d = (f_plus.data()[row] - f_minus.data()[row]) / (2.0 * epsilon);
            jac.set(row, col, d);
        }
    }
    jac
}

/// Central finite-difference derivative of `f` with respect to `param`.
///
/// The parameter is restored to its original value before returning.
pub fn numeric_param_jacobian<F: NodeFunction + ?Sized>(
    f: &F,
    inputs: &[Matrix],
    param: &Parameter,
    epsilon: f64,
) -> Matrix {
    let original = param.value();
    let out_numel = f
        .evaluate(inputs)
        .expect("evaluate failed at the base point")
        .numel();
    let mut jac = Matrix::zeros(out_numel, original.len());
    for (col, &p0) in original.iter().enumerate() {
        param.set_element(col, p0 + epsilon).expect("set_element failed");
        let f_plus = f.evaluate(inputs).expect("evaluate failed at p + eps");
        param.set_element(col, p0 - epsilon).expect("set_element failed");
        let f_minus = f.evaluate(inputs).expect("evaluate failed at p - eps");
        param.set_element(col, p0).expect("set_element failed");
        for row in 0..out_numel {
            let d = (f_plus.data()[row] - f_minus.data()[row]) / (2.0 * epsilon);
            jac.set(row, col, d);
        }
    }
    jac
}

/// Asserts that the analytic Jacobians of `f` match finite differences at `inputs`,
/// for every input position and every listed parameter.
pub fn assert_jacobians_match<F: NodeFunction + ?Sized>(
    f: &F,
    inputs: &[Matrix],
    params: &[Parameter],
    tolerance: f64,
) {
    for k in 0..f.arity() {
        let analytic = f.derivative(inputs, k).expect("derivative failed").to_dense();
        let numeric = numeric_jacobian(f, inputs, k, 1e-6);
        check_matrix_near(&analytic, &numeric.shape(), numeric.data(), tolerance);
    }
    for p in params {
        let analytic = f.param_derivative(inputs, p).expect("param_derivative failed");
        let numeric = numeric_param_jacobian(f, inputs, p, 1e-6);
        check_matrix_near(&analytic, &numeric.shape(), numeric.data(), tolerance);
    }
}
