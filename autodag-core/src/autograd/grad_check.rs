use crate::autograd::graph::Graph;
use crate::error::AutodagError;
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;
use approx::abs_diff_eq;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for parameter '{param}', element {element_index}: analytical {analytical:?} != numerical {numerical:?} (difference {difference:?})")]
    GradientMismatch {
        param: String,
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for parameter '{param}', element {element_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        param: String,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Propagation failed during gradient check: {0}")]
    Propagation(AutodagError),
}

impl From<AutodagError> for GradCheckError {
    fn from(err: AutodagError) -> Self {
        GradCheckError::Propagation(err)
    }
}

fn loss_at(graph: &Graph, leaves: &[Matrix]) -> Result<f64, AutodagError> {
    graph.forward(leaves)?.scalar_output()
}

/// Checks the analytic gradient of `graph`'s root with respect to `param`
/// against central finite differences.
///
/// Every element of the parameter is perturbed by `±epsilon` in turn; the
/// parameter is restored to its original value before returning, whatever
/// the outcome.
pub fn check_param_grad(
    graph: &Graph,
    leaves: &[Matrix],
    param: &Parameter,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    let store = graph.forward(leaves)?;
    let analytical = graph.backward_param(&store, param)?;
    let original = param.value();
    let name = param.name();

    for (element_index, &p0) in original.iter().enumerate() {
        param.set_element(element_index, p0 + epsilon)?;
        let loss_plus = loss_at(graph, leaves);
        param.set_element(element_index, p0 - epsilon)?;
        let loss_minus = loss_at(graph, leaves);
        param.set_element(element_index, p0)?;
        let (loss_plus, loss_minus) = (loss_plus?, loss_minus?);

        let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
        if !numerical.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                param: name,
                element_index,
                loss_plus,
                loss_minus,
            });
        }
        let analytic = analytical[element_index];
        if !abs_diff_eq!(analytic, numerical, epsilon = tolerance) {
            return Err(GradCheckError::GradientMismatch {
                param: name,
                element_index,
                analytical: analytic,
                numerical,
                difference: (analytic - numerical).abs(),
            });
        }
    }
    log::debug!("gradient check passed for '{}'", name);
    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
