use crate::autograd::graph::Graph;
use crate::error::{AutodagError, Result};
use crate::matrix::Matrix;
use crate::train::config::TrainingConfig;
use crate::train::trainer::TrainingReport;

/// Gradient descent on leaf values instead of parameters.
///
/// `leaves` are the graph's leaf values in ascending leaf order;
/// `leaf_positions` selects which of them are optimized (positions into
/// `leaves`). Each iteration runs a forward pass, builds the gradient table
/// and applies `leaf -= learning_rate * ∂root/∂leaf` to every selected leaf.
/// The other leaves are left untouched.
///
/// # Errors
/// `UnknownLeaf` for a position past the end of `leaves`, plus any
/// propagation error (`LeafCountMismatch`, `NonScalarRoot`, ...).
pub fn descend_leaves(
    graph: &Graph,
    leaves: &mut [Matrix],
    leaf_positions: &[usize],
    config: &TrainingConfig,
) -> Result<TrainingReport> {
    if let Some(&position) = leaf_positions.iter().find(|&&p| p >= leaves.len()) {
        return Err(AutodagError::UnknownLeaf {
            position,
            count: leaves.len(),
        });
    }
    let leaf_ids = graph.leaves();

    let mut history = Vec::new();
    let mut initial_loss = None;
    for iteration in 0..config.iterations {
        let store = graph.forward(leaves)?;
        let loss = store.scalar_output()?;
        initial_loss.get_or_insert(loss);
        if config.should_log(iteration) {
            log::info!("leaf descent iteration {}: loss = {:.6}", iteration, loss);
            history.push((iteration, loss));
        }

        let table = graph.backward_table(&store)?;
        for &position in leaf_positions {
            let grad = table
                .get(leaf_ids[position])
                .ok_or_else(|| AutodagError::MissingForwardValue(leaf_ids[position].to_string()))?;
            let leaf = &mut leaves[position];
            for (v, g) in leaf.data_mut().iter_mut().zip(grad.data()) {
                *v -= config.learning_rate * g;
            }
        }
    }

    let final_loss = graph.forward(leaves)?.scalar_output()?;
    Ok(TrainingReport {
        iterations: config.iterations,
        initial_loss: initial_loss.unwrap_or(final_loss),
        final_loss,
        history,
    })
}

#[cfg(test)]
#[path = "leaf_descent_test.rs"]
mod tests;
