//! # Mini-batch linear regression
//!
//! Trains `y = x·w + b` one shuffled mini-batch at a time. Each sample is a
//! pair of leaves `[x (1 x 3), y (1 x 1)]` fed to a per-sample squared-error
//! graph; [`fit_minibatches`] averages the gradients of every batch before
//! the SGD update.
//!
//! ## Running
//! `RUST_LOG=info cargo run -p autodag-data --example minibatch_regression`

use autodag_core::nn::init;
use autodag_core::{AutodagError, Graph, Matrix, Op, Parameter, Trainer, TrainingConfig};
use autodag_data::{fit_minibatches, BatchConfig, VecDataset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TRUE_WEIGHTS: [f64; 3] = [3.0, -2.0, 0.5];
const TRUE_BIAS: f64 = 1.0;

fn squared_error_graph(w: &Parameter, b: &Parameter) -> Result<Graph, AutodagError> {
    let mut graph = Graph::new();
    let x = graph.input("x");
    let y = graph.input("y");
    let proj = graph.node("projection", Op::projection(w.clone()), &[x])?;
    let biased = graph.node("bias", Op::bias(b.clone()), &[proj])?;
    let residual = graph.node("residual", Op::subtract(), &[biased, y])?;
    graph.node("squared error", Op::norm_square(), &[residual])?;
    graph.seal()?;
    Ok(graph)
}

fn main() -> Result<(), AutodagError> {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(11);

    let rows: Vec<Vec<f64>> = (0..256)
        .map(|_| (0..TRUE_WEIGHTS.len()).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect();
    let targets: Vec<f64> = rows
        .iter()
        .map(|r| r.iter().zip(TRUE_WEIGHTS.iter()).map(|(x, w)| x * w).sum::<f64>() + TRUE_BIAS)
        .collect();
    let dataset = VecDataset::from_rows(&Matrix::from_rows(rows)?, &Matrix::column_vector(targets))?;

    let w = init::normal("w", TRUE_WEIGHTS.len(), 0.0, 0.1, &mut rng);
    let b = init::constant("b", 1, 0.0);
    let graph = squared_error_graph(&w, &b)?;

    let mut trainer = Trainer::new(TrainingConfig::new(0.05, 0));
    let config = BatchConfig {
        batch_size: 16,
        epochs: 50,
        seed: Some(3),
        ..Default::default()
    };
    let losses = fit_minibatches(&mut trainer, &graph, dataset, &[w.clone(), b.clone()], &config)?;

    for (epoch, loss) in losses.iter().enumerate().step_by(10) {
        println!("epoch {:>3}: mean loss {:.6}", epoch, loss);
    }
    println!("w = {:?} (generated with {:?})", w.value(), TRUE_WEIGHTS);
    println!("b = {:.4} (generated with {})", b.scalar_value(), TRUE_BIAS);
    Ok(())
}
