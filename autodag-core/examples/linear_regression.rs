//! # Linear regression
//!
//! Fits `y = X·w + b` by full-batch gradient descent on the mean squared
//! error, with the loss expressed as a graph:
//!
//! ```text
//! x -> projection(w) -> bias(b) -> subtract(·, y) -> norm square -> × 1/N
//! ```
//!
//! The data is synthetic, generated from known weights plus a little noise,
//! so the recovered weights can be compared to the generating ones.
//!
//! ## Running
//! `RUST_LOG=info cargo run --example linear_regression`

use autodag_core::nn::init;
use autodag_core::{
    check_param_grad, AutodagError, Graph, Matrix, Op, Parameter, Trainer, TrainingConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::error::Error;

const SAMPLES: usize = 200;
const TRUE_WEIGHTS: [f64; 3] = [3.0, -2.0, 0.5];
const TRUE_BIAS: f64 = 1.0;

fn synthetic_data(rng: &mut StdRng) -> Result<(Matrix, Matrix), Box<dyn Error>> {
    let noise = Normal::new(0.0, 0.05)?;
    let mut rows = Vec::with_capacity(SAMPLES);
    let mut targets = Vec::with_capacity(SAMPLES);
    for _ in 0..SAMPLES {
        let row: Vec<f64> = (0..TRUE_WEIGHTS.len()).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let y: f64 = row.iter().zip(TRUE_WEIGHTS.iter()).map(|(x, w)| x * w).sum::<f64>()
            + TRUE_BIAS
            + noise.sample(rng);
        rows.push(row);
        targets.push(y);
    }
    Ok((Matrix::from_rows(rows)?, Matrix::column_vector(targets)))
}

fn mse_graph(w: &Parameter, b: &Parameter, samples: usize) -> Result<Graph, AutodagError> {
    let mut graph = Graph::new();
    let x = graph.input("x");
    let y = graph.input("y");
    let proj = graph.node("projection", Op::projection(w.clone()), &[x])?;
    let biased = graph.node("bias", Op::bias(b.clone()), &[proj])?;
    let residual = graph.node("residual", Op::subtract(), &[biased, y])?;
    let sq = graph.node("norm square", Op::norm_square(), &[residual])?;
    graph.node("mse", Op::const_mult(1.0 / samples as f64), &[sq])?;
    graph.seal()?;
    Ok(graph)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(7);

    let (x, y) = synthetic_data(&mut rng)?;
    let w = init::uniform("w", TRUE_WEIGHTS.len(), -0.1, 0.1, &mut rng);
    let b = init::constant("b", 1, 0.0);
    let graph = mse_graph(&w, &b, SAMPLES)?;
    let leaves = [x, y];

    match check_param_grad(&graph, &leaves, &w, 1e-6, 1e-6) {
        Ok(()) => println!("gradient check passed"),
        Err(e) => println!("gradient check failed: {}", e),
    }

    let mut trainer = Trainer::new(TrainingConfig::new(0.1, 2_000).with_log_every(200));
    let report = trainer.fit(&graph, &leaves, &[w.clone(), b.clone()])?;

    println!("loss {:.6} -> {:.6}", report.initial_loss, report.final_loss);
    println!("w = {:?} (generated with {:?})", w.value(), TRUE_WEIGHTS);
    println!("b = {:.4} (generated with {})", b.scalar_value(), TRUE_BIAS);
    Ok(())
}
