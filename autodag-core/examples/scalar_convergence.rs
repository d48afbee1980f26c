//! # Scalar parameter descent
//!
//! Minimizes `F[a] = x·a² + a` for a fixed input `x = 4`, starting from
//! `a = 1`. The graph reuses the same parameter in three nodes:
//!
//! ```text
//! x -> mult(a) -> mult(a) -> add(a)
//! ```
//!
//! The analytic minimum is at `a = -1/(2x) = -0.125`.
//!
//! ## Running
//! `RUST_LOG=info cargo run --example scalar_convergence`

use autodag_core::{AutodagError, Graph, Matrix, Op, Parameter, Trainer, TrainingConfig};

fn main() -> Result<(), AutodagError> {
    env_logger::init();

    let a = Parameter::scalar("a", 1.0);
    let mut graph = Graph::new();
    let x = graph.input("x");
    let m2 = graph.node("multiplication node 2", Op::mult(a.clone())?, &[x])?;
    let m1 = graph.node("multiplication node 1", Op::mult(a.clone())?, &[m2])?;
    graph.node("addition node", Op::add(a.clone())?, &[m1])?;
    graph.seal()?;

    let x_value = 4.0;
    let leaves = [Matrix::scalar(x_value)];
    let mut trainer = Trainer::new(TrainingConfig::default());
    let report = trainer.fit(&graph, &leaves, &[a.clone()])?;

    for (iteration, loss) in &report.history {
        println!("iteration {:>5}: F = {:.6}", iteration, loss);
    }
    println!(
        "a = {:.6} (expected {:.6}), F = {:.6}",
        a.scalar_value(),
        -1.0 / (2.0 * x_value),
        report.final_loss
    );
    Ok(())
}
