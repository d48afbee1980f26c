//! Training loops over a sealed [`Graph`](crate::autograd::Graph).
//!
//! - [`Trainer`]: parameter descent, full-batch ([`Trainer::fit`]) or one
//!   mini-batch at a time ([`Trainer::fit_batch`]).
//! - [`descend_leaves`]: descent on selected leaf values through the gradient table.

pub mod config;
pub mod leaf_descent;
pub mod trainer;

pub use config::TrainingConfig;
pub use leaf_descent::descend_leaves;
pub use trainer::{IterationReport, Trainer, TrainingReport};
