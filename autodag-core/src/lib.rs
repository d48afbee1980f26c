//! Reverse-mode automatic differentiation over an explicit computation DAG.
//!
//! A [`Graph`] is built from [`Op`] nodes in topological order, sealed, then
//! evaluated with [`Graph::forward`]. The resulting [`ForwardStore`] feeds
//! either the whole-graph [`Graph::backward_table`] or the per-parameter
//! [`Graph::backward_param`] query, whose gradients drive the [`Trainer`].

pub mod autograd;
pub mod error;
pub mod matrix;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod train;
pub mod utils;

pub use autograd::{
    check_param_grad, ForwardStore, GradCheckError, GradientTable, Graph, Jacobian, Node,
    NodeFunction, NodeId,
};
pub use error::{AutodagError, Result};
pub use matrix::Matrix;
pub use nn::{ParamId, Parameter};
pub use ops::Op;
pub use optim::{Optimizer, Sgd};
pub use train::{descend_leaves, IterationReport, Trainer, TrainingConfig, TrainingReport};
