//! Graph representation and the propagation algorithms.
//!
//! - [`node_function`]: the local-derivative contract every operator implements.
//! - [`graph`]: the index-ordered DAG, its nodes and sealing.
//! - [`jacobian`]: local Jacobians, dense or block diagonal over the batch.
//! - [`forward`]: forward propagation and the per-pass [`ForwardStore`].
//! - [`backward`]: the gradient table and the per-parameter backward query.
//! - [`grad_check`]: finite-difference validation of analytic gradients.

pub mod backward;
pub mod forward;
pub mod grad_check;
pub mod graph;
pub mod jacobian;
pub mod node_function;

pub use backward::GradientTable;
pub use forward::ForwardStore;
pub use grad_check::{check_param_grad, GradCheckError};
pub use graph::{Graph, Node, NodeId};
pub use jacobian::Jacobian;
pub use node_function::NodeFunction;
