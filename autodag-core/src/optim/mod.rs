//! Parameter update rules.
//!
//! This module provides the `Optimizer` trait and `Sgd`, the gradient descent
//! rule used by the training loops.

pub mod optimizer_trait;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use sgd::Sgd;
