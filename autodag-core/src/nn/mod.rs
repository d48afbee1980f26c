// src/nn/mod.rs
// Trainable parameters and their initialization.

pub mod init;
pub mod parameter;

// Re-export common items
pub use parameter::{ParamId, Parameter};
