use thiserror::Error;

/// Custom error type for the autodag engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum AutodagError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Duplicate node name '{name}' at indices {first} and {second}")]
    DuplicateNodeName {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("Graph used before sealing: call seal() once all nodes are attached")]
    NotSealed,

    #[error("Graph has no nodes")]
    EmptyGraph,

    #[error("Arity mismatch for '{name}': expected {expected} inputs, got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Node {node} consumes input {input}, which does not precede it")]
    InvalidOrdering { node: usize, input: usize },

    #[error("Unknown node index {index} (graph has {len} nodes)")]
    UnknownNode { index: usize, len: usize },

    #[error("Input index {index} out of range for operation {operation} with arity {arity}")]
    InvalidInputIndex {
        index: usize,
        arity: usize,
        operation: String,
    },

    #[error("Expected {expected} leaf values, got {actual}")]
    LeafCountMismatch { expected: usize, actual: usize },

    #[error("Leaf position {position} out of range ({count} leaves)")]
    UnknownLeaf { position: usize, count: usize },

    #[error("Forward store has no entry for node '{0}'")]
    MissingForwardValue(String),

    #[error("Backward propagation requires a scalar root, got shape {shape:?}")]
    NonScalarRoot { shape: Vec<usize> },

    #[error("Parameter '{name}' has length {actual}, expected {expected}")]
    ParameterShape {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Sample index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Lock error ({lock_type}): {reason}")]
    LockError { lock_type: String, reason: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AutodagError>;
