pub mod average;
pub mod norm_square;

pub use average::AverageOp;
pub use norm_square::NormSquareOp;
