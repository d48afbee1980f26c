pub mod sigmoid;

pub use sigmoid::SigmoidOp;
