// Elementwise operators
pub mod add;
pub mod bias;
pub mod const_mult;
pub mod mult;
pub mod squared_difference;
pub mod sub;
pub mod sum;

pub use add::AddOp;
pub use bias::BiasOp;
pub use const_mult::ConstMultOp;
pub use mult::MultOp;
pub use squared_difference::SquaredDifferenceOp;
pub use sub::SubtractOp;
pub use sum::SumOp;
