pub mod dripper;
pub mod token_release;

pub use dripper::*;
pub use token_release::*;
