//! On-chain [`AssetLedger`](crate::engine::AssetLedger) implementations.

pub mod native;
pub mod token;

pub use native::*;
pub use token::*;
