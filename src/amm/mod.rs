//! Integer AMM math: arithmetic helpers, pricing and decimal normalization

pub mod arithmetic;
pub mod pricing;
pub mod decimals;

pub use arithmetic::*;
pub use pricing::*;
pub use decimals::*;
