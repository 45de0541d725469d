//! DEX Quoter - constant-product quote aggregation for Ethereum mainnet
//!
//! Resolves a token pair, discovers its pools across the known Uniswap V2
//! style venues, prices the input against live on-chain reserves with exact
//! integer math, and reports the best output alongside every other quote.

pub mod config;
pub mod types;
pub mod errors;
pub mod amm;
pub mod tokens;
pub mod network;
pub mod pools;
pub mod analytics;
pub mod quoting;
pub mod utils;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{ErrorKind, MathError, QuoterError, QuoterResult};
pub use quoting::{PoolEstimator, QuoteAggregator};
pub use types::*;

// Type alias for our concrete provider
pub type ConcreteProvider = alloy::providers::RootProvider<alloy::transports::BoxTransport>;
