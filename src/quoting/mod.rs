//! Quote estimation and aggregation

pub mod estimator;
pub mod aggregator;

pub use estimator::*;
pub use aggregator::*;
