//! Core data types and structures

pub mod addresses;
pub mod pools;
pub mod analytics;
pub mod quotes;

pub use addresses::*;
pub use pools::*;
pub use analytics::*;
pub use quotes::*;
