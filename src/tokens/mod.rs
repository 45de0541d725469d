//! Token registry

pub mod registry;

pub use registry::*;
