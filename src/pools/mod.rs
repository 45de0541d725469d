//! Pool discovery, reserves and liquidity checks

pub mod info;
pub mod reserves;
pub mod factory;
pub mod cache;
pub mod reader;
pub mod client;
pub mod liquidity;

pub use cache::*;
pub use client::*;
pub use reader::*;
pub use liquidity::*;
