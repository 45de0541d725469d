//! Network providers, retries and request context

pub mod providers;
pub mod retry;
pub mod context;

pub use providers::*;
pub use retry::*;
pub use context::*;
