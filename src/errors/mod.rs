//! Error taxonomy for quoting and estimation

pub mod quoter_error;

pub use quoter_error::*;
