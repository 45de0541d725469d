//! Error types for quoting and estimation

use alloy::primitives::Address;
use std::time::Duration;
use thiserror::Error;

/// Domain errors raised by the integer AMM math
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("input amount must be positive")]
    ZeroInput,

    #[error("invalid reserve {side}: must be positive")]
    ZeroReserve { side: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid fee {numerator}/{denominator}: numerator must be in 1..=denominator")]
    InvalidFee { numerator: u32, denominator: u32 },
}

/// Coarse classification used by callers to decide how to report a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Collaborator,
    Domain,
    Cancelled,
}

#[derive(Error, Debug)]
pub enum QuoterError {
    #[error("Invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("Unknown token symbol: {symbol}")]
    UnknownToken { symbol: String },

    #[error("Invalid address {input:?}")]
    InvalidAddress { input: String },

    #[error("Source and destination resolve to the same token {token}")]
    IdenticalTokens { token: Address },

    #[error("Unknown venue: {venue}")]
    UnknownVenue { venue: String },

    #[error("Token {token} not found in pool {pool}")]
    TokenNotInPool { pool: Address, token: Address },

    #[error("No pools found for pair {from}/{to}")]
    NoLiquidity { from: String, to: String },

    #[error("Failed to get quotes from any of {pools_checked} pools for {from}/{to}")]
    NoQuotesAvailable {
        from: String,
        to: String,
        pools_checked: usize,
    },

    #[error("AMM calculation failed: {0}")]
    Math(#[from] MathError),

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        retry_count: u32,
    },

    #[error("Contract interaction failed: {contract} - {message}")]
    Contract {
        contract: Address,
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Data parsing error: {context}")]
    DataParsing {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Request deadline exceeded after {elapsed:?}")]
    DeadlineExceeded { elapsed: Duration },
}

pub type QuoterResult<T> = Result<T, QuoterError>;

impl QuoterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuoterError::InvalidAmount { .. }
            | QuoterError::UnknownToken { .. }
            | QuoterError::InvalidAddress { .. }
            | QuoterError::IdenticalTokens { .. }
            | QuoterError::UnknownVenue { .. } => ErrorKind::Validation,
            QuoterError::TokenNotInPool { .. }
            | QuoterError::NoLiquidity { .. }
            | QuoterError::NoQuotesAvailable { .. } => ErrorKind::NotFound,
            QuoterError::Network { .. }
            | QuoterError::Contract { .. }
            | QuoterError::DataParsing { .. } => ErrorKind::Collaborator,
            QuoterError::Math(_) => ErrorKind::Domain,
            QuoterError::Cancelled | QuoterError::DeadlineExceeded { .. } => ErrorKind::Cancelled,
        }
    }

    pub fn invalid_amount(input: &str, reason: impl Into<String>) -> Self {
        QuoterError::InvalidAmount {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn data_parsing(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        QuoterError::DataParsing {
            context: context.into(),
            source: source.into(),
        }
    }
}
