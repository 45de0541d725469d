//! Symbol to address resolution for the supported token set

use alloy::primitives::Address;
use std::collections::HashMap;
use crate::{
    errors::{QuoterError, QuoterResult},
    types::{NATIVE_SYMBOL, TOKENS_MAINNET, WRAPPED_NATIVE_SYMBOL},
};

#[derive(Debug, Clone)]
pub struct TokenRegistry {
    tokens: HashMap<String, Address>,
}

impl TokenRegistry {
    pub fn mainnet() -> Self {
        Self::from_entries(TOKENS_MAINNET)
    }

    pub fn from_entries(entries: &[(&str, Address)]) -> Self {
        let tokens = entries
            .iter()
            .map(|(symbol, address)| (symbol.to_uppercase(), *address))
            .collect();
        Self { tokens }
    }

    /// Upper-cases the symbol and maps the native asset to its wrapped token,
    /// since pairs only ever hold the wrapped representation.
    pub fn canonical_symbol(symbol: &str) -> String {
        let upper = symbol.trim().to_uppercase();
        if upper == NATIVE_SYMBOL {
            WRAPPED_NATIVE_SYMBOL.to_string()
        } else {
            upper
        }
    }

    pub fn resolve(&self, symbol: &str) -> QuoterResult<Address> {
        self.tokens
            .get(&Self::canonical_symbol(symbol))
            .copied()
            .ok_or_else(|| QuoterError::UnknownToken {
                symbol: symbol.to_string(),
            })
    }

    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.tokens.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::mainnet()
    }
}
