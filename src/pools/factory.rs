//! Pair discovery through factory contracts

use alloy::{
    primitives::{Address, keccak256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
    sol_types::SolValue,
};
use anyhow::{Context, Result};

/// Orders a pair the way factories key it (token0 < token1)
pub fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

pub fn encode_get_pair(token_a: Address, token_b: Address) -> Vec<u8> {
    let (token0, token1) = sort_tokens(token_a, token_b);
    let mut data = keccak256("getPair(address,address)")[..4].to_vec();
    data.extend_from_slice(&(token0, token1).abi_encode_params());
    data
}

/// `Ok(None)` when the factory has no pair for these tokens.
pub async fn get_pair(
    provider: &dyn Provider,
    factory: Address,
    token_a: Address,
    token_b: Address,
) -> Result<Option<Address>> {
    let tx = TransactionRequest::default()
        .to(factory)
        .input(encode_get_pair(token_a, token_b).into());

    let result = provider.call(&tx).await
        .context("Failed to call getPair")?;
    let pair = Address::abi_decode(&result, true)
        .context("Failed to decode pair address")?;

    Ok((pair != Address::ZERO).then_some(pair))
}
