//! Pool reserves fetching

use alloy::{
    eips::BlockId,
    primitives::{Address, keccak256, U256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
    sol_types::SolValue,
};
use anyhow::{Context, Result};

/// Raw `getReserves()` values as of `block`; the trailing timestamp word is dropped.
pub async fn get_pool_reserves_at(provider: &dyn Provider, pool: Address, block: u64) -> Result<(U256, U256)> {
    let data = keccak256("getReserves()")[..4].to_vec();
    let tx = TransactionRequest::default()
        .to(pool)
        .input(data.into());

    let result = provider.call(&tx).block(BlockId::number(block)).await
        .with_context(|| format!("Failed to call getReserves at block {}", block))?;
    let decoded = <(U256, U256, U256)>::abi_decode(&result, true)
        .context("Failed to decode reserves")?;
    Ok((decoded.0, decoded.1))
}
