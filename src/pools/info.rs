//! Pair token and ERC-20 metadata retrieval

use alloy::{
    primitives::{Address, FixedBytes, U256, keccak256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
    sol_types::SolValue,
};
use anyhow::{Context, Result};
use tracing::debug;
use crate::types::TokenInfo;

async fn call_selector(provider: &dyn Provider, to: Address, signature: &str) -> Result<alloy::primitives::Bytes> {
    let data = keccak256(signature)[..4].to_vec();
    let tx = TransactionRequest::default().to(to).input(data.into());
    provider.call(&tx).await
        .with_context(|| format!("Failed to call {} on {}", signature, to))
}

pub async fn get_pool_tokens(provider: &dyn Provider, pool: Address) -> Result<(Address, Address)> {
    debug!("Getting tokens for pool {}", pool);

    let token0 = Address::abi_decode(&call_selector(provider, pool, "token0()").await?, true)
        .context("Failed to decode token0")?;
    let token1 = Address::abi_decode(&call_selector(provider, pool, "token1()").await?, true)
        .context("Failed to decode token1")?;

    Ok((token0, token1))
}

/// Decodes `symbol()`, accepting the legacy `bytes32` return some tokens use.
fn decode_symbol(raw: &[u8]) -> Result<String> {
    if let Ok(symbol) = String::abi_decode(raw, true) {
        return Ok(symbol);
    }
    let fixed = FixedBytes::<32>::abi_decode(raw, true)
        .context("symbol() is neither string nor bytes32")?;
    let trimmed: Vec<u8> = fixed.iter().copied().take_while(|b| *b != 0).collect();
    String::from_utf8(trimmed).context("bytes32 symbol is not valid UTF-8")
}

fn decode_decimals(raw: &[u8]) -> Result<u8> {
    let value = U256::abi_decode(raw, true).context("Failed to decode decimals")?;
    if value > U256::from(u8::MAX) {
        return Err(anyhow::anyhow!("decimals value too large: {}", value));
    }
    Ok(value.to::<u8>())
}

pub async fn get_token_info(provider: &dyn Provider, token: Address) -> Result<TokenInfo> {
    debug!("Getting metadata for token {}", token);

    let (symbol_raw, decimals_raw) = tokio::try_join!(
        call_selector(provider, token, "symbol()"),
        call_selector(provider, token, "decimals()"),
    )?;

    Ok(TokenInfo {
        address: token,
        symbol: decode_symbol(&symbol_raw)?,
        decimals: decode_decimals(&decimals_raw)?,
    })
}
