//! Mainnet token and factory addresses

use alloy::primitives::{Address, address};

// Well-known ERC-20 tokens
pub const WETH_MAINNET: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
pub const USDC_MAINNET: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
pub const USDT_MAINNET: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
pub const DAI_MAINNET: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
pub const WBTC_MAINNET: Address = address!("2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599");
pub const UNI_MAINNET: Address = address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984");

pub const NATIVE_SYMBOL: &str = "ETH";
pub const WRAPPED_NATIVE_SYMBOL: &str = "WETH";

pub const TOKENS_MAINNET: &[(&str, Address)] = &[
    ("WETH", WETH_MAINNET),
    ("USDC", USDC_MAINNET),
    ("USDT", USDT_MAINNET),
    ("DAI", DAI_MAINNET),
    ("WBTC", WBTC_MAINNET),
    ("UNI", UNI_MAINNET),
];

// Constant-product factories, in the order venues are enumerated
pub const FACTORIES_MAINNET: &[(&str, Address)] = &[
    ("UniswapV2", address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f")),
    ("Sushiswap", address!("C0AEe478e3658e2610c5F7A4A2E1777cE9e4f2Ac")),
];
