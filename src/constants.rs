//! Application constants and configuration

use alloy::primitives::{address, Address};

pub const NFT_CONTRACT_ADDRESS: Address = address!("0x3c6f8f4b2f1a9e67b1e1d0c25fd3e6a84c9b7d21");
pub const TOKEN_CONTRACT_ADDRESS: Address = address!("0x7a4e9c1d5b82f30a6de2c84b91f7a5c3e0d6b412");

/// The contracts are deployed on Goerli only; connections to any other
/// network are rejected before a single contract call is made.
pub const REQUIRED_CHAIN_ID: u64 = 5;
pub const NETWORK_NAME: &str = "Goerli";

/// Price of one Crypto Dev token in wei (0.001 ether).
pub const TOKEN_PRICE_WEI: u128 = 1_000_000_000_000_000;

/// Fungible tokens released per unclaimed NFT.
pub const TOKENS_PER_NFT: u64 = 10;

/// Token max supply, for the "minted / max" display.
pub const MAX_SUPPLY_TOKENS: u64 = 10_000;

pub const DEFAULT_RPC_URL: &str = "https://rpc.ankr.com/eth_goerli";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
