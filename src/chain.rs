//! On-chain service layer for the Crypto Devs ICO
//! Wraps the NFT and token contracts behind a wallet-backed JSON-RPC session

use crate::constants::{NFT_CONTRACT_ADDRESS, REQUIRED_CHAIN_ID, TOKEN_CONTRACT_ADDRESS, TOKEN_PRICE_WEI};
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::sol_types::decode_revert_reason;
use std::fmt;
use tracing::debug;

sol! {
    #[sol(rpc)]
    contract CryptoDevsNFT {
        function balanceOf(address owner) external view returns (uint256);
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
    }

    #[sol(rpc)]
    contract CryptoDevToken {
        function tokenIdsClaimed(uint256 tokenId) external view returns (bool);
        function balanceOf(address account) external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function owner() external view returns (address);
        function mint(uint256 amount) external payable;
        function claim() external;
        function withdraw() external;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Connected node is not on the required test network.
    WrongNetwork { actual: u64 },
    /// Private key could not be parsed into a signer.
    InvalidKey(String),
    /// Transport / RPC level failure.
    Rpc(String),
    /// On-chain revert, carrying the human-readable reason when one was returned.
    Reverted(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::WrongNetwork { actual } => write!(
                f,
                "Wrong network (chain id {actual}) - switch to {}",
                crate::constants::NETWORK_NAME
            ),
            ChainError::InvalidKey(e) => write!(f, "Invalid private key: {e}"),
            ChainError::Rpc(e) => write!(f, "RPC error: {e}"),
            ChainError::Reverted(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for ChainError {}

/// Map a contract call error, pulling out the revert reason when the node
/// returned one in the error payload.
fn contract_err(err: alloy::contract::Error) -> ChainError {
    if let alloy::contract::Error::TransportError(rpc_err) = &err {
        if let Some(payload) = rpc_err.as_error_resp() {
            if let Some(data) = payload.as_revert_data() {
                if let Some(reason) = decode_revert_reason(&data) {
                    return ChainError::Reverted(reason);
                }
            }
            return ChainError::Reverted(payload.message.to_string());
        }
    }
    ChainError::Rpc(err.to_string())
}

/// Reject any chain id other than the one the contracts live on.
pub fn ensure_chain(chain_id: u64) -> Result<(), ChainError> {
    if chain_id != REQUIRED_CHAIN_ID {
        return Err(ChainError::WrongNetwork { actual: chain_id });
    }
    Ok(())
}

/// Cost in wei of minting `amount` tokens.
pub fn mint_cost(amount: u64) -> U256 {
    U256::from(TOKEN_PRICE_WEI) * U256::from(amount)
}

/// Count of owned NFTs whose claim flag is still unset.
pub fn unclaimed_count<I: IntoIterator<Item = bool>>(claimed: I) -> u64 {
    claimed.into_iter().filter(|c| !c).count() as u64
}

/// Wallet session: signer-backed provider plus the connected address.
/// Created once per connection and shared for the process lifetime.
pub struct Session {
    pub provider: DynProvider,
    pub address: Address,
    pub chain_id: u64,
}

impl Session {
    /// Build a signer-backed provider against the given endpoint and verify
    /// the node is on the required network before any contract call.
    pub async fn connect(rpc_url: &str, private_key: &str) -> Result<Self, ChainError> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e: alloy::signers::local::LocalSignerError| {
                ChainError::InvalidKey(e.to_string())
            })?;
        let address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(rpc_url.trim())
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?
            .erased();

        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;
        ensure_chain(chain_id)?;

        Ok(Self {
            provider,
            address,
            chain_id,
        })
    }
}

/// Number of owned NFT ids not yet marked claimed on the token contract.
pub async fn tokens_to_be_claimed(session: &Session) -> Result<u64, ChainError> {
    let nft = CryptoDevsNFT::new(NFT_CONTRACT_ADDRESS, &session.provider);
    let token = CryptoDevToken::new(TOKEN_CONTRACT_ADDRESS, &session.provider);

    let balance = nft
        .balanceOf(session.address)
        .call()
        .await
        .map_err(contract_err)?;
    let owned = u64::try_from(balance)
        .map_err(|_| ChainError::Rpc("NFT balance out of range".into()))?;
    if owned == 0 {
        return Ok(0);
    }

    let mut flags = Vec::with_capacity(owned as usize);
    for index in 0..owned {
        let token_id = nft
            .tokenOfOwnerByIndex(session.address, U256::from(index))
            .call()
            .await
            .map_err(contract_err)?;
        let claimed = token
            .tokenIdsClaimed(token_id)
            .call()
            .await
            .map_err(contract_err)?;
        flags.push(claimed);
    }
    debug!(owned, "Enumerated NFT claim flags");
    Ok(unclaimed_count(flags))
}

/// Token balance of the connected address, in wei (18 decimals).
pub async fn token_balance(session: &Session) -> Result<U256, ChainError> {
    CryptoDevToken::new(TOKEN_CONTRACT_ADDRESS, &session.provider)
        .balanceOf(session.address)
        .call()
        .await
        .map_err(contract_err)
}

/// Total minted supply, in wei (18 decimals).
pub async fn total_minted(session: &Session) -> Result<U256, ChainError> {
    CryptoDevToken::new(TOKEN_CONTRACT_ADDRESS, &session.provider)
        .totalSupply()
        .call()
        .await
        .map_err(contract_err)
}

/// Whether the connected address is the token contract owner.
/// Both sides are parsed addresses, so the comparison ignores hex casing.
pub async fn is_owner(session: &Session) -> Result<bool, ChainError> {
    let owner = CryptoDevToken::new(TOKEN_CONTRACT_ADDRESS, &session.provider)
        .owner()
        .call()
        .await
        .map_err(contract_err)?;
    Ok(owner == session.address)
}

/// Mint `amount` tokens, paying `amount` x unit price, and wait for the receipt.
pub async fn mint(session: &Session, amount: u64) -> Result<(), ChainError> {
    let token = CryptoDevToken::new(TOKEN_CONTRACT_ADDRESS, &session.provider);
    let receipt = token
        .mint(U256::from(amount))
        .value(mint_cost(amount))
        .send()
        .await
        .map_err(contract_err)?
        .get_receipt()
        .await
        .map_err(|e| ChainError::Rpc(e.to_string()))?;
    if !receipt.status() {
        return Err(ChainError::Reverted("Mint transaction reverted".into()));
    }
    Ok(())
}

/// Claim all eligible tokens (zero-value transaction) and wait for the receipt.
pub async fn claim(session: &Session) -> Result<(), ChainError> {
    let token = CryptoDevToken::new(TOKEN_CONTRACT_ADDRESS, &session.provider);
    let receipt = token
        .claim()
        .send()
        .await
        .map_err(contract_err)?
        .get_receipt()
        .await
        .map_err(|e| ChainError::Rpc(e.to_string()))?;
    if !receipt.status() {
        return Err(ChainError::Reverted("Claim transaction reverted".into()));
    }
    Ok(())
}

/// Withdraw contract funds. Authorization is enforced on-chain; a revert
/// carries the contract's reason string back to the caller.
pub async fn withdraw(session: &Session) -> Result<(), ChainError> {
    let token = CryptoDevToken::new(TOKEN_CONTRACT_ADDRESS, &session.provider);
    let receipt = token
        .withdraw()
        .send()
        .await
        .map_err(contract_err)?
        .get_receipt()
        .await
        .map_err(|e| ChainError::Rpc(e.to_string()))?;
    if !receipt.status() {
        return Err(ChainError::Reverted("Withdraw transaction reverted".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_chain_accepts_goerli_only() {
        assert!(ensure_chain(REQUIRED_CHAIN_ID).is_ok());
        assert_eq!(
            ensure_chain(1),
            Err(ChainError::WrongNetwork { actual: 1 })
        );
        assert_eq!(
            ensure_chain(11155111),
            Err(ChainError::WrongNetwork { actual: 11155111 })
        );
    }

    #[test]
    fn wrong_network_message_names_the_network() {
        let msg = ChainError::WrongNetwork { actual: 1 }.to_string();
        assert!(msg.contains("Goerli"));
    }

    #[test]
    fn mint_cost_is_amount_times_unit_price() {
        assert_eq!(mint_cost(0), U256::ZERO);
        assert_eq!(mint_cost(1), U256::from(TOKEN_PRICE_WEI));
        assert_eq!(mint_cost(3), U256::from(3u64) * U256::from(TOKEN_PRICE_WEI));
    }

    #[test]
    fn unclaimed_count_zero_when_all_claimed() {
        assert_eq!(unclaimed_count([true, true, true]), 0);
    }

    #[test]
    fn unclaimed_count_counts_only_unset_flags() {
        assert_eq!(unclaimed_count([]), 0);
        assert_eq!(unclaimed_count([false, true, false]), 2);
    }

    #[test]
    fn owner_comparison_ignores_hex_casing() {
        let lower: Address = "0x7a4e9c1d5b82f30a6de2c84b91f7a5c3e0d6b412"
            .parse()
            .unwrap();
        let upper: Address = "0x7A4E9C1D5B82F30A6DE2C84B91F7A5C3E0D6B412"
            .parse()
            .unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn revert_reason_decodes_error_string_payload() {
        // Error(string) selector followed by ABI-encoded "nope"
        let mut data = vec![0x08, 0xc3, 0x79, 0xa0];
        data.extend_from_slice(&U256::from(32).to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(4).to_be_bytes::<32>());
        let mut word = [0u8; 32];
        word[..4].copy_from_slice(b"nope");
        data.extend_from_slice(&word);

        let reason = decode_revert_reason(&data).expect("should decode");
        assert!(reason.contains("nope"), "got: {reason}");
    }
}
