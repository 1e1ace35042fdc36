//! Common types and view state

use crate::chain::Session;
use alloy::primitives::U256;
use std::sync::Arc;

/// Write transaction currently in flight
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Mint,
    Claim,
    Withdraw,
}

impl TxKind {
    pub fn label(&self) -> &'static str {
        match self {
            TxKind::Mint => "mint",
            TxKind::Claim => "claim",
            TxKind::Withdraw => "withdraw",
        }
    }
}

/// View state shared between the UI thread and background chain tasks.
/// Every value is recomputed from the chain on demand; a failed read resets
/// its value to the zero default rather than leaving a stale one.
pub struct ChainState {
    pub session: Option<Arc<Session>>,
    pub connecting: bool,
    pub connect_error: Option<String>,
    /// Count of owned NFTs not yet claimed against
    pub claimable: u64,
    /// Token balance of the connected address, wei (18 decimals)
    pub balance: U256,
    /// Total minted supply, wei (18 decimals)
    pub minted: U256,
    pub is_owner: bool,
    pub pending_tx: Option<TxKind>,
    /// Success notice, drained by the UI each frame
    pub toast: Option<String>,
    /// Blocking notice (withdraw revert reason), drained by the UI each frame
    pub alert: Option<String>,
}

impl Default for ChainState {
    fn default() -> Self {
        Self {
            session: None,
            connecting: false,
            connect_error: None,
            claimable: 0,
            balance: U256::ZERO,
            minted: U256::ZERO,
            is_owner: false,
            pending_tx: None,
            toast: None,
            alert: None,
        }
    }
}

impl ChainState {
    pub fn connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn busy(&self) -> bool {
        self.connecting || self.pending_tx.is_some()
    }

    /// Zero out all derived view values.
    pub fn reset_views(&mut self) {
        self.claimable = 0;
        self.balance = U256::ZERO;
        self.minted = U256::ZERO;
        self.is_owner = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_views_returns_zero_defaults() {
        let mut state = ChainState {
            claimable: 4,
            balance: U256::from(7u64),
            minted: U256::from(9u64),
            is_owner: true,
            ..ChainState::default()
        };
        state.reset_views();
        assert_eq!(state.claimable, 0);
        assert_eq!(state.balance, U256::ZERO);
        assert_eq!(state.minted, U256::ZERO);
        assert!(!state.is_owner);
    }

    #[test]
    fn busy_while_connecting_or_tx_pending() {
        let mut state = ChainState::default();
        assert!(!state.busy());
        state.connecting = true;
        assert!(state.busy());
        state.connecting = false;
        state.pending_tx = Some(TxKind::Claim);
        assert!(state.busy());
    }
}
