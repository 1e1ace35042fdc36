//! Write transaction logic (mint, claim, withdraw)

use super::session::{refresh_owner, refresh_views};
use super::App;
use crate::chain::{self, ChainError};
use crate::types::TxKind;
use eframe::egui;
use tracing::{error, info};

impl App {
    /// Mint `amount` tokens. The button is disabled for a zero amount, and the
    /// guard here keeps a zero from ever reaching the network.
    pub fn mint_tokens(&mut self, ctx: &egui::Context) {
        let amount = self.mint_amount_value();
        if amount == 0 {
            return;
        }
        self.submit_tx(ctx, TxKind::Mint, amount);
    }

    pub fn claim_tokens(&mut self, ctx: &egui::Context) {
        self.submit_tx(ctx, TxKind::Claim, 0);
    }

    /// Owner-only by convention; the UI gates the button but authorization is
    /// enforced on-chain, and a revert reason is surfaced to the user.
    pub fn withdraw_coins(&mut self, ctx: &egui::Context) {
        self.submit_tx(ctx, TxKind::Withdraw, 0);
    }

    fn submit_tx(&mut self, ctx: &egui::Context, kind: TxKind, amount: u64) {
        let session = {
            let mut state = self.chain.lock().unwrap();
            if state.pending_tx.is_some() {
                return;
            }
            let Some(session) = state.session.clone() else {
                return;
            };
            state.pending_tx = Some(kind);
            session
        };

        info!(tx = kind.label(), amount, "Submitting transaction");
        let chain_state = self.chain.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = match kind {
                TxKind::Mint => chain::mint(&session, amount).await,
                TxKind::Claim => chain::claim(&session).await,
                TxKind::Withdraw => chain::withdraw(&session).await,
            };

            match result {
                Ok(()) => {
                    info!(tx = kind.label(), "Transaction confirmed");
                    {
                        let mut state = chain_state.lock().unwrap();
                        state.pending_tx = None;
                        state.toast = Some(match kind {
                            TxKind::Mint => "Successfully minted Crypto Dev Tokens".into(),
                            TxKind::Claim => "Successfully claimed Crypto Dev Tokens".into(),
                            TxKind::Withdraw => "Withdrawal complete".into(),
                        });
                    }
                    ctx.request_repaint();
                    match kind {
                        TxKind::Mint | TxKind::Claim => {
                            refresh_views(chain_state, session, ctx).await;
                        }
                        TxKind::Withdraw => {
                            refresh_owner(&chain_state, &session, &ctx).await;
                        }
                    }
                }
                Err(e) => {
                    error!(tx = kind.label(), error = %e, "Transaction failed");
                    let mut state = chain_state.lock().unwrap();
                    state.pending_tx = None;
                    if kind == TxKind::Withdraw {
                        let reason = match e {
                            ChainError::Reverted(reason) => reason,
                            other => other.to_string(),
                        };
                        state.alert = Some(reason);
                    }
                    drop(state);
                    ctx.request_repaint();
                }
            }
        });
    }
}
