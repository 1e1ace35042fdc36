//! Wallet connection and read-path refresh logic

use super::App;
use crate::chain::{self, Session};
use crate::types::ChainState;
use alloy::primitives::U256;
use eframe::egui;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

impl App {
    /// Establish the wallet session. On success the session is memoized in the
    /// shared state and all four view values are refreshed, mirroring the
    /// initial page load.
    pub fn connect_wallet(&mut self, ctx: &egui::Context) {
        {
            let mut state = self.chain.lock().unwrap();
            if state.connecting || state.connected() {
                return;
            }
            state.connecting = true;
            state.connect_error = None;
        }

        let chain_state = self.chain.clone();
        let rpc_url = self.rpc_url.clone();
        let private_key = self.private_key.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            match Session::connect(&rpc_url, &private_key).await {
                Ok(session) => {
                    let session = Arc::new(session);
                    info!(address = %session.address, chain_id = session.chain_id, "Wallet connected");
                    {
                        let mut state = chain_state.lock().unwrap();
                        state.connecting = false;
                        state.session = Some(session.clone());
                    }
                    ctx.request_repaint();
                    refresh_views(chain_state, session, ctx).await;
                }
                Err(e) => {
                    error!(error = %e, "Wallet connection failed");
                    let mut state = chain_state.lock().unwrap();
                    state.connecting = false;
                    state.connect_error = Some(e.to_string());
                    drop(state);
                    ctx.request_repaint();
                }
            }
        });
    }

    /// Manual refresh of all derived view values.
    pub fn refresh_all(&self, ctx: &egui::Context) {
        let session = match self.chain.lock().unwrap().session.clone() {
            Some(s) => s,
            None => return,
        };
        let chain_state = self.chain.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            refresh_views(chain_state, session, ctx).await;
        });
    }
}

/// Re-derive every view value from the chain. Each read is independent:
/// a failure logs, resets that value to its zero default, and the remaining
/// reads still run.
pub(super) async fn refresh_views(
    chain_state: Arc<Mutex<ChainState>>,
    session: Arc<Session>,
    ctx: egui::Context,
) {
    match chain::total_minted(&session).await {
        Ok(minted) => chain_state.lock().unwrap().minted = minted,
        Err(e) => {
            error!(error = %e, "Total supply refresh failed");
            chain_state.lock().unwrap().minted = U256::ZERO;
        }
    }
    ctx.request_repaint();

    match chain::token_balance(&session).await {
        Ok(balance) => chain_state.lock().unwrap().balance = balance,
        Err(e) => {
            error!(error = %e, "Balance refresh failed");
            chain_state.lock().unwrap().balance = U256::ZERO;
        }
    }
    ctx.request_repaint();

    match chain::tokens_to_be_claimed(&session).await {
        Ok(count) => chain_state.lock().unwrap().claimable = count,
        Err(e) => {
            error!(error = %e, "Claimable refresh failed");
            chain_state.lock().unwrap().claimable = 0;
        }
    }
    ctx.request_repaint();

    refresh_owner(&chain_state, &session, &ctx).await;
}

/// Owner flag refresh, shared with the post-withdraw path.
pub(super) async fn refresh_owner(
    chain_state: &Arc<Mutex<ChainState>>,
    session: &Arc<Session>,
    ctx: &egui::Context,
) {
    match chain::is_owner(session).await {
        Ok(owner) => chain_state.lock().unwrap().is_owner = owner,
        Err(e) => {
            error!(error = %e, "Owner refresh failed");
            chain_state.lock().unwrap().is_owner = false;
        }
    }
    ctx.request_repaint();
}
