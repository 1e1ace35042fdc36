//! App module - contains the main application state and logic

mod session;
mod txs;

use crate::settings::Settings;
use crate::theme;
use crate::types::ChainState;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    /// View state shared with background chain tasks
    pub(crate) chain: Arc<Mutex<ChainState>>,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Connect form
    pub(crate) rpc_url: String,
    pub(crate) private_key: String,
    // Mint form (raw text; parsed on use)
    pub(crate) mint_amount: String,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Blocking alert (withdraw revert reason)
    pub(crate) alert_message: Option<String>,
    // Window bookkeeping
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        Self {
            chain: Arc::new(Mutex::new(ChainState::default())),
            runtime: tokio::runtime::Runtime::new().unwrap(),
            rpc_url: settings.rpc_url_or_default(),
            private_key: String::new(),
            mint_amount: String::new(),
            toast_message: None,
            toast_start: None,
            alert_message: None,
            logo_texture: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            rpc_url: Some(self.rpc_url.clone()),
        };
        settings.save(&self.data_dir);
    }

    /// Mint amount as typed, zero when empty or unparseable.
    pub fn mint_amount_value(&self) -> u64 {
        crate::utils::parse_token_amount(&self.mint_amount)
    }

    /// Pull one-shot notices published by background tasks into the UI fields
    /// that drive the toast and the blocking alert.
    pub fn drain_notices(&mut self) {
        let mut state = self.chain.lock().unwrap();
        if let Some(msg) = state.toast.take() {
            self.toast_message = Some(msg);
            self.toast_start = Some(std::time::Instant::now());
        }
        if let Some(msg) = state.alert.take() {
            self.alert_message = Some(msg);
        }
    }
}
