#![windows_subsystem = "windows"]
//! Crypto Devs ICO - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod chain;
mod constants;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use ui::components;
use utils::{format_token_amount, rasterize_logo, rasterize_logo_square, short_address};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "crypto-devs-ico.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,crypto_devs_ico=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Crypto Devs ICO");

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, network = NETWORK_NAME, "Crypto Devs ICO starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(520.0, 680.0)))
        .with_min_inner_size([460.0, 580.0])
        .with_title("Crypto Devs ICO");

    // Set window/taskbar icon from the rasterized logo
    {
        let (rgba, w, h) = rasterize_logo_square(64);
        let icon = egui::IconData { rgba, width: w, height: h };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Crypto Devs ICO",
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

/// Per-frame copy of the shared view state, taken under one lock.
struct Snapshot {
    connected: bool,
    connecting: bool,
    connect_error: Option<String>,
    address: Option<alloy::primitives::Address>,
    claimable: u64,
    balance: alloy::primitives::U256,
    minted: alloy::primitives::U256,
    is_owner: bool,
    busy: bool,
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Pull notices published by background tasks
        self.drain_notices();

        let snapshot = {
            let state = self.chain.lock().unwrap();
            Snapshot {
                connected: state.connected(),
                connecting: state.connecting,
                connect_error: state.connect_error.clone(),
                address: state.session.as_ref().map(|s| s.address),
                claimable: state.claimable,
                balance: state.balance,
                minted: state.minted,
                is_owner: state.is_owner,
                busy: state.busy(),
            }
        };

        self.render_alert_modal(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(24)),
            )
            .show(ctx, |ui| {
                if snapshot.connected {
                    self.render_dashboard(ui, ctx, &snapshot);
                } else {
                    self.render_connect(ui, ctx, &snapshot);
                }
            });

        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_settings();
    }
}

impl App {
    fn logo(&mut self, ctx: &egui::Context, width: f32) -> egui::load::SizedTexture {
        let texture = self.logo_texture.get_or_insert_with(|| {
            let (pixels, w, h) = rasterize_logo(width as u32 * 2);
            ctx.load_texture(
                "logo",
                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                egui::TextureOptions::LINEAR,
            )
        });
        let aspect = texture.size()[1] as f32 / texture.size()[0] as f32;
        egui::load::SizedTexture::new(texture.id(), egui::vec2(width, width * aspect))
    }

    // ------------------------------------------------------------------
    // Disconnected view: logo + connect form
    // ------------------------------------------------------------------
    fn render_connect(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, snapshot: &Snapshot) {
        let mut connect_clicked = false;

        ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
            ui.add_space(48.0);
            let logo = self.logo(ctx, 96.0);
            ui.image(logo);
            ui.add_space(12.0);

            ui.add(
                egui::Label::new(
                    egui::RichText::new("WELCOME TO CRYPTO DEVS ICO")
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );
            ui.add(
                egui::Label::new(
                    egui::RichText::new("You can claim or mint Crypto Dev tokens here")
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                )
                .selectable(false),
            );
            ui.add_space(24.0);

            let form_width = ui.available_width().min(360.0);
            ui.allocate_ui_with_layout(
                egui::vec2(form_width, 0.0),
                egui::Layout::top_down(egui::Align::Min),
                |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(format!("RPC ENDPOINT ({})", NETWORK_NAME.to_uppercase()))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                theme::input_frame().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.rpc_url)
                            .hint_text(DEFAULT_RPC_URL)
                            .frame(false)
                            .desired_width(ui.available_width()),
                    );
                });
                ui.add_space(theme::SPACING_MD);

                ui.add(
                    egui::Label::new(
                        egui::RichText::new("PRIVATE KEY")
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                theme::input_frame().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.private_key)
                            .hint_text("0x…")
                            .password(true)
                            .frame(false)
                            .desired_width(ui.available_width()),
                    );
                });
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Held in memory for this session only")
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );

                if let Some(error) = &snapshot.connect_error {
                    ui.add_space(theme::SPACING_SM);
                    components::error_line(ui, error);
                }

                ui.add_space(theme::SPACING_XL);
                let can_connect = !self.private_key.trim().is_empty()
                    && !self.rpc_url.trim().is_empty();
                if components::action_button(
                    ui,
                    "Connect your wallet",
                    can_connect,
                    snapshot.connecting,
                ) {
                    connect_clicked = true;
                }
            });
        });

        if connect_clicked {
            self.connect_wallet(ctx);
        }
    }

    // ------------------------------------------------------------------
    // Connected view: stats, claim/mint, owner withdraw
    // ------------------------------------------------------------------
    fn render_dashboard(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, snapshot: &Snapshot) {
        let mut refresh_clicked = false;
        let mut claim_clicked = false;
        let mut mint_clicked = false;
        let mut withdraw_clicked = false;

        // Header: logo + title, address chip on the right
        ui.horizontal(|ui| {
            let logo = self.logo(ctx, 28.0);
            ui.image(logo);
            ui.add(
                egui::Label::new(
                    egui::RichText::new("CRYPTO DEVS ICO")
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(address) = &snapshot.address {
                    components::address_chip(ui, &short_address(address), &address.to_string());
                }
            });
        });
        ui.add_space(theme::SPACING_XL);

        // Balances card
        theme::card_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("TOKENS")
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let refresh = ui.add_enabled(
                        !snapshot.busy,
                        egui::Button::new(
                            egui::RichText::new(egui_phosphor::regular::ARROWS_CLOCKWISE)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_MUTED),
                        )
                        .frame(false),
                    );
                    if refresh.on_hover_text("Refresh").clicked() {
                        refresh_clicked = true;
                    }
                });
            });
            ui.add_space(theme::SPACING_SM);
            components::stat_row(
                ui,
                "You have minted",
                &format!("{} Crypto Dev Tokens", format_token_amount(snapshot.balance)),
            );
            components::stat_row(
                ui,
                "Overall minted",
                &format!(
                    "{} / {}",
                    format_token_amount(snapshot.minted),
                    MAX_SUPPLY_TOKENS
                ),
            );
        });
        ui.add_space(theme::SPACING_LG);

        // Claim when eligible, otherwise mint
        theme::card_frame().show(ui, |ui| {
            if snapshot.claimable > 0 {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(format!(
                            "{} Tokens can be claimed!",
                            snapshot.claimable * TOKENS_PER_NFT
                        ))
                        .size(theme::FONT_BODY)
                        .color(theme::ACCENT_LIGHT),
                    )
                    .selectable(false),
                );
                ui.add_space(theme::SPACING_MD);
                if components::action_button(ui, "Claim Tokens", true, snapshot.busy) {
                    claim_clicked = true;
                }
            } else {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("MINT")
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                ui.add_space(theme::SPACING_SM);
                theme::input_frame().show(ui, |ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.mint_amount)
                            .hint_text("Amount of Tokens")
                            .frame(false)
                            .desired_width(ui.available_width()),
                    );
                    if response.changed() {
                        self.mint_amount.retain(|c| c.is_ascii_digit());
                    }
                });
                let amount = self.mint_amount_value();
                if amount > 0 {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!(
                                "Costs {} ETH",
                                format_token_amount(chain::mint_cost(amount))
                            ))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                }
                ui.add_space(theme::SPACING_MD);
                if components::action_button(ui, "Mint Tokens", amount > 0, snapshot.busy) {
                    mint_clicked = true;
                }
            }
        });

        // Owner-only withdraw; authorization is enforced on-chain
        if snapshot.is_owner {
            ui.add_space(theme::SPACING_LG);
            theme::card_frame().show(ui, |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("OWNER")
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                ui.add_space(theme::SPACING_MD);
                if snapshot.busy {
                    ui.add(theme::button_disabled("Loading..."));
                } else if ui.add(theme::button_danger("Withdraw Coins")).clicked() {
                    withdraw_clicked = true;
                }
            });
        }

        if refresh_clicked {
            self.refresh_all(ctx);
        }
        if claim_clicked {
            self.claim_tokens(ctx);
        }
        if mint_clicked {
            self.mint_tokens(ctx);
        }
        if withdraw_clicked {
            self.withdraw_coins(ctx);
        }
    }

    // ------------------------------------------------------------------
    // Overlays
    // ------------------------------------------------------------------

    /// Blocking alert carrying the withdraw revert reason.
    fn render_alert_modal(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert_message.clone() else {
            return;
        };
        let modal = egui::Modal::new(egui::Id::new("withdraw_alert"))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_max_width(360.0);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Withdrawal failed")
                            .size(theme::FONT_TITLE)
                            .strong()
                            .color(theme::STATUS_ERROR),
                    )
                    .selectable(false),
                );
                ui.add_space(theme::SPACING_MD);
                ui.label(
                    egui::RichText::new(message)
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_MUTED),
                );
                ui.add_space(theme::SPACING_LG);
                if ui.add(theme::button_accent("OK")).clicked() {
                    self.alert_message = None;
                }
            });
        if modal.should_close() {
            self.alert_message = None;
        }
    }

    fn render_toast(&mut self, ctx: &egui::Context) {
        let Some(message) = self.toast_message.clone() else {
            return;
        };
        let expired = self
            .toast_start
            .is_some_and(|t| t.elapsed() > std::time::Duration::from_secs(4));
        if expired {
            self.toast_message = None;
            self.toast_start = None;
            return;
        }

        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                theme::card_frame().show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(egui_phosphor::regular::CHECK_CIRCLE)
                                    .size(theme::FONT_BODY)
                                    .color(theme::STATUS_SUCCESS),
                            )
                            .selectable(false),
                        );
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(message)
                                    .size(theme::FONT_LABEL)
                                    .color(theme::TEXT_SECONDARY),
                            )
                            .selectable(false),
                        );
                    });
                });
            });
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
