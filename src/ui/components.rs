//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use eframe::egui;

/// Render a dim label / emphasized value pair across the row.
pub fn stat_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.add(
            egui::Label::new(
                egui::RichText::new(label)
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_DIM),
            )
            .selectable(false),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(value)
                        .size(theme::FONT_BODY)
                        .strong()
                        .color(theme::TEXT_SECONDARY),
                )
                .selectable(false),
            );
        });
    });
}

/// Shortened address chip; clicking copies the full address.
pub fn address_chip(ui: &mut egui::Ui, short: &str, full: &str) {
    let response = ui.add(
        egui::Button::new(
            egui::RichText::new(format!("{}  {}", egui_phosphor::regular::WALLET, short))
                .size(theme::FONT_LABEL)
                .monospace()
                .color(theme::ACCENT_LIGHT),
        )
        .fill(theme::BG_ELEVATED)
        .corner_radius(theme::RADIUS_DEFAULT),
    );
    if response.clicked() {
        ui.ctx().copy_text(full.to_string());
    }
    response.on_hover_text("Copy address");
}

/// Primary action button that collapses into a loading state while a
/// transaction is pending. Returns true when clicked.
pub fn action_button(ui: &mut egui::Ui, text: &str, enabled: bool, busy: bool) -> bool {
    if busy {
        ui.horizontal(|ui| {
            ui.add(egui::Spinner::new().size(14.0).color(theme::ACCENT));
            ui.add(theme::button_disabled("Loading..."));
        });
        return false;
    }
    if !enabled {
        ui.add(theme::button_disabled(text));
        return false;
    }
    ui.add(theme::button_accent(text)).clicked()
}

/// Red-tinted error line under a form field.
pub fn error_line(ui: &mut egui::Ui, message: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(message)
                .size(theme::FONT_SMALL)
                .color(theme::STATUS_ERROR),
        )
        .wrap(),
    );
}
