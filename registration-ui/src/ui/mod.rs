// Each step renders from an immutable `WizardState` and reports user intent
// as `RegistrationAction`s; the app dispatches them to the manager. No view
// talks to the registration service directly.

pub mod aadhaar_step;
pub mod biometric_step;
pub mod complete_step;
pub mod notice;
pub mod otp_modal;
pub mod otp_step;

use eframe::egui;

pub(crate) const ACCENT: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
pub(crate) const SUCCESS: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);
pub(crate) const DANGER: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

/// Primary call-to-action button, disabled while `enabled` is false.
pub(crate) fn primary_button(ui: &mut egui::Ui, enabled: bool, label: &str) -> bool {
    ui.add_enabled(
        enabled,
        egui::Button::new(egui::RichText::new(label).strong().color(egui::Color32::WHITE))
            .fill(ACCENT)
            .min_size(egui::vec2(200.0, 32.0)),
    )
    .clicked()
}

/// True when Enter was pressed while `response` had focus.
pub(crate) fn submitted_with_enter(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}
