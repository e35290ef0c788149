use eframe::egui;
use registration::{Notice, NoticeKind, RegistrationAction};

/// Blocking notification; the step view behind it is disabled until the
/// user dismisses it.
pub fn show(ctx: &egui::Context, notice: &Notice, actions: &mut Vec<RegistrationAction>) {
    let title = match notice.kind {
        NoticeKind::Rejected => "Registration declined",
        NoticeKind::Connection => "Connection problem",
        NoticeKind::InvalidOtp => "Verification failed",
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.colored_label(super::DANGER, &notice.message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    actions.push(RegistrationAction::DismissNotice);
                }
            });
        });
}
