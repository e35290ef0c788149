use eframe::egui;
use registration::highlight::{highlight_segments, Segment};
use registration::{OtpModalState, RegistrationAction};

/// OTP overlay. The close button and "Continue" both dismiss it.
pub fn show(ctx: &egui::Context, modal: &OtpModalState, actions: &mut Vec<RegistrationAction>) {
    let mut open = true;
    let mut continue_clicked = false;

    egui::Window::new("Your One-Time Passcode")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                for segment in highlight_segments(&modal.message, &modal.otp) {
                    ui.label(segment_text(segment));
                }
            });
            ui.add_space(8.0);
            ui.small("Note this passcode; you will need it on the next step.");
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                continue_clicked = ui.button("Continue").clicked();
            });
        });

    if !open || continue_clicked {
        actions.push(RegistrationAction::DismissOtpModal);
    }
}

fn segment_text(segment: Segment<'_>) -> egui::RichText {
    match segment {
        Segment::Plain(text) => egui::RichText::new(text),
        Segment::Emphasized(text) => egui::RichText::new(text)
            .strong()
            .monospace()
            .size(18.0)
            .color(super::ACCENT),
    }
}
