use eframe::egui;
use registration::wizard::state::OTP_LENGTH;
use registration::{RegistrationAction, WizardState};

pub fn render(ui: &mut egui::Ui, state: &WizardState, actions: &mut Vec<RegistrationAction>) {
    ui.heading("Enter the OTP");
    ui.label("Type the 6-digit passcode sent for your Aadhaar number.");
    ui.add_space(12.0);

    let mut otp = state.otp.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut otp)
            .hint_text("______")
            .font(egui::TextStyle::Monospace)
            .desired_width(120.0),
    );
    if response.changed() {
        actions.push(RegistrationAction::EditOtp { input: otp });
    }
    if super::submitted_with_enter(ui, &response) && state.can_submit {
        actions.push(RegistrationAction::SubmitOtp);
    }

    ui.small(format!("{}/{} digits", state.otp.len(), OTP_LENGTH));
    ui.add_space(12.0);

    ui.horizontal(|ui| {
        if super::primary_button(ui, state.can_submit, "Verify OTP") {
            actions.push(RegistrationAction::SubmitOtp);
        }
        if state.is_loading {
            ui.spinner();
            ui.label("Verifying...");
        }
    });
}
