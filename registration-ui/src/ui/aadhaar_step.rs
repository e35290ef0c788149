use eframe::egui;
use registration::wizard::state::AADHAAR_LENGTH;
use registration::{RegistrationAction, WizardState};

pub fn render(ui: &mut egui::Ui, state: &WizardState, actions: &mut Vec<RegistrationAction>) {
    ui.heading("Verify your Aadhaar");
    ui.label("Enter your 12-digit Aadhaar number to receive a one-time passcode.");
    ui.add_space(12.0);

    egui::Grid::new("aadhaar_grid")
        .num_columns(2)
        .spacing([10.0, 8.0])
        .show(ui, |ui| {
            ui.label("Aadhaar number:");
            let mut aadhaar = state.aadhaar_id.clone();
            let response = ui.add(
                egui::TextEdit::singleline(&mut aadhaar)
                    .hint_text("XXXX XXXX XXXX")
                    .desired_width(220.0),
            );
            if response.changed() {
                actions.push(RegistrationAction::EditAadhaar { input: aadhaar });
            }
            if super::submitted_with_enter(ui, &response) && state.can_submit {
                actions.push(RegistrationAction::SubmitAadhaar);
            }
            ui.end_row();

            ui.label("Full name:");
            let mut name = state.applicant.name.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut name).desired_width(220.0))
                .changed()
            {
                actions.push(RegistrationAction::EditName { input: name });
            }
            ui.end_row();

            ui.label("Mobile number:");
            let mut phone = state.applicant.phone.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut phone)
                        .hint_text("10 digits")
                        .desired_width(220.0),
                )
                .changed()
            {
                actions.push(RegistrationAction::EditPhone { input: phone });
            }
            ui.end_row();
        });

    ui.small(format!("{}/{} digits", state.aadhaar_id.len(), AADHAAR_LENGTH));
    ui.add_space(12.0);

    ui.horizontal(|ui| {
        if super::primary_button(ui, state.can_submit, "Send OTP") {
            actions.push(RegistrationAction::SubmitAadhaar);
        }
        if state.is_loading {
            ui.spinner();
            ui.label("Contacting registration service...");
        }
    });
}
