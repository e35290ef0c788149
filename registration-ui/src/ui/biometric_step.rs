use eframe::egui;
use registration::{RegistrationAction, WizardState};

pub fn render(
    ui: &mut egui::Ui,
    state: &WizardState,
    scan_progress: f32,
    actions: &mut Vec<RegistrationAction>,
) {
    ui.heading("Fingerprint scan");
    ui.label("Place your finger on the scanner and start the scan.");
    ui.add_space(16.0);

    ui.vertical_centered(|ui| {
        let (glyph, colour) = if state.scan_complete {
            ("✔", super::SUCCESS)
        } else if state.is_scanning {
            ("◉", super::ACCENT)
        } else {
            ("○", egui::Color32::GRAY)
        };
        ui.label(egui::RichText::new(glyph).size(72.0).color(colour));
        ui.add_space(8.0);

        if state.scan_complete {
            ui.colored_label(super::SUCCESS, "Fingerprint captured");
        } else if state.is_scanning {
            ui.add(
                egui::ProgressBar::new(scan_progress)
                    .desired_width(240.0)
                    .text("Scanning..."),
            );
        } else if super::primary_button(ui, state.can_submit, "Start scan") {
            actions.push(RegistrationAction::StartScan);
        }
    });
}
