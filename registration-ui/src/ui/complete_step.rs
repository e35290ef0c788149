use eframe::egui;
use registration::wallet::{NetworkInfo, WalletProvider};
use registration::{RegistrationAction, WizardState};

pub fn render(
    ui: &mut egui::Ui,
    state: &WizardState,
    wallet: Option<&dyn WalletProvider>,
    actions: &mut Vec<RegistrationAction>,
) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("✔").size(72.0).color(super::SUCCESS));
        ui.heading("Registration complete");
        ui.label("Your identity has been verified and you are registered to vote.");
    });
    ui.add_space(16.0);

    ui.group(|ui| {
        egui::Grid::new("summary_grid")
            .num_columns(2)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                ui.label("Aadhaar:");
                ui.monospace(masked_aadhaar(&state.aadhaar_id));
                ui.end_row();

                if !state.applicant.name.is_empty() {
                    ui.label("Name:");
                    ui.label(&state.applicant.name);
                    ui.end_row();
                }

                ui.label("Fingerprint:");
                ui.label(if state.scan_complete { "Captured" } else { "Pending" });
                ui.end_row();

                if let Some(completed_at) = &state.completed_at {
                    ui.label("Completed:");
                    ui.label(completed_at);
                    ui.end_row();
                }
            });
    });

    if let Some(wallet) = wallet {
        ui.add_space(8.0);
        render_wallet_status(ui, wallet);
    }

    ui.add_space(16.0);
    ui.vertical_centered(|ui| {
        if super::primary_button(ui, true, "Go to dashboard") {
            actions.push(RegistrationAction::Finish);
        }
    });
}

fn render_wallet_status(ui: &mut egui::Ui, wallet: &dyn WalletProvider) {
    let network = wallet
        .request("wallet_networkInfo", &[])
        .ok()
        .and_then(|value| serde_json::from_value::<NetworkInfo>(value).ok());

    match network {
        Some(info) => {
            ui.label(format!(
                "Wallet connected: {} (chain {}){}",
                info.name,
                info.chain_id,
                if info.is_testnet { ", testnet" } else { "" }
            ));
        }
        None => {
            ui.colored_label(super::DANGER, "Wallet present but not responding");
        }
    }
}

/// Shows only the last four digits.
fn masked_aadhaar(aadhaar: &str) -> String {
    let visible = aadhaar.len().saturating_sub(4);
    aadhaar
        .chars()
        .enumerate()
        .map(|(i, c)| if i < visible { 'X' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::masked_aadhaar;

    #[test]
    fn masks_all_but_last_four() {
        assert_eq!(masked_aadhaar("123412341234"), "XXXXXXXX1234");
        assert_eq!(masked_aadhaar("12"), "12");
    }
}
