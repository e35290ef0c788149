use std::sync::Arc;

use eframe::egui;
use registration::wallet::WalletProvider;
use registration::{
    AppConfig, RegistrationAction, RegistrationManager, RegistrationStep, VoterApi, VoterClient,
};

use crate::ui;

/// Voter registration wizard window
pub struct RegistrationApp {
    manager: RegistrationManager,
    api: Arc<dyn VoterApi>,
    config: AppConfig,
    wallet: Option<Arc<dyn WalletProvider>>,
}

impl RegistrationApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        wallet: Option<Arc<dyn WalletProvider>>,
    ) -> Self {
        log::info!("Starting voter registration against {}", config.api_base_url);

        let api: Arc<dyn VoterApi> = Arc::new(VoterClient::from_config(&config));
        let manager = RegistrationManager::new(api.clone(), config.scan_schedule());

        Self {
            manager,
            api,
            config,
            wallet,
        }
    }

    /// Leaving the finished wizard discards it; the next visitor starts over.
    fn restart(&mut self) {
        self.manager = RegistrationManager::new(self.api.clone(), self.config.scan_schedule());
    }
}

impl eframe::App for RegistrationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.manager.update(now);

        if self.manager.has_pending_actions() {
            ctx.request_repaint();
        }

        let mut actions = Vec::new();
        let state = self.manager.state();

        egui::TopBottomPanel::top("step_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Voter Registration");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "Step {} of {}: {}",
                        state.step.number(),
                        RegistrationStep::COUNT,
                        state.step.title()
                    ));
                });
            });
            ui.add(
                egui::ProgressBar::new(f32::from(state.progress_percentage) / 100.0)
                    .desired_height(6.0),
            );
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(12.0);
            // The step view is inert while a notice waits for dismissal
            ui.add_enabled_ui(!state.has_notice(), |ui| match state.step {
                RegistrationStep::AadhaarEntry => ui::aadhaar_step::render(ui, state, &mut actions),
                RegistrationStep::OtpEntry => ui::otp_step::render(ui, state, &mut actions),
                RegistrationStep::BiometricCapture => ui::biometric_step::render(
                    ui,
                    state,
                    self.manager.scan_progress(now),
                    &mut actions,
                ),
                RegistrationStep::Complete => {
                    ui::complete_step::render(ui, state, self.wallet.as_deref(), &mut actions)
                }
            });
        });

        let modal = self.manager.modal();
        if modal.visible {
            ui::otp_modal::show(ctx, modal, &mut actions);
        }

        if let Some(notice) = &state.notice {
            ui::notice::show(ctx, notice, &mut actions);
        }

        if !actions.is_empty() {
            for action in actions {
                self.manager.dispatch(action);
            }
            self.manager.flush(now);
            ctx.request_repaint();
        }

        if self.manager.take_exit_request() {
            log::info!("Registration finished, returning to the start screen");
            self.restart();
        }
    }
}
