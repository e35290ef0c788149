// Desktop entry point for the registration UI
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> eframe::Result<()> {
    use std::sync::Arc;

    use registration::wallet::{MockWallet, WalletProvider};
    use registration::AppConfig;
    use voter_registration_ui::app::RegistrationApp;

    env_logger::init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("Invalid configuration, falling back to defaults: {}", e);
        AppConfig::default()
    });
    log::info!("Registration service: {}", config.api_base_url);

    let wallet: Option<Arc<dyn WalletProvider>> = if config.mock_wallet {
        log::info!("Using in-memory mock wallet");
        Some(Arc::new(MockWallet::local()))
    } else {
        None
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 480.0])
            .with_title("Voter Registration"),
        ..Default::default()
    };

    eframe::run_native(
        "Voter Registration",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(RegistrationApp::new(cc, config, wallet)))
        }),
    )
}

// The browser build starts through `voter_registration_ui::start`
#[cfg(target_arch = "wasm32")]
fn main() {}
