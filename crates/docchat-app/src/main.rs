mod app;

use docchat_types::config::{AppConfig, BackendConfig};

use crate::app::DocChatApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig {
        backend: BackendConfig::from_env(),
    };
    log::info!("document-chat service at {}", config.backend.base_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("DocChat")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "DocChat",
        options,
        Box::new(move |cc| Ok(Box::new(DocChatApp::new(cc, config)?))),
    )
}
