mod app;

use app::ProtectItApp;
use eframe::{CreationContext, NativeOptions};
use log::info;
use protectit::settings::Settings;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load();
    info!("starting with {:?} scorer", settings.scorer);

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Protect It!")
            .with_inner_size([560.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Protect It!",
        native_options,
        Box::new(move |cc: &CreationContext| Ok(Box::new(ProtectItApp::new(cc, &settings)))),
    )
}
