// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod canvas;
mod config;
mod device_scanner;
mod error;
mod state;
mod trace;
mod ui;

use app::VibratorControl;
use config::Config;
use device_scanner::{BtleplugDiscovery, DeviceDiscovery};
use iced::Theme;
use std::sync::Arc;

fn main() -> iced::Result {
    // On Windows, force wgpu to use Vulkan backend instead of DirectX 12
    #[cfg(target_os = "windows")]
    std::env::set_var("WGPU_BACKEND", "vulkan");

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}; using default settings", e);
            Config::default()
        }
    };
    log::debug!("Loaded configuration: {:?}", config);

    let discovery: Arc<dyn DeviceDiscovery> = Arc::new(BtleplugDiscovery::new(config.scan_duration()));

    iced::application(
        "Vibrator Control",
        VibratorControl::update,
        VibratorControl::view,
    )
    .subscription(VibratorControl::subscription)
    .theme(|_| Theme::Light)
    .window_size((480.0, 540.0))
    .run_with(move || VibratorControl::new(config, discovery))
}
