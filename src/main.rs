use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui;
use target_map::map::resolve_map_path;
use target_map::{AssetLayout, AssetSource, Assets, MapConfig};

mod ui;

use ui::app::TargetMapApp;

/// Turns the optional command line argument into a map path. Bare names are
/// looked up in the `maps` directory.
fn initial_map_path(arg: Option<String>) -> Option<PathBuf> {
    let arg = arg?;
    let direct = PathBuf::from(&arg);
    if direct.is_file() {
        Some(direct)
    } else {
        Some(resolve_map_path(Path::new("maps"), &arg))
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = MapConfig::default();

    // Textures and font are loaded once and shared by every map opened later
    let source = AssetSource::probe(Path::new("."), &["assets.zip"]);
    let assets = match Assets::load(&source, &AssetLayout::default(), &config) {
        Ok(assets) => Arc::new(assets),
        Err(e) => {
            log::error!("Failed to load assets: {}", e);
            std::process::exit(1);
        }
    };

    let initial_map = initial_map_path(std::env::args().nth(1));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_resizable(true),
        ..Default::default()
    };
    eframe::run_native(
        "Target Map",
        options,
        Box::new(move |cc| Box::new(TargetMapApp::new(cc, assets, config, initial_map))),
    )
}
