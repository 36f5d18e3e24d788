//! Main application: drives the map once per frame

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;
use image::Rgba;
use rfd::FileDialog;
use target_map::{load_map, Assets, Canvas, Map, MapConfig, MapLoadError, Position, TileKind};

use super::{cell_info::CellInfoPanel, map_view::MapView};

const LAST_MAP_KEY: &str = "last_map";
const CLEAR_COLOR: Rgba<u8> = Rgba([24, 22, 30, 255]);

/// Main application state
pub struct TargetMapApp {
    config: MapConfig,
    assets: Arc<Assets>,
    map: Option<Map>,
    map_path: Option<PathBuf>,
    error_message: Option<String>,
    canvas: Canvas,
    map_view: MapView,
    cell_info: CellInfoPanel,
    hovered_cell: Option<Position>,
    settings_open: bool,
    about_open: bool,
}

impl TargetMapApp {
    /// Creates the app, opening `initial_map` or the last map of the
    /// previous session.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        assets: Arc<Assets>,
        config: MapConfig,
        initial_map: Option<PathBuf>,
    ) -> Self {
        cc.egui_ctx.set_style(egui::Style {
            visuals: egui::Visuals::dark(),
            ..Default::default()
        });

        let canvas = Canvas::new(config.screen_size.0, config.screen_size.1);
        let mut app = Self {
            config,
            assets,
            map: None,
            map_path: None,
            error_message: None,
            canvas,
            map_view: MapView::new(),
            cell_info: CellInfoPanel::new(),
            hovered_cell: None,
            settings_open: false,
            about_open: false,
        };

        let remembered = cc
            .storage
            .and_then(|storage| storage.get_string(LAST_MAP_KEY))
            .map(PathBuf::from);
        if let Some(path) = initial_map.or(remembered) {
            app.load_map_file(path);
        }

        app
    }

    /// Attempts to load a map file, replacing the current map on success
    fn load_map_file(&mut self, path: PathBuf) {
        match load_map(&path, self.config.max_map_size()) {
            Ok(parsed) => {
                self.map = Some(Map::new(parsed, self.assets.clone(), self.config.clone()));
                self.map_path = Some(path);
                self.error_message = None;
                self.map_view.reset_pan();
            }
            Err(MapLoadError::IoError(e)) => {
                log::warn!("Failed to read {:?}: {}", path, e);
                self.error_message = Some(format!("Failed to read map file: {}", e));
            }
            Err(e @ MapLoadError::InvalidFormat { .. }) => {
                log::warn!("Rejected {:?}: {}", path, e);
                self.error_message = Some(format!("Invalid map: {}", e));
            }
        }
    }

    fn restart(&mut self) {
        if let Some(map) = &mut self.map {
            map.reset_map();
        }
    }

    /// One game loop step: advance the clock until the map is solved, then
    /// paint the frame.
    fn step(&mut self) {
        self.canvas.clear(CLEAR_COLOR);
        if let Some(map) = &mut self.map {
            if !map.is_won() {
                map.set_win_frames(map.win_frames() + 1);
            }
            map.run(&mut self.canvas);
        }
    }

    fn strike(&mut self, cell: Position) {
        let Some(map) = &mut self.map else {
            return;
        };
        if map.tile(cell.x, cell.y) == Some(TileKind::Target) {
            log::debug!("Target hit at {}", cell);
            map.break_target(cell.x, cell.y);
        }
    }

    /// Shows the main menu bar
    fn show_menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Map...").clicked() {
                    if let Some(path) = FileDialog::new()
                        .add_filter("Map Files", &["map", "txt"])
                        .set_directory("maps")
                        .pick_file()
                    {
                        self.load_map_file(path);
                    }
                    ui.close_menu();
                }
                if ui.add_enabled(self.map.is_some(), egui::Button::new("Restart  (R)")).clicked() {
                    self.restart();
                    ui.close_menu();
                }
                if ui.button("Settings").clicked() {
                    self.settings_open = true;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let config = self.map_view.config_mut();
                ui.add(egui::Slider::new(&mut config.zoom_level, 0.25..=4.0).text("Zoom"));
                ui.checkbox(&mut config.show_grid, "Show Grid");
                ui.checkbox(&mut config.show_spawn, "Show Spawnpoint");
                if ui.button("Reset View").clicked() {
                    self.map_view.reset_pan();
                    self.map_view.config_mut().zoom_level = 1.0;
                    ui.close_menu();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About...").clicked() {
                    self.about_open = true;
                    ui.close_menu();
                }
            });
        });
    }

    /// Shows the settings window
    fn show_settings(&mut self, ctx: &egui::Context) {
        egui::Window::new("Settings")
            .open(&mut self.settings_open)
            .show(ctx, |ui| {
                let config = self.map_view.config_mut();

                ui.heading("Display");
                ui.add(egui::Slider::new(&mut config.zoom_level, 0.25..=4.0).text("Zoom"));
                ui.checkbox(&mut config.show_grid, "Show Grid");
                ui.checkbox(&mut config.show_spawn, "Show Spawnpoint");

                ui.separator();
                ui.heading("Colors");
                ui.horizontal(|ui| {
                    ui.label("Grid:");
                    ui.color_edit_button_srgba(&mut config.grid_color);
                });
                ui.horizontal(|ui| {
                    ui.label("Background:");
                    ui.color_edit_button_srgba(&mut config.background_color);
                });

                ui.separator();
                match &self.map_path {
                    Some(path) => ui.label(format!("Map: {}", path.display())),
                    None => ui.label("No map loaded"),
                };
            });
    }
}

impl eframe::App for TargetMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::R)) {
            self.restart();
        }

        self.step();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.show_menu_bar(ui);
        });

        if self.settings_open {
            self.show_settings(ctx);
        }

        if self.about_open {
            egui::Window::new("About Target Map")
                .collapsible(false)
                .resizable(false)
                .default_size([280.0, 100.0])
                .open(&mut self.about_open)
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Target Map");
                        ui.label("Click targets to break them, R to restart");
                        ui.label("Written in Rust");
                    });
                });
        }

        egui::SidePanel::right("info_panel")
            .resizable(true)
            .default_width(200.0)
            .show(ctx, |ui| match &self.map {
                Some(map) => {
                    if let Some(name) = self.map_path.as_ref().and_then(|p| p.file_name()) {
                        ui.heading(name.to_string_lossy().into_owned());
                        ui.separator();
                    }
                    self.cell_info.show(ui, map, self.hovered_cell);
                }
                None => {
                    ui.heading("No Map Loaded");
                    ui.label("Open a map file to begin");
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.error_message {
                ui.colored_label(egui::Color32::RED, error);
            }

            let response = self.map_view.show(ui, &self.canvas, self.map.as_ref());
            self.hovered_cell = response.hovered;
            if let Some(cell) = response.clicked {
                self.strike(cell);
            }
        });

        ctx.request_repaint();
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(path) = &self.map_path {
            storage.set_string(LAST_MAP_KEY, path.display().to_string());
        }
    }
}
