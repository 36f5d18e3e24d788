//! Cell information panel

use eframe::egui::{Color32, RichText, Ui};
use target_map::{Map, Position, TileKind};

/// Widget showing the hovered cell and the map's progress
pub struct CellInfoPanel {
    show_details: bool,
}

impl Default for CellInfoPanel {
    fn default() -> Self {
        Self { show_details: true }
    }
}

impl CellInfoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut Ui, map: &Map, cell: Option<Position>) {
        ui.heading("Cell Information");

        if let Some(cell) = cell {
            ui.horizontal(|ui| {
                ui.label("Position:");
                ui.label(RichText::new(cell.to_string()).color(Color32::LIGHT_BLUE));
            });

            if let Some(kind) = map.tile(cell.x, cell.y) {
                let (ox, oy) = map.offset();
                let (width, height) = map.parsed().size();
                let inside = (ox..ox + width).contains(&cell.x) && (oy..oy + height).contains(&cell.y);

                ui.horizontal(|ui| {
                    ui.label("Type:");
                    let (text, color) = match kind {
                        TileKind::Floor if !inside => ("Wall".to_string(), Color32::GRAY),
                        TileKind::Floor => (kind.to_string(), Color32::from_rgb(139, 69, 19)),
                        TileKind::Target => (kind.to_string(), Color32::RED),
                        TileKind::Air | TileKind::Spawn => (kind.to_string(), Color32::from_gray(180)),
                    };
                    ui.label(RichText::new(text).color(color));
                });

                if cell == map.spawn_cell() {
                    ui.label(RichText::new("Spawnpoint").color(Color32::LIGHT_GREEN));
                }
            }
        } else {
            ui.label("Hover over a cell to see information");
        }

        ui.separator();
        ui.checkbox(&mut self.show_details, "Show map status");
        if self.show_details {
            ui.label(format!("Targets left: {}", map.targets_remaining()));
            ui.label(format!("Frames: {}", map.win_frames()));
            if map.is_won() {
                ui.label(RichText::new("All targets cleared").color(Color32::LIGHT_GREEN));
            }
        }
    }
}
