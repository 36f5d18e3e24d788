//! Play field widget: shows the rendered canvas and maps the pointer back to
//! map cells

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions, Ui, Vec2};

use target_map::{Canvas, Map, Position};

/// Configuration for the map view
#[derive(Clone, Debug)]
pub struct MapViewConfig {
    pub zoom_level: f32,
    pub show_grid: bool,
    pub show_spawn: bool,
    pub grid_color: Color32,
    pub background_color: Color32,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            zoom_level: 1.0,
            show_grid: false,
            show_spawn: true,
            grid_color: Color32::from_gray(128),
            background_color: Color32::BLACK,
        }
    }
}

/// Cells under the pointer this frame
#[derive(Clone, Copy, Debug, Default)]
pub struct MapViewResponse {
    pub hovered: Option<Position>,
    pub clicked: Option<Position>,
}

/// Displays the frame canvas, scaled to fit and pannable by dragging
pub struct MapView {
    config: MapViewConfig,
    pan_offset: Vec2,
    texture: Option<TextureHandle>,
}

impl MapView {
    pub fn new() -> Self {
        Self {
            config: MapViewConfig::default(),
            pan_offset: Vec2::ZERO,
            texture: None,
        }
    }

    pub fn config_mut(&mut self) -> &mut MapViewConfig {
        &mut self.config
    }

    pub fn reset_pan(&mut self) {
        self.pan_offset = Vec2::ZERO;
    }

    /// Uploads the canvas, draws it and reports pointer interaction
    pub fn show(&mut self, ui: &mut Ui, canvas: &Canvas, map: Option<&Map>) -> MapViewResponse {
        let size = [canvas.width() as usize, canvas.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, canvas.image().as_raw());
        if let Some(texture) = &mut self.texture {
            texture.set(image, TextureOptions::NEAREST);
        } else {
            self.texture = Some(ui.ctx().load_texture("playfield", image, TextureOptions::NEAREST));
        }

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        if response.dragged() {
            self.pan_offset += response.drag_delta();
        }

        painter.rect_filled(response.rect, 0.0, self.config.background_color);

        let canvas_size = Vec2::new(canvas.width() as f32, canvas.height() as f32);
        let fit = (response.rect.width() / canvas_size.x).min(response.rect.height() / canvas_size.y);
        let scale = (fit * self.config.zoom_level).max(0.01);
        let image_rect =
            Rect::from_center_size(response.rect.center() + self.pan_offset, canvas_size * scale);

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                image_rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        let Some(map) = map else {
            return MapViewResponse::default();
        };

        let to_screen = |px: i32, py: i32| {
            Pos2::new(
                image_rect.min.x + px as f32 * scale,
                image_rect.min.y + py as f32 * scale,
            )
        };
        let cell_screen_rect = |cell: Position| {
            let rect = map.tile_rect(cell.x, cell.y);
            Rect::from_min_max(
                to_screen(rect.x, rect.y),
                to_screen(rect.x + rect.width as i32, rect.y + rect.height as i32),
            )
        };
        let cell_under = |pos: Pos2| {
            let px = ((pos.x - image_rect.min.x) / scale).floor() as i32;
            let py = ((pos.y - image_rect.min.y) / scale).floor() as i32;
            map.cell_at_pixel(px, py)
        };

        let (columns, rows) = map.config().total_size;
        if self.config.show_grid && columns > 0 && rows > 0 {
            let stroke = Stroke::new(1.0, self.config.grid_color);
            let field_min = cell_screen_rect(Position::new(0, 0)).min;
            let field_max = cell_screen_rect(Position::new(columns - 1, rows - 1)).max;
            for x in 0..=columns {
                let sx = field_min.x + (field_max.x - field_min.x) * x as f32 / columns as f32;
                painter.line_segment([Pos2::new(sx, field_min.y), Pos2::new(sx, field_max.y)], stroke);
            }
            for y in 0..=rows {
                let sy = field_min.y + (field_max.y - field_min.y) * y as f32 / rows as f32;
                painter.line_segment([Pos2::new(field_min.x, sy), Pos2::new(field_max.x, sy)], stroke);
            }
        }

        if self.config.show_spawn {
            let spawn = cell_screen_rect(map.spawn_cell());
            painter.circle_stroke(
                spawn.center(),
                spawn.width() * 0.4,
                Stroke::new(2.0, Color32::LIGHT_GREEN),
            );
        }

        let hovered = response.hover_pos().and_then(cell_under);
        if let Some(cell) = hovered {
            painter.rect_stroke(cell_screen_rect(cell), 0.0, Stroke::new(1.5, Color32::YELLOW));
        }

        let clicked = if response.clicked() {
            response.interact_pointer_pos().and_then(cell_under)
        } else {
            None
        };

        MapViewResponse { hovered, clicked }
    }
}
