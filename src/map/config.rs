//! Layout and presentation settings for a playable map

use image::Rgba;

use crate::render::Rect;

/// Configuration for map placement and rendering
#[derive(Clone, Debug)]
pub struct MapConfig {
    /// Play field size in tiles, border included.
    pub total_size: (usize, usize),
    /// Size of one tile in pixels.
    pub tile_size: (u32, u32),
    /// Top-left corner of the play field on screen.
    pub render_offset: (i32, i32),
    /// Full screen size in pixels.
    pub screen_size: (u32, u32),
    pub win_panel: Rect,
    pub win_panel_color: Rgba<u8>,
    pub win_text_center: (i32, i32),
    pub font_size: f32,
    pub font_color: Rgba<u8>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            total_size: (48, 48),
            tile_size: (16, 16),
            render_offset: (672, 0),
            screen_size: (1440, 768),
            win_panel: Rect::new(36, 72, 600, 660),
            win_panel_color: Rgba([46, 42, 54, 255]),
            win_text_center: (336, 384),
            font_size: 32.0,
            font_color: Rgba([156, 170, 255, 255]),
        }
    }
}

impl MapConfig {
    /// Largest playable area, leaving one tile of wall on every side.
    pub fn max_map_size(&self) -> (usize, usize) {
        (
            self.total_size.0.saturating_sub(2),
            self.total_size.1.saturating_sub(2),
        )
    }

    /// Play field size in pixels.
    pub fn field_pixels(&self) -> (u32, u32) {
        (
            self.total_size.0 as u32 * self.tile_size.0,
            self.total_size.1 as u32 * self.tile_size.1,
        )
    }

    /// Offset that centers a map of `size` tiles inside the play field.
    pub fn centering_offset(&self, size: (usize, usize)) -> (usize, usize) {
        (
            self.total_size.0.saturating_sub(size.0) / 2,
            self.total_size.1.saturating_sub(size.1) / 2,
        )
    }
}
