//! The playable map: placement on the bordered field, per-frame drawing,
//! target breaking and the win screen

use std::sync::Arc;

use super::config::MapConfig;
use super::types::{Grid, ParsedMap, Position, TileKind};
use crate::render::{Assets, Rect, SeededPicker, Surface, Texture, VariantPicker};

/// A loaded map ready to be played and drawn
pub struct Map {
    config: MapConfig,
    parsed: ParsedMap,
    offset: (usize, usize),
    render_map: Grid,
    assets: Arc<Assets>,
    picker: Box<dyn VariantPicker>,
    done: bool,
    win_frames: u64,
}

impl Map {
    /// Places `parsed` in the middle of a walled field. A map larger than
    /// `config.max_map_size()` is cropped so the wall ring survives.
    pub fn new(parsed: ParsedMap, assets: Arc<Assets>, config: MapConfig) -> Self {
        let max_size = config.max_map_size();
        let parsed = if parsed.width() > max_size.0 || parsed.height() > max_size.1 {
            log::warn!(
                "Cropping {}x{} map to {}x{}",
                parsed.width(),
                parsed.height(),
                max_size.0,
                max_size.1
            );
            parsed.cropped(max_size)
        } else {
            parsed
        };
        let offset = config.centering_offset(parsed.size());
        let render_map = build_render_map(&parsed, offset, config.total_size);
        let done = !render_map.contains(TileKind::Target);

        log::debug!(
            "Placed {}x{} map at offset ({}, {}), {} targets",
            parsed.width(),
            parsed.height(),
            offset.0,
            offset.1,
            render_map.count(TileKind::Target)
        );

        Self {
            config,
            parsed,
            offset,
            render_map,
            assets,
            picker: Box::new(SeededPicker),
            done,
            win_frames: 0,
        }
    }

    /// Replaces the floor variant picker.
    pub fn with_picker(mut self, picker: impl VariantPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn parsed(&self) -> &ParsedMap {
        &self.parsed
    }

    pub fn render_map(&self) -> &Grid {
        &self.render_map
    }

    pub fn offset(&self) -> (usize, usize) {
        self.offset
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<TileKind> {
        self.render_map.get(x, y)
    }

    /// Spawnpoint in parsed-map coordinates
    pub fn spawnpoint(&self) -> Position {
        self.parsed.spawnpoint
    }

    /// Spawnpoint translated into render grid coordinates
    pub fn spawn_cell(&self) -> Position {
        Position::new(
            self.parsed.spawnpoint.x + self.offset.0,
            self.parsed.spawnpoint.y + self.offset.1,
        )
    }

    pub fn is_won(&self) -> bool {
        self.done
    }

    pub fn win_frames(&self) -> u64 {
        self.win_frames
    }

    /// The game loop owns the clock; the map only stores and shows it.
    pub fn set_win_frames(&mut self, frames: u64) {
        self.win_frames = frames;
    }

    pub fn targets_remaining(&self) -> usize {
        self.render_map.count(TileKind::Target)
    }

    /// Screen rectangle covered by a render grid cell
    pub fn tile_rect(&self, x: usize, y: usize) -> Rect {
        let (tile_w, tile_h) = self.config.tile_size;
        Rect::new(
            self.config.render_offset.0 + (x as u32 * tile_w) as i32,
            self.config.render_offset.1 + (y as u32 * tile_h) as i32,
            tile_w,
            tile_h,
        )
    }

    /// Render grid cell under a screen pixel, if any
    pub fn cell_at_pixel(&self, px: i32, py: i32) -> Option<Position> {
        let (tile_w, tile_h) = self.config.tile_size;
        let (field_w, field_h) = self.config.field_pixels();
        let (left, top) = self.config.render_offset;
        if tile_w == 0 || tile_h == 0 || !Rect::new(left, top, field_w, field_h).contains(px, py) {
            return None;
        }
        let local_x = px - left;
        let local_y = py - top;
        let x = local_x as usize / tile_w as usize;
        let y = local_y as usize / tile_h as usize;
        self.render_map.in_bounds(x, y).then(|| Position::new(x, y))
    }

    /// Draws one frame, with the win screen on top once all targets are gone.
    pub fn run(&self, surface: &mut dyn Surface) {
        self.render(surface);
        if self.done {
            self.render_win_screen(surface);
        }
    }

    /// Removes a target the caller has already confirmed was hit, then
    /// checks whether any targets remain.
    pub fn break_target(&mut self, x: usize, y: usize) {
        debug_assert!(
            self.render_map.in_bounds(x, y),
            "break_target outside the field: ({x}, {y})"
        );
        if !self.render_map.set(x, y, TileKind::Air) {
            log::warn!("Ignoring break outside the field at ({}, {})", x, y);
            return;
        }

        self.done = !self.render_map.contains(TileKind::Target);
        if self.done {
            log::info!("All targets cleared after {} frames", self.win_frames);
        }
    }

    /// Restores every target and zeroes the frame counter.
    pub fn reset_map(&mut self) {
        self.win_frames = 0;
        self.render_map = build_render_map(&self.parsed, self.offset, self.config.total_size);
        self.done = !self.render_map.contains(TileKind::Target);
        log::debug!("Map reset, {} targets", self.targets_remaining());
    }

    fn render(&self, surface: &mut dyn Surface) {
        let background = self.assets.background();
        surface.blit(
            background,
            Rect::new(
                self.config.render_offset.0,
                self.config.render_offset.1,
                background.width(),
                background.height(),
            ),
        );

        for (position, kind) in self.render_map.iter() {
            if let Some(texture) = self.texture_for(position, kind) {
                surface.blit(texture, self.tile_rect(position.x, position.y));
            }
        }
    }

    fn texture_for(&self, position: Position, kind: TileKind) -> Option<&Texture> {
        let grounded = kind == TileKind::Target && self.supported(position);
        let slot = self.assets.tiles().slot(kind, grounded)?;
        slot.select(|count| self.picker.pick(position.x, position.y, count))
    }

    /// Whether the tile directly below is floor.
    fn supported(&self, position: Position) -> bool {
        // placement keeps a wall row under every target
        debug_assert!(
            position.y + 1 < self.render_map.height(),
            "target on the bottom row at {position}"
        );
        self.render_map.get(position.x, position.y + 1) == Some(TileKind::Floor)
    }

    fn render_win_screen(&self, surface: &mut dyn Surface) {
        surface.fill(self.config.win_panel, self.config.win_panel_color);

        let label = self
            .assets
            .font()
            .render(&format!("time: {} frames", self.win_frames));
        let dest = Rect::centered_on(self.config.win_text_center, label.width(), label.height());
        surface.blit(&label, dest);
    }
}

/// Fills the field with wall and copies the parsed map in at `offset`.
fn build_render_map(parsed: &ParsedMap, offset: (usize, usize), total_size: (usize, usize)) -> Grid {
    let mut render_map = Grid::new(total_size.0, total_size.1, TileKind::Floor);
    for (position, kind) in parsed.grid.iter() {
        let placed = render_map.set(position.x + offset.0, position.y + offset.1, kind);
        debug_assert!(placed, "parsed map larger than the field");
    }
    render_map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::parse_map;
    use crate::render::testing::{solid_assets, Op, RecordingSurface};

    const EXAMPLE: &str = "3,2\n0,0,1\n1,0,2\n2,1,3\n";

    fn load(contents: &str) -> Map {
        let config = MapConfig::default();
        let parsed = parse_map(contents, config.max_map_size()).unwrap();
        let assets = Arc::new(solid_assets(&config));
        Map::new(parsed, assets, config)
    }

    #[test]
    fn example_map_is_centered() {
        let map = load(EXAMPLE);

        assert_eq!(map.offset(), (22, 23));
        assert_eq!(map.spawnpoint(), Position::new(2, 1));
        assert_eq!(map.spawn_cell(), Position::new(24, 24));
        assert_eq!(map.tile(22, 23), Some(TileKind::Floor));
        assert_eq!(map.tile(23, 23), Some(TileKind::Target));
        assert_eq!(map.tile(24, 23), Some(TileKind::Air));
        assert_eq!(map.tile(24, 24), Some(TileKind::Air));
        assert!(!map.is_won());
    }

    #[test]
    fn everything_outside_the_map_is_wall() {
        let map = load(EXAMPLE);
        let (ox, oy) = map.offset();

        for (position, kind) in map.render_map().iter() {
            let inside = (ox..ox + 3).contains(&position.x) && (oy..oy + 2).contains(&position.y);
            if inside {
                let source = map.parsed().grid.get(position.x - ox, position.y - oy);
                assert_eq!(Some(kind), source, "at {position}");
            } else {
                assert_eq!(kind, TileKind::Floor, "at {position}");
            }
        }
    }

    #[test]
    fn largest_map_keeps_a_wall_ring() {
        let map = load("46,46\n45,45,2\n0,0,2\n");

        assert_eq!(map.offset(), (1, 1));
        assert_eq!(map.tile(46, 46), Some(TileKind::Target));
        assert_eq!(map.tile(47, 47), Some(TileKind::Floor));
        assert_eq!(map.tile(0, 0), Some(TileKind::Floor));
    }

    #[test]
    fn oversized_parsed_map_is_cropped() {
        let config = MapConfig::default();
        // parsed against the whole field instead of the map limit
        let parsed = parse_map("48,48\n0,47,2\n3,2,2\n47,0,3\n", config.total_size).unwrap();
        let map = Map::new(parsed, Arc::new(solid_assets(&config)), config);

        assert_eq!(map.parsed().size(), (46, 46));
        assert_eq!(map.offset(), (1, 1));
        assert_eq!(map.tile(0, 0), Some(TileKind::Floor));
        assert_eq!(map.tile(47, 47), Some(TileKind::Floor));
        assert_eq!(map.tile(4, 3), Some(TileKind::Target));
        assert_eq!(map.targets_remaining(), 1);
        assert_eq!(map.spawnpoint(), Position::new(0, 0));

        let mut surface = RecordingSurface::default();
        map.run(&mut surface);
        assert_eq!(surface.blits().len(), 1 + 48 * 48 - (46 * 46 - 1));
    }

    #[test]
    fn breaking_the_last_target_wins() {
        let mut map = load(EXAMPLE);

        map.break_target(23, 23);
        assert!(map.is_won());
        assert_eq!(map.targets_remaining(), 0);

        let before = map.render_map().clone();
        map.break_target(23, 23);
        assert!(map.is_won());
        assert_eq!(map.render_map(), &before);
    }

    #[test]
    fn win_waits_for_every_target() {
        let mut map = load("3,1\n0,0,2\n2,0,2\n");
        let (ox, oy) = map.offset();

        map.break_target(ox, oy);
        assert!(!map.is_won());
        map.break_target(ox + 2, oy);
        assert!(map.is_won());
    }

    #[test]
    fn reset_restores_targets_and_clock() {
        let mut map = load(EXAMPLE);
        let fresh = map.render_map().clone();

        map.set_win_frames(120);
        map.break_target(23, 23);
        map.break_target(30, 30);
        map.reset_map();

        assert_eq!(map.render_map(), &fresh);
        assert_eq!(map.win_frames(), 0);
        assert!(!map.is_won());
        assert_eq!(map.offset(), (22, 23));
    }

    #[test]
    fn map_without_targets_starts_won() {
        let map = load("2,2\n0,0,1\n");
        assert!(map.is_won());
    }

    #[test]
    fn render_draws_background_then_non_air_tiles() {
        let map = load(EXAMPLE);
        let mut surface = RecordingSurface::default();
        map.run(&mut surface);

        let blits = surface.blits();
        assert_eq!(blits[0].0, "background");
        assert_eq!(blits[0].1, Rect::new(672, 0, 768, 768));
        // 48x48 cells minus four air cells
        assert_eq!(blits.len(), 1 + 48 * 48 - 4);
        assert!(surface.ops.iter().all(|op| matches!(op, Op::Blit { .. })));

        let first_tile = blits[1];
        assert!(first_tile.0.starts_with("floor/"));
        assert_eq!(first_tile.1, Rect::new(672, 0, 16, 16));
    }

    #[test]
    fn render_is_deterministic() {
        let map = load(EXAMPLE);
        let mut first = RecordingSurface::default();
        let mut second = RecordingSurface::default();
        map.run(&mut first);
        map.run(&mut second);
        assert_eq!(first.ops, second.ops);
    }

    #[test]
    fn injected_picker_chooses_floor_variant() {
        let map = load(EXAMPLE).with_picker(|_x: usize, _y: usize, count: usize| count - 1);
        let mut surface = RecordingSurface::default();
        map.run(&mut surface);

        assert!(surface
            .blits()
            .iter()
            .filter(|(name, _)| name.starts_with("floor/"))
            .all(|(name, _)| *name == "floor/2"));
    }

    #[test]
    fn target_look_depends_on_tile_below() {
        // (1,0) is a target above air; (0,1) sits on the bottom wall
        let map = load("2,2\n1,0,2\n0,1,2\n");
        let mut surface = RecordingSurface::default();
        map.run(&mut surface);

        let (ox, oy) = map.offset();
        let name_at = |x: usize, y: usize| {
            let rect = map.tile_rect(x, y);
            surface
                .blits()
                .into_iter()
                .find(|(_, dest)| *dest == rect)
                .map(|(name, _)| name.to_string())
        };
        assert_eq!(name_at(ox + 1, oy).as_deref(), Some("target/aerial"));
        assert_eq!(name_at(ox, oy + 1).as_deref(), Some("target/grounded"));
        assert_eq!(name_at(ox, oy), None);
    }

    #[test]
    fn win_screen_shows_frame_count() {
        let mut map = load(EXAMPLE);
        map.set_win_frames(321);
        map.break_target(23, 23);

        let mut surface = RecordingSurface::default();
        map.run(&mut surface);

        let config = MapConfig::default();
        let tail = &surface.ops[surface.ops.len() - 2..];
        assert_eq!(
            tail[0],
            Op::Fill {
                rect: config.win_panel,
                color: config.win_panel_color
            }
        );
        assert_eq!(
            tail[1],
            Op::Blit {
                texture: "time: 321 frames".to_string(),
                dest: Rect::new(286, 374, 100, 20),
            }
        );
        assert!(map.is_won());
        assert_eq!(map.win_frames(), 321);
    }

    #[test]
    fn pixel_lookup_matches_tile_rects() {
        let map = load(EXAMPLE);
        let rect = map.tile_rect(22, 23);

        assert_eq!(rect, Rect::new(672 + 22 * 16, 23 * 16, 16, 16));
        assert_eq!(map.cell_at_pixel(rect.x, rect.y), Some(Position::new(22, 23)));
        assert_eq!(map.cell_at_pixel(rect.x + 15, rect.y + 15), Some(Position::new(22, 23)));
        assert_eq!(map.cell_at_pixel(671, 10), None);
        assert_eq!(map.cell_at_pixel(672 + 768, 10), None);
        assert_eq!(map.cell_at_pixel(700, 768), None);
        assert_eq!(map.cell_at_pixel(672 + 767, 767), Some(Position::new(47, 47)));
    }
}
