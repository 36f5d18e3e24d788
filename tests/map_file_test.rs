use std::path::Path;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use target_map::render::{TextRenderer, TextureSlot, TileTextures};
use target_map::{load_map, Assets, Canvas, Map, MapConfig, Position, Surface, Texture, TileKind};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/test_data").join(name)
}

fn solid(name: &str, size: (u32, u32), color: [u8; 4]) -> Texture {
    Texture::new(name, RgbaImage::from_pixel(size.0, size.1, Rgba(color)))
}

struct BlockText;

impl TextRenderer for BlockText {
    fn render(&self, text: &str) -> Texture {
        solid(text, (8 * text.len() as u32, 10), [255, 255, 255, 255])
    }
}

const FLOOR: [u8; 4] = [100, 60, 20, 255];
const GROUNDED: [u8; 4] = [200, 0, 0, 255];
const AERIAL: [u8; 4] = [0, 0, 200, 255];
const BACKGROUND: [u8; 4] = [5, 5, 5, 255];

fn assets(config: &MapConfig) -> Arc<Assets> {
    let tile = config.tile_size;
    let tiles = TileTextures::new(
        TextureSlot::Variants(vec![solid("floor/0", tile, FLOOR), solid("floor/1", tile, FLOOR)]),
        TextureSlot::Single(solid("grounded", tile, GROUNDED)),
        TextureSlot::Single(solid("aerial", tile, AERIAL)),
    );
    let background = solid("background", config.field_pixels(), BACKGROUND);
    Arc::new(Assets::new(tiles, background, Box::new(BlockText)))
}

fn load_example() -> Map {
    let config = MapConfig::default();
    let parsed = load_map(&fixture("example.map"), config.max_map_size()).unwrap();
    Map::new(parsed, assets(&config), config)
}

#[test]
fn fixture_loads_and_centers() {
    let map = load_example();

    assert_eq!(map.parsed().size(), (8, 5));
    assert_eq!(map.spawnpoint(), Position::new(1, 3));
    assert_eq!(map.offset(), (20, 21));
    assert_eq!(map.targets_remaining(), 3);
    assert_eq!(map.tile(22, 23), Some(TileKind::Target));
    assert_eq!(map.tile(21, 24), Some(TileKind::Air));
}

#[test]
fn playing_through_the_fixture() {
    let mut map = load_example();
    let (ox, oy) = map.offset();
    let targets: [(usize, usize); 3] = [(2, 2), (5, 2), (3, 3)];

    let mut frames = 0;
    for (i, (x, y)) in targets.iter().enumerate() {
        // the game loop advances the clock while the map is unsolved
        for _ in 0..10 {
            if !map.is_won() {
                frames += 1;
                map.set_win_frames(frames);
            }
        }
        map.break_target(x + ox, y + oy);
        assert_eq!(map.is_won(), i == targets.len() - 1);
    }
    assert_eq!(map.win_frames(), 30);

    map.reset_map();
    assert_eq!(map.targets_remaining(), 3);
    assert_eq!(map.win_frames(), 0);
    assert!(!map.is_won());
}

fn pixel_in(canvas: &Canvas, map: &Map, x: usize, y: usize) -> [u8; 4] {
    let rect = map.tile_rect(x, y);
    canvas.pixel(rect.x as u32 + 4, rect.y as u32 + 4).unwrap().0
}

#[test]
fn canvas_shows_tiles_and_win_panel() {
    let mut map = load_example();
    let config = map.config().clone();
    let (ox, oy) = map.offset();
    let mut canvas = Canvas::new(config.screen_size.0, config.screen_size.1);

    map.run(&mut canvas);
    // (3,3) stands on the floor row, (2,2) floats above air
    assert_eq!(pixel_in(&canvas, &map, ox + 3, oy + 3), GROUNDED);
    assert_eq!(pixel_in(&canvas, &map, ox + 2, oy + 2), AERIAL);
    assert_eq!(pixel_in(&canvas, &map, 0, 0), FLOOR);
    assert_eq!(pixel_in(&canvas, &map, ox + 1, oy + 1), BACKGROUND);
    assert_eq!(canvas.pixel(100, 100).unwrap().0, [0, 0, 0, 0]);

    for (x, y) in [(2, 2), (5, 2), (3, 3)] {
        map.break_target(x + ox, y + oy);
    }
    map.run(&mut canvas);
    assert_eq!(pixel_in(&canvas, &map, ox + 3, oy + 3), BACKGROUND);
    assert_eq!(canvas.pixel(100, 100).unwrap(), config.win_panel_color);
    assert_eq!(canvas.pixel(336, 384).unwrap().0, [255, 255, 255, 255]);
}

#[test]
fn surface_trait_is_object_safe() {
    let map = load_example();
    let mut canvas = Canvas::new(1440, 768);
    let surface: &mut dyn Surface = &mut canvas;
    map.run(surface);
    assert_eq!(canvas.pixel(672, 0).unwrap().0, FLOOR);
}
