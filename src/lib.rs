//! Tile map loading and rendering for a target practice game.
//!
//! A map file is parsed into a [`map::ParsedMap`], centered inside a bordered
//! play field and drawn every frame onto a [`render::Surface`]. Gameplay
//! breaks targets until none remain, at which point a win screen is shown.

pub mod map;
pub mod render;

pub use map::{load_map, parse_map, Map, MapConfig, MapLoadError, ParsedMap, Position, TileKind};
pub use render::{AssetError, AssetLayout, AssetSource, Assets, Canvas, Rect, Surface, Texture};
