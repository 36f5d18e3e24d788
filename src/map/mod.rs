//! Map-related functionality: tile kinds, grids, loading and the playable map

pub mod config;
pub mod level;
pub mod loader;
pub mod types;

// Re-export commonly used items
pub use config::MapConfig;
pub use level::Map;
pub use loader::{load_map, parse_map, resolve_map_path, MapLoadError};
pub use types::{Grid, ParsedMap, Position, TileKind};
