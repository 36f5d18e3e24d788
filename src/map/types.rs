//! Map data structures

use std::fmt;

/// A cell coordinate, column first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Tile kinds as they appear in map files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileKind {
    #[default]
    Air,
    Floor,
    Target,
    /// Only meaningful while parsing; consumed into the spawnpoint.
    Spawn,
}

impl TileKind {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TileKind::Air),
            1 => Some(TileKind::Floor),
            2 => Some(TileKind::Target),
            3 => Some(TileKind::Spawn),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            TileKind::Air => 0,
            TileKind::Floor => 1,
            TileKind::Target => 2,
            TileKind::Spawn => 3,
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileKind::Air => write!(f, "Air"),
            TileKind::Floor => write!(f, "Floor"),
            TileKind::Target => write!(f, "Target"),
            TileKind::Spawn => write!(f, "Spawnpoint"),
        }
    }
}

/// Row-major grid of tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    pub fn new(width: usize, height: usize, fill: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<TileKind> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.tiles.get(y * self.width + x).copied()
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut TileKind> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.tiles.get_mut(y * self.width + x)
    }

    /// Writes a tile, returning false when the coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, tile: TileKind) -> bool {
        match self.get_mut(x, y) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, tile: TileKind) -> bool {
        self.tiles.contains(&tile)
    }

    pub fn count(&self, tile: TileKind) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    /// Iterates row by row, yielding each coordinate with its tile.
    pub fn iter(&self) -> impl Iterator<Item = (Position, TileKind)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (Position::new(i % width, i / width), *tile))
    }
}

/// A map exactly as described by its source file, before centering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMap {
    pub grid: Grid,
    pub spawnpoint: Position,
}

impl ParsedMap {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn size(&self) -> (usize, usize) {
        (self.grid.width(), self.grid.height())
    }

    /// Cuts the map down to at most `max_size`, keeping the top-left corner.
    /// A spawnpoint that falls outside moves back to `(0, 0)`.
    pub fn cropped(self, max_size: (usize, usize)) -> ParsedMap {
        let width = self.width().min(max_size.0);
        let height = self.height().min(max_size.1);
        if (width, height) == self.size() {
            return self;
        }

        let mut grid = Grid::new(width, height, TileKind::Air);
        for (position, kind) in self.grid.iter() {
            grid.set(position.x, position.y, kind);
        }
        let spawnpoint = if grid.in_bounds(self.spawnpoint.x, self.spawnpoint.y) {
            self.spawnpoint
        } else {
            Position::default()
        };
        ParsedMap { grid, spawnpoint }
    }
}
