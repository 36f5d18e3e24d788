//! Map file loading
//!
//! Map files are plain text. The first line holds `width,height`, every
//! following non-blank line holds `x,y,type` where type is one of the
//! [`TileKind`] codes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::{Grid, ParsedMap, Position, TileKind};

/// Error type for map loading operations
#[derive(Error, Debug)]
pub enum MapLoadError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Invalid format on line {line}: {reason}")]
    InvalidFormat { line: usize, reason: String },
}

impl MapLoadError {
    fn invalid(line: usize, reason: impl Into<String>) -> Self {
        MapLoadError::InvalidFormat {
            line,
            reason: reason.into(),
        }
    }
}

/// Resolves a map name to a file inside `maps_dir`.
pub fn resolve_map_path(maps_dir: &Path, name: &str) -> PathBuf {
    maps_dir.join(name)
}

/// Reads and parses a map file
pub fn load_map(file_path: &Path, max_size: (usize, usize)) -> Result<ParsedMap, MapLoadError> {
    log::info!("Loading map: {:?}", file_path);
    let contents = fs::read_to_string(file_path)?;
    let map = parse_map(&contents, max_size)?;
    log::info!(
        "Map dimensions: {}x{}, spawnpoint {}",
        map.width(),
        map.height(),
        map.spawnpoint
    );
    Ok(map)
}

/// Parses map text, clamping the declared size to `max_size`.
///
/// Records outside the clamped bounds are dropped. When several spawn
/// records are present the last one wins; without any the spawnpoint is
/// `(0, 0)`.
pub fn parse_map(contents: &str, max_size: (usize, usize)) -> Result<ParsedMap, MapLoadError> {
    let mut lines = contents.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| MapLoadError::invalid(1, "missing map size"))?;
    let fields = split_fields(header, 2, 1)?;
    let width = parse_dimension(fields[0], 1, "width")?.min(max_size.0);
    let height = parse_dimension(fields[1], 1, "height")?.min(max_size.1);

    let mut grid = Grid::new(width, height, TileKind::Air);
    let mut spawnpoint = Position::default();
    let mut dropped = 0usize;

    for (index, line) in lines {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(line, 2, line_number)?;
        let x = parse_int(fields[0], line_number, "x")?;
        let y = parse_int(fields[1], line_number, "y")?;

        // the type of a dropped record is never looked at
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            dropped += 1;
            continue;
        };
        if !grid.in_bounds(x, y) {
            dropped += 1;
            continue;
        }

        let field = fields.get(2).ok_or_else(|| {
            MapLoadError::invalid(line_number, "expected 3 comma separated values, found 2")
        })?;
        let code = parse_int(field, line_number, "type")?;
        let kind = TileKind::from_code(code)
            .ok_or_else(|| MapLoadError::invalid(line_number, format!("unknown tile type {code}")))?;

        if kind == TileKind::Spawn {
            spawnpoint = Position::new(x, y);
        } else {
            grid.set(x, y, kind);
        }
    }

    if dropped > 0 {
        log::debug!("Dropped {} records outside the {}x{} map", dropped, width, height);
    }

    Ok(ParsedMap { grid, spawnpoint })
}

fn split_fields(line: &str, expected: usize, line_number: usize) -> Result<Vec<&str>, MapLoadError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < expected {
        return Err(MapLoadError::invalid(
            line_number,
            format!("expected {} comma separated values, found {}", expected, fields.len()),
        ));
    }
    Ok(fields)
}

fn parse_int(field: &str, line_number: usize, name: &str) -> Result<i64, MapLoadError> {
    field
        .parse::<i64>()
        .map_err(|_| MapLoadError::invalid(line_number, format!("{name} is not an integer: {field:?}")))
}

fn parse_dimension(field: &str, line_number: usize, name: &str) -> Result<usize, MapLoadError> {
    let value = parse_int(field, line_number, name)?;
    usize::try_from(value)
        .map_err(|_| MapLoadError::invalid(line_number, format!("{name} must not be negative")))
}
