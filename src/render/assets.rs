//! Asset loading: tile textures, background and font
//!
//! Assets come from a directory or a zip archive laid out the same way.
//! They are loaded once by the application and shared by every map.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

use super::text::{GlyphText, TextRenderer};
use super::textures::{Texture, TextureSlot, TileTextures};
use crate::map::MapConfig;

/// Error type for asset loading operations
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error reading {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Missing asset: {0}")]
    Missing(String),

    #[error("Zip error: {0}")]
    ZipError(#[from] ZipError),

    #[error("Image error in {path}: {source}")]
    ImageError {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid font {0}")]
    FontError(String),
}

/// Where asset files are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Directory(PathBuf),
    Archive(PathBuf),
}

impl AssetSource {
    /// Picks the first archive that exists, falling back to `root` as a
    /// plain directory.
    pub fn probe(root: &Path, archives: &[&str]) -> Self {
        for name in archives {
            let candidate = root.join(name);
            if candidate.is_file() {
                log::info!("Using asset archive {:?}", candidate);
                return AssetSource::Archive(candidate);
            }
        }
        log::info!("Using asset directory {:?}", root);
        AssetSource::Directory(root.to_path_buf())
    }

    /// Reads one file, addressed by its `/`-separated relative path
    pub fn read(&self, relative: &str) -> Result<Vec<u8>, AssetError> {
        match self {
            AssetSource::Directory(root) => {
                let path = root.join(relative);
                fs::read(&path).map_err(|source| match source.kind() {
                    io::ErrorKind::NotFound => AssetError::Missing(path.display().to_string()),
                    _ => AssetError::IoError {
                        path: path.display().to_string(),
                        source,
                    },
                })
            }
            AssetSource::Archive(archive_path) => {
                let file = File::open(archive_path).map_err(|source| AssetError::IoError {
                    path: archive_path.display().to_string(),
                    source,
                })?;
                let mut archive = ZipArchive::new(file)?;
                let mut entry = match archive.by_name(relative) {
                    Ok(entry) => entry,
                    Err(ZipError::FileNotFound) => {
                        return Err(AssetError::Missing(format!(
                            "{}:{}",
                            archive_path.display(),
                            relative
                        )))
                    }
                    Err(e) => return Err(e.into()),
                };
                let mut buffer = Vec::new();
                entry
                    .read_to_end(&mut buffer)
                    .map_err(|source| AssetError::IoError {
                        path: relative.to_string(),
                        source,
                    })?;
                Ok(buffer)
            }
        }
    }
}

/// Relative paths of every asset a map needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    pub floor_variants: Vec<String>,
    pub target_grounded: String,
    pub target_aerial: String,
    pub background: String,
    pub font: String,
}

impl Default for AssetLayout {
    fn default() -> Self {
        Self {
            floor_variants: (0..3).map(|frame| format!("images/floor/{frame}.png")).collect(),
            target_grounded: "images/target/grounded.png".to_string(),
            target_aerial: "images/target/aerial.png".to_string(),
            background: "images/background.png".to_string(),
            font: "fonts/Hack-Regular.ttf".to_string(),
        }
    }
}

/// Everything a map draws with, scaled for one [`MapConfig`]
pub struct Assets {
    tiles: TileTextures,
    background: Texture,
    font: Box<dyn TextRenderer>,
}

impl Assets {
    pub fn new(tiles: TileTextures, background: Texture, font: Box<dyn TextRenderer>) -> Self {
        Self {
            tiles,
            background,
            font,
        }
    }

    /// Loads and scales all assets. Any missing or unreadable file fails
    /// the whole load.
    pub fn load(source: &AssetSource, layout: &AssetLayout, config: &MapConfig) -> Result<Self, AssetError> {
        let (tile_w, tile_h) = config.tile_size;

        let floor = TextureSlot::Variants(
            layout
                .floor_variants
                .iter()
                .map(|path| load_texture(source, path).map(|texture| texture.scaled(tile_w, tile_h)))
                .collect::<Result<Vec<_>, AssetError>>()?,
        );
        if floor.is_empty() {
            return Err(AssetError::Missing("floor textures".to_string()));
        }

        let grounded = load_texture(source, &layout.target_grounded)?.scaled(tile_w, tile_h);
        let aerial = load_texture(source, &layout.target_aerial)?.scaled(tile_w, tile_h);

        let (field_w, field_h) = config.field_pixels();
        let background = load_texture(source, &layout.background)?.scaled(field_w, field_h);

        let font_data = source.read(&layout.font)?;
        let font = GlyphText::from_bytes(font_data, config.font_size, config.font_color)
            .map_err(|e| AssetError::FontError(format!("{}: {}", layout.font, e)))?;

        log::info!(
            "Loaded {} floor variants, target textures, background and font",
            floor.len()
        );

        Ok(Self {
            tiles: TileTextures::new(
                floor,
                TextureSlot::Single(grounded),
                TextureSlot::Single(aerial),
            ),
            background,
            font: Box::new(font),
        })
    }

    pub fn tiles(&self) -> &TileTextures {
        &self.tiles
    }

    pub fn background(&self) -> &Texture {
        &self.background
    }

    pub fn font(&self) -> &dyn TextRenderer {
        self.font.as_ref()
    }
}

fn load_texture(source: &AssetSource, path: &str) -> Result<Texture, AssetError> {
    let bytes = source.read(path)?;
    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::ImageError {
        path: path.to_string(),
        source,
    })?;
    log::debug!("Decoded {} ({}x{})", path, image.width(), image.height());
    Ok(Texture::new(path, image.to_rgba8()))
}
