//! Tile textures

use image::{imageops, imageops::FilterType, RgbaImage};

use crate::map::TileKind;

/// A named, pre-scaled image
#[derive(Debug, Clone)]
pub struct Texture {
    name: String,
    image: RgbaImage,
}

impl Texture {
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Resizes with nearest-neighbour sampling so pixel art stays crisp.
    pub fn scaled(self, width: u32, height: u32) -> Self {
        if self.image.dimensions() == (width, height) {
            return self;
        }
        let image = imageops::resize(&self.image, width, height, FilterType::Nearest);
        Self {
            name: self.name,
            image,
        }
    }
}

/// A tile kind is drawn either with one image or one of several variants
#[derive(Debug, Clone)]
pub enum TextureSlot {
    Single(Texture),
    Variants(Vec<Texture>),
}

impl TextureSlot {
    pub fn len(&self) -> usize {
        match self {
            TextureSlot::Single(_) => 1,
            TextureSlot::Variants(variants) => variants.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves the slot to one texture. `choose` is only consulted for
    /// variant slots and receives the variant count.
    pub fn select(&self, choose: impl FnOnce(usize) -> usize) -> Option<&Texture> {
        match self {
            TextureSlot::Single(texture) => Some(texture),
            TextureSlot::Variants(variants) if variants.is_empty() => None,
            TextureSlot::Variants(variants) => {
                let index = choose(variants.len()).min(variants.len() - 1);
                variants.get(index)
            }
        }
    }
}

/// Textures for every drawable tile kind
#[derive(Debug, Clone)]
pub struct TileTextures {
    floor: TextureSlot,
    target_grounded: TextureSlot,
    target_aerial: TextureSlot,
}

impl TileTextures {
    pub fn new(floor: TextureSlot, target_grounded: TextureSlot, target_aerial: TextureSlot) -> Self {
        Self {
            floor,
            target_grounded,
            target_aerial,
        }
    }

    /// Slot for a tile. Targets resting on floor use the grounded look.
    /// Air and spawn markers are never drawn.
    pub fn slot(&self, kind: TileKind, grounded: bool) -> Option<&TextureSlot> {
        match kind {
            TileKind::Floor => Some(&self.floor),
            TileKind::Target if grounded => Some(&self.target_grounded),
            TileKind::Target => Some(&self.target_aerial),
            TileKind::Air | TileKind::Spawn => None,
        }
    }
}
