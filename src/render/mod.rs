//! Drawing primitives, textures and asset loading

pub mod assets;
pub mod surface;
pub mod text;
pub mod textures;
pub mod variant;

pub use assets::{AssetError, AssetLayout, AssetSource, Assets};
pub use surface::{Canvas, Rect, Surface};
pub use text::{GlyphText, TextRenderer};
pub use textures::{Texture, TextureSlot, TileTextures};
pub use variant::{variant_seed, SeededPicker, VariantPicker};
