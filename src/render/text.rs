//! Text rendering for on-screen labels

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

use super::textures::Texture;

/// Turns a string into a texture whose size is the text's bounding box
pub trait TextRenderer {
    fn render(&self, text: &str) -> Texture;
}

/// Rasterizes text with a TrueType/OpenType font
pub struct GlyphText {
    font: FontVec,
    scale: PxScale,
    color: Rgba<u8>,
}

impl GlyphText {
    /// Loads the first face of a font file or collection.
    pub fn from_bytes(data: Vec<u8>, size: f32, color: Rgba<u8>) -> Result<Self, ab_glyph::InvalidFont> {
        let font = FontVec::try_from_vec_and_index(data, 0)?;
        Ok(Self {
            font,
            scale: PxScale::from(size),
            color,
        })
    }
}

impl TextRenderer for GlyphText {
    fn render(&self, text: &str) -> Texture {
        let scaled = self.font.as_scaled(self.scale);

        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret = 0.0f32;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, scaled.ascent())));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        let width = caret.ceil().max(1.0) as u32;
        let height = scaled.height().ceil().max(1.0) as u32;
        let mut image = RgbaImage::new(width, height);
        let [r, g, b, a] = self.color.0;

        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * f32::from(a)) as u8;
                let pixel = image.get_pixel_mut(x as u32, y as u32);
                // overlapping glyph edges keep the stronger coverage
                if alpha > pixel.0[3] {
                    *pixel = Rgba([r, g, b, alpha]);
                }
            });
        }

        Texture::new(text, image)
    }
}
