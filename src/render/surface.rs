//! Drawable surfaces

use image::{imageops, Rgba, RgbaImage};

use super::textures::Texture;

/// Screen rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// A rectangle of the given size whose center is `center`.
    pub fn centered_on(center: (i32, i32), width: u32, height: u32) -> Self {
        Self {
            x: center.0 - (width / 2) as i32,
            y: center.1 - (height / 2) as i32,
            width,
            height,
        }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && py >= self.y
            && i64::from(px) < i64::from(self.x) + i64::from(self.width)
            && i64::from(py) < i64::from(self.y) + i64::from(self.height)
    }
}

/// Anything a frame can be painted onto
pub trait Surface {
    /// Copies `texture` with its top-left corner at `dest`. Only the position
    /// of `dest` is used; textures are already scaled to their final size.
    fn blit(&mut self, texture: &Texture, dest: Rect);

    /// Paints `rect` with an opaque color.
    fn fill(&mut self, rect: Rect, color: Rgba<u8>);
}

/// In-memory RGBA surface
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.image.width() && y < self.image.height() {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }
}

impl Surface for Canvas {
    fn blit(&mut self, texture: &Texture, dest: Rect) {
        imageops::overlay(&mut self.image, texture.image(), i64::from(dest.x), i64::from(dest.y));
    }

    fn fill(&mut self, rect: Rect, color: Rgba<u8>) {
        let x0 = rect.x.max(0) as u32;
        let y0 = rect.y.max(0) as u32;
        let x1 = (i64::from(rect.x) + i64::from(rect.width)).clamp(0, i64::from(self.width())) as u32;
        let y1 = (i64::from(rect.y) + i64::from(rect.height)).clamp(0, i64::from(self.height())) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn fill_is_clipped_to_the_canvas() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill(Rect::new(-2, 2, 4, 10), RED);

        assert_eq!(canvas.pixel(0, 2), Some(RED));
        assert_eq!(canvas.pixel(1, 3), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(canvas.pixel(0, 1), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn blit_copies_texture_at_destination() {
        let mut canvas = Canvas::new(8, 8);
        let texture = Texture::new("red", RgbaImage::from_pixel(2, 2, RED));
        canvas.blit(&texture, Rect::new(6, 6, 2, 2));
        canvas.blit(&texture, Rect::new(7, -1, 2, 2));

        assert_eq!(canvas.pixel(6, 6), Some(RED));
        assert_eq!(canvas.pixel(7, 7), Some(RED));
        assert_eq!(canvas.pixel(7, 0), Some(RED));
        assert_eq!(canvas.pixel(5, 5), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn centered_rect() {
        let rect = Rect::centered_on((336, 384), 100, 20);
        assert_eq!(rect, Rect::new(286, 374, 100, 20));
        assert!(rect.contains(286, 374));
        assert!(!rect.contains(386, 374));
    }
}
