//! Monochrome drawing canvas for panel frames.

use epaper::Rotation;
use image::{imageops, GrayImage, Luma};

/// White-cleared monochrome raster the engine composes onto.
///
/// Drawing is additive: composition only ever paints black onto white, so
/// regions drawn in any order produce the same pixels where they overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    img: GrayImage,
}

impl Canvas {
    /// A white canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: GrayImage::from_pixel(width, height, Luma([255u8])),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn image(&self) -> &GrayImage {
        &self.img
    }

    /// Borrow the raster for pixel-level drawing.
    pub fn image_mut(&mut self) -> &mut GrayImage {
        &mut self.img
    }

    /// Paste the dark pixels of `src` with its top-left corner at (x, y).
    ///
    /// Light pixels leave the canvas untouched and anything falling outside
    /// the canvas is clipped.
    pub fn paste_dark(&mut self, src: &GrayImage, x: u32, y: u32) {
        for (dx, dy, px) in src.enumerate_pixels() {
            if px.0[0] < 128 {
                let tx = x + dx;
                let ty = y + dy;
                if tx < self.img.width() && ty < self.img.height() {
                    self.img.put_pixel(tx, ty, Luma([0u8]));
                }
            }
        }
    }

    /// Apply a fixed clockwise rotation, consuming the canvas.
    pub fn rotated(self, rotation: Rotation) -> Self {
        let img = match rotation {
            Rotation::Rotate0 => self.img,
            Rotation::Rotate90 => imageops::rotate90(&self.img),
            Rotation::Rotate180 => imageops::rotate180(&self.img),
            Rotation::Rotate270 => imageops::rotate270(&self.img),
        };
        Self { img }
    }

    /// Consume the canvas into its raster.
    pub fn into_image(self) -> GrayImage {
        self.img
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_all_white() {
        let canvas = Canvas::new(8, 4);
        assert!(canvas.image().pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn paste_dark_copies_only_dark_pixels() {
        let mut canvas = Canvas::new(10, 10);
        let mut src = GrayImage::from_pixel(2, 2, Luma([255]));
        src.put_pixel(0, 0, Luma([0]));
        canvas.paste_dark(&src, 4, 4);
        assert_eq!(canvas.image().get_pixel(4, 4).0[0], 0);
        assert_eq!(canvas.image().get_pixel(5, 4).0[0], 255);
        assert_eq!(canvas.image().get_pixel(5, 5).0[0], 255);
    }

    #[test]
    fn paste_dark_clips_at_canvas_edge() {
        let mut canvas = Canvas::new(10, 10);
        let src = GrayImage::from_pixel(5, 5, Luma([0]));
        canvas.paste_dark(&src, 8, 8); // partially out of bounds
        assert_eq!(canvas.image().get_pixel(9, 9).0[0], 0);
    }

    #[test]
    fn rotation_90_maps_pixels_clockwise() {
        let mut canvas = Canvas::new(2, 1);
        canvas.image_mut().put_pixel(0, 0, Luma([0]));
        let rotated = canvas.rotated(Rotation::Rotate90);
        assert_eq!((rotated.width(), rotated.height()), (1, 2));
        assert_eq!(rotated.image().get_pixel(0, 0).0[0], 0);
        assert_eq!(rotated.image().get_pixel(0, 1).0[0], 255);
    }

    #[test]
    fn rotation_0_is_identity() {
        let mut canvas = Canvas::new(3, 2);
        canvas.image_mut().put_pixel(2, 1, Luma([0]));
        let rotated = canvas.clone().rotated(Rotation::Rotate0);
        assert_eq!(rotated, canvas);
    }

    #[test]
    fn rotation_270_maps_pixels_counterclockwise() {
        let mut canvas = Canvas::new(2, 1);
        canvas.image_mut().put_pixel(0, 0, Luma([0]));
        let rotated = canvas.rotated(Rotation::Rotate270);
        // (x, y) lands at (y, width - 1 - x).
        assert_eq!((rotated.width(), rotated.height()), (1, 2));
        assert_eq!(rotated.image().get_pixel(0, 1).0[0], 0);
        assert_eq!(rotated.image().get_pixel(0, 0).0[0], 255);
    }
}
