//! Printed measuring scale.
//!
//! The band mimics a physical ruler so objects held against the panel can
//! be measured: millimeter ticks along the top half, half- and full
//! centimeter blocks along the bottom half.

use epaper::Geometry;
use image::Luma;
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::canvas::Canvas;

/// Draw the measuring band with its top-left corner at (x, y).
///
/// `band_h` is the full band height and `width_cm` the printed width. All
/// tick positions are computed from the geometry's horizontal pixel density
/// so the printed millimeters stay true to the panel's physical size.
/// Returns the vertical extent consumed.
pub fn draw_ruler(
    canvas: &mut Canvas,
    x: u32,
    y: u32,
    band_h: u32,
    width_cm: u32,
    geometry: &Geometry,
) -> u32 {
    let total_mm = width_cm * 10;
    let ppm = geometry.px_per_mm_x;
    let x_at = |mm: u32| x + (mm as f32 * ppm).round() as u32;

    let band_w = x_at(total_mm) - x;
    let img = canvas.image_mut();

    draw_filled_rect_mut(
        img,
        Rect::at(x as i32, y as i32).of_size(band_w, band_h),
        Luma([255u8]),
    );
    for inset in 0..2u32 {
        draw_hollow_rect_mut(
            img,
            Rect::at((x + inset) as i32, (y + inset) as i32)
                .of_size(band_w - 2 * inset, band_h - 2 * inset),
            Luma([0u8]),
        );
    }

    let mid_y = y + band_h / 2;
    let lower_h = band_h - band_h / 2;

    // Millimeter ticks at every odd millimeter, upper half of the band.
    let mut mm = 1;
    while mm < total_mm {
        let x0 = x_at(mm);
        let w = (x_at(mm + 1) - x0).max(1);
        draw_filled_rect_mut(
            img,
            Rect::at(x0 as i32, y as i32).of_size(w, band_h / 2),
            Luma([0u8]),
        );
        mm += 2;
    }

    // Half-centimeter blocks every centimeter over the first half.
    let mut mm = 0;
    while mm < total_mm / 2 {
        let x0 = x_at(mm);
        let w = (x_at(mm + 5) - x0).max(1);
        draw_filled_rect_mut(
            img,
            Rect::at(x0 as i32, mid_y as i32).of_size(w, lower_h),
            Luma([0u8]),
        );
        mm += 10;
    }

    // Full-centimeter blocks every two centimeters over the second half.
    let mut mm = total_mm / 2;
    while mm < total_mm {
        let x0 = x_at(mm);
        let w = (x_at(mm + 10) - x0).max(1);
        draw_filled_rect_mut(
            img,
            Rect::at(x0 as i32, mid_y as i32).of_size(w, lower_h),
            Luma([0u8]),
        );
        mm += 20;
    }

    band_h
}

#[cfg(test)]
mod tests {
    use super::*;
    use epaper::{DisplayProfile, Orientation};

    fn square_geometry() -> Geometry {
        DisplayProfile::EPD_1IN54.geometry(Orientation::Landscape)
    }

    #[test]
    fn identical_inputs_draw_identical_pixels() {
        let geometry = square_geometry();
        let mut a = Canvas::new(200, 200);
        let mut b = Canvas::new(200, 200);
        draw_ruler(&mut a, 3, 3, 36, 2, &geometry);
        draw_ruler(&mut b, 3, 3, 36, 2, &geometry);
        assert_eq!(a, b);
    }

    #[test]
    fn returns_consumed_extent() {
        let geometry = square_geometry();
        let mut canvas = Canvas::new(200, 200);
        assert_eq!(draw_ruler(&mut canvas, 3, 3, 36, 2, &geometry), 36);
    }

    #[test]
    fn band_has_outline_ticks_and_blocks() {
        let geometry = square_geometry();
        let mut canvas = Canvas::new(200, 200);
        draw_ruler(&mut canvas, 3, 3, 36, 2, &geometry);
        let img = canvas.image();

        // Outline corner.
        assert_eq!(img.get_pixel(3, 3).0[0], 0);
        // First odd-millimeter tick: 1 mm at 7.25 px/mm starts 7 px in.
        assert_eq!(img.get_pixel(3 + 7, 3 + 8).0[0], 0);
        // Gap between the first and second tick, below the outline.
        assert_eq!(img.get_pixel(3 + 16, 3 + 8).0[0], 255);
        // First half-centimeter block in the lower half.
        assert_eq!(img.get_pixel(3 + 10, 3 + 30).0[0], 0);
        // Gap after it, before the second centimeter.
        assert_eq!(img.get_pixel(3 + 40, 3 + 30).0[0], 255);
        // Full-centimeter block over the second half.
        assert_eq!(img.get_pixel(3 + 80, 3 + 30).0[0], 0);
    }

    #[test]
    fn band_width_follows_pixel_density() {
        let geometry = square_geometry();
        let mut canvas = Canvas::new(200, 200);
        draw_ruler(&mut canvas, 3, 3, 36, 2, &geometry);
        let img = canvas.image();

        // 20 mm at 7.246 px/mm rounds to 145 px, so the right edge sits at
        // x = 3 + 144 and nothing is drawn past it.
        assert_eq!(img.get_pixel(3 + 144, 3 + 18).0[0], 0);
        for px in img.rows().flat_map(|r| r.skip(3 + 145)) {
            assert_eq!(px.0[0], 255);
        }
    }
}
