//! 1-bit frame buffer packing for panel transfer.
//!
//! Panels take 8 pixels per byte, MSB first, rows padded to a whole byte,
//! with white as bit value 1.

use image::GrayImage;

use crate::EpdError;

/// Luma threshold separating black from white pixels.
const WHITE_THRESHOLD: u8 = 128;

/// Number of bytes in a packed frame for the given panel dimensions.
pub const fn buffer_len(width: u32, height: u32) -> usize {
    (width as usize).div_ceil(8) * height as usize
}

/// Pack a monochrome image into the panel's transfer buffer.
///
/// The image may be in the panel's native orientation or rotated a quarter
/// turn; the swapped case is mapped onto the native layout the same way the
/// vendor drivers do. Any other dimensions are rejected.
pub fn pack(img: &GrayImage, width: u32, height: u32) -> crate::Result<Vec<u8>> {
    let (iw, ih) = img.dimensions();
    let bytes_per_row = (width as usize).div_ceil(8);
    let mut buf = vec![0u8; buffer_len(width, height)];

    if (iw, ih) == (width, height) {
        for (x, y, px) in img.enumerate_pixels() {
            if px.0[0] >= WHITE_THRESHOLD {
                buf[y as usize * bytes_per_row + x as usize / 8] |= 0x80 >> (x % 8);
            }
        }
    } else if (iw, ih) == (height, width) {
        for (x, y, px) in img.enumerate_pixels() {
            if px.0[0] >= WHITE_THRESHOLD {
                let nx = y;
                let ny = height - 1 - x;
                buf[ny as usize * bytes_per_row + nx as usize / 8] |= 0x80 >> (nx % 8);
            }
        }
    } else {
        return Err(EpdError::FrameSize {
            width,
            height,
            actual_w: iw,
            actual_h: ih,
        });
    }

    Ok(buf)
}

/// Expand a packed transfer buffer back into a monochrome image.
///
/// Used by the simulator's frame dumps and by tests.
pub fn unpack(buf: &[u8], width: u32, height: u32) -> crate::Result<GrayImage> {
    let expected = buffer_len(width, height);
    if buf.len() != expected {
        return Err(EpdError::BufferSize {
            expected,
            actual: buf.len(),
        });
    }

    let bytes_per_row = (width as usize).div_ceil(8);
    let mut img = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let byte = buf[y as usize * bytes_per_row + x as usize / 8];
            let val = if byte & (0x80 >> (x % 8)) != 0 { 255 } else { 0 };
            img.put_pixel(x, y, image::Luma([val]));
        }
    }
    Ok(img)
}
