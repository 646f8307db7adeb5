//! 2-bitplane region encoding.
//!
//! A region is encoded row by row. Each row is split into 8-pixel slices;
//! every slice becomes one byte in plane 0 and one byte in plane 1, with the
//! leftmost pixel in the most significant bit. A row is emitted as all of its
//! plane 0 bytes followed by all of its plane 1 bytes.

use image::RgbaImage;
use serde::Deserialize;

use crate::error::{Result, SpriteError};
use crate::types::{is_quantized, PixelClass};

/// What to do when a slice reads past the image edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overrun {
    /// Stop with an out-of-bounds error.
    #[default]
    Fail,
    /// Treat pixels past the edge as transparent.
    Transparent,
}

/// Options controlling region encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub overrun: Overrun,
    /// Reject pixels that are not fully transparent or opaque pure grey
    /// (`r == g == b`, alpha 255). The number of distinct greys is not checked.
    pub strict_pixels: bool,
}

/// Encodes regions of a single sprite sheet.
pub struct BitplaneEncoder<'a> {
    image: &'a RgbaImage,
    options: EncodeOptions,
}

impl<'a> BitplaneEncoder<'a> {
    pub fn new(image: &'a RgbaImage, options: EncodeOptions) -> Self {
        Self { image, options }
    }

    /// Encode the region at `(x, y)` of size `w`x`h`.
    ///
    /// `label` names the frame in error messages. Returns
    /// `h * ceil(w / 8) * 2` bytes.
    pub fn region_to_binary(&self, label: &str, x: u32, y: u32, w: u32, h: u32) -> Result<Vec<u8>> {
        self.check_region(label, x, y, w, h)?;

        let w_bytes = w.div_ceil(8);
        let mut out = Vec::with_capacity(h as usize * w_bytes as usize * 2);
        let mut plane_1_row = Vec::with_capacity(w_bytes as usize);

        for row in 0..h {
            plane_1_row.clear();
            for byte in 0..w_bytes {
                let (plane_0, plane_1) = self.slice_to_bitplanes(label, x + byte * 8, y + row)?;
                out.push(plane_0);
                plane_1_row.push(plane_1);
            }
            out.extend_from_slice(&plane_1_row);
        }

        Ok(out)
    }

    /// Encode the 8 pixels starting at `(x_start, y)` into `(plane0, plane1)`.
    pub fn slice_to_bitplanes(&self, label: &str, x_start: u32, y: u32) -> Result<(u8, u8)> {
        let mut plane_0 = 0u8;
        let mut plane_1 = 0u8;

        for bit in 0..8u32 {
            let shift = 7 - bit;
            let (on_0, on_1) = self.classify(label, x_start + bit, y)?.bits();
            if on_0 {
                plane_0 |= 1 << shift;
            }
            if on_1 {
                plane_1 |= 1 << shift;
            }
        }

        Ok((plane_0, plane_1))
    }

    fn classify(&self, label: &str, x: u32, y: u32) -> Result<PixelClass> {
        let Some(pixel) = self.image.get_pixel_checked(x, y) else {
            return match self.options.overrun {
                Overrun::Transparent => Ok(PixelClass::Transparent),
                Overrun::Fail => Err(self.out_of_bounds(label, x, y)),
            };
        };

        if self.options.strict_pixels && !is_quantized(*pixel) {
            return Err(SpriteError::UnexpectedPixel {
                frame: label.to_string(),
                x,
                y,
                rgba: pixel.0,
            });
        }

        Ok(PixelClass::classify(*pixel))
    }

    /// The declared region must fit; only the padding of the last byte
    /// column may fall off the image.
    fn check_region(&self, label: &str, x: u32, y: u32, w: u32, h: u32) -> Result<()> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        if right >= self.image.width() || bottom >= self.image.height() {
            let bad_x = if right >= self.image.width() { x.max(self.image.width()) } else { x };
            let bad_y = if bottom >= self.image.height() { y.max(self.image.height()) } else { y };
            return Err(self.out_of_bounds(label, bad_x, bad_y));
        }
        Ok(())
    }

    fn out_of_bounds(&self, label: &str, x: u32, y: u32) -> SpriteError {
        SpriteError::OutOfBounds {
            frame: label.to_string(),
            x,
            y,
            image_width: self.image.width(),
            image_height: self.image.height(),
        }
    }
}
