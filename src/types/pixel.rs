//! Pixel classification for the 4-shade bitplane format.
//!
//! TIQuest sprites use two bitplanes, so each pixel is one of four classes.
//! Only the red and alpha channels decide the class; sheets are expected to be
//! pre-quantized to transparent, white, black and a single grey.

use image::Rgba;

/// One of the four pixel classes a 2-bitplane sprite can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelClass {
    /// Alpha is zero. Encodes as `(0, 0)`.
    Transparent,
    /// Red is 255. Encodes as `(1, 0)`.
    Light,
    /// Red is 0. Encodes as `(1, 1)`.
    Dark,
    /// Any other red value. Encodes as `(0, 1)`.
    Mid,
}

impl PixelClass {
    /// Classify an RGBA pixel. Green and blue are ignored.
    pub fn classify(pixel: Rgba<u8>) -> Self {
        let [r, _, _, a] = pixel.0;
        if a == 0 {
            PixelClass::Transparent
        } else if r == 255 {
            PixelClass::Light
        } else if r == 0 {
            PixelClass::Dark
        } else {
            PixelClass::Mid
        }
    }

    /// The `(plane0, plane1)` bits for this class.
    pub const fn bits(self) -> (bool, bool) {
        match self {
            PixelClass::Transparent => (false, false),
            PixelClass::Light => (true, false),
            PixelClass::Dark => (true, true),
            PixelClass::Mid => (false, true),
        }
    }
}

/// Returns true if the pixel is something a quantized sheet should contain:
/// fully transparent, or fully opaque pure grey.
pub fn is_quantized(pixel: Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    match a {
        0 => true,
        255 => r == g && g == b,
        _ => false,
    }
}
