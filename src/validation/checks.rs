//! Validation checks for a frame table against its sprite sheet.
//!
//! Each check returns a `ValidationResult`; none of them stop at the first
//! problem.

use std::collections::HashMap;

use image::RgbaImage;

use crate::render::{EncodeOptions, Overrun};
use crate::types::{is_quantized, symbol_name, FrameRecord};

use super::warning::{Diagnostic, Severity, ValidationResult};

pub const NAME_FORMAT: &str = "tqsprite::validate::name-format";
pub const DUPLICATE_SYMBOL: &str = "tqsprite::validate::duplicate-symbol";
pub const OUT_OF_BOUNDS: &str = "tqsprite::validate::out-of-bounds";
pub const OVERRUN: &str = "tqsprite::validate::overrun";
pub const PARTIAL_BYTE: &str = "tqsprite::validate::partial-byte";
pub const UNEXPECTED_PIXEL: &str = "tqsprite::validate::unexpected-pixel";

/// Label used in diagnostics; falls back to the raw names when the symbol
/// cannot be built.
fn label(frame: &FrameRecord) -> String {
    symbol_name(&frame.sprite_name, &frame.frame_name)
        .unwrap_or_else(|_| format!("{} ({})", frame.frame_name, frame.sprite_name))
}

/// Check that every frame yields a symbol. Repeated symbols are only a
/// warning; the assembler is the one that rejects them.
pub fn check_symbol_names(frames: &[FrameRecord]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (index, frame) in frames.iter().enumerate() {
        match symbol_name(&frame.sprite_name, &frame.frame_name) {
            Ok(name) => {
                if let Some(first) = seen.get(&name) {
                    result.push(
                        Diagnostic::warning(
                            DUPLICATE_SYMBOL,
                            format!("frames {} and {} both export this symbol", first + 1, index + 1),
                        )
                        .for_frame(name)
                        .with_help("Give each frame of a sprite a distinct Name"),
                    );
                } else {
                    seen.insert(name, index);
                }
            }
            Err(_) => result.push(
                Diagnostic::error(
                    NAME_FORMAT,
                    format!("File Name '{}' has no '.'", frame.sprite_name),
                )
                .for_frame(label(frame))
                .with_help("Use the sheet's file name, e.g. 'walk.png'"),
            ),
        }
    }

    result
}

/// Check each frame's region and byte padding against the image extent.
pub fn check_bounds(
    image: &RgbaImage,
    frames: &[FrameRecord],
    options: &EncodeOptions,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    let (img_w, img_h) = image.dimensions();

    for frame in frames {
        let right = frame.x as u64 + frame.width as u64;
        let bottom = frame.y as u64 + frame.height as u64;

        if right > img_w as u64 || bottom > img_h as u64 {
            result.push(
                Diagnostic::error(
                    OUT_OF_BOUNDS,
                    format!(
                        "region {}x{} at ({}, {}) does not fit the {}x{} image",
                        frame.width, frame.height, frame.x, frame.y, img_w, img_h
                    ),
                )
                .for_frame(label(frame)),
            );
            continue;
        }

        if frame.width % 8 == 0 {
            continue;
        }

        let padded = frame.x as u64 + frame.row_bytes() as u64 * 8;
        if padded > img_w as u64 {
            let severity = match options.overrun {
                Overrun::Fail => Severity::Error,
                Overrun::Transparent => Severity::Warning,
            };
            result.push(
                Diagnostic::new(
                    severity,
                    OVERRUN,
                    format!(
                        "last byte column reads {} pixel(s) past the image edge",
                        padded - img_w as u64
                    ),
                )
                .for_frame(label(frame))
                .with_help("Set `overrun: transparent` in tqsprite.yaml to pad with transparent pixels"),
            );
        } else {
            result.push(
                Diagnostic::warning(
                    PARTIAL_BYTE,
                    format!(
                        "width {} is not a multiple of 8; padding bits come from the neighbouring {} pixel(s)",
                        frame.width,
                        padded - right
                    ),
                )
                .for_frame(label(frame)),
            );
        }
    }

    result
}

/// Check frames for pixels that are not transparent or opaque pure grey
/// (`r == g == b`, alpha 255). Which greys are used is not checked.
///
/// The scan covers every pixel the encoder reads, including the padding of a
/// partial last byte, clipped to the image. Reports at most one diagnostic per
/// frame. Frames that do not fit the image are left to [`check_bounds`].
pub fn check_pixels(
    image: &RgbaImage,
    frames: &[FrameRecord],
    options: &EncodeOptions,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    let severity = if options.strict_pixels {
        Severity::Error
    } else {
        Severity::Warning
    };

    let (img_w, img_h) = image.dimensions();

    for frame in frames {
        let right = frame.x.saturating_add(frame.width);
        let bottom = frame.y.saturating_add(frame.height);
        if right > img_w || bottom > img_h {
            continue;
        }
        let padded = frame
            .x
            .saturating_add(frame.row_bytes().saturating_mul(8))
            .min(img_w);

        let mut count = 0usize;
        let mut first = None;

        for y in frame.y..bottom {
            for x in frame.x..padded {
                let pixel = image.get_pixel(x, y);
                if !is_quantized(*pixel) {
                    count += 1;
                    first.get_or_insert((x, y, pixel.0));
                }
            }
        }

        if let Some((x, y, rgba)) = first {
            result.push(
                Diagnostic::new(
                    severity,
                    UNEXPECTED_PIXEL,
                    format!(
                        "{} pixel(s) are not transparent or opaque grey, first {:?} at ({}, {})",
                        count, rgba, x, y
                    ),
                )
                .for_frame(label(frame))
                .with_help("Only red and alpha are encoded; quantize the sheet to transparent, white, black and one grey"),
            );
        }
    }

    result
}
