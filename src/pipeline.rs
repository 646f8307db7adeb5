//! Sheet-to-include pipeline.

use image::RgbaImage;

use crate::error::Result;
use crate::render::{encode_frame, EncodeOptions, EncodedFrame};
use crate::types::FrameRecord;

/// Encode every frame in table order, stopping at the first failure.
pub fn encode_all(
    image: &RgbaImage,
    frames: &[FrameRecord],
    options: &EncodeOptions,
) -> Result<Vec<EncodedFrame>> {
    frames
        .iter()
        .map(|frame| encode_frame(image, frame, options))
        .collect()
}

/// Join encoded frames into include file text.
///
/// Blocks are separated by a blank line.
pub fn render_include(encoded: &[EncodedFrame]) -> String {
    encoded
        .iter()
        .map(EncodedFrame::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Encode all frames of a sheet and return the include file text.
pub fn run(image: &RgbaImage, frames: &[FrameRecord], options: &EncodeOptions) -> Result<String> {
    let encoded = encode_all(image, frames, options)?;
    Ok(render_include(&encoded))
}
