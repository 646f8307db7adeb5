//! Assembler include output.
//!
//! Each frame becomes a delay constant and a `.db` data line:
//!
//! ```text
//! walk_01_delay .equ 5
//! walk_01: .db 255,0,...
//! ```

use std::fmt;

use image::RgbaImage;

use crate::error::Result;
use crate::types::FrameRecord;

use super::bitplane::{BitplaneEncoder, EncodeOptions};

/// A frame encoded to bitplane data, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    /// Full symbol name (`<sprite stem>_<frame name>`).
    pub name: String,
    /// Delay in 1/60 s ticks, as written in the frame table.
    pub delay: String,
    /// Plane-interleaved row data.
    pub data: Vec<u8>,
}

impl fmt::Display for EncodedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}_delay .equ {}", self.name, self.delay)?;
        write!(f, "{}: .db ", self.name)?;
        for (i, byte) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", byte)?;
        }
        writeln!(f)
    }
}

/// Encode one frame of the sheet.
pub fn encode_frame(
    image: &RgbaImage,
    frame: &FrameRecord,
    options: &EncodeOptions,
) -> Result<EncodedFrame> {
    let name = frame.symbol_name()?;
    let data = BitplaneEncoder::new(image, *options).region_to_binary(
        &name,
        frame.x,
        frame.y,
        frame.width,
        frame.height,
    )?;

    Ok(EncodedFrame {
        name,
        delay: frame.delay_text.clone(),
        data,
    })
}

/// Encode a frame and render its two-line include block.
pub fn frame_to_string(
    image: &RgbaImage,
    frame: &FrameRecord,
    options: &EncodeOptions,
) -> Result<String> {
    Ok(encode_frame(image, frame, options)?.to_string())
}
