//! Frame layout records.

use crate::error::{Result, SpriteError};

/// One row of a frame layout table.
///
/// Every record loaded from the same table shares `width` and `height`; see
/// [`crate::parser::load_frame_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    /// Frame label local to the sprite (e.g. `"01"`).
    pub frame_name: String,
    /// Display duration in 1/60 s ticks.
    pub delay: u32,
    /// The `Delay(1/60)` cell as written, emitted unchanged in the `.equ` line.
    pub delay_text: String,
    /// Source file name; only the part before the first `.` is used.
    pub sprite_name: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRecord {
    /// Exported symbol name: sprite stem, `_`, frame name.
    pub fn symbol_name(&self) -> Result<String> {
        symbol_name(&self.sprite_name, &self.frame_name)
    }

    /// Number of bytes each plane row takes.
    pub fn row_bytes(&self) -> u32 {
        self.width.div_ceil(8)
    }
}

/// Build `<stem>_<frame>` from a sprite file name and frame name.
///
/// The stem is everything before the first `.`.
pub fn symbol_name(sprite_name: &str, frame_name: &str) -> Result<String> {
    let (stem, _) = sprite_name
        .split_once('.')
        .ok_or_else(|| SpriteError::NameFormat {
            sprite_name: sprite_name.to_string(),
        })?;
    Ok(format!("{}_{}", stem, frame_name))
}
