//! tqsprite - Sprite sheet to bitplane include converter
//!
//! Reads a sprite sheet and a GraphicsGale frame layout table and produces an
//! assembler include file with one 2-bitplane data block per frame.

pub mod cli;
pub mod error;
pub mod manifest;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod types;
pub mod validation;

pub use error::{Result, SpriteError};
pub use manifest::Manifest;
pub use parser::{load_frame_table, parse_frame_table};
pub use pipeline::{encode_all, render_include, run};
pub use render::{encode_frame, frame_to_string, BitplaneEncoder, EncodeOptions, EncodedFrame, Overrun};
pub use types::{symbol_name, FrameRecord, PixelClass};
pub use validation::{validate_frames, Diagnostic, Severity, ValidationResult};
