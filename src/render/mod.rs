//! Rendering module for tqsprite.
//!
//! Turns frame regions into bitplane bytes and include file text.

mod bitplane;
mod include;

pub use bitplane::{BitplaneEncoder, EncodeOptions, Overrun};
pub use include::{encode_frame, frame_to_string, EncodedFrame};
