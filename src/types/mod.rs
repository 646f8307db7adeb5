//! Core domain types for tqsprite.
//!
//! - `FrameRecord` - one row of a frame layout table
//! - `PixelClass` - the four pixel classes a 2-bitplane sprite can hold

mod frame;
mod pixel;

pub use frame::{symbol_name, FrameRecord};
pub use pixel::{is_quantized, PixelClass};
