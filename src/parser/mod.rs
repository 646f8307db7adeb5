//! Parsers for tqsprite input files.

pub mod frame_table;

pub use frame_table::{load_frame_table, parse_frame_table, Column};
