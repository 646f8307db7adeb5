use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tqsprite operations
#[derive(Error, Diagnostic, Debug)]
pub enum SpriteError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tqsprite::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tqsprite::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Malformed frame table (line {line}): {message}")]
    #[diagnostic(code(tqsprite::table))]
    MalformedTable {
        line: u64,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Sprite file name '{sprite_name}' has no extension")]
    #[diagnostic(
        code(tqsprite::name),
        help("The File Name column must contain a name like 'walk.png'; the part before the first '.' becomes the symbol prefix")
    )]
    NameFormat { sprite_name: String },

    #[error("Failed to decode image {path}: {message}")]
    #[diagnostic(code(tqsprite::image))]
    ImageDecode {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Frame '{frame}' reads pixel ({x}, {y}) outside the {image_width}x{image_height} image")]
    #[diagnostic(
        code(tqsprite::bounds),
        help("Check the X/Y/Width/Height columns, or set `overrun: transparent` in tqsprite.yaml to pad partial bytes")
    )]
    OutOfBounds {
        frame: String,
        x: u32,
        y: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("Frame '{frame}' has unexpected pixel {rgba:?} at ({x}, {y})")]
    #[diagnostic(
        code(tqsprite::pixel),
        help("Quantize the sheet to transparent, white, black and one grey, or disable `strict_pixels`")
    )]
    UnexpectedPixel {
        frame: String,
        x: u32,
        y: u32,
        rgba: [u8; 4],
    },

    #[error("Validation failed with {count} error(s)")]
    #[diagnostic(code(tqsprite::validate))]
    Validation { count: usize },

    #[error("Config error: {message}")]
    #[diagnostic(code(tqsprite::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, SpriteError>;
