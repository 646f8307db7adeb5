//! Build command implementation.
//!
//! Loads a sheet and its frame table, validates them, and writes the include
//! file in one step. The output is only replaced once everything succeeded.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use image::RgbaImage;
use tempfile::NamedTempFile;

use crate::error::{Result, SpriteError};
use crate::manifest::{Manifest, MANIFEST_FILE};
use crate::output::{display_path, plural, Printer};
use crate::parser::load_frame_table;
use crate::pipeline::{encode_all, render_include};
use crate::render::EncodeOptions;
use crate::types::FrameRecord;
use crate::validation::{print_diagnostics, validate_frames};

use super::Cli;

pub fn run(args: Cli) -> Result<()> {
    let printer = Printer::new();

    let cwd = std::env::current_dir()?;
    let manifest = match Manifest::discover(&cwd)? {
        Some(manifest) => {
            printer.info("Config", MANIFEST_FILE);
            manifest
        }
        None => Manifest::default(),
    };

    build(&args, &manifest.encode_options(), &printer)?;
    Ok(())
}

/// Convert one sheet. Returns the number of frames written.
pub fn build(args: &Cli, options: &EncodeOptions, printer: &Printer) -> Result<usize> {
    printer.status("Loading", &display_path(&args.image));
    let image = load_image(&args.image)?;

    let frames = load_frames(&args.map)?;
    printer.info(
        "Loaded",
        &format!(
            "{} from {} ({}x{} sheet)",
            plural(frames.len(), "frame", "frames"),
            display_path(&args.map),
            image.width(),
            image.height()
        ),
    );

    let validation = validate_frames(&image, &frames, options);
    print_diagnostics(&validation, printer);
    validation.into_result()?;

    printer.status("Encoding", &plural(frames.len(), "frame", "frames"));
    let encoded = encode_all(&image, &frames, options)?;
    let bytes: usize = encoded.iter().map(|e| e.data.len()).sum();

    write_atomic(&args.out, &render_include(&encoded))?;
    printer.success(
        "Wrote",
        &format!("{} ({} bytes of sprite data)", display_path(&args.out), bytes),
    );

    Ok(encoded.len())
}

fn load_image(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|e| SpriteError::ImageDecode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(image.to_rgba8())
}

fn load_frames(path: &Path) -> Result<Vec<FrameRecord>> {
    let file = File::open(path).map_err(|e| SpriteError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to open frame table: {}", e),
    })?;
    load_frame_table(file)
}

/// Write `contents` to a temporary file beside `path`, then rename it over
/// `path`.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let io_error = |e: std::io::Error| SpriteError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write output: {}", e),
    };

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(io_error)?;
    }

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
    tmp.write_all(contents.as_bytes()).map_err(io_error)?;
    tmp.persist(path).map_err(|e| io_error(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Overrun;
    use image::Rgba;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    const HEADER: &str = "Name,Delay(1/60),File Name,X,Y,Width,Height\n";

    fn fixture(image: &RgbaImage, table: &str) -> (TempDir, Cli) {
        let dir = tempdir().unwrap();
        let image_path = dir.path().join("walk.png");
        let map_path = dir.path().join("walk.csv");
        image.save(&image_path).unwrap();
        fs::write(&map_path, format!("{}{}", HEADER, table)).unwrap();

        let args = Cli {
            image: image_path,
            map: map_path,
            out: dir.path().join("walk.inc"),
        };
        (dir, args)
    }

    fn two_frame_sheet() -> RgbaImage {
        RgbaImage::from_fn(16, 2, |x, y| match (x, y) {
            (0..=7, _) => Rgba([0, 0, 0, 255]),
            (_, 0) => Rgba([255, 255, 255, 255]),
            _ => Rgba([0, 0, 0, 0]),
        })
    }

    #[test]
    fn test_build_writes_include() {
        let (_dir, args) = fixture(
            &two_frame_sheet(),
            "01,5,walk.png,0,0,8,2\n02,7,walk.png,8,0,8,2\n",
        );

        let count = build(&args, &EncodeOptions::default(), &Printer::plain()).unwrap();
        assert_eq!(count, 2);

        let text = fs::read_to_string(&args.out).unwrap();
        assert_eq!(
            text,
            "walk_01_delay .equ 5\n\
             walk_01: .db 255,255,255,255\n\
             \n\
             walk_02_delay .equ 7\n\
             walk_02: .db 255,0,0,0\n"
        );
    }

    #[test]
    fn test_build_applies_first_frame_dimensions() {
        // Second row claims 16x16, but is encoded as 8x2 like the first
        let (_dir, args) = fixture(
            &two_frame_sheet(),
            "01,5,walk.png,0,0,8,2\n02,7,walk.png,8,0,16,16\n",
        );

        build(&args, &EncodeOptions::default(), &Printer::plain()).unwrap();

        let text = fs::read_to_string(&args.out).unwrap();
        assert!(text.ends_with("walk_02: .db 255,0,0,0\n"));
    }

    #[test]
    fn test_failed_build_leaves_output_untouched() {
        let (dir, args) = fixture(&two_frame_sheet(), "01,5,walk,0,0,8,2\n");
        fs::write(&args.out, "previous contents\n").unwrap();

        let err = build(&args, &EncodeOptions::default(), &Printer::plain()).unwrap_err();
        assert!(matches!(err, SpriteError::Validation { count: 1 }));
        assert_eq!(fs::read_to_string(&args.out).unwrap(), "previous contents\n");

        // No stray temporary files either
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 3);
    }

    #[test]
    fn test_overrun_policy() {
        // Width 6 at x=6 on a 12 pixel sheet: the padding bits fall off the edge
        let image = RgbaImage::from_pixel(12, 1, Rgba([0, 0, 0, 255]));
        let (_dir, args) = fixture(&image, "01,1,walk.png,6,0,6,1\n");

        let err = build(&args, &EncodeOptions::default(), &Printer::plain()).unwrap_err();
        assert!(matches!(err, SpriteError::Validation { .. }));
        assert!(!args.out.exists());

        let options = EncodeOptions {
            overrun: Overrun::Transparent,
            ..Default::default()
        };
        build(&args, &options, &Printer::plain()).unwrap();
        let text = fs::read_to_string(&args.out).unwrap();
        assert!(text.ends_with("walk_01: .db 252,252\n"));
    }

    #[test]
    fn test_missing_image() {
        let (_dir, mut args) = fixture(&two_frame_sheet(), "01,5,walk.png,0,0,8,2\n");
        args.image = PathBuf::from("/nonexistent/walk.png");

        let err = build(&args, &EncodeOptions::default(), &Printer::plain()).unwrap_err();
        assert!(matches!(err, SpriteError::ImageDecode { .. }));
    }

    #[test]
    fn test_missing_map() {
        let (_dir, mut args) = fixture(&two_frame_sheet(), "01,5,walk.png,0,0,8,2\n");
        args.map = PathBuf::from("/nonexistent/walk.csv");

        let err = build(&args, &EncodeOptions::default(), &Printer::plain()).unwrap_err();
        assert!(matches!(err, SpriteError::Io { .. }));
    }

    #[test]
    fn test_duplicate_symbols_still_written() {
        let (_dir, args) = fixture(
            &two_frame_sheet(),
            "01,5,walk.png,0,0,8,2\n01,5,walk.png,8,0,8,2\n",
        );

        let count = build(&args, &EncodeOptions::default(), &Printer::plain()).unwrap();
        assert_eq!(count, 2);
        let text = fs::read_to_string(&args.out).unwrap();
        assert_eq!(text.matches("walk_01: .db").count(), 2);
    }

    #[test]
    fn test_zero_width_frame_writes_empty_data() {
        let (_dir, args) = fixture(&two_frame_sheet(), "01,05,walk.png,0,0,0,2\n");

        build(&args, &EncodeOptions::default(), &Printer::plain()).unwrap();
        let text = fs::read_to_string(&args.out).unwrap();
        assert_eq!(text, "walk_01_delay .equ 05\nwalk_01: .db \n");
    }

    #[test]
    fn test_output_directory_created() {
        let (dir, mut args) = fixture(&two_frame_sheet(), "01,5,walk.png,0,0,8,2\n");
        args.out = dir.path().join("build").join("inc").join("walk.inc");

        build(&args, &EncodeOptions::default(), &Printer::plain()).unwrap();
        assert!(args.out.exists());
    }
}
