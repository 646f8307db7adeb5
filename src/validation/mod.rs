//! Validation of frame tables against their sprite sheet.
//!
//! Runs every check before encoding so that all problems in a table are
//! reported at once instead of one encoding error at a time.

mod checks;
mod warning;

pub use checks::{
    DUPLICATE_SYMBOL, NAME_FORMAT, OUT_OF_BOUNDS, OVERRUN, PARTIAL_BYTE, UNEXPECTED_PIXEL,
};
pub use warning::{Diagnostic, Severity, ValidationResult};

use image::RgbaImage;

use crate::output::{plural, Printer};
use crate::render::EncodeOptions;
use crate::types::FrameRecord;

/// Run all validation checks.
pub fn validate_frames(
    image: &RgbaImage,
    frames: &[FrameRecord],
    options: &EncodeOptions,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_symbol_names(frames));
    result.merge(checks::check_bounds(image, frames, options));
    result.merge(checks::check_pixels(image, frames, options));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        match d.severity {
            Severity::Error => printer.error("error", &d.to_string()),
            Severity::Warning => printer.warning("warning", &d.to_string()),
        }
        if let Some(help) = &d.help {
            printer.note("help", help);
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        printer.error(
            "Failed",
            &format!(
                "validation: {}, {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
        );
    } else if warnings > 0 {
        printer.warning("Checked", &plural(warnings, "warning", "warnings"));
    }
}
