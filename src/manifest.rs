//! Project manifest (tqsprite.yaml) parsing.
//!
//! The manifest is optional. When `tqsprite.yaml` sits in the working
//! directory it sets encoding defaults for every sheet built from there.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SpriteError};
use crate::render::{EncodeOptions, Overrun};

/// File name looked up in the working directory.
pub const MANIFEST_FILE: &str = "tqsprite.yaml";

/// Project manifest loaded from tqsprite.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// What to do when a partial byte column runs off the sheet.
    pub overrun: Overrun,

    /// Reject pixels outside the 4-shade palette instead of warning.
    pub strict_pixels: bool,
}

impl Manifest {
    /// Load manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SpriteError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `tqsprite.yaml` from `dir`, or `None` if there is none.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| SpriteError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Valid keys are `overrun` (fail | transparent) and `strict_pixels`".to_string()),
        })
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            overrun: self.overrun,
            strict_pixels: self.strict_pixels,
        }
    }
}
