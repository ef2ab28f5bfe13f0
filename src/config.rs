// src/config.rs

//! Configuration for the font generation pipeline.
//!
//! A [`GeneratorConfig`] can be deserialized from a JSON file to override
//! the defaults; every field falls back individually, so a config file
//! only needs to name what it changes.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one font generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Font family name; also the stem of the three output files.
    pub font_name: String,
    /// Directory the final binaries are written to.
    pub out_dir: PathBuf,
    /// Edge length of one grid cell in font design units.
    pub cell_size: u16,
    /// Extra advance after each glyph, in whole cells.
    pub char_spacing_cells: u16,
    /// Copyright string embedded in the font's name table.
    pub copyright: String,
    /// Description string embedded in the font's name table.
    pub description: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            font_name: "OpenCodeLogo".to_string(),
            out_dir: PathBuf::from("dist/fonts"),
            cell_size: 128,
            char_spacing_cells: 1,
            copyright: "Copyright (c) 2026 the blockfont authors".to_string(),
            description: "Blocky pixel-art display font generated from a 4x7 cell grid"
                .to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Loads a config from a JSON file, filling missing fields with
    /// defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: GeneratorConfig = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Units-per-em of the generated font: the full 8-cell vertical band
    /// (7 grid rows of ascent plus 1 cell of descent).
    pub fn units_per_em(&self) -> u16 {
        self.cell_size * 8
    }

    /// Ascent in design units: the 7-row grid sits entirely above the
    /// baseline.
    pub fn ascent(&self) -> i16 {
        (self.cell_size * 7) as i16
    }

    /// Descent in design units (positive magnitude).
    pub fn descent(&self) -> i16 {
        self.cell_size as i16
    }

    /// Horizontal advance of every glyph: the fixed 4-column grid plus
    /// the configured spacing.
    pub fn advance_width(&self) -> u16 {
        self.cell_size * (crate::glyphs::FONT_GRID_COLS as u16 + self.char_spacing_cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics_are_consistent() {
        let c = GeneratorConfig::default();
        assert_eq!(c.units_per_em(), 1024);
        assert_eq!(c.ascent() as i32 + c.descent() as i32, c.units_per_em() as i32);
        assert_eq!(c.advance_width(), 640);
    }

    #[test]
    fn test_partial_config_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.json");
        std::fs::write(&path, r#"{ "font_name": "TestFace", "cell_size": 64 }"#).unwrap();
        let c = GeneratorConfig::load(&path).unwrap();
        assert_eq!(c.font_name, "TestFace");
        assert_eq!(c.cell_size, 64);
        assert_eq!(c.out_dir, PathBuf::from("dist/fonts"));
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(GeneratorConfig::load(&path).is_err());
    }
}
