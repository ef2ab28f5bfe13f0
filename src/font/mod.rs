// src/font/mod.rs

//! The font assembly pipeline: glyph table to distributable web fonts.
//!
//! Six linear stages, each fresh per run:
//!
//! ```text
//! glyph table → per-glyph SVGs → SVG font → TTF → WOFF + WOFF2 → disk
//!   (static)     (temp files)    (in memory)       (both from TTF)
//! ```
//!
//! Any stage failure aborts the run and propagates as an error; the
//! temporary per-glyph artifacts are removed on every exit path via a
//! drop guard, success or not. Either all three binaries land in the
//! output directory or none are persisted as final.

pub mod svgfont;
pub mod ttf;
pub mod woff;
pub mod woff2;

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::glyphs::FONT_GLYPHS;
use self::svgfont::{SvgFont, SvgGlyph};

/// Paths and sizes of the three persisted binaries.
#[derive(Debug, Clone)]
pub struct FontArtifacts {
    pub ttf: PathBuf,
    pub woff: PathBuf,
    pub woff2: PathBuf,
}

impl FontArtifacts {
    pub fn for_font(dir: &Path, font_name: &str) -> Self {
        FontArtifacts {
            ttf: dir.join(format!("{font_name}.ttf")),
            woff: dir.join(format!("{font_name}.woff")),
            woff2: dir.join(format!("{font_name}.woff2")),
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        [&self.ttf, &self.woff, &self.woff2]
    }
}

/// Scoped temp directory for intermediate per-glyph SVGs. Removal runs
/// on drop, so cleanup happens even when a later stage fails.
struct TempGlyphDir {
    path: PathBuf,
}

impl TempGlyphDir {
    fn create(out_dir: &Path) -> Result<Self> {
        let path = out_dir.join("glyph-svg-tmp");
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create temp dir {}", path.display()))?;
        Ok(TempGlyphDir { path })
    }

    fn write(&self, file_name: &str, contents: &str) -> Result<()> {
        let path = self.path.join(file_name);
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

impl Drop for TempGlyphDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            warn!("failed to remove temp dir {}: {e}", self.path.display());
        }
    }
}

/// Runs the whole pipeline and writes `<FontName>.ttf/.woff/.woff2`
/// under the configured output directory.
pub fn generate(config: &GeneratorConfig) -> Result<FontArtifacts> {
    if config.font_name.is_empty() {
        bail!("font_name must not be empty");
    }
    if config.cell_size == 0 || config.cell_size > 512 {
        bail!("cell_size {} out of range 1..=512", config.cell_size);
    }

    fs::create_dir_all(&config.out_dir).with_context(|| {
        format!("failed to create output directory {}", config.out_dir.display())
    })?;
    let tmp = TempGlyphDir::create(&config.out_dir)?;

    // Stage 1: per-glyph SVG emission.
    let mut glyphs = Vec::with_capacity(FONT_GLYPHS.len());
    for font_glyph in FONT_GLYPHS.iter() {
        let glyph = SvgGlyph::from_font_glyph(font_glyph, config.cell_size);
        tmp.write(
            &format!("glyph_{:04x}.svg", glyph.code_point),
            &glyph.standalone_document(config.cell_size),
        )?;
        glyphs.push(glyph);
    }
    info!("emitted {} glyph SVGs", glyphs.len());

    // Stage 2: SVG font assembly.
    let font = SvgFont::assemble(config, glyphs);
    let document = font.to_document();
    tmp.write("font.svg", &document)?;
    info!("assembled SVG font ({} bytes)", document.len());

    // Stage 3: TTF transcoding.
    let ttf = ttf::build_ttf(&font, config).context("TTF transcoding failed")?;
    info!("built TTF ({} bytes)", ttf.len());

    // Stage 4: WOFF and WOFF2, both from the same TTF buffer.
    let woff = woff::ttf_to_woff(&ttf).context("WOFF transcoding failed")?;
    let woff2 = woff2::ttf_to_woff2(&ttf).context("WOFF2 transcoding failed")?;
    info!("built WOFF ({} bytes), WOFF2 ({} bytes)", woff.len(), woff2.len());

    // Stage 5: persistence.
    let artifacts = FontArtifacts::for_font(&config.out_dir, &config.font_name);
    for (path, data) in [
        (&artifacts.ttf, &ttf),
        (&artifacts.woff, &woff),
        (&artifacts.woff2, &woff2),
    ] {
        fs::write(path, data)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!("wrote {}", path.display());
    }
    info!(
        "wrote {} artifacts to {}",
        artifacts.all().len(),
        config.out_dir.display()
    );

    // Stage 6: `tmp` drops here and removes the intermediates.
    Ok(artifacts)
}
