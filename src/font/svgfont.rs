// src/font/svgfont.rs

//! Stages 1 and 2 of the font assembly pipeline: per-glyph SVG emission
//! and SVG font document assembly.
//!
//! The SVG font document is the legacy `<font>`/`<glyph>` format; it is
//! the lingua-franca intermediate between the grid model and the binary
//! transcoders. Assembly keeps the structured glyph outlines alongside
//! the serialized document so the TTF stage consumes exactly what the
//! document declares, one `<glyph>` per table entry.

use crate::config::GeneratorConfig;
use crate::glyphs::{FontGlyph, FONT_GRID_COLS, GLYPH_ROWS};
use crate::path::{filled_cells, rects_to_path_data, CellRect};
use crate::render::escape_xml;

/// One glyph ready for embedding: its code point, its rect outline in
/// grid units, and its serialized path data.
#[derive(Debug, Clone)]
pub struct SvgGlyph {
    pub ch: char,
    pub code_point: u32,
    pub rects: Vec<CellRect>,
    pub path_data: String,
}

impl SvgGlyph {
    pub fn from_font_glyph(glyph: &FontGlyph, cell_size: u16) -> Self {
        let rects = filled_cells(GLYPH_ROWS, FONT_GRID_COLS, |r, c| glyph.filled(r, c));
        let path_data = rects_to_path_data(&rects, cell_size as f64, 0.0, 0.0);
        SvgGlyph {
            ch: glyph.ch,
            code_point: glyph.code_point,
            rects,
            path_data,
        }
    }

    /// A minimal standalone SVG document for this glyph, sized to the
    /// fixed font grid. These are the intermediate per-glyph artifacts
    /// the pipeline writes to its temp directory.
    pub fn standalone_document(&self, cell_size: u16) -> String {
        let w = FONT_GRID_COLS as u32 * cell_size as u32;
        let h = GLYPH_ROWS as u32 * cell_size as u32;
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\"><path d=\"{d}\"/></svg>",
            d = self.path_data,
        )
    }
}

/// The assembled SVG font: declared metrics plus one entry per glyph,
/// in code-point order.
#[derive(Debug, Clone)]
pub struct SvgFont {
    pub name: String,
    pub units_per_em: u16,
    pub ascent: i16,
    pub descent: i16,
    pub advance_width: u16,
    pub cell_size: u16,
    pub glyphs: Vec<SvgGlyph>,
}

impl SvgFont {
    /// Assembles the font document model from pre-built glyphs.
    ///
    /// The 1:1 character-to-glyph mapping is structural: every entry
    /// comes from the derived font table and nothing else can get in.
    pub fn assemble(config: &GeneratorConfig, glyphs: Vec<SvgGlyph>) -> Self {
        SvgFont {
            name: config.font_name.clone(),
            units_per_em: config.units_per_em(),
            ascent: config.ascent(),
            descent: config.descent(),
            advance_width: config.advance_width(),
            cell_size: config.cell_size,
            glyphs,
        }
    }

    /// Serializes the SVG font document.
    pub fn to_document(&self) -> String {
        let mut doc = String::with_capacity(2048 + self.glyphs.len() * 256);
        doc.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\"><defs>");
        doc.push_str(&format!(
            "<font id=\"{id}\" horiz-adv-x=\"{adv}\">",
            id = escape_xml(&self.name),
            adv = self.advance_width,
        ));
        doc.push_str(&format!(
            "<font-face font-family=\"{family}\" units-per-em=\"{upm}\" ascent=\"{asc}\" descent=\"-{desc}\"/>",
            family = escape_xml(&self.name),
            upm = self.units_per_em,
            asc = self.ascent,
            desc = self.descent,
        ));
        doc.push_str("<missing-glyph/>");
        for g in &self.glyphs {
            doc.push_str(&format!(
                "<glyph unicode=\"{u}\" d=\"{d}\"/>",
                u = escape_xml(&g.ch.to_string()),
                d = g.path_data,
            ));
        }
        doc.push_str("</font></defs></svg>");
        doc
    }
}
