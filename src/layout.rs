// src/layout.rs

//! Block layout: turns a character sequence into positioned, colored
//! blocks using the canonical variable-width glyph grids.
//!
//! Characters without a glyph definition are silently dropped; the demo
//! renderer must never fail on arbitrary user-typed text. The layout is a
//! pure function of `(text, options)` — identical inputs always produce
//! identical block sequences.

use serde::{Deserialize, Serialize};

use crate::glyphs::{glyph_for, GLYPH_ROWS};
use crate::optimize::merge_rects;
use crate::path::{filled_cells, CellRect};

/// Color scheme for blocky rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The fill for a block in grid row `row` (0 at the top).
    ///
    /// Even rows take the primary fill, odd rows the secondary, giving
    /// the rendered text its two-tone banding. This is a fixed lookup,
    /// part of the visual contract.
    pub fn row_fill(&self, row: u32) -> &'static str {
        const DARK: [&str; 2] = ["#f1f1f1", "#767676"];
        const LIGHT: [&str; 2] = ["#1a1a1a", "#9a9a9a"];
        let palette = match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        };
        palette[(row % 2) as usize]
    }
}

/// Options accepted by the blocky rendering path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub theme: Theme,
    /// Edge length of one block, in SVG user units.
    pub block_size: f64,
    /// Gap between characters, in whole block widths.
    pub char_spacing: u32,
    /// Merge adjacent blocks into larger rects before serializing.
    pub optimize: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            theme: Theme::Dark,
            block_size: 6.0,
            char_spacing: 1,
            optimize: true,
        }
    }
}

/// One positioned, colored rectangle of the rendered text.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: &'static str,
}

/// The laid-out result: blocks plus the composite bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub blocks: Vec<Block>,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn bounding_box(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

/// Lays out `text` as colored blocks.
///
/// Unsupported characters are skipped without advancing the cursor, so
/// `"HELLO123"` lays out exactly like `"HELLO"`. The bounding width
/// includes the trailing inter-character gap of the last glyph, matching
/// the cursor position after the final advance.
pub fn layout(text: &str, opts: &RenderOptions) -> Layout {
    let mut blocks = Vec::new();
    let mut cursor = 0.0f64;
    let size = opts.block_size;

    for ch in text.chars() {
        let Some(glyph) = glyph_for(ch) else {
            log::debug!("dropping unsupported character {ch:?}");
            continue;
        };
        let cells = filled_cells(GLYPH_ROWS, glyph.width as usize, |r, c| glyph.filled(r, c));
        let rects = if opts.optimize {
            // Merging may only combine blocks that share a fill, so run
            // the optimizer per row band (fills alternate by row).
            merge_per_fill(&cells)
        } else {
            cells
        };
        for rect in rects {
            blocks.push(Block {
                x: cursor + rect.col as f64 * size,
                y: rect.row as f64 * size,
                width: rect.w as f64 * size,
                height: rect.h as f64 * size,
                fill: opts.theme.row_fill(rect.row),
            });
        }
        cursor += (glyph.width as u32 + opts.char_spacing) as f64 * size;
    }

    Layout {
        blocks,
        width: cursor,
        height: GLYPH_ROWS as f64 * size,
    }
}

/// Runs the rect optimizer separately over each fill class.
///
/// Fill is a function of the row's parity, so splitting on parity keeps
/// every merged rect single-colored.
fn merge_per_fill(cells: &[CellRect]) -> Vec<CellRect> {
    let (even, odd): (Vec<CellRect>, Vec<CellRect>) =
        cells.iter().copied().partition(|r| r.row % 2 == 0);
    let mut rects = merge_rects(&even);
    rects.extend(merge_rects(&odd));
    rects.sort_by_key(|r| (r.row, r.col));
    rects
}
