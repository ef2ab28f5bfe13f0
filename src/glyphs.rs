// src/glyphs.rs

//! The glyph table: the single source of truth for every character the
//! font and the blocky renderer can draw.
//!
//! Each glyph is a 7-row grid of on/off cells, between 1 and 5 columns
//! wide. Rows are encoded as bitmasks with the most significant used bit
//! being the leftmost column, so the binary literals below read like the
//! rendered shape.
//!
//! Two consumers share this table:
//! - the block layout engine renders the canonical variable-width grid
//!   directly (compact, for on-screen pixel text), and
//! - the font assembly pipeline uses a fixed 4-column grid *derived* from
//!   the canonical one (centered, condensed for 5-wide glyphs), so the
//!   two can never disagree about which characters exist or what shape
//!   they have.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Every glyph grid has exactly this many rows.
pub const GLYPH_ROWS: usize = 7;

/// Column count of the fixed-width grid embedded in the generated font.
pub const FONT_GRID_COLS: usize = 4;

/// One entry in the canonical glyph table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphDef {
    /// The character this glyph draws.
    pub ch: char,
    /// Grid width in columns, 1..=5.
    pub width: u8,
    /// Row bitmasks, top to bottom. Bit `width - 1` is the leftmost column.
    pub rows: [u8; GLYPH_ROWS],
}

impl GlyphDef {
    /// The Unicode scalar value this glyph maps to in the font.
    pub fn code_point(&self) -> u32 {
        self.ch as u32
    }

    /// Whether the cell at `(row, col)` is filled.
    pub fn filled(&self, row: usize, col: usize) -> bool {
        if row >= GLYPH_ROWS || col >= self.width as usize {
            return false;
        }
        (self.rows[row] >> (self.width as usize - 1 - col)) & 1 == 1
    }
}

/// The canonical glyph table: 26 uppercase letters and 6 symbols.
pub static GLYPHS: [GlyphDef; 32] = [
    GlyphDef {
        ch: 'A',
        width: 4,
        rows: [0b0110, 0b1001, 0b1001, 0b1111, 0b1001, 0b1001, 0b1001],
    },
    GlyphDef {
        ch: 'B',
        width: 4,
        rows: [0b1110, 0b1001, 0b1001, 0b1110, 0b1001, 0b1001, 0b1110],
    },
    GlyphDef {
        ch: 'C',
        width: 4,
        rows: [0b0111, 0b1000, 0b1000, 0b1000, 0b1000, 0b1000, 0b0111],
    },
    GlyphDef {
        ch: 'D',
        width: 4,
        rows: [0b1110, 0b1001, 0b1001, 0b1001, 0b1001, 0b1001, 0b1110],
    },
    GlyphDef {
        ch: 'E',
        width: 4,
        rows: [0b1111, 0b1000, 0b1000, 0b1110, 0b1000, 0b1000, 0b1111],
    },
    GlyphDef {
        ch: 'F',
        width: 4,
        rows: [0b1111, 0b1000, 0b1000, 0b1110, 0b1000, 0b1000, 0b1000],
    },
    GlyphDef {
        ch: 'G',
        width: 4,
        rows: [0b0111, 0b1000, 0b1000, 0b1011, 0b1001, 0b1001, 0b0111],
    },
    GlyphDef {
        ch: 'H',
        width: 4,
        rows: [0b1001, 0b1001, 0b1001, 0b1111, 0b1001, 0b1001, 0b1001],
    },
    GlyphDef {
        ch: 'I',
        width: 3,
        rows: [0b111, 0b010, 0b010, 0b010, 0b010, 0b010, 0b111],
    },
    GlyphDef {
        ch: 'J',
        width: 4,
        rows: [0b0111, 0b0001, 0b0001, 0b0001, 0b0001, 0b1001, 0b0110],
    },
    GlyphDef {
        ch: 'K',
        width: 4,
        rows: [0b1001, 0b1010, 0b1100, 0b1000, 0b1100, 0b1010, 0b1001],
    },
    GlyphDef {
        ch: 'L',
        width: 4,
        rows: [0b1000, 0b1000, 0b1000, 0b1000, 0b1000, 0b1000, 0b1111],
    },
    GlyphDef {
        ch: 'M',
        width: 5,
        rows: [
            0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001,
        ],
    },
    GlyphDef {
        ch: 'N',
        width: 4,
        rows: [0b1001, 0b1101, 0b1101, 0b1011, 0b1011, 0b1001, 0b1001],
    },
    GlyphDef {
        ch: 'O',
        width: 4,
        rows: [0b0110, 0b1001, 0b1001, 0b1001, 0b1001, 0b1001, 0b0110],
    },
    GlyphDef {
        ch: 'P',
        width: 4,
        rows: [0b1110, 0b1001, 0b1001, 0b1110, 0b1000, 0b1000, 0b1000],
    },
    GlyphDef {
        ch: 'Q',
        width: 4,
        rows: [0b0110, 0b1001, 0b1001, 0b1001, 0b1001, 0b1010, 0b0101],
    },
    GlyphDef {
        ch: 'R',
        width: 4,
        rows: [0b1110, 0b1001, 0b1001, 0b1110, 0b1100, 0b1010, 0b1001],
    },
    GlyphDef {
        ch: 'S',
        width: 4,
        rows: [0b0111, 0b1000, 0b1000, 0b0110, 0b0001, 0b0001, 0b1110],
    },
    GlyphDef {
        ch: 'T',
        width: 3,
        rows: [0b111, 0b010, 0b010, 0b010, 0b010, 0b010, 0b010],
    },
    GlyphDef {
        ch: 'U',
        width: 4,
        rows: [0b1001, 0b1001, 0b1001, 0b1001, 0b1001, 0b1001, 0b0110],
    },
    GlyphDef {
        ch: 'V',
        width: 4,
        rows: [0b1001, 0b1001, 0b1001, 0b1001, 0b1001, 0b0110, 0b0110],
    },
    GlyphDef {
        ch: 'W',
        width: 5,
        rows: [
            0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001,
        ],
    },
    GlyphDef {
        ch: 'X',
        width: 4,
        rows: [0b1001, 0b1001, 0b0110, 0b0110, 0b0110, 0b1001, 0b1001],
    },
    GlyphDef {
        ch: 'Y',
        width: 3,
        rows: [0b101, 0b101, 0b101, 0b010, 0b010, 0b010, 0b010],
    },
    GlyphDef {
        ch: 'Z',
        width: 4,
        rows: [0b1111, 0b0001, 0b0010, 0b0010, 0b0100, 0b1000, 0b1111],
    },
    GlyphDef {
        ch: '-',
        width: 3,
        rows: [0b000, 0b000, 0b000, 0b111, 0b000, 0b000, 0b000],
    },
    GlyphDef {
        ch: '|',
        width: 1,
        rows: [0b1, 0b1, 0b1, 0b1, 0b1, 0b1, 0b1],
    },
    GlyphDef {
        ch: '\'',
        width: 1,
        rows: [0b1, 0b1, 0b0, 0b0, 0b0, 0b0, 0b0],
    },
    GlyphDef {
        ch: '"',
        width: 3,
        rows: [0b101, 0b101, 0b000, 0b000, 0b000, 0b000, 0b000],
    },
    GlyphDef {
        ch: '?',
        width: 4,
        rows: [0b0110, 0b1001, 0b0001, 0b0010, 0b0100, 0b0000, 0b0100],
    },
    GlyphDef {
        ch: '!',
        width: 1,
        rows: [0b1, 0b1, 0b1, 0b1, 0b1, 0b0, 0b1],
    },
];

static INDEX: Lazy<HashMap<char, usize>> = Lazy::new(|| {
    GLYPHS
        .iter()
        .enumerate()
        .map(|(i, g)| (g.ch, i))
        .collect()
});

/// Looks up the canonical glyph for `ch`, if it is supported.
pub fn glyph_for(ch: char) -> Option<&'static GlyphDef> {
    INDEX.get(&ch).map(|&i| &GLYPHS[i])
}

/// Whether `ch` has a glyph definition.
pub fn is_supported(ch: char) -> bool {
    INDEX.contains_key(&ch)
}

/// All supported characters, in table order.
pub fn supported_characters() -> Vec<char> {
    GLYPHS.iter().map(|g| g.ch).collect()
}

/// A glyph projected onto the fixed 4-column font grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontGlyph {
    pub ch: char,
    pub code_point: u32,
    /// Row bitmasks over exactly [`FONT_GRID_COLS`] columns; bit 3 is the
    /// leftmost column.
    pub rows: [u8; GLYPH_ROWS],
}

impl FontGlyph {
    pub fn filled(&self, row: usize, col: usize) -> bool {
        if row >= GLYPH_ROWS || col >= FONT_GRID_COLS {
            return false;
        }
        (self.rows[row] >> (FONT_GRID_COLS - 1 - col)) & 1 == 1
    }
}

/// Projects one canonical row onto the 4-column font grid.
///
/// Narrow glyphs are centered (left-biased for odd padding). 5-wide
/// glyphs are condensed by folding the two center columns together, which
/// keeps the outer strokes of `M` and `W` intact.
fn project_row(bits: u8, width: u8) -> u8 {
    let width = width as usize;
    if width <= FONT_GRID_COLS {
        let pad_left = (FONT_GRID_COLS - width) / 2;
        (bits << (FONT_GRID_COLS - width)) >> pad_left
    } else {
        // width == 5: columns 0,1,(2|3),4 -> 4 columns.
        let col = |c: usize| (bits >> (width - 1 - c)) & 1;
        (col(0) << 3) | (col(1) << 2) | ((col(2) | col(3)) << 1) | col(4)
    }
}

/// The font-generation view of the glyph table, derived from [`GLYPHS`].
pub static FONT_GLYPHS: Lazy<Vec<FontGlyph>> = Lazy::new(|| {
    let mut glyphs: Vec<FontGlyph> = GLYPHS
        .iter()
        .map(|g| {
            let mut rows = [0u8; GLYPH_ROWS];
            for (r, row) in rows.iter_mut().enumerate() {
                *row = project_row(g.rows[r], g.width);
            }
            FontGlyph {
                ch: g.ch,
                code_point: g.code_point(),
                rows,
            }
        })
        .collect();
    // The font tables (cmap in particular) want code-point order.
    glyphs.sort_by_key(|g| g.code_point);
    glyphs
});
