// src/path.rs

//! Grid-to-path synthesis: turns a glyph's on/off grid into axis-aligned
//! rectangle geometry and SVG path data.
//!
//! Everything here is a pure function of the grid. The emitted subpath
//! order is row-major then column-major, which matters only for
//! reproducibility (byte-identical output across runs), not for the
//! rendered result.

/// An axis-aligned rectangle in grid units.
///
/// `col`/`row` address the top-left cell; `w`/`h` are extents in cells.
/// Straight from the synthesizer every rect is a single 1x1 cell; the
/// optimizer may widen/merge them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub col: u32,
    pub row: u32,
    pub w: u32,
    pub h: u32,
}

impl CellRect {
    pub const fn cell(col: u32, row: u32) -> Self {
        Self { col, row, w: 1, h: 1 }
    }

    /// Covered area in cells.
    pub fn area(&self) -> u32 {
        self.w * self.h
    }
}

/// Collects one [`CellRect`] per filled cell, row-major.
///
/// `filled(row, col)` is sampled over `rows x cols`; any grid shape is
/// valid, including a fully empty one.
pub fn filled_cells<F>(rows: usize, cols: usize, filled: F) -> Vec<CellRect>
where
    F: Fn(usize, usize) -> bool,
{
    let mut rects = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if filled(row, col) {
                rects.push(CellRect::cell(col as u32, row as u32));
            }
        }
    }
    rects
}

/// Serializes one rect as a closed subpath at the given cell size.
///
/// The form is the four-corner polygon
/// `M x,y L x+w,y L x+w,y+h L x,y+h Z` with coordinates scaled by
/// `cell_size` and offset by `(dx, dy)`.
pub fn rect_subpath(rect: &CellRect, cell_size: f64, dx: f64, dy: f64) -> String {
    let x = dx + rect.col as f64 * cell_size;
    let y = dy + rect.row as f64 * cell_size;
    let w = rect.w as f64 * cell_size;
    let h = rect.h as f64 * cell_size;
    format!(
        "M{x},{y} L{rx},{y} L{rx},{by} L{x},{by} Z",
        x = fmt_coord(x),
        y = fmt_coord(y),
        rx = fmt_coord(x + w),
        by = fmt_coord(y + h),
    )
}

/// Serializes a whole rect list as one path data string.
///
/// An empty list yields an empty string, which is a valid (if pointless)
/// `d` attribute.
pub fn rects_to_path_data(rects: &[CellRect], cell_size: f64, dx: f64, dy: f64) -> String {
    rects
        .iter()
        .map(|r| rect_subpath(r, cell_size, dx, dy))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a coordinate without a trailing `.0` for whole numbers, so
/// integer-sized grids serialize compactly and deterministically.
pub fn fmt_coord(v: f64) -> String {
    if v == v.trunc() {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
