// src/optimize.rs

//! Rect merging for the rendering path.
//!
//! Merges edge-adjacent cells into larger rectangles to shrink the emitted
//! SVG: first horizontal runs within a row, then vertical stacking of runs
//! with an identical column span. The covered area never changes; when
//! nothing is adjacent the input comes back untouched (modulo canonical
//! row-major ordering).
//!
//! Callers that color rects differently (the blocky renderer assigns fill
//! by row) must group by fill before merging, since a merged rect can only
//! carry one fill.

use crate::path::CellRect;

/// Merges edge-adjacent rects into larger ones.
///
/// Input rects are assumed non-overlapping (the synthesizer guarantees
/// this). Output is row-major ordered and covers exactly the same cells.
pub fn merge_rects(rects: &[CellRect]) -> Vec<CellRect> {
    if rects.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<CellRect> = rects.to_vec();
    sorted.sort_by_key(|r| (r.row, r.col));

    // Pass 1: coalesce horizontal runs within each row.
    let mut runs: Vec<CellRect> = Vec::with_capacity(sorted.len());
    for rect in sorted {
        match runs.last_mut() {
            Some(prev)
                if prev.row == rect.row
                    && prev.h == rect.h
                    && prev.col + prev.w == rect.col =>
            {
                prev.w += rect.w;
            }
            _ => runs.push(rect),
        }
    }

    // Pass 2: stack runs that sit directly below an identical column span.
    let mut merged: Vec<CellRect> = Vec::with_capacity(runs.len());
    for run in runs {
        let mut absorbed = false;
        for prev in merged.iter_mut() {
            if prev.col == run.col && prev.w == run.w && prev.row + prev.h == run.row {
                prev.h += run.h;
                absorbed = true;
                break;
            }
        }
        if !absorbed {
            merged.push(run);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn covered(rects: &[CellRect]) -> HashSet<(u32, u32)> {
        let mut cells = HashSet::new();
        for r in rects {
            for row in r.row..r.row + r.h {
                for col in r.col..r.col + r.w {
                    cells.insert((row, col));
                }
            }
        }
        cells
    }

    #[test]
    fn test_horizontal_run_merges_into_one() {
        let cells: Vec<CellRect> = (0..4).map(|c| CellRect::cell(c, 0)).collect();
        let merged = merge_rects(&cells);
        assert_eq!(merged, vec![CellRect { col: 0, row: 0, w: 4, h: 1 }]);
    }

    #[test]
    fn test_vertical_stack_merges_into_one() {
        let cells: Vec<CellRect> = (0..7).map(|r| CellRect::cell(2, r)).collect();
        let merged = merge_rects(&cells);
        assert_eq!(merged, vec![CellRect { col: 2, row: 0, w: 1, h: 7 }]);
    }

    #[test]
    fn test_square_block_merges_fully() {
        let mut cells = Vec::new();
        for r in 0..3 {
            for c in 0..3 {
                cells.push(CellRect::cell(c, r));
            }
        }
        let merged = merge_rects(&cells);
        assert_eq!(merged, vec![CellRect { col: 0, row: 0, w: 3, h: 3 }]);
    }

    #[test]
    fn test_disjoint_cells_stay_separate() {
        let cells = vec![CellRect::cell(0, 0), CellRect::cell(2, 0), CellRect::cell(0, 2)];
        let merged = merge_rects(&cells);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_merge_never_changes_covered_area() {
        // An L shape plus a stray cell.
        let mut cells = Vec::new();
        for r in 0..5 {
            cells.push(CellRect::cell(0, r));
        }
        for c in 1..4 {
            cells.push(CellRect::cell(c, 4));
        }
        cells.push(CellRect::cell(3, 0));
        let merged = merge_rects(&cells);
        assert_eq!(covered(&cells), covered(&merged));
        assert!(merged.len() <= cells.len());
    }

    #[test]
    fn test_merge_never_increases_rect_count_for_all_glyphs() {
        use crate::glyphs::{GLYPHS, GLYPH_ROWS};
        use crate::path::filled_cells;
        for g in GLYPHS.iter() {
            let cells = filled_cells(GLYPH_ROWS, g.width as usize, |r, c| g.filled(r, c));
            let merged = merge_rects(&cells);
            assert!(merged.len() <= cells.len(), "glyph '{}' grew", g.ch);
            assert_eq!(covered(&cells), covered(&merged), "glyph '{}' changed shape", g.ch);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_rects(&[]).is_empty());
    }
}
