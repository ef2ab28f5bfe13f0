// src/font/ttf.rs

//! Stage 3 of the pipeline: transcodes the assembled SVG font into a
//! TrueType binary.
//!
//! The glyph outlines are axis-aligned rectangles, so every contour is a
//! four-point polygon and the whole `glyf` table can be emitted with
//! plain 16-bit deltas (no short-vector packing, no instructions). The
//! emitted tables are `OS/2`, `cmap` (format 4), `glyf`, `head`, `hhea`,
//! `hmtx`, `loca` (long), `maxp`, `name` and `post`; checksums and the
//! whole-font `checkSumAdjustment` follow the sfnt rules.

use anyhow::{bail, Context, Result};

use crate::config::GeneratorConfig;
use crate::font::svgfont::{SvgFont, SvgGlyph};

/// sfnt version tag for TrueType outlines.
pub const SFNT_VERSION: u32 = 0x0001_0000;

const HEAD_MAGIC: u32 = 0x5F0F_3CF5;
const CHECKSUM_ADJUSTMENT_BASE: u32 = 0xB1B0_AFBA;

// --- Big-endian buffer helpers ---

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn push_i16(buf: &mut Vec<u8>, v: i16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn pad4(buf: &mut Vec<u8>) {
    while buf.len() % 4 != 0 {
        buf.push(0);
    }
}

/// sfnt table checksum: the big-endian u32 sum over the zero-padded data.
pub fn table_checksum(data: &[u8]) -> u32 {
    let mut sum = 0u32;
    for chunk in data.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum = sum.wrapping_add(u32::from_be_bytes(word));
    }
    sum
}

/// One glyph's compiled outline plus its bounding box.
struct CompiledGlyph {
    data: Vec<u8>,
    x_min: i16,
    y_min: i16,
    x_max: i16,
    y_max: i16,
}

/// Compiles one glyph's rect list into a `glyf` entry.
///
/// Grid rows grow downward; font units grow upward, so row `r`'s top
/// edge sits at `ascent - r*cell`. Contours wind clockwise (in y-up
/// coordinates), the TrueType convention for filled outlines.
fn compile_glyph(glyph: &SvgGlyph, cell: i32, ascent: i32) -> Result<CompiledGlyph> {
    if glyph.rects.is_empty() {
        bail!("glyph '{}' has an empty outline", glyph.ch);
    }

    let mut points: Vec<(i16, i16)> = Vec::with_capacity(glyph.rects.len() * 4);
    let mut end_pts: Vec<u16> = Vec::with_capacity(glyph.rects.len());
    for rect in &glyph.rects {
        let x0 = rect.col as i32 * cell;
        let x1 = (rect.col + rect.w) as i32 * cell;
        let y_top = ascent - rect.row as i32 * cell;
        let y_bot = ascent - (rect.row + rect.h) as i32 * cell;
        for &(x, y) in &[(x0, y_top), (x1, y_top), (x1, y_bot), (x0, y_bot)] {
            let x = i16::try_from(x)
                .with_context(|| format!("glyph '{}' x coordinate overflows i16", glyph.ch))?;
            let y = i16::try_from(y)
                .with_context(|| format!("glyph '{}' y coordinate overflows i16", glyph.ch))?;
            points.push((x, y));
        }
        end_pts.push(points.len() as u16 - 1);
    }

    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

    let mut data = Vec::with_capacity(16 + points.len() * 5);
    push_i16(&mut data, glyph.rects.len() as i16); // numberOfContours
    push_i16(&mut data, x_min);
    push_i16(&mut data, y_min);
    push_i16(&mut data, x_max);
    push_i16(&mut data, y_max);
    for end in &end_pts {
        push_u16(&mut data, *end);
    }
    push_u16(&mut data, 0); // instructionLength

    // Every point on-curve, x and y as full 16-bit deltas.
    const ON_CURVE: u8 = 0x01;
    data.extend(std::iter::repeat(ON_CURVE).take(points.len()));
    let mut prev = (0i16, 0i16);
    let mut x_deltas = Vec::with_capacity(points.len() * 2);
    let mut y_deltas = Vec::with_capacity(points.len() * 2);
    for &(x, y) in &points {
        push_i16(&mut x_deltas, x.wrapping_sub(prev.0));
        push_i16(&mut y_deltas, y.wrapping_sub(prev.1));
        prev = (x, y);
    }
    data.extend_from_slice(&x_deltas);
    data.extend_from_slice(&y_deltas);
    pad4(&mut data);

    Ok(CompiledGlyph { data, x_min, y_min, x_max, y_max })
}

/// cmap format 4 segments: runs of consecutive code points mapping to
/// consecutive glyph ids.
fn cmap_segments(glyphs: &[SvgGlyph]) -> Result<Vec<(u16, u16, u16)>> {
    // (start_code, end_code, id_delta)
    let mut segments: Vec<(u16, u16, u16)> = Vec::new();
    for (idx, glyph) in glyphs.iter().enumerate() {
        let code = u16::try_from(glyph.code_point)
            .with_context(|| format!("code point U+{:X} outside the BMP", glyph.code_point))?;
        if code == 0xFFFF {
            bail!("U+FFFF cannot be mapped in a format 4 cmap");
        }
        let gid = idx as u16 + 1; // glyph 0 is .notdef
        if let Some(seg) = segments.last() {
            if code <= seg.1 {
                bail!("glyphs must be sorted by code point (U+{code:04X} out of order)");
            }
        }
        match segments.last_mut() {
            Some(seg) if seg.1 + 1 == code => seg.1 = code,
            _ => segments.push((code, code, gid.wrapping_sub(code))),
        }
    }
    // Required terminator; idDelta 1 maps 0xFFFF to glyph 0.
    segments.push((0xFFFF, 0xFFFF, 1));
    Ok(segments)
}

fn build_cmap(glyphs: &[SvgGlyph]) -> Result<Vec<u8>> {
    let segments = cmap_segments(glyphs)?;
    let seg_count = segments.len() as u16;
    let search_range = 2 * (1u16 << (15 - seg_count.leading_zeros() as u16));
    let entry_selector = 15 - seg_count.leading_zeros() as u16;
    let range_shift = 2 * seg_count - search_range;

    let mut sub = Vec::new();
    push_u16(&mut sub, 4); // format
    push_u16(&mut sub, 16 + 8 * seg_count); // length
    push_u16(&mut sub, 0); // language
    push_u16(&mut sub, seg_count * 2);
    push_u16(&mut sub, search_range);
    push_u16(&mut sub, entry_selector);
    push_u16(&mut sub, range_shift);
    for seg in &segments {
        push_u16(&mut sub, seg.1); // endCode
    }
    push_u16(&mut sub, 0); // reservedPad
    for seg in &segments {
        push_u16(&mut sub, seg.0); // startCode
    }
    for seg in &segments {
        push_u16(&mut sub, seg.2); // idDelta
    }
    for _ in &segments {
        push_u16(&mut sub, 0); // idRangeOffset
    }

    let mut cmap = Vec::new();
    push_u16(&mut cmap, 0); // version
    push_u16(&mut cmap, 1); // numTables
    push_u16(&mut cmap, 3); // platformID: Windows
    push_u16(&mut cmap, 1); // encodingID: Unicode BMP
    push_u32(&mut cmap, 12); // subtable offset
    cmap.extend_from_slice(&sub);
    Ok(cmap)
}

fn build_name(font: &SvgFont, config: &GeneratorConfig) -> Vec<u8> {
    let postscript_name: String = font.name.chars().filter(|c| !c.is_whitespace()).collect();
    let entries: Vec<(u16, String)> = vec![
        (0, config.copyright.clone()),
        (1, font.name.clone()),
        (2, "Regular".to_string()),
        (3, format!("{};1.0", postscript_name)),
        (4, font.name.clone()),
        (5, "Version 1.0".to_string()),
        (6, postscript_name),
        (10, config.description.clone()),
    ];

    let mut storage: Vec<u8> = Vec::new();
    let mut records: Vec<u8> = Vec::new();
    for (name_id, value) in &entries {
        let offset = storage.len() as u16;
        for unit in value.encode_utf16() {
            push_u16(&mut storage, unit);
        }
        let length = storage.len() as u16 - offset;
        push_u16(&mut records, 3); // platformID: Windows
        push_u16(&mut records, 1); // encodingID: Unicode BMP
        push_u16(&mut records, 0x0409); // languageID: en-US
        push_u16(&mut records, *name_id);
        push_u16(&mut records, length);
        push_u16(&mut records, offset);
    }

    let mut name = Vec::new();
    push_u16(&mut name, 0); // format
    push_u16(&mut name, entries.len() as u16);
    push_u16(&mut name, 6 + entries.len() as u16 * 12); // stringOffset
    name.extend_from_slice(&records);
    name.extend_from_slice(&storage);
    name
}

fn build_os2(font: &SvgFont, first_char: u16, last_char: u16) -> Vec<u8> {
    let mut os2 = Vec::new();
    push_u16(&mut os2, 4); // version
    push_i16(&mut os2, font.advance_width as i16); // xAvgCharWidth
    push_u16(&mut os2, 400); // usWeightClass
    push_u16(&mut os2, 5); // usWidthClass
    push_u16(&mut os2, 0); // fsType
    let subscript = font.units_per_em as i16 / 2;
    push_i16(&mut os2, subscript); // ySubscriptXSize
    push_i16(&mut os2, subscript); // ySubscriptYSize
    push_i16(&mut os2, 0); // ySubscriptXOffset
    push_i16(&mut os2, subscript / 4); // ySubscriptYOffset
    push_i16(&mut os2, subscript); // ySuperscriptXSize
    push_i16(&mut os2, subscript); // ySuperscriptYSize
    push_i16(&mut os2, 0); // ySuperscriptXOffset
    push_i16(&mut os2, subscript / 2); // ySuperscriptYOffset
    push_i16(&mut os2, font.cell_size as i16 / 4); // yStrikeoutSize
    push_i16(&mut os2, font.ascent / 2); // yStrikeoutPosition
    push_i16(&mut os2, 0); // sFamilyClass
    os2.extend_from_slice(&[0u8; 10]); // panose
    push_u32(&mut os2, 1); // ulUnicodeRange1: Basic Latin
    push_u32(&mut os2, 0);
    push_u32(&mut os2, 0);
    push_u32(&mut os2, 0);
    os2.extend_from_slice(b"BLKF"); // achVendID
    push_u16(&mut os2, 0x0040); // fsSelection: REGULAR
    push_u16(&mut os2, first_char);
    push_u16(&mut os2, last_char);
    push_i16(&mut os2, font.ascent); // sTypoAscender
    push_i16(&mut os2, -font.descent); // sTypoDescender
    push_i16(&mut os2, 0); // sTypoLineGap
    push_u16(&mut os2, font.ascent as u16); // usWinAscent
    push_u16(&mut os2, font.descent as u16); // usWinDescent
    push_u32(&mut os2, 1); // ulCodePageRange1: Latin 1
    push_u32(&mut os2, 0); // ulCodePageRange2
    push_i16(&mut os2, font.ascent / 2); // sxHeight
    push_i16(&mut os2, font.ascent); // sCapHeight
    push_u16(&mut os2, 0); // usDefaultChar
    push_u16(&mut os2, 0x20); // usBreakChar
    push_u16(&mut os2, 1); // usMaxContext
    os2
}

/// Builds the complete TrueType binary from an assembled SVG font.
pub fn build_ttf(font: &SvgFont, config: &GeneratorConfig) -> Result<Vec<u8>> {
    if font.glyphs.is_empty() {
        bail!("font has no glyphs");
    }
    let cell = font.cell_size as i32;
    let ascent = font.ascent as i32;

    // glyf + loca. Glyph 0 is an empty .notdef.
    let mut glyf: Vec<u8> = Vec::new();
    let mut loca: Vec<u8> = Vec::new();
    let mut offsets: Vec<u32> = vec![0, 0]; // .notdef is zero-length
    let mut x_max_global = 0i16;
    let mut y_min_global = 0i16;
    let mut y_max_global = 0i16;
    let mut x_min_global = 0i16;
    let mut max_contours = 0u16;
    let mut lsbs: Vec<i16> = Vec::with_capacity(font.glyphs.len());
    for glyph in &font.glyphs {
        let compiled = compile_glyph(glyph, cell, ascent)?;
        glyf.extend_from_slice(&compiled.data);
        offsets.push(glyf.len() as u32);
        lsbs.push(compiled.x_min);
        x_min_global = x_min_global.min(compiled.x_min);
        y_min_global = y_min_global.min(compiled.y_min);
        x_max_global = x_max_global.max(compiled.x_max);
        y_max_global = y_max_global.max(compiled.y_max);
        max_contours = max_contours.max(glyph.rects.len() as u16);
    }
    for offset in &offsets {
        push_u32(&mut loca, *offset);
    }

    let num_glyphs = font.glyphs.len() as u16 + 1;

    // head
    let mut head = Vec::new();
    push_u32(&mut head, 0x0001_0000); // version
    push_u32(&mut head, 0x0001_0000); // fontRevision
    push_u32(&mut head, 0); // checkSumAdjustment, patched below
    push_u32(&mut head, HEAD_MAGIC);
    push_u16(&mut head, 0x0003); // flags: baseline y=0, lsb x=0
    push_u16(&mut head, font.units_per_em);
    head.extend_from_slice(&[0u8; 8]); // created: fixed for reproducible output
    head.extend_from_slice(&[0u8; 8]); // modified
    push_i16(&mut head, x_min_global);
    push_i16(&mut head, y_min_global);
    push_i16(&mut head, x_max_global);
    push_i16(&mut head, y_max_global);
    push_u16(&mut head, 0); // macStyle
    push_u16(&mut head, 8); // lowestRecPPEM
    push_i16(&mut head, 2); // fontDirectionHint
    push_i16(&mut head, 1); // indexToLocFormat: long
    push_i16(&mut head, 0); // glyphDataFormat

    // hhea
    let mut hhea = Vec::new();
    push_u32(&mut hhea, 0x0001_0000);
    push_i16(&mut hhea, font.ascent);
    push_i16(&mut hhea, -font.descent);
    push_i16(&mut hhea, 0); // lineGap
    push_u16(&mut hhea, font.advance_width); // advanceWidthMax
    push_i16(&mut hhea, x_min_global); // minLeftSideBearing
    push_i16(&mut hhea, (font.advance_width as i32 - x_max_global as i32) as i16);
    push_i16(&mut hhea, x_max_global); // xMaxExtent
    push_i16(&mut hhea, 1); // caretSlopeRise
    push_i16(&mut hhea, 0); // caretSlopeRun
    push_i16(&mut hhea, 0); // caretOffset
    for _ in 0..4 {
        push_i16(&mut hhea, 0); // reserved
    }
    push_i16(&mut hhea, 0); // metricDataFormat
    push_u16(&mut hhea, num_glyphs); // numberOfHMetrics

    // hmtx: every glyph, .notdef included, advances the full grid. The
    // lsb must equal the glyph's xMin (head flags declare lsb at x=0),
    // and centered narrow glyphs start past column 0.
    let mut hmtx = Vec::new();
    push_u16(&mut hmtx, font.advance_width); // .notdef
    push_i16(&mut hmtx, 0);
    for lsb in &lsbs {
        push_u16(&mut hmtx, font.advance_width);
        push_i16(&mut hmtx, *lsb);
    }

    // maxp
    let mut maxp = Vec::new();
    push_u32(&mut maxp, 0x0001_0000);
    push_u16(&mut maxp, num_glyphs);
    push_u16(&mut maxp, max_contours * 4); // maxPoints
    push_u16(&mut maxp, max_contours);
    push_u16(&mut maxp, 0); // maxCompositePoints
    push_u16(&mut maxp, 0); // maxCompositeContours
    push_u16(&mut maxp, 2); // maxZones
    push_u16(&mut maxp, 0); // maxTwilightPoints
    push_u16(&mut maxp, 0); // maxStorage
    push_u16(&mut maxp, 0); // maxFunctionDefs
    push_u16(&mut maxp, 0); // maxInstructionDefs
    push_u16(&mut maxp, 0); // maxStackElements
    push_u16(&mut maxp, 0); // maxSizeOfInstructions
    push_u16(&mut maxp, 0); // maxComponentElements
    push_u16(&mut maxp, 0); // maxComponentDepth

    // post version 3: no glyph names.
    let mut post = Vec::new();
    push_u32(&mut post, 0x0003_0000);
    push_u32(&mut post, 0); // italicAngle
    push_i16(&mut post, -(font.descent / 2)); // underlinePosition
    push_i16(&mut post, font.cell_size as i16 / 4); // underlineThickness
    push_u32(&mut post, 1); // isFixedPitch
    for _ in 0..4 {
        push_u32(&mut post, 0);
    }

    let first_char = font.glyphs.first().map(|g| g.code_point as u16).unwrap_or(0);
    let last_char = font.glyphs.last().map(|g| g.code_point as u16).unwrap_or(0);

    let tables: Vec<([u8; 4], Vec<u8>)> = vec![
        (*b"OS/2", build_os2(font, first_char, last_char)),
        (*b"cmap", build_cmap(&font.glyphs)?),
        (*b"glyf", glyf),
        (*b"head", head),
        (*b"hhea", hhea),
        (*b"hmtx", hmtx),
        (*b"loca", loca),
        (*b"maxp", maxp),
        (*b"name", build_name(font, config)),
        (*b"post", post),
    ];

    Ok(assemble_sfnt(tables))
}

/// Lays out the table directory and data, then patches
/// `checkSumAdjustment` so the whole file sums to the sfnt constant.
fn assemble_sfnt(tables: Vec<([u8; 4], Vec<u8>)>) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let max_pow2 = 1u16 << (15 - num_tables.leading_zeros() as u16);
    let search_range = max_pow2 * 16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let range_shift = num_tables * 16 - search_range;

    let mut out = Vec::new();
    push_u32(&mut out, SFNT_VERSION);
    push_u16(&mut out, num_tables);
    push_u16(&mut out, search_range);
    push_u16(&mut out, entry_selector);
    push_u16(&mut out, range_shift);

    let mut offset = 12 + tables.len() as u32 * 16;
    let mut head_offset = None;
    for (tag, data) in &tables {
        let mut padded = data.clone();
        pad4(&mut padded);
        out.extend_from_slice(tag);
        push_u32(&mut out, table_checksum(&padded));
        push_u32(&mut out, offset);
        push_u32(&mut out, data.len() as u32);
        if tag == b"head" {
            head_offset = Some(offset as usize);
        }
        offset += padded.len() as u32;
    }
    for (_, data) in &tables {
        let mut padded = data.clone();
        pad4(&mut padded);
        out.extend_from_slice(&padded);
    }

    if let Some(head) = head_offset {
        let adjustment = CHECKSUM_ADJUSTMENT_BASE.wrapping_sub(table_checksum(&out));
        out[head + 8..head + 12].copy_from_slice(&adjustment.to_be_bytes());
    }
    out
}

/// A parsed sfnt table directory entry, used by the WOFF transcoders.
#[derive(Debug, Clone)]
pub struct SfntTable {
    pub tag: [u8; 4],
    pub checksum: u32,
    pub data: Vec<u8>,
}

/// Splits a TTF buffer back into its tables, preserving physical order.
pub fn parse_sfnt(ttf: &[u8]) -> Result<(u32, Vec<SfntTable>)> {
    if ttf.len() < 12 {
        bail!("sfnt buffer truncated: {} bytes", ttf.len());
    }
    let flavor = u32::from_be_bytes(ttf[0..4].try_into().unwrap());
    let num_tables = u16::from_be_bytes(ttf[4..6].try_into().unwrap()) as usize;
    let mut entries = Vec::with_capacity(num_tables);
    for i in 0..num_tables {
        let base = 12 + i * 16;
        let end = base + 16;
        if ttf.len() < end {
            bail!("sfnt table directory truncated");
        }
        let tag: [u8; 4] = ttf[base..base + 4].try_into().unwrap();
        let checksum = u32::from_be_bytes(ttf[base + 4..base + 8].try_into().unwrap());
        let offset = u32::from_be_bytes(ttf[base + 8..base + 12].try_into().unwrap()) as usize;
        let length = u32::from_be_bytes(ttf[base + 12..base + 16].try_into().unwrap()) as usize;
        if offset + length > ttf.len() {
            bail!(
                "sfnt table {} extends past end of buffer",
                String::from_utf8_lossy(&tag)
            );
        }
        entries.push((offset, SfntTable { tag, checksum, data: ttf[offset..offset + length].to_vec() }));
    }
    entries.sort_by_key(|(offset, _)| *offset);
    Ok((flavor, entries.into_iter().map(|(_, t)| t).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::FONT_GLYPHS;

    fn build_default() -> Vec<u8> {
        let config = GeneratorConfig::default();
        let glyphs = FONT_GLYPHS
            .iter()
            .map(|g| SvgGlyph::from_font_glyph(g, config.cell_size))
            .collect();
        let font = SvgFont::assemble(&config, glyphs);
        build_ttf(&font, &config).unwrap()
    }

    #[test]
    fn test_ttf_starts_with_sfnt_signature() {
        let ttf = build_default();
        assert_eq!(&ttf[0..4], &[0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_whole_font_checksum_is_balanced() {
        let ttf = build_default();
        assert_eq!(table_checksum(&ttf), CHECKSUM_ADJUSTMENT_BASE);
    }

    #[test]
    fn test_table_directory_roundtrips() {
        let ttf = build_default();
        let (flavor, tables) = parse_sfnt(&ttf).unwrap();
        assert_eq!(flavor, SFNT_VERSION);
        let tags: Vec<&[u8]> = tables.iter().map(|t| &t.tag[..]).collect();
        for required in [b"cmap", b"glyf", b"head", b"hhea", b"hmtx", b"loca", b"maxp", b"name", b"post"] {
            assert!(tags.contains(&&required[..]), "missing table {:?}", String::from_utf8_lossy(required));
        }
        for t in &tables {
            let mut padded = t.data.clone();
            if &t.tag == b"head" {
                // head's directory checksum is computed with
                // checkSumAdjustment zeroed, before the patch.
                padded[8..12].fill(0);
            }
            while padded.len() % 4 != 0 {
                padded.push(0);
            }
            assert_eq!(t.checksum, table_checksum(&padded), "checksum mismatch for {:?}", String::from_utf8_lossy(&t.tag));
        }
    }

    #[test]
    fn test_maxp_v1_table_is_32_bytes() {
        let ttf = build_default();
        let (_, tables) = parse_sfnt(&ttf).unwrap();
        let maxp = tables.iter().find(|t| &t.tag == b"maxp").unwrap();
        assert_eq!(maxp.data.len(), 32);
        assert_eq!(&maxp.data[0..4], &[0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_hmtx_lsb_matches_glyf_x_min_for_centered_glyphs() {
        let ttf = build_default();
        let (_, tables) = parse_sfnt(&ttf).unwrap();
        let hmtx = tables.iter().find(|t| &t.tag == b"hmtx").unwrap();
        // '|' sorts last (U+007C) and projects to column 1, so its
        // outline starts one cell in from x=0.
        let gid = FONT_GLYPHS.len(); // .notdef is glyph 0
        assert_eq!(FONT_GLYPHS.last().unwrap().ch, '|');
        let lsb = i16::from_be_bytes(hmtx.data[gid * 4 + 2..gid * 4 + 4].try_into().unwrap());
        assert_eq!(lsb, 128);
        // .notdef and a full-width glyph start at x=0.
        let notdef_lsb = i16::from_be_bytes(hmtx.data[2..4].try_into().unwrap());
        assert_eq!(notdef_lsb, 0);
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build_default(), build_default());
    }

    #[test]
    fn test_cmap_segments_cover_all_glyphs_consecutively() {
        let config = GeneratorConfig::default();
        let glyphs: Vec<SvgGlyph> = FONT_GLYPHS
            .iter()
            .map(|g| SvgGlyph::from_font_glyph(g, config.cell_size))
            .collect();
        let segments = cmap_segments(&glyphs).unwrap();
        // Terminator present.
        assert_eq!(segments.last().unwrap(), &(0xFFFF, 0xFFFF, 1));
        // Every code point falls in exactly one segment and maps to its
        // table position + 1.
        for (idx, g) in glyphs.iter().enumerate() {
            let code = g.code_point as u16;
            let seg = segments
                .iter()
                .find(|s| s.0 <= code && code <= s.1)
                .expect("code point not covered");
            assert_eq!(code.wrapping_add(seg.2), idx as u16 + 1);
        }
        // A-Z collapses into one segment, so the total stays small.
        assert!(segments.len() <= 8, "got {} segments", segments.len());
    }

    #[test]
    fn test_empty_glyph_outline_is_fatal() {
        let glyph = SvgGlyph {
            ch: 'X',
            code_point: 'X' as u32,
            rects: Vec::new(),
            path_data: String::new(),
        };
        assert!(compile_glyph(&glyph, 128, 896).is_err());
    }

    #[test]
    fn test_glyph_bbox_stays_inside_grid() {
        let ttf = build_default();
        let (_, tables) = parse_sfnt(&ttf).unwrap();
        let head = tables.iter().find(|t| &t.tag == b"head").unwrap();
        let x_min = i16::from_be_bytes(head.data[36..38].try_into().unwrap());
        let y_min = i16::from_be_bytes(head.data[38..40].try_into().unwrap());
        let x_max = i16::from_be_bytes(head.data[40..42].try_into().unwrap());
        let y_max = i16::from_be_bytes(head.data[42..44].try_into().unwrap());
        assert_eq!((x_min, y_min), (0, 0));
        assert_eq!(x_max, 512); // 4 columns * 128
        assert_eq!(y_max, 896); // 7 rows * 128
    }
}
