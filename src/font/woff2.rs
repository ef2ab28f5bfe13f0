// src/font/woff2.rs

//! Stage 4b: wraps the TTF buffer in a WOFF2 container.
//!
//! Derived from the same TTF buffer as the WOFF stage, never chained
//! through it. All tables are carried with the null transform (version 3
//! for `glyf`/`loca`, version 0 for everything else), so the payload is
//! the verbatim table data concatenated and Brotli-compressed as a
//! single stream. That forgoes the optional glyf re-encoding but stays a
//! conformant, strictly smaller container for a font this size.

use anyhow::{Context, Result};

use crate::font::ttf::parse_sfnt;

/// WOFF2 signature, `wOF2`.
pub const WOFF2_SIGNATURE: [u8; 4] = *b"wOF2";

const HEADER_LEN: usize = 48;

/// The WOFF2 known-table-tags array (first 25 entries; index 63 means an
/// explicit tag follows the flags byte).
const KNOWN_TAGS: [&[u8; 4]; 25] = [
    b"cmap", b"head", b"hhea", b"hmtx", b"maxp", b"name", b"OS/2", b"post", b"cvt ", b"fpgm",
    b"glyf", b"loca", b"prep", b"CFF ", b"VORG", b"EBDT", b"EBLC", b"gasp", b"hdmx", b"kern",
    b"LTSH", b"PCLT", b"VDMX", b"vhea", b"vmtx",
];

/// Encodes a length as UIntBase128 (7 bits per byte, MSB continuation).
fn push_base128(out: &mut Vec<u8>, mut value: u32) {
    let mut bytes = [0u8; 5];
    let mut len = 0;
    loop {
        bytes[len] = (value & 0x7F) as u8;
        len += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        let mut b = bytes[i];
        if i != 0 {
            b |= 0x80;
        }
        out.push(b);
    }
}

fn brotli_compress(data: &[u8]) -> Result<Vec<u8>> {
    let params = brotli::enc::BrotliEncoderParams {
        quality: 11,
        lgwin: 22,
        ..Default::default()
    };
    let mut out = Vec::new();
    brotli::enc::BrotliCompress(&mut &data[..], &mut out, &params)
        .context("brotli compression failed")?;
    Ok(out)
}

/// Transcodes a TTF buffer into a WOFF2 container.
pub fn ttf_to_woff2(ttf: &[u8]) -> Result<Vec<u8>> {
    let (flavor, tables) = parse_sfnt(ttf).context("failed to parse TTF for WOFF2 packing")?;

    // Table directory + concatenated uncompressed payload.
    let mut directory = Vec::new();
    let mut payload = Vec::new();
    for table in &tables {
        let known = KNOWN_TAGS.iter().position(|t| **t == table.tag);
        // Null transform: version 3 for glyf/loca, version 0 otherwise.
        let transform: u8 = match &table.tag {
            b"glyf" | b"loca" => 3,
            _ => 0,
        };
        let index = known.unwrap_or(63) as u8;
        directory.push(index | (transform << 6));
        if known.is_none() {
            directory.extend_from_slice(&table.tag);
        }
        push_base128(&mut directory, table.data.len() as u32);
        // No transformLength: the null transform leaves data untouched.
        payload.extend_from_slice(&table.data);
    }

    let compressed = brotli_compress(&payload)?;

    let num_tables = tables.len() as u16;
    let total_sfnt_size: u32 = 12
        + num_tables as u32 * 16
        + tables
            .iter()
            .map(|t| (t.data.len() as u32 + 3) & !3)
            .sum::<u32>();

    let unpadded_len = HEADER_LEN + directory.len() + compressed.len();
    let total_len = (unpadded_len + 3) & !3;

    let mut out = Vec::with_capacity(total_len);
    out.extend_from_slice(&WOFF2_SIGNATURE);
    out.extend_from_slice(&flavor.to_be_bytes());
    out.extend_from_slice(&(total_len as u32).to_be_bytes());
    out.extend_from_slice(&num_tables.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // reserved
    out.extend_from_slice(&total_sfnt_size.to_be_bytes());
    out.extend_from_slice(&(compressed.len() as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // majorVersion
    out.extend_from_slice(&0u16.to_be_bytes()); // minorVersion
    out.extend_from_slice(&0u32.to_be_bytes()); // metaOffset
    out.extend_from_slice(&0u32.to_be_bytes()); // metaLength
    out.extend_from_slice(&0u32.to_be_bytes()); // metaOrigLength
    out.extend_from_slice(&0u32.to_be_bytes()); // privOffset
    out.extend_from_slice(&0u32.to_be_bytes()); // privLength
    debug_assert_eq!(out.len(), HEADER_LEN);
    out.extend_from_slice(&directory);
    out.extend_from_slice(&compressed);
    while out.len() % 4 != 0 {
        out.push(0);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::font::svgfont::{SvgFont, SvgGlyph};
    use crate::font::ttf::build_ttf;
    use crate::glyphs::FONT_GLYPHS;

    fn build_ttf_default() -> Vec<u8> {
        let config = GeneratorConfig::default();
        let glyphs = FONT_GLYPHS
            .iter()
            .map(|g| SvgGlyph::from_font_glyph(g, config.cell_size))
            .collect();
        build_ttf(&SvgFont::assemble(&config, glyphs), &config).unwrap()
    }

    #[test]
    fn test_woff2_signature() {
        let woff2 = ttf_to_woff2(&build_ttf_default()).unwrap();
        assert_eq!(&woff2[0..4], &[0x77, 0x4F, 0x46, 0x32]);
        assert_eq!(&woff2[4..8], &[0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_declared_length_matches_buffer() {
        let woff2 = ttf_to_woff2(&build_ttf_default()).unwrap();
        let declared = u32::from_be_bytes(woff2[8..12].try_into().unwrap());
        assert_eq!(declared as usize, woff2.len());
    }

    #[test]
    fn test_woff2_is_smaller_than_ttf() {
        let ttf = build_ttf_default();
        let woff2 = ttf_to_woff2(&ttf).unwrap();
        assert!(woff2.len() < ttf.len());
    }

    #[test]
    fn test_payload_decompresses_to_concatenated_tables() {
        let ttf = build_ttf_default();
        let (_, tables) = parse_sfnt(&ttf).unwrap();
        let woff2 = ttf_to_woff2(&ttf).unwrap();
        let compressed_len =
            u32::from_be_bytes(woff2[20..24].try_into().unwrap()) as usize;
        let padding = woff2.len() - ((HEADER_LEN + directory_len(&woff2)) + compressed_len);
        assert!(padding < 4);
        let stream = &woff2[HEADER_LEN + directory_len(&woff2)..woff2.len() - padding];
        let mut restored = Vec::new();
        brotli::BrotliDecompress(&mut &stream[..], &mut restored).unwrap();
        let expected: Vec<u8> = tables.iter().flat_map(|t| t.data.clone()).collect();
        assert_eq!(restored, expected);
    }

    #[test]
    fn test_base128_encoding() {
        let enc = |v: u32| {
            let mut out = Vec::new();
            push_base128(&mut out, v);
            out
        };
        assert_eq!(enc(0), vec![0]);
        assert_eq!(enc(0x7F), vec![0x7F]);
        assert_eq!(enc(0x80), vec![0x81, 0x00]);
        assert_eq!(enc(0x3FFF), vec![0xFF, 0x7F]);
        assert_eq!(enc(0x4000), vec![0x81, 0x80, 0x00]);
    }

    #[test]
    fn test_directory_flags_mark_null_transforms() {
        let woff2 = ttf_to_woff2(&build_ttf_default()).unwrap();
        let mut pos = HEADER_LEN;
        let num_tables = u16::from_be_bytes(woff2[12..14].try_into().unwrap());
        let mut saw_glyf = false;
        for _ in 0..num_tables {
            let flags = woff2[pos];
            pos += 1;
            if flags & 0x3F == 0x3F {
                pos += 4;
            }
            if flags & 0x3F == 10 {
                // glyf: null transform is version 3.
                assert_eq!(flags >> 6, 3);
                saw_glyf = true;
            }
            pos += base128_len(&woff2[pos..]);
        }
        assert!(saw_glyf);
    }

    // Walks the table directory to find its byte length.
    fn directory_len(woff2: &[u8]) -> usize {
        let num_tables = u16::from_be_bytes(woff2[12..14].try_into().unwrap());
        let mut pos = HEADER_LEN;
        for _ in 0..num_tables {
            let flags = woff2[pos];
            pos += 1;
            if flags & 0x3F == 0x3F {
                pos += 4;
            }
            pos += base128_len(&woff2[pos..]);
        }
        pos - HEADER_LEN
    }

    fn base128_len(bytes: &[u8]) -> usize {
        let mut len = 0;
        for b in bytes {
            len += 1;
            if b & 0x80 == 0 {
                break;
            }
        }
        len
    }
}
