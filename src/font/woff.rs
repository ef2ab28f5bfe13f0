// src/font/woff.rs

//! Stage 4a: wraps the TTF buffer in a WOFF (version 1) container.
//!
//! Each sfnt table is zlib-compressed independently; a table that does
//! not shrink is stored as-is, per the WOFF recommendation. The output
//! is a strictly size-reducing re-container of the TTF, never a second
//! source of truth.

use anyhow::{Context, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

use crate::font::ttf::parse_sfnt;

/// WOFF version 1 signature, `wOFF`.
pub const WOFF_SIGNATURE: [u8; 4] = *b"wOFF";

const HEADER_LEN: u32 = 44;
const DIR_ENTRY_LEN: u32 = 20;

fn zlib_compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).context("zlib compression failed")?;
    encoder.finish().context("zlib finalization failed")
}

/// Transcodes a TTF buffer into a WOFF1 container.
pub fn ttf_to_woff(ttf: &[u8]) -> Result<Vec<u8>> {
    let (flavor, tables) = parse_sfnt(ttf).context("failed to parse TTF for WOFF packing")?;

    struct Packed {
        tag: [u8; 4],
        checksum: u32,
        orig_len: u32,
        data: Vec<u8>,
    }

    let mut packed = Vec::with_capacity(tables.len());
    for table in tables {
        let compressed = zlib_compress(&table.data)?;
        let data = if compressed.len() < table.data.len() {
            compressed
        } else {
            table.data.clone()
        };
        packed.push(Packed {
            tag: table.tag,
            checksum: table.checksum,
            orig_len: table.data.len() as u32,
            data,
        });
    }

    let num_tables = packed.len() as u32;
    // Size the sfnt the tables would unpack to (directory + padded data).
    let total_sfnt_size: u32 = 12
        + num_tables * 16
        + packed.iter().map(|t| (t.orig_len + 3) & !3).sum::<u32>();

    let mut total_len = HEADER_LEN + num_tables * DIR_ENTRY_LEN;
    let mut offsets = Vec::with_capacity(packed.len());
    for t in &packed {
        offsets.push(total_len);
        total_len += (t.data.len() as u32 + 3) & !3;
    }

    let mut out = Vec::with_capacity(total_len as usize);
    out.extend_from_slice(&WOFF_SIGNATURE);
    out.extend_from_slice(&flavor.to_be_bytes());
    out.extend_from_slice(&total_len.to_be_bytes());
    out.extend_from_slice(&(num_tables as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // reserved
    out.extend_from_slice(&total_sfnt_size.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // majorVersion
    out.extend_from_slice(&0u16.to_be_bytes()); // minorVersion
    out.extend_from_slice(&0u32.to_be_bytes()); // metaOffset
    out.extend_from_slice(&0u32.to_be_bytes()); // metaLength
    out.extend_from_slice(&0u32.to_be_bytes()); // metaOrigLength
    out.extend_from_slice(&0u32.to_be_bytes()); // privOffset
    out.extend_from_slice(&0u32.to_be_bytes()); // privLength

    for (t, offset) in packed.iter().zip(&offsets) {
        out.extend_from_slice(&t.tag);
        out.extend_from_slice(&offset.to_be_bytes());
        out.extend_from_slice(&(t.data.len() as u32).to_be_bytes());
        out.extend_from_slice(&t.orig_len.to_be_bytes());
        out.extend_from_slice(&t.checksum.to_be_bytes());
    }
    for t in &packed {
        out.extend_from_slice(&t.data);
        while out.len() % 4 != 0 {
            out.push(0);
        }
    }

    debug_assert_eq!(out.len() as u32, total_len);
    Ok(out)
}
