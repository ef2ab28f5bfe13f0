// src/lib.rs

//! blockfont: a pixel-art block font toolkit.
//!
//! One immutable glyph table drives two independent consumers that must
//! render every character identically:
//!
//! ```text
//!               ┌─> block layout ─> blocky SVG rendering (runtime)
//! glyph table ──┤
//!               └─> font assembly ─> TTF / WOFF / WOFF2 (build time)
//! ```
//!
//! See [`render::blocky_text_to_svg`] for the rendering entry point and
//! [`font::generate`] for the font pipeline.

pub mod config;
pub mod font;
pub mod glyphs;
pub mod layout;
pub mod optimize;
pub mod path;
pub mod render;
pub mod validate;

pub use config::GeneratorConfig;
pub use layout::{layout, Block, Layout, RenderOptions, Theme};
pub use render::{blocky_text_to_svg, convert_text_to_svg, TextOptions};

#[cfg(test)]
mod tests {
    use super::*;

    // The two consumers of the glyph table must agree on the supported
    // character set: everything the table defines is renderable, and
    // everything renderable is in the font.
    #[test]
    fn test_glyph_table_round_trip_consistency() {
        let opts = RenderOptions::default();
        let empty = blocky_text_to_svg("", &opts);
        for ch in glyphs::supported_characters() {
            let svg = blocky_text_to_svg(&ch.to_string(), &opts);
            assert_ne!(svg, empty, "character {ch:?} rendered as empty");
        }
        assert_eq!(
            glyphs::supported_characters().len(),
            glyphs::FONT_GLYPHS.len()
        );
        // And nothing outside the table sneaks in.
        for ch in ['a', '0', ' ', '@', '\n'] {
            let svg = blocky_text_to_svg(&ch.to_string(), &opts);
            assert!(!svg.contains("<path"), "character {ch:?} rendered blocks");
        }
    }
}
