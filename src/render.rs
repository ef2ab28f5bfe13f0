// src/render.rs

//! The public rendering API: arbitrary text to a standalone SVG document.
//!
//! Two flavors:
//! - [`blocky_text_to_svg`] draws the text itself as positioned blocks
//!   (pixel-art, no font file needed), and
//! - [`convert_text_to_svg`] emits a `<text>` element that references the
//!   distributed font family, for consumers who load the font files.
//!
//! Neither function can fail: unsupported characters are dropped by the
//! layout engine and everything user-supplied is XML-escaped.

use crate::layout::{layout, RenderOptions};
use crate::path::fmt_coord;

/// Renders `text` as a blocky pixel-art SVG document.
///
/// Each laid-out block becomes one `<path>`; with `optimize` enabled,
/// adjacent same-fill blocks are merged first, so the optimized document
/// never has more paths than the unoptimized one. An empty (or entirely
/// unsupported) input yields a valid zero-width document.
pub fn blocky_text_to_svg(text: &str, opts: &RenderOptions) -> String {
    let l = layout(text, opts);
    let w = fmt_coord(l.width);
    let h = fmt_coord(l.height);

    let mut svg = String::with_capacity(128 + l.blocks.len() * 72);
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    ));
    for b in &l.blocks {
        let (x, y) = (fmt_coord(b.x), fmt_coord(b.y));
        let (rx, by) = (fmt_coord(b.x + b.width), fmt_coord(b.y + b.height));
        svg.push_str(&format!(
            "<path fill=\"{fill}\" d=\"M{x},{y} L{rx},{y} L{rx},{by} L{x},{by} Z\"/>",
            fill = b.fill,
        ));
    }
    svg.push_str("</svg>");
    svg
}

/// Options for [`convert_text_to_svg`].
#[derive(Debug, Clone)]
pub struct TextOptions {
    pub font_size: f64,
    pub color: String,
    pub font_family: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub role: Option<String>,
    pub aria_label: Option<String>,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            font_size: 48.0,
            color: "#000".to_string(),
            font_family: "OpenCodeLogo".to_string(),
            width: None,
            height: None,
            role: None,
            aria_label: None,
        }
    }
}

/// Renders `text` as an SVG `<text>` element using the distributed font
/// family. The text and all string options are XML-escaped.
pub fn convert_text_to_svg(text: &str, opts: &TextOptions) -> String {
    let mut svg = String::from("<svg xmlns=\"http://www.w3.org/2000/svg\"");
    if let Some(w) = opts.width {
        svg.push_str(&format!(" width=\"{}\"", fmt_coord(w)));
    }
    if let Some(h) = opts.height {
        svg.push_str(&format!(" height=\"{}\"", fmt_coord(h)));
    }
    if let Some(role) = &opts.role {
        svg.push_str(&format!(" role=\"{}\"", escape_xml(role)));
    }
    if let Some(label) = &opts.aria_label {
        svg.push_str(&format!(" aria-label=\"{}\"", escape_xml(label)));
    }
    svg.push('>');
    svg.push_str(&format!(
        "<text x=\"0\" y=\"{y}\" font-family=\"{family}\" font-size=\"{size}\" fill=\"{color}\">{body}</text>",
        y = fmt_coord(opts.font_size),
        family = escape_xml(&opts.font_family),
        size = fmt_coord(opts.font_size),
        color = escape_xml(&opts.color),
        body = escape_xml(text),
    ));
    svg.push_str("</svg>");
    svg
}

/// Escapes the five XML special characters.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
