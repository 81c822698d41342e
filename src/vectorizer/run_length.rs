use std::fmt::Write as _;

use crate::mask::DitherMask;
use crate::{DitherError, DitherResult};

use super::MaskVectorizer;

/// Options for encoding a mask as SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Fill of the full-canvas base rectangle (the mask's `true` cells).
    pub foreground_color: String,
    /// Fill of the run rectangles (the mask's `false` cells).
    pub background_color: String,
    /// Output units per mask cell. Must be positive.
    pub pixel_size: f32,
}

impl SvgOptions {
    pub fn new(foreground_color: impl Into<String>, background_color: impl Into<String>) -> Self {
        Self {
            foreground_color: foreground_color.into(),
            background_color: background_color.into(),
            pixel_size: 1.0,
        }
    }

    pub fn with_pixel_size(mut self, pixel_size: f32) -> Self {
        self.pixel_size = pixel_size;
        self
    }
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self::new("#ffffff", "#000000")
    }
}

/// A horizontal run of background cells, in mask coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: usize,
    pub y: usize,
    pub len: usize,
}

/// Collect maximal horizontal runs of `false` cells, row by row.
pub fn background_runs(mask: &[bool], width: usize, height: usize) -> Vec<Run> {
    debug_assert_eq!(mask.len(), width * height, "mask length mismatch");

    let mut runs = Vec::new();
    for y in 0..height {
        let row = &mask[y * width..(y + 1) * width];
        let mut x = 0;
        while x < width {
            if row[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < width && !row[x] {
                x += 1;
            }
            runs.push(Run {
                x: start,
                y,
                len: x - start,
            });
        }
    }
    runs
}

/// Encode a mask as an SVG document.
///
/// The base layer is one rectangle covering the canvas in the foreground
/// color; every background run is painted on top in the background color.
/// Mostly-foreground masks therefore need few rectangles, and the emitted
/// shapes are exactly the areas to remove when cutting or engraving.
/// Colors are written verbatim.
pub fn generate_svg(mask: &[bool], width: usize, height: usize, options: &SvgOptions) -> String {
    let s = options.pixel_size;
    let svg_width = width as f32 * s;
    let svg_height = height as f32 * s;
    let runs = background_runs(mask, width, height);

    let mut out = String::with_capacity(256 + runs.len() * 48);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {svg_width} {svg_height}\" width=\"{svg_width}\" height=\"{svg_height}\">"
    );
    let _ = writeln!(
        out,
        "  <rect x=\"0\" y=\"0\" width=\"{svg_width}\" height=\"{svg_height}\" fill=\"{}\"/>",
        options.foreground_color
    );
    let _ = writeln!(out, "  <g fill=\"{}\">", options.background_color);
    for run in &runs {
        let _ = writeln!(
            out,
            "    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{s}\"/>",
            run.x as f32 * s,
            run.y as f32 * s,
            run.len as f32 * s,
        );
    }
    out.push_str("  </g>\n</svg>");

    tracing::debug!(
        width,
        height,
        rects = runs.len(),
        bytes = out.len(),
        "encoded svg"
    );
    out
}

/// Human-readable size of an encoded document, e.g. `"12.3 KB"`.
pub fn estimated_size(svg: &str) -> String {
    let bytes = svg.len();
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Run-length SVG vectorizer implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLengthSvgVectorizer;

impl MaskVectorizer for RunLengthSvgVectorizer {
    type Options = SvgOptions;
    type Output = String;

    fn vectorize(&self, mask: &DitherMask, options: &Self::Options) -> DitherResult<Self::Output> {
        let s = options.pixel_size;
        if !(s.is_finite() && s > 0.0) {
            return Err(DitherError::InvalidScale(s));
        }
        Ok(generate_svg(
            mask.as_slice(),
            mask.width(),
            mask.height(),
            options,
        ))
    }
}
