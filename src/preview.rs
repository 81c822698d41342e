use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::mask::DitherMask;
use crate::{DitherError, DitherResult};

/// Parse `#rgb` or `#rrggbb` into an RGB pixel.
pub fn parse_hex_color(value: &str) -> DitherResult<Rgb<u8>> {
    let invalid = || DitherError::InvalidColor(value.to_string());
    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok(Rgb([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ])),
        3 => {
            let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Ok(Rgb([short(0)?, short(1)?, short(2)?]))
        }
        _ => Err(invalid()),
    }
}

/// Paint a mask as a raster: background everywhere, each foreground cell as
/// a `cell_size` x `cell_size` block of `foreground`.
pub fn render_preview(
    mask: &DitherMask,
    foreground: &str,
    background: &str,
    cell_size: u32,
) -> DitherResult<RgbImage> {
    if cell_size == 0 {
        return Err(DitherError::InvalidScale(0.0));
    }
    let fg = parse_hex_color(foreground)?;
    let bg = parse_hex_color(background)?;

    let width = mask.width() as u32 * cell_size;
    let height = mask.height() as u32 * cell_size;
    let mut out = RgbImage::from_pixel(width, height, bg);

    for y in 0..mask.height() {
        for (x, _) in mask.row(y).iter().enumerate().filter(|(_, on)| **on) {
            let rect = Rect::at((x as u32 * cell_size) as i32, (y as u32 * cell_size) as i32)
                .of_size(cell_size, cell_size);
            draw_filled_rect_mut(&mut out, rect, fg);
        }
    }

    Ok(out)
}
