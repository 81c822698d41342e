//! Grayscale source: decode an image file, shrink it by the pixel scale and
//! convert it to luminance.

use std::path::Path;

use crate::config::SourceSettings;
use crate::grayscale::GrayscaleBuffer;
use crate::{DitherError, DitherResult};

/// Working size for an image of `width` x `height` under `settings`.
///
/// Divides by the scale, fits the result inside `max_dimension` keeping the
/// aspect ratio, then raises each side to at least `min_dimension`.
pub fn target_dimensions(
    width: u32,
    height: u32,
    settings: &SourceSettings,
) -> DitherResult<(u32, u32)> {
    let scale = settings.scale;
    if !(scale.is_finite() && scale > 0.0) {
        return Err(DitherError::InvalidScale(scale));
    }

    let mut w = (width as f32 / scale).round();
    let mut h = (height as f32 / scale).round();

    let max = settings.max_dimension as f32;
    if w > max || h > max {
        let ratio = (max / w).min(max / h);
        w = (w * ratio).round();
        h = (h * ratio).round();
    }

    let min = settings.min_dimension;
    Ok(((w as u32).max(min), (h as u32).max(min)))
}

/// Load `path` into a grayscale buffer sized by [`target_dimensions`].
///
/// Any failure to open or decode the file is reported as
/// [`DitherError::SourceUnavailable`].
pub fn load_grayscale(path: &Path, settings: &SourceSettings) -> DitherResult<GrayscaleBuffer> {
    let decoded = image::open(path).map_err(|e| DitherError::SourceUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let rgb = decoded.to_rgb8();
    let (tw, th) = target_dimensions(rgb.width(), rgb.height(), settings)?;
    tracing::debug!(
        path = %path.display(),
        source_width = rgb.width(),
        source_height = rgb.height(),
        width = tw,
        height = th,
        "loaded source image"
    );

    let resized = if (tw, th) == rgb.dimensions() {
        rgb
    } else {
        image::imageops::resize(&rgb, tw, th, settings.resize_filter)
    };
    GrayscaleBuffer::from_rgb_image(&resized)
}
