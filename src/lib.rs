pub mod config;
pub mod dither;
pub mod error;
pub mod grayscale;
pub mod mask;
pub mod preview;
pub mod source;
pub mod vectorizer;

pub use config::{DitherSettings, SourceSettings};
pub use dither::{DitherAlgorithm, GAP, PatternPreset, PatternTable, SharedPatternTable};
pub use error::{DitherError, DitherResult};
pub use grayscale::GrayscaleBuffer;
pub use mask::DitherMask;
pub use preview::{parse_hex_color, render_preview};
pub use vectorizer::MaskVectorizer;
pub use vectorizer::run_length::{
    RunLengthSvgVectorizer, SvgOptions, estimated_size, generate_svg,
};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use image::imageops::FilterType;
use image::RgbImage;

use crate::source::load_grayscale;

/// Entry point for loading images and dithering them.
#[derive(Debug, Clone)]
pub struct Ditherator {
    /// How image files are turned into grayscale buffers.
    settings: SourceSettings,
    /// Algorithm and threshold applied unless a source overrides them.
    default_dither: DitherSettings,
    /// Table read by horizontal-line dithering; shared with any editor.
    pattern: Arc<SharedPatternTable>,
}

impl Ditherator {
    pub fn new() -> Self {
        Self {
            settings: SourceSettings::default(),
            default_dither: DitherSettings::default(),
            pattern: Arc::new(SharedPatternTable::default()),
        }
    }

    /// Replace all source settings at once.
    pub fn with_source_settings(mut self, settings: SourceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the pixel scale used when loading images.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.settings.scale = scale;
        self
    }

    /// Set the largest side of the working buffer.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.settings.max_dimension = max_dimension;
        self
    }

    /// Set the filter used when resizing loaded images.
    pub fn with_resize_filter(mut self, filter: FilterType) -> Self {
        self.settings.resize_filter = filter;
        self
    }

    pub fn with_algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.default_dither.algorithm = algorithm;
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.default_dither.threshold = threshold;
        self
    }

    /// Use an existing shared table, e.g. one also held by an editor.
    pub fn with_shared_pattern(mut self, pattern: Arc<SharedPatternTable>) -> Self {
        self.pattern = pattern;
        self
    }

    /// Get a reference to the source settings.
    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    /// The shared horizontal-line table.
    pub fn pattern(&self) -> &SharedPatternTable {
        &self.pattern
    }

    /// Load an image file and return a handle for dithering it.
    pub fn for_image(&self, image_path: impl AsRef<Path>) -> DitherResult<GrayscaleSource> {
        let buffer = load_grayscale(image_path.as_ref(), &self.settings)?;
        Ok(self.for_buffer(buffer))
    }

    /// Wrap an already prepared grayscale buffer.
    pub fn for_buffer(&self, buffer: GrayscaleBuffer) -> GrayscaleSource {
        GrayscaleSource {
            buffer: Arc::new(buffer),
            dither: self.default_dither,
            pattern: Arc::clone(&self.pattern),
        }
    }
}

impl Default for Ditherator {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded grayscale image with the dither settings to apply to it.
#[derive(Debug, Clone)]
pub struct GrayscaleSource {
    buffer: Arc<GrayscaleBuffer>,
    dither: DitherSettings,
    pattern: Arc<SharedPatternTable>,
}

impl GrayscaleSource {
    /// Get a reference to the grayscale buffer.
    pub fn buffer(&self) -> &GrayscaleBuffer {
        self.buffer.as_ref()
    }

    pub fn settings(&self) -> DitherSettings {
        self.dither
    }

    /// Override the algorithm for this source.
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.dither.algorithm = algorithm;
        self
    }

    /// Override the threshold for this source.
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.dither.threshold = threshold;
        self
    }

    /// Run the configured algorithm. Horizontal-line reads the shared table
    /// as it is at this moment.
    pub fn dither(&self) -> DitherHandle {
        let DitherSettings {
            algorithm,
            threshold,
        } = self.dither;
        if threshold == 0 {
            tracing::warn!("threshold 0 is outside the usual 1-255 range");
        }
        let buffer = self.buffer.as_ref();
        let bits = algorithm.dither_shared(
            buffer.as_slice(),
            buffer.width(),
            buffer.height(),
            threshold,
            &self.pattern,
        );
        DitherHandle {
            mask: DitherMask::from_parts(bits, buffer.width(), buffer.height()),
            settings: self.dither,
        }
    }
}

/// The result of one dither run, from which all artefacts are derived.
#[derive(Debug, Clone)]
pub struct DitherHandle {
    mask: DitherMask,
    settings: DitherSettings,
}

impl DitherHandle {
    /// Get a reference to the mask.
    pub fn mask(&self) -> &DitherMask {
        &self.mask
    }

    /// Consume the handle and return the mask.
    pub fn into_mask(self) -> DitherMask {
        self.mask
    }

    /// Algorithm and threshold that produced this mask.
    pub fn settings(&self) -> DitherSettings {
        self.settings
    }

    /// Encode the mask as a run-length SVG document.
    pub fn svg(&self, options: &SvgOptions) -> DitherResult<String> {
        self.trace(&RunLengthSvgVectorizer, options)
    }

    /// Trace the mask using the specified vectorizer and options.
    pub fn trace<V>(&self, vectorizer: &V, options: &V::Options) -> DitherResult<V::Output>
    where
        V: MaskVectorizer,
    {
        vectorizer.vectorize(&self.mask, options)
    }

    /// Render a two-color raster preview.
    pub fn preview(
        &self,
        foreground: &str,
        background: &str,
        cell_size: u32,
    ) -> DitherResult<RgbImage> {
        render_preview(&self.mask, foreground, background, cell_size)
    }

    /// Write the SVG document to `path`, returning it.
    pub fn save_svg(&self, path: impl AsRef<Path>, options: &SvgOptions) -> DitherResult<String> {
        let svg = self.svg(options)?;
        fs::write(path, &svg)?;
        Ok(svg)
    }

    /// Save a raster preview to `path`; the format follows the extension.
    pub fn save_preview(
        &self,
        path: impl AsRef<Path>,
        foreground: &str,
        background: &str,
        cell_size: u32,
    ) -> DitherResult<()> {
        self.preview(foreground, background, cell_size)?.save(path)?;
        Ok(())
    }
}
