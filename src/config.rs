use image::imageops::FilterType;

use crate::dither::DitherAlgorithm;

/// Options for turning an image file into a grayscale buffer.
#[derive(Debug, Clone)]
pub struct SourceSettings {
    /// Source pixels per dithered pixel; larger values give chunkier output.
    pub scale: f32,
    /// Upper bound for either side of the working buffer.
    pub max_dimension: u32,
    /// Lower bound for either side of the working buffer.
    pub min_dimension: u32,
    /// Filter used when resizing the decoded image.
    pub resize_filter: FilterType,
}

impl SourceSettings {
    /// Create new source settings with default values.
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            max_dimension: 800,
            min_dimension: 10,
            resize_filter: FilterType::Triangle,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn with_min_dimension(mut self, min_dimension: u32) -> Self {
        self.min_dimension = min_dimension;
        self
    }

    pub fn with_resize_filter(mut self, filter: FilterType) -> Self {
        self.resize_filter = filter;
        self
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Which algorithm to run and with what cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitherSettings {
    pub algorithm: DitherAlgorithm,
    /// Cutoff in `[1, 255]`; not re-validated by the engine.
    pub threshold: u8,
}

impl Default for DitherSettings {
    fn default() -> Self {
        Self {
            algorithm: DitherAlgorithm::Ordered,
            threshold: 200,
        }
    }
}
