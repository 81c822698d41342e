use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with [`DitherError`].
pub type DitherResult<T> = std::result::Result<T, DitherError>;

/// Error types that can occur around the dithering pipeline.
///
/// The dither and encode functions themselves never fail; these variants
/// cover loading the grayscale source, validating buffers and pattern
/// tables, and writing artefacts.
#[derive(Debug, Error)]
pub enum DitherError {
    /// Image encoding error while saving a preview.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
    /// File system I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Pattern table (de)serialization error.
    #[error("Pattern table JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
    /// The source image could not be opened or decoded.
    #[error("Source image {} is unavailable: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },
    /// Buffer length does not match `width * height`.
    #[error("Buffer holds {found} values but {expected} were expected")]
    BufferSize { expected: usize, found: usize },
    /// Pattern table has an unsupported shape.
    #[error("Invalid pattern table: {0}")]
    InvalidPattern(String),
    /// Color string is not a `#rgb` or `#rrggbb` hex value.
    #[error("Invalid color `{0}`, expected #rgb or #rrggbb")]
    InvalidColor(String),
    /// Scale factor is zero, negative or not finite.
    #[error("Scale must be a positive number, got {0}")]
    InvalidScale(f32),
}
