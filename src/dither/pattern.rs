use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{DitherError, DitherResult};

/// Cell value that never yields a foreground pixel, whatever the threshold.
pub const GAP: u8 = 255;

/// Table sizes accepted from the interchange format.
pub const SUPPORTED_SIZES: [usize; 2] = [4, 8];

/// 4x4 Bayer matrix scaled to 0-255. Fixed; used by ordered dithering.
pub const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 128, 32, 160],
    [192, 64, 224, 96],
    [48, 176, 16, 144],
    [240, 112, 208, 80],
];

/// Default horizontal-line table: 1px lines on even rows, gaps on odd rows.
/// Row 0 catches light areas, row 2 dark ones.
pub const HORIZONTAL_LINE_4X4: [[u8; 4]; 4] = [
    [160, 144, 152, 136],
    [GAP, GAP, GAP, GAP],
    [64, 48, 56, 40],
    [GAP, GAP, GAP, GAP],
];

/// Denser 8x8 alternative: line rows interleaved with dot rows so the
/// pattern moves from sparse dots in highlights to solid lines in shadows.
pub const HORIZONTAL_LINE_8X8: [[u8; 8]; 8] = [
    [200, 184, 192, 176, 204, 188, 196, 180],
    [GAP, GAP, GAP, GAP, GAP, GAP, GAP, GAP],
    [GAP, 120, GAP, 112, GAP, 124, GAP, 116],
    [GAP, GAP, GAP, GAP, GAP, GAP, GAP, GAP],
    [88, 72, 80, 64, 92, 76, 84, 68],
    [GAP, GAP, GAP, GAP, GAP, GAP, GAP, GAP],
    [GAP, 24, GAP, 16, GAP, 28, GAP, 20],
    [GAP, GAP, GAP, GAP, GAP, GAP, GAP, GAP],
];

/// A square N x N grid of per-cell thresholds tiled across an image by
/// `(y mod N, x mod N)`.
///
/// Serialized as a JSON array of rows. Construction rejects non-square
/// grids and sizes outside [`SUPPORTED_SIZES`], so lookups never wrap into
/// a mismatched shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct PatternTable {
    cells: Array2<u8>,
}

impl PatternTable {
    /// Wrap an existing array after checking its shape.
    pub fn new(cells: Array2<u8>) -> DitherResult<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols {
            return Err(DitherError::InvalidPattern(format!(
                "table must be square, got {rows}x{cols}"
            )));
        }
        if !SUPPORTED_SIZES.contains(&rows) {
            return Err(DitherError::InvalidPattern(format!(
                "table size must be one of {SUPPORTED_SIZES:?}, got {rows}"
            )));
        }
        Ok(Self { cells })
    }

    /// Build a table from row-major nested rows.
    pub fn from_rows(rows: &[Vec<u8>]) -> DitherResult<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(DitherError::InvalidPattern(format!(
                "row {i} has {} cells, expected {n}",
                row.len()
            )));
        }
        let flat: Vec<u8> = rows.iter().flatten().copied().collect();
        let cells = Array2::from_shape_vec((n, n), flat)
            .map_err(|e| DitherError::InvalidPattern(e.to_string()))?;
        Self::new(cells)
    }

    /// Parse the JSON interchange format.
    ///
    /// Malformed JSON and cells outside `0..=255` fail with
    /// [`DitherError::Json`]; a well-formed grid of the wrong shape fails
    /// with [`DitherError::InvalidPattern`].
    pub fn from_json(json: &str) -> DitherResult<Self> {
        let rows: Vec<Vec<u8>> = serde_json::from_str(json)?;
        Self::from_rows(&rows)
    }

    /// A table with every cell set to `value`.
    pub fn filled(size: usize, value: u8) -> DitherResult<Self> {
        Self::new(Array2::from_elem((size, size), value))
    }

    fn from_fixed<const N: usize>(rows: &[[u8; N]; N]) -> Self {
        Self {
            cells: Array2::from_shape_fn((N, N), |(r, c)| rows[r][c]),
        }
    }

    pub fn bayer_4x4() -> Self {
        Self::from_fixed(&BAYER_4X4)
    }

    pub fn horizontal_line() -> Self {
        Self::from_fixed(&HORIZONTAL_LINE_4X4)
    }

    pub fn horizontal_line_8x8() -> Self {
        Self::from_fixed(&HORIZONTAL_LINE_8X8)
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    /// Threshold at `(row, col)`, both taken modulo N.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        let n = self.size();
        self.cells[[row % n, col % n]]
    }

    pub fn is_gap(&self, row: usize, col: usize) -> bool {
        self.cell(row, col) == GAP
    }

    /// Copy of the cells as nested rows.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    pub fn as_array(&self) -> &Array2<u8> {
        &self.cells
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::horizontal_line()
    }
}

impl TryFrom<Vec<Vec<u8>>> for PatternTable {
    type Error = DitherError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<PatternTable> for Vec<Vec<u8>> {
    fn from(table: PatternTable) -> Self {
        table.rows()
    }
}

/// Built-in tables selectable for horizontal-line dithering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatternPreset {
    #[default]
    Lines4,
    Lines8,
}

impl PatternPreset {
    pub fn table(self) -> PatternTable {
        match self {
            PatternPreset::Lines4 => PatternTable::horizontal_line(),
            PatternPreset::Lines8 => PatternTable::horizontal_line_8x8(),
        }
    }
}
