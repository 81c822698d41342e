//! Dithering engine: three error-diffusion kernels and two table-lookup
//! halftones behind a single [`DitherAlgorithm::dither`] entry point.

pub mod diffusion;
pub mod kernel;
pub mod pattern;
pub mod shared;
pub mod table;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use diffusion::diffuse;
pub use kernel::{ATKINSON, BoundaryPolicy, FLOYD_STEINBERG, Kernel, STUCKI};
pub use pattern::{GAP, PatternPreset, PatternTable};
pub use shared::SharedPatternTable;
pub use table::{threshold_lookup, threshold_offset};

/// The available dithering strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DitherAlgorithm {
    FloydSteinberg,
    Atkinson,
    Stucki,
    #[default]
    Ordered,
    HorizontalLine,
}

impl DitherAlgorithm {
    pub const ALL: [DitherAlgorithm; 5] = [
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::Atkinson,
        DitherAlgorithm::Stucki,
        DitherAlgorithm::Ordered,
        DitherAlgorithm::HorizontalLine,
    ];

    /// Stable identifier used on the command line and in `FromStr`.
    pub fn key(self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
            DitherAlgorithm::Atkinson => "atkinson",
            DitherAlgorithm::Stucki => "stucki",
            DitherAlgorithm::Ordered => "ordered",
            DitherAlgorithm::HorizontalLine => "horizontal-line",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "Floyd-Steinberg",
            DitherAlgorithm::Atkinson => "Atkinson",
            DitherAlgorithm::Stucki => "Stucki",
            DitherAlgorithm::Ordered => "Ordered (Bayer)",
            DitherAlgorithm::HorizontalLine => "Horizontal Line",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "Classic error diffusion with smooth gradients",
            DitherAlgorithm::Atkinson => "Mac-style dithering with higher contrast",
            DitherAlgorithm::Stucki => "Wide error diffusion with less noise",
            DitherAlgorithm::Ordered => "Pattern-based with regular grid effect",
            DitherAlgorithm::HorizontalLine => "Halftone lines, dashes and dots from an editable table",
        }
    }

    /// Diffusion kernel for the error-diffusion variants.
    pub fn kernel(self) -> Option<&'static Kernel> {
        match self {
            DitherAlgorithm::FloydSteinberg => Some(&FLOYD_STEINBERG),
            DitherAlgorithm::Atkinson => Some(&ATKINSON),
            DitherAlgorithm::Stucki => Some(&STUCKI),
            DitherAlgorithm::Ordered | DitherAlgorithm::HorizontalLine => None,
        }
    }

    /// Whether the result depends on the caller-supplied pattern table.
    pub fn uses_pattern(self) -> bool {
        matches!(self, DitherAlgorithm::HorizontalLine)
    }

    /// Dither a row-major buffer into a foreground mask of the same length.
    ///
    /// `pattern` is only read by [`DitherAlgorithm::HorizontalLine`]; the
    /// ordered variant always uses the built-in Bayer matrix. The buffer
    /// length must equal `width * height`; this is checked in debug builds
    /// only.
    pub fn dither(
        self,
        buffer: &[f32],
        width: usize,
        height: usize,
        threshold: u8,
        pattern: &PatternTable,
    ) -> Vec<bool> {
        tracing::debug!(algorithm = self.key(), width, height, threshold, "dithering");
        if let Some(kernel) = self.kernel() {
            return diffuse(
                buffer,
                width,
                height,
                threshold,
                kernel,
                BoundaryPolicy::DropOutOfBounds,
            );
        }
        match self {
            DitherAlgorithm::HorizontalLine => {
                threshold_lookup(buffer, width, height, threshold, pattern)
            }
            _ => threshold_lookup(buffer, width, height, threshold, &PatternTable::bayer_4x4()),
        }
    }

    /// Like [`dither`](Self::dither), reading the pattern from a shared
    /// table under its read guard for the whole scan.
    pub fn dither_shared(
        self,
        buffer: &[f32],
        width: usize,
        height: usize,
        threshold: u8,
        pattern: &SharedPatternTable,
    ) -> Vec<bool> {
        if self.uses_pattern() {
            pattern.with_current(|table| self.dither(buffer, width, height, threshold, table))
        } else {
            self.dither(buffer, width, height, threshold, &PatternTable::default())
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when parsing an unknown algorithm key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dither algorithm `{0}`")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for DitherAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DitherAlgorithm::ALL
            .into_iter()
            .find(|a| a.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: usize, h: usize) -> Vec<f32> {
        (0..w * h)
            .map(|i| ((i % w) as f32 / (w - 1).max(1) as f32) * 255.0)
            .collect()
    }

    mod unit {
        use super::*;

        #[test]
        fn keys_round_trip_through_from_str() {
            for algorithm in DitherAlgorithm::ALL {
                assert_eq!(algorithm.key().parse::<DitherAlgorithm>(), Ok(algorithm));
                assert_eq!(algorithm.to_string(), algorithm.key());
            }
        }

        #[test]
        fn unknown_key_is_rejected() {
            let err = "bayer".parse::<DitherAlgorithm>().unwrap_err();
            assert_eq!(err, UnknownAlgorithm("bayer".to_string()));
            assert_eq!(err.to_string(), "unknown dither algorithm `bayer`");
            let source: &dyn std::error::Error = &err;
            assert!(source.source().is_none());
        }

        #[test]
        fn diffusion_variants_run_their_kernel() {
            let buffer = gradient(7, 5);
            for algorithm in DitherAlgorithm::ALL {
                let Some(kernel) = algorithm.kernel() else {
                    continue;
                };
                let expected = diffuse(
                    &buffer,
                    7,
                    5,
                    128,
                    kernel,
                    BoundaryPolicy::DropOutOfBounds,
                );
                let actual = algorithm.dither(&buffer, 7, 5, 128, &PatternTable::default());
                assert_eq!(actual, expected, "{algorithm}");
            }
        }

        #[test]
        fn only_diffusion_variants_have_kernels() {
            let with_kernel: Vec<_> = DitherAlgorithm::ALL
                .into_iter()
                .filter(|a| a.kernel().is_some())
                .collect();
            assert_eq!(
                with_kernel,
                vec![
                    DitherAlgorithm::FloydSteinberg,
                    DitherAlgorithm::Atkinson,
                    DitherAlgorithm::Stucki
                ]
            );
        }

        #[test]
        fn all_white_is_foreground_for_every_algorithm() {
            let buffer = vec![255.0; 9 * 9];
            for algorithm in DitherAlgorithm::ALL {
                let mask = algorithm.dither(&buffer, 9, 9, 128, &PatternTable::filled(4, 0).unwrap());
                assert!(mask.iter().all(|&m| m), "{algorithm} left gaps");
            }
        }

        #[test]
        fn ordered_ignores_pattern_argument() {
            let buffer = gradient(16, 16);
            let a = DitherAlgorithm::Ordered.dither(&buffer, 16, 16, 150, &PatternTable::default());
            let b = DitherAlgorithm::Ordered.dither(
                &buffer,
                16,
                16,
                150,
                &PatternTable::filled(8, 255).unwrap(),
            );
            assert_eq!(a, b);
        }

        #[test]
        fn horizontal_line_follows_table() {
            let buffer = vec![200.0; 16];
            let gaps = PatternTable::filled(4, 255).unwrap();
            let lines = PatternTable::filled(4, 0).unwrap();
            let off = DitherAlgorithm::HorizontalLine.dither(&buffer, 4, 4, 200, &gaps);
            let on = DitherAlgorithm::HorizontalLine.dither(&buffer, 4, 4, 200, &lines);
            assert!(off.iter().all(|&m| !m));
            assert!(on.iter().all(|&m| m));
        }

        #[test]
        fn shared_dither_reads_table_current_at_call_time() {
            let shared = SharedPatternTable::default();
            let buffer = vec![200.0; 16];
            let before = DitherAlgorithm::HorizontalLine.dither_shared(&buffer, 4, 4, 128, &shared);
            shared.set(PatternTable::filled(4, 255).unwrap());
            let after = DitherAlgorithm::HorizontalLine.dither_shared(&buffer, 4, 4, 128, &shared);
            assert!(before.iter().any(|&m| m));
            assert!(after.iter().all(|&m| !m));
        }
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn algorithms() -> impl Strategy<Value = DitherAlgorithm> {
            proptest::sample::select(DitherAlgorithm::ALL.to_vec())
        }

        proptest! {
            /// dither: length is width * height and repeated calls agree
            #[test]
            fn length_and_determinism(
                algorithm in algorithms(),
                w in 1usize..20,
                h in 1usize..20,
                threshold in 1u8..=255,
            ) {
                let buffer = gradient(w, h);
                let table = PatternTable::default();
                let first = algorithm.dither(&buffer, w, h, threshold, &table);
                let second = algorithm.dither(&buffer, w, h, threshold, &table);
                prop_assert_eq!(first.len(), w * h);
                prop_assert_eq!(first, second);
            }
        }
    }
}
