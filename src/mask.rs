use crate::{DitherError, DitherResult};

/// A two-tone pixel mask, row-major, `true` meaning foreground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitherMask {
    bits: Vec<bool>,
    width: usize,
    height: usize,
}

impl DitherMask {
    /// Wrap a mask, checking that `bits.len() == width * height`.
    pub fn new(bits: Vec<bool>, width: usize, height: usize) -> DitherResult<Self> {
        let expected = width * height;
        if width == 0 || height == 0 || bits.len() != expected {
            return Err(DitherError::BufferSize {
                expected,
                found: bits.len(),
            });
        }
        Ok(Self::from_parts(bits, width, height))
    }

    /// Construct from engine output whose length is already known to match.
    pub(crate) fn from_parts(bits: Vec<bool>, width: usize, height: usize) -> Self {
        debug_assert_eq!(bits.len(), width * height);
        Self {
            bits,
            width,
            height,
        }
    }

    /// A mask where every cell has the same value.
    pub fn filled(width: usize, height: usize, foreground: bool) -> DitherResult<Self> {
        Self::new(vec![foreground; width * height], width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn into_vec(self) -> Vec<bool> {
        self.bits
    }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        (x < self.width && y < self.height).then(|| self.bits[y * self.width + x])
    }

    /// One row of the mask.
    pub fn row(&self, y: usize) -> &[bool] {
        &self.bits[y * self.width..(y + 1) * self.width]
    }

    pub fn foreground_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Share of foreground cells in `[0, 1]`.
    pub fn foreground_fraction(&self) -> f64 {
        self.foreground_count() as f64 / self.bits.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod new {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn accepts_matching_length() {
                let mask = DitherMask::new(vec![true, false, false, true], 2, 2).unwrap();
                assert_eq!(mask.get(1, 1), Some(true));
                assert_eq!(mask.get(1, 0), Some(false));
                assert_eq!(mask.get(2, 0), None);
            }

            #[test]
            fn rejects_mismatched_length() {
                assert!(matches!(
                    DitherMask::new(vec![true; 3], 2, 2),
                    Err(DitherError::BufferSize {
                        expected: 4,
                        found: 3
                    })
                ));
            }

            #[test]
            fn rows_slice_correctly() {
                let mask = DitherMask::new(vec![true, true, false, false, true, false], 3, 2).unwrap();
                assert_eq!(mask.row(0), &[true, true, false]);
                assert_eq!(mask.row(1), &[false, true, false]);
            }
        }
    }

    mod foreground_fraction {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn empty_and_full() {
                assert_eq!(DitherMask::filled(3, 3, false).unwrap().foreground_fraction(), 0.0);
                assert_eq!(DitherMask::filled(3, 3, true).unwrap().foreground_fraction(), 1.0);
            }

            #[test]
            fn quarter() {
                let mask = DitherMask::new(vec![true, false, false, false], 2, 2).unwrap();
                assert_eq!(mask.foreground_count(), 1);
                assert_eq!(mask.foreground_fraction(), 0.25);
            }
        }

        mod prop {
            use super::*;
            use proptest::prelude::*;

            proptest! {
                /// foreground_fraction: always within [0, 1] and consistent with the count
                #[test]
                fn within_unit_range(bits in proptest::collection::vec(any::<bool>(), 1..200)) {
                    let len = bits.len();
                    let mask = DitherMask::new(bits, len, 1).unwrap();
                    let fraction = mask.foreground_fraction();
                    prop_assert!((0.0..=1.0).contains(&fraction));
                    prop_assert_eq!((fraction * len as f64).round() as usize, mask.foreground_count());
                }
            }
        }
    }
}
