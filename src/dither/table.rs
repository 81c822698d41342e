use super::pattern::{GAP, PatternTable};

/// Signed shift applied to every table cell: threshold 128 is neutral,
/// each step moves the cutoff by half a level.
#[inline]
pub fn threshold_offset(threshold: u8) -> f32 {
    (f32::from(threshold) - 128.0) * 0.5
}

/// Single-pass table lookup dither.
///
/// A pixel is foreground iff its value is strictly greater than
/// `table[y mod N][x mod N] + threshold_offset(threshold)`. Cells holding
/// [`GAP`] are background for every threshold, including those whose
/// offset is negative.
pub fn threshold_lookup(
    buffer: &[f32],
    width: usize,
    height: usize,
    threshold: u8,
    table: &PatternTable,
) -> Vec<bool> {
    debug_assert_eq!(buffer.len(), width * height, "buffer length mismatch");

    let offset = threshold_offset(threshold);
    let mut mask = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = &buffer[y * width..(y + 1) * width];
        for (x, &value) in row.iter().enumerate() {
            let cell = table.cell(y, x);
            mask.push(cell != GAP && value > f32::from(cell) + offset);
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    mod unit {
        use super::*;

        #[test]
        fn neutral_threshold_has_no_offset() {
            assert_eq!(threshold_offset(128), 0.0);
            assert_eq!(threshold_offset(200), 36.0);
            assert_eq!(threshold_offset(1), -63.5);
        }

        #[test]
        fn bayer_mid_gray_lights_half_the_cells() {
            let table = PatternTable::bayer_4x4();
            let mask = threshold_lookup(&[128.0; 16], 4, 4, 128, &table);
            // cells 0, 32, 16, 48, 64, 96, 80, 112 are < 128
            assert_eq!(mask.iter().filter(|&&m| m).count(), 8);
        }

        #[test]
        fn value_equal_to_cell_is_background() {
            let table = PatternTable::filled(4, 100).unwrap();
            let mask = threshold_lookup(&[100.0], 1, 1, 128, &table);
            assert_eq!(mask, vec![false]);
        }

        #[test]
        fn all_gap_table_is_never_foreground() {
            let table = PatternTable::filled(4, 255).unwrap();
            for threshold in [1u8, 128, 200, 255] {
                let mask = threshold_lookup(&[255.0; 36], 6, 6, threshold, &table);
                assert!(mask.iter().all(|&m| !m));
            }
        }

        #[test]
        fn all_zero_table_is_foreground_above_offset() {
            let table = PatternTable::filled(8, 0).unwrap();
            // threshold 1 gives an offset of -63.5
            let mask = threshold_lookup(&[-63.0, -64.0, 1.0, 0.0], 4, 1, 1, &table);
            assert_eq!(mask, vec![true, false, true, true]);
        }

        #[test]
        fn default_horizontal_table_leaves_odd_rows_empty() {
            let table = PatternTable::horizontal_line();
            let (w, h) = (8, 8);
            let mask = threshold_lookup(&vec![255.0; w * h], w, h, 128, &table);
            for y in 0..h {
                let row = &mask[y * w..(y + 1) * w];
                if y % 2 == 1 {
                    assert!(row.iter().all(|&m| !m), "row {y} should be a gap");
                } else {
                    assert!(row.iter().all(|&m| m), "row {y} should be a line");
                }
            }
        }
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn tables() -> impl Strategy<Value = PatternTable> {
            prop_oneof![
                Just(PatternTable::bayer_4x4()),
                Just(PatternTable::horizontal_line()),
                Just(PatternTable::horizontal_line_8x8()),
            ]
        }

        proptest! {
            /// threshold_lookup: uniform input gives a mask periodic in N
            #[test]
            fn uniform_input_is_periodic(
                table in tables(),
                value in 0.0f32..=255.0,
                threshold in 1u8..=255,
                reps in 2usize..4,
            ) {
                let n = table.size();
                let (w, h) = (n * reps + 1, n * reps + 3);
                let mask = threshold_lookup(&vec![value; w * h], w, h, threshold, &table);
                for y in 0..h - n {
                    for x in 0..w - n {
                        prop_assert_eq!(mask[y * w + x], mask[y * w + x + n]);
                        prop_assert_eq!(mask[y * w + x], mask[(y + n) * w + x]);
                    }
                }
            }

            /// threshold_lookup: all-gap table wins over any input
            #[test]
            fn gap_dominates(
                values in proptest::collection::vec(0.0f32..=255.0, 16),
                threshold in 1u8..=255,
            ) {
                let table = PatternTable::filled(4, 255).unwrap();
                let mask = threshold_lookup(&values, 4, 4, threshold, &table);
                prop_assert!(mask.iter().all(|&m| !m));
            }
        }
    }
}
