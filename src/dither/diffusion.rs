use super::kernel::{BoundaryPolicy, Kernel};

/// Error-diffusion dither of a row-major grayscale buffer.
///
/// Each pixel is quantized against `threshold` (foreground iff the
/// corrected value is `>= threshold`), and the quantization error is spread
/// to unvisited neighbors of a private working copy according to `kernel`.
/// The source buffer is never modified. Errors accumulate in `f64` so
/// near-threshold pixels quantize the same way on large images.
pub fn diffuse(
    buffer: &[f32],
    width: usize,
    height: usize,
    threshold: u8,
    kernel: &Kernel,
    policy: BoundaryPolicy,
) -> Vec<bool> {
    debug_assert_eq!(buffer.len(), width * height, "buffer length mismatch");

    let mut pixels: Vec<f64> = buffer.iter().map(|&v| f64::from(v)).collect();
    let mut mask = vec![false; width * height];
    let cutoff = f64::from(threshold);
    let divisor = f64::from(kernel.divisor);

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = pixels[idx];
            let foreground = old >= cutoff;
            let new = if foreground { 255.0 } else { 0.0 };
            mask[idx] = foreground;

            let error = old - new;
            if error == 0.0 {
                continue;
            }
            for &(dx, dy, weight) in kernel.entries {
                if let Some(target) = policy.resolve(x, y, dx, dy, width, height) {
                    pixels[target] += error * f64::from(weight) / divisor;
                }
            }
        }
    }

    mask
}
