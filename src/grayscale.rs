use image::{GrayImage, RgbImage};

use crate::dither::{DitherAlgorithm, PatternTable};
use crate::mask::DitherMask;
use crate::{DitherError, DitherResult};

/// Rec. 601 luma weights.
const LUMA: [f32; 3] = [0.299, 0.587, 0.114];

/// Row-major grayscale intensities, nominally in `[0, 255]`.
///
/// Values outside that range are kept as-is; error diffusion carries them
/// through without clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayscaleBuffer {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl GrayscaleBuffer {
    /// Wrap raw intensities, checking that both dimensions are non-zero and
    /// that `data.len() == width * height`.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> DitherResult<Self> {
        let expected = width * height;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(DitherError::BufferSize {
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A buffer where every pixel has the same intensity.
    pub fn uniform(width: usize, height: usize, value: f32) -> DitherResult<Self> {
        Self::new(vec![value; width * height], width, height)
    }

    pub fn from_gray_image(image: &GrayImage) -> DitherResult<Self> {
        let data = image.as_raw().iter().map(|&v| f32::from(v)).collect();
        Self::new(data, image.width() as usize, image.height() as usize)
    }

    /// Convert RGB pixels to perceived brightness.
    pub fn from_rgb_image(image: &RgbImage) -> DitherResult<Self> {
        let data = image
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                LUMA[0] * f32::from(r) + LUMA[1] * f32::from(g) + LUMA[2] * f32::from(b)
            })
            .collect();
        Self::new(data, image.width() as usize, image.height() as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.data[y * self.width + x])
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Run `algorithm` over this buffer.
    pub fn dither(
        &self,
        algorithm: DitherAlgorithm,
        threshold: u8,
        pattern: &PatternTable,
    ) -> DitherMask {
        let bits = algorithm.dither(&self.data, self.width, self.height, threshold, pattern);
        DitherMask::from_parts(bits, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn rejects_length_mismatch() {
        let err = GrayscaleBuffer::new(vec![0.0; 5], 2, 3).unwrap_err();
        assert!(matches!(
            err,
            DitherError::BufferSize {
                expected: 6,
                found: 5
            }
        ));
    }

    #[test]
    fn rejects_zero_dimension() {
        assert!(GrayscaleBuffer::new(Vec::new(), 0, 4).is_err());
        assert!(GrayscaleBuffer::uniform(3, 0, 10.0).is_err());
    }

    #[test]
    fn indexing_is_row_major() {
        let buffer = GrayscaleBuffer::new((0..6).map(|v| v as f32).collect(), 3, 2).unwrap();
        assert_eq!(buffer.get(2, 0), Some(2.0));
        assert_eq!(buffer.get(0, 1), Some(3.0));
        assert_eq!(buffer.get(3, 0), None);
    }

    #[test]
    fn gray_image_values_are_copied() {
        let mut img = GrayImage::new(2, 1);
        img.put_pixel(1, 0, Luma([42]));
        let buffer = GrayscaleBuffer::from_gray_image(&img).unwrap();
        assert_eq!(buffer.as_slice(), &[0.0, 42.0]);
    }

    #[test]
    fn rgb_uses_luma_weights() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(2, 0, Rgb([255, 255, 255]));
        let buffer = GrayscaleBuffer::from_rgb_image(&img).unwrap();
        let v = buffer.as_slice();
        assert!((v[0] - 76.245).abs() < 1e-3);
        assert!((v[1] - 149.685).abs() < 1e-3);
        assert!((v[2] - 255.0).abs() < 1e-3);
    }

    #[test]
    fn dither_keeps_source_and_dimensions() {
        let buffer = GrayscaleBuffer::new(vec![100.0, 200.0], 2, 1).unwrap();
        let mask = buffer.dither(DitherAlgorithm::FloydSteinberg, 150, &PatternTable::default());
        assert_eq!(mask.as_slice(), &[false, true]);
        assert_eq!((mask.width(), mask.height()), (2, 1));
        assert_eq!(buffer.as_slice(), &[100.0, 200.0]);
    }
}
