use crate::DitherResult;
use crate::mask::DitherMask;

/// A trait representing an algorithm that can turn a dither mask into a vector representation.
pub trait MaskVectorizer {
    type Options;
    type Output;

    fn vectorize(&self, mask: &DitherMask, options: &Self::Options) -> DitherResult<Self::Output>;
}

pub mod run_length;
