//! Error diffusion kernels and the policy applied at image borders.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`: the neighbor at `(x + dx, y + dy)`
/// receives `error * weight / divisor`. Entries only point at pixels that
/// the row-major scan has not visited yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

impl Kernel {
    /// Sum of all weights. Equal to `divisor` when the kernel diffuses the
    /// whole error.
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|&(_, _, w)| u32::from(w)).sum()
    }
}

/// Floyd-Steinberg, 16/16 of the error.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16,
};

/// Atkinson, only 6/8 of the error. The lost quarter raises contrast.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 1),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 8,
};

/// Stucki, 42/42 of the error over three rows.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1
/// ```
pub const STUCKI: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
};

/// What happens to an error share whose target lies outside the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// The share is dropped and not redistributed. Pixels along the
    /// borders therefore receive slightly less correction.
    #[default]
    DropOutOfBounds,
}

impl BoundaryPolicy {
    /// Resolve the buffer index that receives the share for offset
    /// `(dx, dy)` from `(x, y)`, or `None` if the share is discarded.
    pub fn resolve(
        self,
        x: usize,
        y: usize,
        dx: i32,
        dy: i32,
        width: usize,
        height: usize,
    ) -> Option<usize> {
        match self {
            BoundaryPolicy::DropOutOfBounds => {
                let nx = x.checked_add_signed(dx as isize)?;
                let ny = y.checked_add_signed(dy as isize)?;
                (nx < width && ny < height).then_some(ny * width + nx)
            }
        }
    }
}
