/// Errors from planar → chunky interleaving.
///
/// Every variant except [`RangeCheck`](FlipError::RangeCheck) raised from
/// inside the generic packer is reported before the output buffer is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FlipError {
    /// Bits per sample outside `1..=16`.
    #[error("bits per sample {0} outside 1..=16")]
    InvalidBitDepth(i64),

    /// Negative plane count, or more planes requested than supplied.
    #[error("invalid plane count {0}")]
    InvalidPlaneCount(isize),

    /// No routine exists for this plane count at this depth.
    #[error("no routine for {num_planes} planes at {bits_per_sample} bits per sample")]
    UnsupportedCombination {
        num_planes: usize,
        bits_per_sample: u32,
    },

    /// A plane or the output buffer is shorter than the transform needs.
    ///
    /// If raised mid-stream by the generic packer the output is partially
    /// written and must be discarded.
    #[error("range check: need {needed} bytes, got {actual}")]
    RangeCheck { needed: usize, actual: usize },

    /// Negative length or offset, or a size computation that overflows.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Row stride shorter than the bytes one row occupies.
    #[error("stride {stride} shorter than row length {row_len}")]
    InvalidStride { stride: usize, row_len: usize },
}
