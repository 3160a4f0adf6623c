//! Planar channels to [`rgb`] crate pixel slices via bytemuck.
//!
//! The destination slice decides the pixel count. Every plane must hold at
//! least that many samples; extra samples are ignored.
//!
//! ```rust
//! use rgb::Rgb;
//! use chunky::typed_rgb;
//!
//! let r = [255u8, 0];
//! let g = [0u8, 128];
//! let b = [10u8, 20];
//! let mut pixels = vec![Rgb::default(); 2];
//! typed_rgb::planes_to_rgb([&r, &g, &b], &mut pixels).unwrap();
//! assert_eq!(pixels[1], Rgb::new(0, 128, 20));
//! ```
//!
//! 16-bit planes keep each sample's native byte order, so `u16` values come
//! through unchanged.

use crate::FlipError;
use rgb::{Rgb, Rgba};

/// Interleave three 8-bit planes into `dst`.
pub fn planes_to_rgb(planes: [&[u8]; 3], dst: &mut [Rgb<u8>]) -> Result<(), FlipError> {
    let n = dst.len();
    crate::interleave(bytemuck::cast_slice_mut(dst), &planes, 0, n, 8)
}

/// Interleave four 8-bit planes into `dst`.
pub fn planes_to_rgba(planes: [&[u8]; 4], dst: &mut [Rgba<u8>]) -> Result<(), FlipError> {
    let n = dst.len();
    crate::interleave(bytemuck::cast_slice_mut(dst), &planes, 0, n, 8)
}

/// Interleave three 16-bit planes into `dst`.
pub fn planes_to_rgb16(planes: [&[u16]; 3], dst: &mut [Rgb<u16>]) -> Result<(), FlipError> {
    let n = dst.len() * 2;
    let bytes = planes.map(|p| bytemuck::cast_slice::<u16, u8>(p));
    crate::interleave(bytemuck::cast_slice_mut(dst), &bytes, 0, n, 16)
        .map_err(halve_range_check)
}

/// Interleave four 16-bit planes into `dst`.
pub fn planes_to_rgba16(planes: [&[u16]; 4], dst: &mut [Rgba<u16>]) -> Result<(), FlipError> {
    let n = dst.len() * 2;
    let bytes = planes.map(|p| bytemuck::cast_slice::<u16, u8>(p));
    crate::interleave(bytemuck::cast_slice_mut(dst), &bytes, 0, n, 16)
        .map_err(halve_range_check)
}

/// Report sizes in samples rather than bytes for the 16-bit wrappers.
fn halve_range_check(e: FlipError) -> FlipError {
    match e {
        FlipError::RangeCheck { needed, actual } => FlipError::RangeCheck {
            needed: needed / 2,
            actual: actual / 2,
        },
        e => e,
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use alloc::vec;

    #[test]
    fn test_planes_to_rgb() {
        let r = [1u8, 2, 3];
        let g = [4u8, 5, 6];
        let b = [7u8, 8, 9];
        let mut dst = vec![Rgb::default(); 3];
        planes_to_rgb([&r, &g, &b], &mut dst).unwrap();
        assert_eq!(
            dst,
            [Rgb::new(1u8, 4, 7), Rgb::new(2, 5, 8), Rgb::new(3, 6, 9)]
        );
    }

    #[test]
    fn test_planes_to_rgba() {
        let r = [255u8; 20];
        let g = [128u8; 20];
        let b = [0u8; 20];
        let a = [200u8; 20];
        let mut dst = vec![Rgba::default(); 20];
        planes_to_rgba([&r, &g, &b, &a], &mut dst).unwrap();
        assert!(dst.iter().all(|&px| px == Rgba::new(255u8, 128, 0, 200)));
    }

    #[test]
    fn test_planes_to_rgb16_keeps_values() {
        let r = [0x1234u16, 0xFFFF];
        let g = [0x0001u16, 0x8000];
        let b = [0xABCDu16, 0x0000];
        let mut dst = vec![Rgb::default(); 2];
        planes_to_rgb16([&r, &g, &b], &mut dst).unwrap();
        assert_eq!(dst[0], Rgb::new(0x1234u16, 0x0001, 0xABCD));
        assert_eq!(dst[1], Rgb::new(0xFFFFu16, 0x8000, 0x0000));
    }

    #[test]
    fn test_planes_to_rgba16_keeps_values() {
        let planes: [[u16; 17]; 4] =
            core::array::from_fn(|k| core::array::from_fn(|i| (i * 1000 + k) as u16));
        let mut dst = vec![Rgba::default(); 17];
        planes_to_rgba16(
            [&planes[0], &planes[1], &planes[2], &planes[3]],
            &mut dst,
        )
        .unwrap();
        for (i, px) in dst.iter().enumerate() {
            let v = (i * 1000) as u16;
            assert_eq!(*px, Rgba::new(v, v + 1, v + 2, v + 3));
        }
    }

    #[test]
    fn test_short_plane_returns_error() {
        let full = [0u8; 4];
        let short = [0u8; 3];
        let mut dst = vec![Rgb::default(); 4];
        assert_eq!(
            planes_to_rgb([&full, &short, &full], &mut dst),
            Err(FlipError::RangeCheck { needed: 4, actual: 3 })
        );
        assert!(dst.iter().all(|&px| px == Rgb::default()));
    }

    #[test]
    fn test_short_plane16_counts_samples() {
        let full = [0u16; 4];
        let short = [0u16; 3];
        let mut dst = vec![Rgba::default(); 4];
        assert_eq!(
            planes_to_rgba16([&full, &full, &full, &short], &mut dst),
            Err(FlipError::RangeCheck { needed: 4, actual: 3 })
        );
    }

    #[test]
    fn test_empty_dst() {
        let mut dst: [Rgb<u8>; 0] = [];
        planes_to_rgb([&[], &[], &[]], &mut dst).unwrap();
    }
}
