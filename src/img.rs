//! Whole-image planar to chunky conversion over [`imgref`] buffers.
//!
//! Each plane is an image of bytes whose width is the number of bytes a row
//! consumes. Strides may differ between planes and the output; padding is
//! never touched.
//!
//! ```rust
//! use imgref::ImgVec;
//! use rgb::Rgb;
//! use chunky::img;
//!
//! let r = ImgVec::new(vec![255u8; 100], 10, 10);
//! let g = ImgVec::new(vec![0u8; 100], 10, 10);
//! let b = ImgVec::new(vec![128u8; 100], 10, 10);
//! let rgb_img: ImgVec<Rgb<u8>> = img::planes_to_rgb([r.as_ref(), g.as_ref(), b.as_ref()]).unwrap();
//! assert_eq!(rgb_img.buf()[0], Rgb::new(255, 0, 128));
//! ```

use alloc::vec;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgRefMut, ImgVec};
use rgb::{Rgb, Rgba};

use crate::{FlipError, Route};

/// Interleave `planes` row by row into `dst`.
///
/// All planes must share width and height, and `dst` must have the same
/// height. `dst.width()` must be at least [`crate::interleaved_len`] of one
/// plane row. Depths whose rows read past `width` (odd widths at 16 bits,
/// widths that are not a multiple of three at 12 bits) are rejected with
/// [`FlipError::RangeCheck`]. Everything is validated before the first row is
/// written.
pub fn interleave_img(
    planes: &[ImgRef<'_, u8>],
    mut dst: ImgRefMut<'_, u8>,
    bits_per_sample: u32,
) -> Result<(), FlipError> {
    let route = Route::select(planes.len(), bits_per_sample)?;
    let Some(first) = planes.first() else {
        return Ok(());
    };
    let (width, height) = (first.width(), first.height());
    if planes.iter().any(|p| p.width() != width || p.height() != height) {
        return Err(FlipError::InvalidArgument("plane dimensions differ"));
    }
    if dst.height() != height {
        return Err(FlipError::InvalidArgument("output height differs from planes"));
    }
    let plane_row = route.plane_len(width)?;
    if plane_row > width {
        return Err(FlipError::RangeCheck {
            needed: plane_row,
            actual: width,
        });
    }
    let out_row = route.output_len(planes.len(), width)?;
    if dst.width() < out_row {
        return Err(FlipError::RangeCheck {
            needed: out_row,
            actual: dst.width(),
        });
    }

    let mut rows: Vec<_> = planes.iter().map(|p| p.rows()).collect();
    let mut row_planes: Vec<&[u8]> = Vec::with_capacity(planes.len());
    for out in dst.rows_mut() {
        row_planes.clear();
        row_planes.extend(rows.iter_mut().filter_map(Iterator::next));
        route.run(out, &row_planes, 0, width)?;
    }
    Ok(())
}

/// Interleave three byte planes into a new `ImgVec<Rgb<u8>>`.
pub fn planes_to_rgb(planes: [ImgRef<'_, u8>; 3]) -> Result<ImgVec<Rgb<u8>>, FlipError> {
    let (w, h) = (planes[0].width(), planes[0].height());
    let mut buf = vec![Rgb::default(); w * h];
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut buf);
    interleave_img(&planes, ImgRefMut::new(bytes, w * 3, h), 8)?;
    Ok(ImgVec::new(buf, w, h))
}

/// Interleave four byte planes into a new `ImgVec<Rgba<u8>>`.
pub fn planes_to_rgba(planes: [ImgRef<'_, u8>; 4]) -> Result<ImgVec<Rgba<u8>>, FlipError> {
    let (w, h) = (planes[0].width(), planes[0].height());
    let mut buf = vec![Rgba::default(); w * h];
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut buf);
    interleave_img(&planes, ImgRefMut::new(bytes, w * 4, h), 8)?;
    Ok(ImgVec::new(buf, w, h))
}
