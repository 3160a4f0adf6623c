// ---------------------------------------------------------------------------
// Planar → chunky interleaving.
//
// Architecture: `Route::select` picks a family from (plane count, depth).
// Three and four planes get fixed-arity routines, everything else the
// generic N-plane routines. Sizes are validated up front so that every
// pre-execution failure leaves the output untouched.
// ---------------------------------------------------------------------------

use crate::FlipError;

mod cursor;
mod four;
mod generic;
mod three;
mod transpose;

#[cfg(target_arch = "x86_64")]
mod avx2;


/// Supported sample widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Depth {
    D1,
    D2,
    D4,
    D8,
    D12,
    D16,
}

impl Depth {
    /// `None` for widths with no routine (3, 5, 6, 7, 9, 10, 11, 13, 14, 15, …).
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            1 => Some(Self::D1),
            2 => Some(Self::D2),
            4 => Some(Self::D4),
            8 => Some(Self::D8),
            12 => Some(Self::D12),
            16 => Some(Self::D16),
            _ => None,
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            Self::D1 => 1,
            Self::D2 => 2,
            Self::D4 => 4,
            Self::D8 => 8,
            Self::D12 => 12,
            Self::D16 => 16,
        }
    }
}

/// Which routine family handles a (plane count, depth) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Exactly three planes.
    Three(Depth),
    /// Exactly four planes.
    Four(Depth),
    /// Any plane count, including 0, 1, 2, 5, … and (on request) 3 and 4.
    Generic(Depth),
}

const OVERFLOW: FlipError = FlipError::InvalidArgument("size overflows usize");

impl Route {
    /// Pick the routine for `num_planes` planes at `bits_per_sample`.
    ///
    /// The depth range is checked first. Three and four planes never fall
    /// back to the generic routines: an unsupported depth there is an error.
    pub fn select(num_planes: usize, bits_per_sample: u32) -> Result<Self, FlipError> {
        let depth = checked_depth(num_planes, bits_per_sample)?;
        Ok(match num_planes {
            3 => Self::Three(depth),
            4 => Self::Four(depth),
            _ => Self::Generic(depth),
        })
    }

    pub const fn depth(self) -> Depth {
        match self {
            Self::Three(d) | Self::Four(d) | Self::Generic(d) => d,
        }
    }

    /// Bytes read from each plane (starting at the offset) for `nbytes`.
    ///
    /// Depth 16 rounds up to whole samples and fixed depth 12 to whole
    /// three-byte groups. Generic depth 12 reads every byte that holds a bit
    /// of its `ceil(nbytes * 8 / 12)` samples, which can be one past `nbytes`.
    pub fn plane_len(self, nbytes: usize) -> Result<usize, FlipError> {
        match self {
            Self::Three(Depth::D12) | Self::Four(Depth::D12) => {
                nbytes.div_ceil(3).checked_mul(3).ok_or(OVERFLOW)
            }
            Self::Generic(Depth::D12) => {
                let samples = samples_12(nbytes);
                samples.checked_add(samples.div_ceil(2)).ok_or(OVERFLOW)
            }
            r if r.depth() == Depth::D16 => nbytes.div_ceil(2).checked_mul(2).ok_or(OVERFLOW),
            _ => Ok(nbytes),
        }
    }

    /// Bytes written to the output for `num_planes` planes of `nbytes`.
    pub fn output_len(self, num_planes: usize, nbytes: usize) -> Result<usize, FlipError> {
        match self {
            Self::Generic(Depth::D12) => {
                let fields = samples_12(nbytes).checked_mul(num_planes).ok_or(OVERFLOW)?;
                fields.checked_add(fields.div_ceil(2)).ok_or(OVERFLOW)
            }
            _ => self.plane_len(nbytes)?.checked_mul(num_planes).ok_or(OVERFLOW),
        }
    }

    /// Validate every buffer, then run. Nothing is written unless all
    /// planes and the output are large enough.
    pub(crate) fn run(
        self,
        dst: &mut [u8],
        planes: &[&[u8]],
        offset: usize,
        nbytes: usize,
    ) -> Result<(), FlipError> {
        if nbytes == 0 {
            return Ok(());
        }
        let plane_len = self.plane_len(nbytes)?;
        let out_len = self.output_len(planes.len(), nbytes)?;
        let actual = dst.len();
        let dst = dst.get_mut(..out_len).ok_or(FlipError::RangeCheck {
            needed: out_len,
            actual,
        })?;
        match self {
            Self::Three(depth) => {
                three::flip(depth, windows(planes, offset, plane_len)?, dst);
                Ok(())
            }
            Self::Four(depth) => {
                four::flip(depth, windows(planes, offset, plane_len)?, dst);
                Ok(())
            }
            Self::Generic(_) if planes.is_empty() => Ok(()),
            Self::Generic(depth) => {
                for plane in planes {
                    window(plane, offset, plane_len)?;
                }
                generic::flip(depth, dst, planes, offset, nbytes)
            }
        }
    }
}

fn checked_depth(num_planes: usize, bits_per_sample: u32) -> Result<Depth, FlipError> {
    if !(1..=16).contains(&bits_per_sample) {
        return Err(FlipError::InvalidBitDepth(i64::from(bits_per_sample)));
    }
    Depth::from_bits(bits_per_sample).ok_or(FlipError::UnsupportedCombination {
        num_planes,
        bits_per_sample,
    })
}

/// 12-bit samples covering `nbytes`: `ceil(nbytes * 8 / 12)` without the
/// multiplication.
#[inline]
const fn samples_12(nbytes: usize) -> usize {
    2 * (nbytes / 3) + nbytes % 3
}

#[inline]
fn window(plane: &[u8], offset: usize, len: usize) -> Result<&[u8], FlipError> {
    let end = offset.checked_add(len).ok_or(OVERFLOW)?;
    plane.get(offset..end).ok_or(FlipError::RangeCheck {
        needed: end,
        actual: plane.len(),
    })
}

fn windows<'a, const N: usize>(
    planes: &[&'a [u8]],
    offset: usize,
    len: usize,
) -> Result<[&'a [u8]; N], FlipError> {
    if planes.len() != N {
        return Err(FlipError::InvalidPlaneCount(planes.len() as isize));
    }
    let mut out: [&'a [u8]; N] = [&[]; N];
    for (slot, plane) in out.iter_mut().zip(planes) {
        *slot = window(plane, offset, len)?;
    }
    Ok(out)
}

// ===========================================================================
// Public API
// ===========================================================================

/// Interleave `planes` into `dst`, one pixel at a time.
///
/// Each plane is read from `offset`. `nbytes` is the number of bytes
/// consumed per plane; see [`Route::plane_len`] for the depths that round
/// it up. `dst` must hold at least [`interleaved_len`] bytes; bytes past
/// that are left alone.
///
/// ```
/// // Three 1-bit planes, one byte (eight pixels) each.
/// let mut out = [0u8; 3];
/// chunky::interleave(&mut out, &[&[0xFF], &[0x00], &[0x00]], 0, 1, 1).unwrap();
/// assert_eq!(out, [0x92, 0x49, 0x24]);
/// ```
pub fn interleave(
    dst: &mut [u8],
    planes: &[&[u8]],
    offset: usize,
    nbytes: usize,
    bits_per_sample: u32,
) -> Result<(), FlipError> {
    Route::select(planes.len(), bits_per_sample)?.run(dst, planes, offset, nbytes)
}

/// Like [`interleave`], but always uses the generic N-plane routines, even
/// for three or four planes.
///
/// Produces the same bytes as the fixed-arity routines, only slower.
pub fn interleave_generic(
    dst: &mut [u8],
    planes: &[&[u8]],
    offset: usize,
    nbytes: usize,
    bits_per_sample: u32,
) -> Result<(), FlipError> {
    let depth = checked_depth(planes.len(), bits_per_sample)?;
    Route::Generic(depth).run(dst, planes, offset, nbytes)
}

/// Interleave with signed, separately supplied parameters.
///
/// Checks run in order: bit depth, plane count (negative, or more than
/// `planes` holds), plane/depth combination, negative `offset`/`nbytes`,
/// then buffer sizes. Only the first `num_planes` entries of `planes` are
/// used.
pub fn flip_planes(
    dst: &mut [u8],
    planes: &[&[u8]],
    offset: isize,
    nbytes: isize,
    num_planes: isize,
    bits_per_sample: i32,
) -> Result<(), FlipError> {
    let bits = u32::try_from(bits_per_sample)
        .ok()
        .filter(|b| (1..=16).contains(b))
        .ok_or(FlipError::InvalidBitDepth(i64::from(bits_per_sample)))?;
    let planes = usize::try_from(num_planes)
        .ok()
        .and_then(|n| planes.get(..n))
        .ok_or(FlipError::InvalidPlaneCount(num_planes))?;
    let route = Route::select(planes.len(), bits)?;
    let offset =
        usize::try_from(offset).map_err(|_| FlipError::InvalidArgument("negative offset"))?;
    let nbytes =
        usize::try_from(nbytes).map_err(|_| FlipError::InvalidArgument("negative length"))?;
    route.run(dst, planes, offset, nbytes)
}

/// Output bytes [`interleave`] writes for these parameters.
pub fn interleaved_len(
    num_planes: usize,
    nbytes: usize,
    bits_per_sample: u32,
) -> Result<usize, FlipError> {
    Route::select(num_planes, bits_per_sample)?.output_len(num_planes, nbytes)
}

/// Interleave `rows` rows of planar data between strided buffers.
///
/// Row `y` of every plane starts at `y * plane_stride` and holds `nbytes`
/// consumed bytes; row `y` of the output starts at `y * dst_stride`. Padding
/// between rows is never read or written. All rows are validated before the
/// first is written.
pub fn interleave_strided(
    dst: &mut [u8],
    dst_stride: usize,
    planes: &[&[u8]],
    plane_stride: usize,
    nbytes: usize,
    rows: usize,
    bits_per_sample: u32,
) -> Result<(), FlipError> {
    let route = Route::select(planes.len(), bits_per_sample)?;
    if nbytes == 0 || rows == 0 || planes.is_empty() {
        return Ok(());
    }
    let plane_row = route.plane_len(nbytes)?;
    let out_row = route.output_len(planes.len(), nbytes)?;
    check_strided(dst.len(), dst_stride, out_row, rows)?;
    for plane in planes {
        check_strided(plane.len(), plane_stride, plane_row, rows)?;
    }
    for y in 0..rows {
        let out = &mut dst[y * dst_stride..][..out_row];
        route.run(out, planes, y * plane_stride, nbytes)?;
    }
    Ok(())
}

#[inline]
fn check_strided(len: usize, stride: usize, row_len: usize, rows: usize) -> Result<(), FlipError> {
    if row_len > stride {
        return Err(FlipError::InvalidStride { stride, row_len });
    }
    let needed = (rows - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(row_len))
        .ok_or(OVERFLOW)?;
    if len < needed {
        return Err(FlipError::RangeCheck {
            needed,
            actual: len,
        });
    }
    Ok(())
}
