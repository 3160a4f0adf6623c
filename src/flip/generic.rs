// ---------------------------------------------------------------------------
// Any number of planes → chunky. Needed for DeviceN-style inputs where the
// plane count is caller-defined, so these favour clarity over speed.
// ---------------------------------------------------------------------------

use super::Depth;
use super::cursor::BitCursor;
use crate::FlipError;

pub(super) fn flip(
    depth: Depth,
    dst: &mut [u8],
    planes: &[&[u8]],
    offset: usize,
    nbytes: usize,
) -> Result<(), FlipError> {
    match depth {
        Depth::D1 | Depth::D2 | Depth::D4 | Depth::D8 => {
            flip_n_packed(dst, planes, offset, nbytes, depth.bits())
        }
        Depth::D12 => flip_n_12(dst, planes, offset, nbytes),
        Depth::D16 => flip_n_16(dst, planes, offset, nbytes),
    }
}

#[inline]
fn read(plane: &[u8], at: usize) -> Result<u8, FlipError> {
    plane.get(at).copied().ok_or(FlipError::RangeCheck {
        needed: at + 1,
        actual: plane.len(),
    })
}

/// Depths 1, 2, 4 and 8: pull one field per plane per sample and push it
/// through a bit cursor.
fn flip_n_packed(
    dst: &mut [u8],
    planes: &[&[u8]],
    offset: usize,
    nbytes: usize,
    bits: u32,
) -> Result<(), FlipError> {
    let mask = ((1u32 << bits) - 1) as u8;
    let per_byte = 8 / bits;
    let mut cursor = BitCursor::new(dst);
    for byte in offset..offset + nbytes {
        for k in 0..per_byte {
            let shift = 8 - k * bits - bits;
            for plane in planes {
                let value = (read(plane, byte)? >> shift) & mask;
                cursor.append_bits(value, bits)?;
            }
        }
    }
    cursor.flush()?;
    Ok(())
}

/// Depth 12: sample `s` starts at bit `12 * s`, which is byte aligned for
/// even `s` and nibble aligned for odd `s`.
fn flip_n_12(
    dst: &mut [u8],
    planes: &[&[u8]],
    offset: usize,
    nbytes: usize,
) -> Result<(), FlipError> {
    let samples = 2 * (nbytes / 3) + nbytes % 3;
    let mut cursor = BitCursor::new(dst);
    for s in 0..samples {
        let at = offset + (s / 2) * 3 + (s & 1);
        for plane in planes {
            let hi = u16::from(read(plane, at)?);
            let lo = u16::from(read(plane, at + 1)?);
            let value = if s & 1 == 1 {
                ((hi & 0x0F) << 8) | lo
            } else {
                (hi << 4) | (lo >> 4)
            };
            cursor.append_12(value)?;
        }
    }
    cursor.flush()?;
    Ok(())
}

/// Depth 16: two verbatim bytes per plane per pixel.
fn flip_n_16(
    dst: &mut [u8],
    planes: &[&[u8]],
    offset: usize,
    nbytes: usize,
) -> Result<(), FlipError> {
    let actual = dst.len();
    let mut out = dst.chunks_exact_mut(2);
    for s in 0..nbytes.div_ceil(2) {
        let at = offset + 2 * s;
        for plane in planes {
            let sample = plane.get(at..at + 2).ok_or(FlipError::RangeCheck {
                needed: at + 2,
                actual: plane.len(),
            })?;
            let slot = out.next().ok_or(FlipError::RangeCheck {
                needed: (actual / 2 + 1) * 2,
                actual,
            })?;
            slot.copy_from_slice(sample);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_planes_depth4() {
        let mut out = [0u8; 2];
        flip(Depth::D4, &mut out, &[&[0xA5], &[0x3C]], 0, 1).unwrap();
        assert_eq!(out, [0xA3, 0x5C]);
    }

    #[test]
    fn five_planes_depth1_flushes_partial_bytes() {
        // 8 pixels × 5 bits = 40 bits = 5 bytes exactly
        let mut out = [0u8; 5];
        let planes: [&[u8]; 5] = [&[0xFF], &[0], &[0], &[0], &[0]];
        flip(Depth::D1, &mut out, &planes, 0, 1).unwrap();
        // 10000 repeated 8 times
        assert_eq!(out, [0x84, 0x21, 0x08, 0x42, 0x10]);
    }

    #[test]
    fn one_plane_is_copy() {
        let mut out = [0u8; 4];
        flip(Depth::D8, &mut out, &[&[9, 8, 7, 6]], 0, 4).unwrap();
        assert_eq!(out, [9, 8, 7, 6]);
    }

    #[test]
    fn two_planes_depth12_odd_sample_count() {
        // nbytes = 4 → 3 samples per plane, reads 5 bytes per plane
        let a = [0x12u8, 0x34, 0x56, 0x78, 0x90];
        let b = [0xABu8, 0xCD, 0xEF, 0x01, 0x20];
        let mut out = [0xEEu8; 9];
        flip(Depth::D12, &mut out, &[&a, &b], 0, 4).unwrap();
        // a: 123 456 789, b: ABC DEF 012
        assert_eq!(out, [0x12, 0x3A, 0xBC, 0x45, 0x6D, 0xEF, 0x78, 0x90, 0x12]);
    }

    #[test]
    fn depth16_with_offset() {
        let a = [0u8, 0, 1, 2, 3, 4];
        let b = [0u8, 0, 5, 6, 7, 8];
        let mut out = [0u8; 8];
        flip(Depth::D16, &mut out, &[&a, &b], 2, 4).unwrap();
        assert_eq!(out, [1, 2, 5, 6, 3, 4, 7, 8]);
    }

    #[test]
    fn short_plane_is_range_check() {
        let mut out = [0u8; 4];
        assert_eq!(
            flip(Depth::D8, &mut out, &[&[1, 2], &[3]], 0, 2),
            Err(FlipError::RangeCheck { needed: 2, actual: 1 })
        );
    }
}
