use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm_loadu_si128, _mm_storeu_si128};

use super::four::{flip4x8, flip4x16};

// ===========================================================================
// x86-64 AVX2: rite row implementations
//
// Both kernels load 16 bytes from each plane and interleave with unpacks:
// first plane pairs (0,1) and (2,3), then the pairs against each other.
// Unpacks move whole lanes, so byte order inside a 16-bit sample is kept.
// ===========================================================================

#[rite]
pub(super) fn flip4x8_row_v3(_token: X64V3Token, planes: [&[u8]; 4], dst: &mut [u8]) {
    let [a, b, c, d] = planes;
    let n = a.len().min(dst.len() / 4);
    let mut i = 0;
    while i + 16 <= n {
        let va = _mm_loadu_si128(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = _mm_loadu_si128(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let vc = _mm_loadu_si128(<&[u8; 16]>::try_from(&c[i..i + 16]).unwrap());
        let vd = _mm_loadu_si128(<&[u8; 16]>::try_from(&d[i..i + 16]).unwrap());
        let ab_lo = _mm_unpacklo_epi8(va, vb);
        let ab_hi = _mm_unpackhi_epi8(va, vb);
        let cd_lo = _mm_unpacklo_epi8(vc, vd);
        let cd_hi = _mm_unpackhi_epi8(vc, vd);
        let pixels = [
            _mm_unpacklo_epi16(ab_lo, cd_lo),
            _mm_unpackhi_epi16(ab_lo, cd_lo),
            _mm_unpacklo_epi16(ab_hi, cd_hi),
            _mm_unpackhi_epi16(ab_hi, cd_hi),
        ];
        for (k, v) in pixels.into_iter().enumerate() {
            let o: &mut [u8; 16] = (&mut dst[i * 4 + k * 16..][..16]).try_into().unwrap();
            _mm_storeu_si128(o, v);
        }
        i += 16;
    }
    flip4x8([&a[i..], &b[i..], &c[i..], &d[i..]], &mut dst[i * 4..]);
}

#[rite]
pub(super) fn flip4x16_row_v3(_token: X64V3Token, planes: [&[u8]; 4], dst: &mut [u8]) {
    let [a, b, c, d] = planes;
    let n = a.len().min(dst.len() / 4);
    let mut i = 0;
    while i + 16 <= n {
        let va = _mm_loadu_si128(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = _mm_loadu_si128(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let vc = _mm_loadu_si128(<&[u8; 16]>::try_from(&c[i..i + 16]).unwrap());
        let vd = _mm_loadu_si128(<&[u8; 16]>::try_from(&d[i..i + 16]).unwrap());
        let ab_lo = _mm_unpacklo_epi16(va, vb);
        let ab_hi = _mm_unpackhi_epi16(va, vb);
        let cd_lo = _mm_unpacklo_epi16(vc, vd);
        let cd_hi = _mm_unpackhi_epi16(vc, vd);
        let pixels = [
            _mm_unpacklo_epi32(ab_lo, cd_lo),
            _mm_unpackhi_epi32(ab_lo, cd_lo),
            _mm_unpacklo_epi32(ab_hi, cd_hi),
            _mm_unpackhi_epi32(ab_hi, cd_hi),
        ];
        for (k, v) in pixels.into_iter().enumerate() {
            let o: &mut [u8; 16] = (&mut dst[i * 4 + k * 16..][..16]).try_into().unwrap();
            _mm_storeu_si128(o, v);
        }
        i += 16;
    }
    flip4x16([&a[i..], &b[i..], &c[i..], &d[i..]], &mut dst[i * 4..]);
}

// x86-64 arcane wrappers (dispatch targets for incant!)
#[arcane]
pub(super) fn flip4x8_impl_v3(t: X64V3Token, planes: [&[u8]; 4], dst: &mut [u8]) {
    flip4x8_row_v3(t, planes, dst);
}

#[arcane]
pub(super) fn flip4x16_impl_v3(t: X64V3Token, planes: [&[u8]; 4], dst: &mut [u8]) {
    flip4x16_row_v3(t, planes, dst);
}
