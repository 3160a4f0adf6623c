// ---------------------------------------------------------------------------
// Four planes → chunky.
//
// Depths 1 and 2 treat the four input bytes as rows of a bit matrix and
// transpose it in place; depth 4 is a direct nibble merge. Depths 8 and 16
// dispatch via incant! to an AVX2 unpack kernel or the scalar loop.
// ---------------------------------------------------------------------------

use archmage::incant;
use archmage::prelude::*;

use super::Depth;
use super::transpose::transpose;

#[cfg(target_arch = "x86_64")]
use super::avx2::*;

pub(super) fn flip(depth: Depth, planes: [&[u8]; 4], dst: &mut [u8]) {
    match depth {
        Depth::D1 => flip4x1(planes, dst),
        Depth::D2 => flip4x2(planes, dst),
        Depth::D4 => flip4x4(planes, dst),
        Depth::D8 => {
            incant!(flip4x8_impl(planes, dst), [v3, scalar]);
        }
        Depth::D12 => flip4x12(planes, dst),
        Depth::D16 => {
            incant!(flip4x16_impl(planes, dst), [v3, scalar]);
        }
    }
}

/// Two pixels per output byte pair: high nibbles then low nibbles.
#[inline(always)]
fn merge_nibbles(out: &mut [u8], b1: u8, b2: u8, b3: u8, b4: u8) {
    out[0] = (b1 & 0xF0) | (b2 >> 4);
    out[1] = (b3 & 0xF0) | (b4 >> 4);
    out[2] = (b1 << 4) | (b2 & 0x0F);
    out[3] = (b3 << 4) | (b4 & 0x0F);
}

fn flip4x1(planes: [&[u8]; 4], dst: &mut [u8]) {
    let [a, b, c, d] = planes;
    let quads = a.iter().zip(b).zip(c).zip(d);
    for (out, (((&b1, &b2), &b3), &b4)) in dst.chunks_exact_mut(4).zip(quads) {
        // blocks of 1
        let (b1, b2) = transpose(b1, b2, 0x55, 1);
        let (b3, b4) = transpose(b3, b4, 0x55, 1);
        // blocks of 2
        let (b1, b3) = transpose(b1, b3, 0x33, 2);
        let (b2, b4) = transpose(b2, b4, 0x33, 2);
        merge_nibbles(out, b1, b2, b3, b4);
    }
}

fn flip4x2(planes: [&[u8]; 4], dst: &mut [u8]) {
    let [a, b, c, d] = planes;
    let quads = a.iter().zip(b).zip(c).zip(d);
    for (out, (((&b1, &b2), &b3), &b4)) in dst.chunks_exact_mut(4).zip(quads) {
        // blocks of 4x2
        let (b1, b3) = transpose(b1, b3, 0x0F, 4);
        let (b2, b4) = transpose(b2, b4, 0x0F, 4);
        // blocks of 2x1
        let (b1, b2) = transpose(b1, b2, 0x33, 2);
        let (b3, b4) = transpose(b3, b4, 0x33, 2);
        out.copy_from_slice(&[b1, b2, b3, b4]);
    }
}

fn flip4x4(planes: [&[u8]; 4], dst: &mut [u8]) {
    let [a, b, c, d] = planes;
    let quads = a.iter().zip(b).zip(c).zip(d);
    for (out, (((&b1, &b2), &b3), &b4)) in dst.chunks_exact_mut(4).zip(quads) {
        merge_nibbles(out, b1, b2, b3, b4);
    }
}

pub(super) fn flip4x8(planes: [&[u8]; 4], dst: &mut [u8]) {
    let [a, b, c, d] = planes;
    let quads = a.iter().zip(b).zip(c).zip(d);
    for (out, (((&w, &x), &y), &z)) in dst.chunks_exact_mut(4).zip(quads) {
        out.copy_from_slice(&[w, x, y, z]);
    }
}

/// Two 12-bit samples per three input bytes; twelve output bytes per
/// two-pixel group.
fn flip4x12(planes: [&[u8]; 4], dst: &mut [u8]) {
    let [a, b, c, d] = planes;
    let groups = a
        .chunks_exact(3)
        .zip(b.chunks_exact(3))
        .zip(c.chunks_exact(3))
        .zip(d.chunks_exact(3));
    for (out, (((pa, pb), pc), pd)) in dst.chunks_exact_mut(12).zip(groups) {
        out[0] = pa[0];
        out[1] = (pa[1] & 0xF0) | (pb[0] >> 4);
        out[2] = (pb[0] << 4) | (pb[1] >> 4);
        out[3] = pc[0];
        out[4] = (pc[1] & 0xF0) | (pd[0] >> 4);
        out[5] = (pd[0] << 4) | (pd[1] >> 4);

        out[6] = (pa[1] << 4) | (pa[2] >> 4);
        out[7] = (pa[2] << 4) | (pb[1] & 0x0F);
        out[8] = pb[2];
        out[9] = (pc[1] << 4) | (pc[2] >> 4);
        out[10] = (pc[2] << 4) | (pd[1] & 0x0F);
        out[11] = pd[2];
    }
}

pub(super) fn flip4x16(planes: [&[u8]; 4], dst: &mut [u8]) {
    let [a, b, c, d] = planes;
    let samples = a
        .chunks_exact(2)
        .zip(b.chunks_exact(2))
        .zip(c.chunks_exact(2))
        .zip(d.chunks_exact(2));
    for (out, (((sa, sb), sc), sd)) in dst.chunks_exact_mut(8).zip(samples) {
        out[..2].copy_from_slice(sa);
        out[2..4].copy_from_slice(sb);
        out[4..6].copy_from_slice(sc);
        out[6..].copy_from_slice(sd);
    }
}

// ===========================================================================
// Scalar dispatch targets for incant!
// ===========================================================================

pub(super) fn flip4x8_impl_scalar(_token: ScalarToken, planes: [&[u8]; 4], dst: &mut [u8]) {
    flip4x8(planes, dst);
}

pub(super) fn flip4x16_impl_scalar(_token: ScalarToken, planes: [&[u8]; 4], dst: &mut [u8]) {
    flip4x16(planes, dst);
}
