// ---------------------------------------------------------------------------
// Three planes → chunky, one routine per supported depth.
//
// Every routine receives planes already trimmed to the bytes it consumes
// and an output slice trimmed to the bytes it produces.
// ---------------------------------------------------------------------------

use super::Depth;

/// Spread the `8 / bits` samples of one input byte across a 24-bit block,
/// leaving room for two more planes after each sample.
///
/// Sample `j` (MSB first) lands with its top bit at position
/// `23 - 3 * bits * j`. Planes 1 and 2 reuse the table shifted right by
/// `bits` and `2 * bits`.
const fn expand3(bits: u32) -> [u32; 256] {
    let mut table = [0u32; 256];
    let mask = (1u32 << bits) - 1;
    let per_byte = 8 / bits;
    let mut byte = 0;
    while byte < 256 {
        let mut v = 0u32;
        let mut j = 0;
        while j < per_byte {
            let field = (byte as u32 >> (8 - bits * (j + 1))) & mask;
            v |= field << (24 - bits - 3 * bits * j);
            j += 1;
        }
        table[byte] = v;
        byte += 1;
    }
    table
}

static EXPAND3_1: [u32; 256] = expand3(1);
static EXPAND3_2: [u32; 256] = expand3(2);

pub(super) fn flip(depth: Depth, planes: [&[u8]; 3], dst: &mut [u8]) {
    match depth {
        Depth::D1 => flip3_table(&EXPAND3_1, 1, planes, dst),
        Depth::D2 => flip3_table(&EXPAND3_2, 2, planes, dst),
        Depth::D4 => flip3x4(planes, dst),
        Depth::D8 => flip3x8(planes, dst),
        Depth::D12 => flip3x12(planes, dst),
        Depth::D16 => flip3x16(planes, dst),
    }
}

fn flip3_table(table: &[u32; 256], bits: u32, planes: [&[u8]; 3], dst: &mut [u8]) {
    let [a, b, c] = planes;
    for (((out, &x), &y), &z) in dst.chunks_exact_mut(3).zip(a).zip(b).zip(c) {
        let b24 = table[x as usize]
            | (table[y as usize] >> bits)
            | (table[z as usize] >> (2 * bits));
        out.copy_from_slice(&b24.to_be_bytes()[1..]);
    }
}

/// Two pixels per three output bytes: `a0 b0 | c0 a1 | b1 c1` by nibble.
fn flip3x4(planes: [&[u8]; 3], dst: &mut [u8]) {
    let [a, b, c] = planes;
    for (((out, &x), &y), &z) in dst.chunks_exact_mut(3).zip(a).zip(b).zip(c) {
        out[0] = (x & 0xF0) | (y >> 4);
        out[1] = (z & 0xF0) | (x & 0x0F);
        out[2] = (y << 4) | (z & 0x0F);
    }
}

fn flip3x8(planes: [&[u8]; 3], dst: &mut [u8]) {
    let [a, b, c] = planes;
    for (((out, &x), &y), &z) in dst.chunks_exact_mut(3).zip(a).zip(b).zip(c) {
        out[0] = x;
        out[1] = y;
        out[2] = z;
    }
}

/// Three input bytes per plane hold two 12-bit samples; each group of two
/// pixels fills nine output bytes.
fn flip3x12(planes: [&[u8]; 3], dst: &mut [u8]) {
    let [a, b, c] = planes;
    let groups = a.chunks_exact(3).zip(b.chunks_exact(3)).zip(c.chunks_exact(3));
    for (out, ((pa, pb), pc)) in dst.chunks_exact_mut(9).zip(groups) {
        // pixel 0: a[0] a[1]hi | b[0] b[1]hi | c[0] c[1]hi
        out[0] = pa[0];
        out[1] = (pa[1] & 0xF0) | (pb[0] >> 4);
        out[2] = (pb[0] << 4) | (pb[1] >> 4);
        out[3] = pc[0];
        // pixel 1 starts on the low nibble of out[4]
        out[4] = (pc[1] & 0xF0) | (pa[1] & 0x0F);
        out[5] = pa[2];
        out[6] = (pb[1] << 4) | (pb[2] >> 4);
        out[7] = (pb[2] << 4) | (pc[1] & 0x0F);
        out[8] = pc[2];
    }
}

fn flip3x16(planes: [&[u8]; 3], dst: &mut [u8]) {
    let [a, b, c] = planes;
    let samples = a.chunks_exact(2).zip(b.chunks_exact(2)).zip(c.chunks_exact(2));
    for (out, ((sa, sb), sc)) in dst.chunks_exact_mut(6).zip(samples) {
        out[..2].copy_from_slice(sa);
        out[2..4].copy_from_slice(sb);
        out[4..].copy_from_slice(sc);
    }
}
