/// Exchange the bits selected by `mask` in `r` with the bits `shift`
/// positions higher in `s`.
///
/// Bit `i` of `r` (where `mask` has bit `i` set) trades places with bit
/// `i + shift` of `s`. All other bits are left alone. `mask << shift` must
/// fit in a byte.
#[inline(always)]
pub(crate) const fn transpose(r: u8, s: u8, mask: u8, shift: u32) -> (u8, u8) {
    let t = ((s >> shift) ^ r) & mask;
    (r ^ t, s ^ (t << shift))
}
