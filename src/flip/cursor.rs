use crate::FlipError;

/// MSB-first bit writer over a caller-owned byte buffer.
///
/// Bits accumulate in `pending` until a byte is complete. The buffer is only
/// ever written, never read. Lives for one transform call.
pub(crate) struct BitCursor<'a> {
    out: &'a mut [u8],
    pos: usize,
    bit: u32,
    pending: u8,
}

impl<'a> BitCursor<'a> {
    pub(crate) fn new(out: &'a mut [u8]) -> Self {
        Self {
            out,
            pos: 0,
            bit: 0,
            pending: 0,
        }
    }

    #[inline(always)]
    fn emit(&mut self, byte: u8) -> Result<(), FlipError> {
        let actual = self.out.len();
        let slot = self.out.get_mut(self.pos).ok_or(FlipError::RangeCheck {
            needed: self.pos + 1,
            actual,
        })?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }

    /// Append the low `width` bits of `value`, `width` in `1..=8`.
    #[inline]
    pub(crate) fn append_bits(&mut self, value: u8, width: u32) -> Result<(), FlipError> {
        debug_assert!((1..=8).contains(&width));
        let value = u32::from(value) & ((1 << width) - 1);
        let free = 8 - self.bit;
        if width < free {
            self.pending |= (value << (free - width)) as u8;
            self.bit += width;
            return Ok(());
        }
        let spill = width - free;
        self.emit(self.pending | (value >> spill) as u8)?;
        self.pending = ((value << (8 - spill)) & 0xFF) as u8;
        self.bit = spill;
        Ok(())
    }

    /// Append a 12-bit field. Only valid on streams made entirely of 12-bit
    /// fields, where the cursor always sits on a byte or nibble boundary.
    #[inline]
    pub(crate) fn append_12(&mut self, value: u16) -> Result<(), FlipError> {
        debug_assert!(self.bit == 0 || self.bit == 4);
        let value = value & 0x0FFF;
        if self.bit == 0 {
            self.emit((value >> 4) as u8)?;
            self.pending = (value << 4) as u8;
            self.bit = 4;
        } else {
            self.emit(self.pending | (value >> 8) as u8)?;
            self.emit(value as u8)?;
            self.pending = 0;
            self.bit = 0;
        }
        Ok(())
    }

    /// Write out a partially filled byte (low bits zero) and return the
    /// number of bytes written.
    pub(crate) fn flush(mut self) -> Result<usize, FlipError> {
        if self.bit > 0 {
            self.emit(self.pending)?;
        }
        Ok(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_sub_byte_fields_msb_first() {
        let mut buf = [0xEEu8; 2];
        let mut c = BitCursor::new(&mut buf);
        for v in [1, 0, 0, 1, 0, 0, 1, 0] {
            c.append_bits(v, 1).unwrap();
        }
        c.append_bits(0b11, 2).unwrap();
        assert_eq!(c.flush().unwrap(), 2);
        assert_eq!(buf, [0b1001_0010, 0b1100_0000]);
    }

    #[test]
    fn whole_bytes_pass_through() {
        let mut buf = [0u8; 3];
        let mut c = BitCursor::new(&mut buf);
        for v in [0x12, 0x34, 0x56] {
            c.append_bits(v, 8).unwrap();
        }
        assert_eq!(c.flush().unwrap(), 3);
        assert_eq!(buf, [0x12, 0x34, 0x56]);
    }

    #[test]
    fn straddles_byte_boundary() {
        let mut buf = [0u8; 2];
        let mut c = BitCursor::new(&mut buf);
        c.append_bits(0b101, 3).unwrap();
        c.append_bits(0b1111_0000, 8).unwrap();
        assert_eq!(c.flush().unwrap(), 2);
        assert_eq!(buf, [0b1011_1110, 0b0000_0000]);
    }

    #[test]
    fn twelve_bit_fields() {
        let mut buf = [0u8; 5];
        let mut c = BitCursor::new(&mut buf);
        c.append_12(0xABC).unwrap();
        c.append_12(0xDEF).unwrap();
        c.append_12(0x123).unwrap();
        assert_eq!(c.flush().unwrap(), 5);
        assert_eq!(buf, [0xAB, 0xCD, 0xEF, 0x12, 0x30]);
    }

    #[test]
    fn overflow_is_range_check() {
        let mut buf = [0u8; 1];
        let mut c = BitCursor::new(&mut buf);
        c.append_bits(0xFF, 8).unwrap();
        assert_eq!(
            c.append_bits(0x01, 8),
            Err(FlipError::RangeCheck { needed: 2, actual: 1 })
        );
    }

    #[test]
    fn empty_flush_writes_nothing() {
        let mut buf = [0x77u8; 1];
        let c = BitCursor::new(&mut buf);
        assert_eq!(c.flush().unwrap(), 0);
        assert_eq!(buf, [0x77]);
    }
}
