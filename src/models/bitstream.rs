use crate::error::{Error, Result};

/// Growable bit buffer with MSB-first read/write semantics.
///
/// The stream keeps a cursor `pos` and a logical length `count`, both in
/// bits, with `pos <= count` at all times. Writing is destructive: after a
/// write the logical length is the cursor position, so seeking back and
/// writing discards everything that followed. This matches the wire
/// convention of building codewords front to back with no holes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    pos: usize,
    count: usize,
}

impl BitStream {
    /// Create an empty stream
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            pos: 0,
            count: 0,
        }
    }

    /// Create an empty stream with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Result<Self> {
        let mut stream = Self::new();
        stream.resize(bits)?;
        Ok(stream)
    }

    /// Grow the backing buffer to hold at least `bits` bits.
    /// Never shrinks logical content.
    pub fn resize(&mut self, bits: usize) -> Result<()> {
        let bytes = bits.div_ceil(8);
        if bytes > self.data.len() {
            self.data.try_reserve(bytes - self.data.len())?;
            self.data.resize(bytes, 0);
        }
        Ok(())
    }

    /// Logical length in bits
    pub fn len(&self) -> usize {
        self.count
    }

    /// True if no bits have been written
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current cursor position in bits
    pub fn tell(&self) -> usize {
        self.pos
    }

    /// Bits left between the cursor and the logical end
    pub fn remaining(&self) -> usize {
        self.count - self.pos
    }

    /// Move the cursor; seeking past the logical end is a contract violation
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.count {
            return Err(Error::RangeError("seek past end of stream"));
        }
        self.pos = pos;
        Ok(())
    }

    /// Read `n` bits (n <= 32) MSB-first, advancing the cursor.
    /// The stream is untouched when fewer than `n` bits remain.
    pub fn read(&mut self, n: usize) -> Result<u32> {
        if n > 32 {
            return Err(Error::RangeError("read width exceeds 32 bits"));
        }
        if self.remaining() < n {
            return Err(Error::RangeError("read past end of stream"));
        }
        let mut value = 0u32;
        for _ in 0..n {
            value = (value << 1) | (self.bit_at(self.pos) as u32);
            self.pos += 1;
        }
        Ok(value)
    }

    /// Write the low `n` bits of `value` (n <= 32) MSB-first at the cursor,
    /// growing the buffer on demand. The logical length becomes the new
    /// cursor position: anything past it is truncated.
    pub fn write(&mut self, value: u32, n: usize) -> Result<()> {
        if n > 32 {
            return Err(Error::RangeError("write width exceeds 32 bits"));
        }
        self.resize(self.pos + n)?;
        for i in (0..n).rev() {
            self.set_bit_at(self.pos, (value >> i) & 1 == 1);
            self.pos += 1;
        }
        self.count = self.pos;
        Ok(())
    }

    /// Write every value of `values` as a `width`-bit field
    pub fn pack(&mut self, values: &[u32], width: usize) -> Result<()> {
        for &value in values {
            self.write(value, width)?;
        }
        Ok(())
    }

    /// Read `count` consecutive `width`-bit fields.
    /// All-or-nothing: fails without moving the cursor if the stream is short.
    pub fn unpack(&mut self, count: usize, width: usize) -> Result<Vec<u32>> {
        if width > 32 {
            return Err(Error::RangeError("read width exceeds 32 bits"));
        }
        let total = count
            .checked_mul(width)
            .ok_or(Error::RangeError("unpack length overflows"))?;
        if self.remaining() < total {
            return Err(Error::RangeError("read past end of stream"));
        }
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.read(width)?);
        }
        Ok(values)
    }

    /// Move `n` bits from `src`'s cursor to `self`'s cursor in 16-bit
    /// chunks; both cursors advance. All-or-nothing on a short source.
    pub fn copy_bits(&mut self, src: &mut BitStream, n: usize) -> Result<()> {
        if src.remaining() < n {
            return Err(Error::RangeError("copy past end of source stream"));
        }
        let mut left = n;
        while left > 0 {
            let take = left.min(16);
            let chunk = src.read(take)?;
            self.write(chunk, take)?;
            left -= take;
        }
        Ok(())
    }

    /// Append the whole logical content of `src` without disturbing `src`'s
    /// cursor.
    pub fn concat(&mut self, src: &BitStream) -> Result<()> {
        let mut at = 0;
        while at < src.count {
            let take = (src.count - at).min(16);
            let mut chunk = 0u32;
            for i in 0..take {
                chunk = (chunk << 1) | (src.bit_at(at + i) as u32);
            }
            self.write(chunk, take)?;
            at += take;
        }
        Ok(())
    }

    /// Packed copy of the logical content, MSB-first, zero-padded tail
    pub fn to_bytes(&self) -> Vec<u8> {
        let bytes = (self.count + 7) / 8;
        let mut out = self.data[..bytes].to_vec();
        // Stale bits can survive past `count` after a truncating write.
        if self.count % 8 != 0 {
            if let Some(last) = out.last_mut() {
                *last &= 0xFFu8 << (8 - self.count % 8);
            }
        }
        out
    }

    fn bit_at(&self, index: usize) -> bool {
        (self.data[index / 8] >> (7 - index % 8)) & 1 == 1
    }

    fn set_bit_at(&mut self, index: usize, bit: bool) {
        if bit {
            self.data[index / 8] |= 1 << (7 - index % 8);
        } else {
            self.data[index / 8] &= !(1 << (7 - index % 8));
        }
    }
}

impl Default for BitStream {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_order() {
        let mut stream = BitStream::new();
        stream.write(0b1101, 4).unwrap();
        assert_eq!(stream.to_bytes(), vec![0b1101_0000]);
        assert_eq!(stream.len(), 4);
    }

    #[test]
    fn test_write_then_read_back() {
        for n in 0..=32usize {
            let mut stream = BitStream::new();
            let value = 0xA5C3_96F0u32;
            let before = stream.tell();
            stream.write(value, n).unwrap();
            stream.seek(before).unwrap();
            let mask = if n == 32 { u32::MAX } else { (1u32 << n) - 1 };
            assert_eq!(stream.read(n).unwrap(), value & mask, "width {}", n);
        }
    }

    #[test]
    fn test_write_truncates() {
        let mut stream = BitStream::new();
        stream.write(0xABCD, 16).unwrap();
        assert_eq!(stream.len(), 16);
        stream.seek(8).unwrap();
        stream.write(0xF, 4).unwrap();
        // The 4 bits past the cursor are gone.
        assert_eq!(stream.len(), 12);
        assert_eq!(stream.to_bytes(), vec![0xAB, 0xF0]);
    }

    #[test]
    fn test_seek_contract() {
        let mut stream = BitStream::new();
        stream.write(0xFF, 8).unwrap();
        assert!(stream.seek(8).is_ok());
        assert_eq!(
            stream.seek(9),
            Err(Error::RangeError("seek past end of stream"))
        );
    }

    #[test]
    fn test_read_past_end_leaves_state() {
        let mut stream = BitStream::new();
        stream.write(0x3, 2).unwrap();
        stream.seek(0).unwrap();
        stream.read(1).unwrap();
        assert!(stream.read(2).is_err());
        assert_eq!(stream.tell(), 1);
        assert_eq!(stream.read(1).unwrap(), 1);
    }

    #[test]
    fn test_pack_unpack() {
        let mut stream = BitStream::new();
        let words = [0x12u32, 0x34, 0x56, 0x78];
        stream.pack(&words, 8).unwrap();
        assert_eq!(stream.len(), 32);
        stream.seek(0).unwrap();
        assert_eq!(stream.unpack(4, 8).unwrap(), words);
        // Short unpack fails without consuming anything.
        stream.seek(16).unwrap();
        assert!(stream.unpack(3, 8).is_err());
        assert_eq!(stream.tell(), 16);
    }

    #[test]
    fn test_unpack_overflow_sized_request() {
        let mut stream = BitStream::new();
        stream.write(0xABCD, 16).unwrap();
        stream.seek(0).unwrap();
        // the requested bit total wraps around usize
        assert!(matches!(
            stream.unpack(usize::MAX / 2 + 1, 4),
            Err(Error::RangeError(_))
        ));
        assert_eq!(stream.tell(), 0);
    }

    #[test]
    fn test_copy_bits_advances_both() {
        let mut src = BitStream::new();
        src.write(0xDEAD_BEEF, 32).unwrap();
        src.seek(4).unwrap();
        let mut dest = BitStream::new();
        dest.copy_bits(&mut src, 20).unwrap();
        assert_eq!(src.tell(), 24);
        assert_eq!(dest.len(), 20);
        dest.seek(0).unwrap();
        assert_eq!(dest.read(20).unwrap(), 0xEADBE);
    }

    #[test]
    fn test_concat_preserves_source_cursor() {
        let mut src = BitStream::new();
        src.write(0b10110, 5).unwrap();
        src.seek(2).unwrap();
        let mut dest = BitStream::new();
        dest.write(0b01, 2).unwrap();
        dest.concat(&src).unwrap();
        assert_eq!(src.tell(), 2);
        assert_eq!(dest.len(), 7);
        dest.seek(0).unwrap();
        assert_eq!(dest.read(7).unwrap(), 0b01_10110);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut stream = BitStream::new();
        stream.write(0xAA, 8).unwrap();
        stream.seek(3).unwrap();
        let mut copy = stream.clone();
        assert_eq!(copy.tell(), 3);
        assert_eq!(copy.len(), 8);
        copy.write(0, 1).unwrap();
        assert_eq!(copy.len(), 4);
        assert_eq!(stream.len(), 8);
    }

    #[test]
    fn test_to_bytes_masks_stale_tail() {
        let mut stream = BitStream::new();
        stream.write(0xFF, 8).unwrap();
        stream.seek(0).unwrap();
        stream.write(1, 1).unwrap();
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.to_bytes(), vec![0b1000_0000]);
    }

    #[test]
    fn test_zero_width_write_truncates_at_cursor() {
        let mut stream = BitStream::new();
        stream.write(0xFFFF, 16).unwrap();
        stream.seek(10).unwrap();
        stream.write(0, 0).unwrap();
        assert_eq!(stream.len(), 10);
    }
}
