//! Numeric mode (indicator 0001): groups of 3 digits in 10 bits,
//! 2 digits in 7 bits, 1 digit in 4 bits.

use crate::error::{Error, Result};
use crate::models::BitStream;

/// Decode `count` digits from the stream, appending ASCII to `out`
pub fn decode(stream: &mut BitStream, count: usize, out: &mut Vec<u8>) -> Result<()> {
    let mut remaining = count;
    while remaining > 0 {
        let group = remaining.min(3);
        let (bits, limit) = match group {
            3 => (10, 1000),
            2 => (7, 100),
            _ => (4, 10),
        };
        if stream.remaining() < bits {
            return Err(Error::MalformedData("numeric segment past end of stream"));
        }
        let value = stream.read(bits)?;
        if value >= limit {
            return Err(Error::MalformedData("numeric group out of range"));
        }

        let mut divisor = 10u32.pow(group as u32 - 1);
        while divisor > 0 {
            out.push(b'0' + (value / divisor % 10) as u8);
            divisor /= 10;
        }
        remaining -= group;
    }
    Ok(())
}
