//! Alphanumeric mode (indicator 0010): charset pairs in 11 bits, a
//! leftover single in 6 bits.

use crate::error::{Error, Result};
use crate::models::BitStream;
use crate::tables::ALPHANUMERIC_CHARSET;

/// Decode `count` charset symbols from the stream, appending ASCII
/// to `out`
pub fn decode(stream: &mut BitStream, count: usize, out: &mut Vec<u8>) -> Result<()> {
    let mut remaining = count;
    while remaining > 0 {
        if remaining >= 2 {
            if stream.remaining() < 11 {
                return Err(Error::MalformedData("alphanumeric segment past end of stream"));
            }
            let value = stream.read(11)?;
            if value >= 45 * 45 {
                return Err(Error::MalformedData("alphanumeric pair out of range"));
            }
            out.push(ALPHANUMERIC_CHARSET[(value / 45) as usize]);
            out.push(ALPHANUMERIC_CHARSET[(value % 45) as usize]);
            remaining -= 2;
        } else {
            if stream.remaining() < 6 {
                return Err(Error::MalformedData("alphanumeric segment past end of stream"));
            }
            let value = stream.read(6)?;
            if value >= 45 {
                return Err(Error::MalformedData("alphanumeric value out of range"));
            }
            out.push(ALPHANUMERIC_CHARSET[value as usize]);
            remaining -= 1;
        }
    }
    Ok(())
}
