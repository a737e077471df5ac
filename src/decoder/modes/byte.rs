//! Byte mode (indicator 0100): raw octets, 8 bits each.

use crate::error::{Error, Result};
use crate::models::BitStream;

/// Decode `count` bytes from the stream, appending them to `out`
pub fn decode(stream: &mut BitStream, count: usize, out: &mut Vec<u8>) -> Result<()> {
    if stream.remaining() < 8 * count {
        return Err(Error::MalformedData("byte segment past end of stream"));
    }
    out.try_reserve(count)?;
    for _ in 0..count {
        out.push(stream.read(8)? as u8);
    }
    Ok(())
}
