//! Segment encoding: mode indicator, length field, packed payload bits.

use crate::error::{Error, Result};
use crate::models::{BitStream, ECLevel, Mode, Version};
use crate::tables;

/// Bits the packed payload occupies, excluding the segment header.
/// Kanji has no packing rule here and reports no size.
fn payload_bits(mode: Mode, length: usize) -> Option<usize> {
    match mode {
        Mode::Numeric => {
            let tail = match length % 3 {
                0 => 0,
                1 => 4,
                _ => 7,
            };
            Some(length / 3 * 10 + tail)
        }
        Mode::Alphanumeric => Some(length / 2 * 11 + length % 2 * 6),
        Mode::Byte => Some(length * 8),
        Mode::Kanji => None,
    }
}

/// True when a payload of `length` characters fits the data capacity
/// of a version/level pair
pub fn fits(mode: Mode, length: usize, version: Version, ec_level: ECLevel) -> bool {
    let Some(payload) = payload_bits(mode, length) else {
        return false;
    };
    let header = 4 + tables::length_field_bits(mode, version);
    header + payload < 8 * tables::data_words(version, ec_level)
}

/// Smallest version that takes the payload at this level
pub fn smallest_version(mode: Mode, length: usize, ec_level: ECLevel) -> Option<Version> {
    (1..=40)
        .filter_map(Version::new)
        .find(|&v| fits(mode, length, v, ec_level))
}

/// Append one segment: 4-bit mode indicator, length field, payload
pub fn encode_segment(
    stream: &mut BitStream,
    mode: Mode,
    data: &[u8],
    version: Version,
) -> Result<()> {
    if mode == Mode::Kanji {
        return Err(Error::InvalidInput("kanji segments are not supported"));
    }
    let field = tables::length_field_bits(mode, version);
    if data.len() >> field != 0 {
        return Err(Error::InvalidInput("segment length overflows its length field"));
    }

    stream.write(mode.indicator() as u32, 4)?;
    stream.write(data.len() as u32, field)?;
    match mode {
        Mode::Numeric => encode_numeric(stream, data),
        Mode::Alphanumeric => encode_alphanumeric(stream, data),
        _ => encode_byte(stream, data),
    }
}

/// Pack digits three to 10 bits, with 7- and 4-bit tail groups
fn encode_numeric(stream: &mut BitStream, data: &[u8]) -> Result<()> {
    for chunk in data.chunks(3) {
        let mut value: u32 = 0;
        for &byte in chunk {
            if !byte.is_ascii_digit() {
                return Err(Error::InvalidInput("non-digit byte in numeric segment"));
            }
            value = value * 10 + (byte - b'0') as u32;
        }
        let bits = match chunk.len() {
            3 => 10,
            2 => 7,
            _ => 4,
        };
        stream.write(value, bits)?;
    }
    Ok(())
}

/// Pack charset values two to 11 bits, with a 6-bit tail single
fn encode_alphanumeric(stream: &mut BitStream, data: &[u8]) -> Result<()> {
    for chunk in data.chunks(2) {
        let first = tables::alphanumeric_value(chunk[0])
            .ok_or(Error::InvalidInput("byte outside the alphanumeric charset"))?
            as u32;
        if let [_, second] = *chunk {
            let second = tables::alphanumeric_value(second)
                .ok_or(Error::InvalidInput("byte outside the alphanumeric charset"))?
                as u32;
            stream.write(first * 45 + second, 11)?;
        } else {
            stream.write(first, 6)?;
        }
    }
    Ok(())
}

fn encode_byte(stream: &mut BitStream, data: &[u8]) -> Result<()> {
    for &byte in data {
        stream.write(byte as u32, 8)?;
    }
    Ok(())
}
