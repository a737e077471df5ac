//! Symbol decoding: format/version recovery, unmasking, codeword
//! extraction, de-interleaving and segment parsing.

/// Data mode decoders (numeric, alphanumeric, byte)
pub mod modes;

use crate::blocks::{self, BlockLayout};
use crate::ecc::bch;
use crate::error::{Error, Result};
use crate::layout;
use crate::models::{
    BitMatrix, BitStream, ECLevel, MaskPattern, Mode, ModuleGrid, QRCode, Segment, Version,
};
use crate::patterns;
use crate::tables;

/// Decode a sampled module matrix back into its payload and metadata.
///
/// The matrix must already be rectified: square, one bit per module,
/// dark = set. Version is inferred from the dimension and, for larger
/// symbols, cross-checked against the version info blocks.
pub fn decode(modules: &BitMatrix) -> Result<QRCode> {
    let mut grid = ModuleGrid::from_modules(modules.clone())?;
    let version = grid.version();

    if version.number() >= 7 {
        check_version_info(&grid)?;
    }

    let (ec_level, mask) = read_format_info(&grid)?;
    tracing::debug!(
        "version {}, ec level {:?}, mask {}",
        version.number(),
        ec_level,
        mask.index()
    );

    grid.apply_mask(mask);
    let words = layout::read_words(&grid, tables::total_words(version))?;
    let data = blocks::deinterleave(&words, &BlockLayout::new(version, ec_level))?;

    let segments = decode_segments(&data, version)?;
    Ok(QRCode::new(segments, version, ec_level, mask))
}

/// The version info blocks must agree with the symbol's dimension.
/// Both copies are read; the one with the smaller BCH distance wins.
fn check_version_info(grid: &ModuleGrid) -> Result<()> {
    let (first, second) = patterns::read_version(grid);
    let (v1, d1) = bch::decode_version(first);
    let (v2, d2) = bch::decode_version(second);
    let observed = if d2 < d1 { v2 } else { v1 };
    if observed != grid.version() {
        return Err(Error::MalformedData("version info disagrees with symbol size"));
    }
    Ok(())
}

/// Read both format copies, taking whichever BCH residue is clean.
/// The format code carries no error correction here, so a copy is
/// either taken verbatim or rejected.
fn read_format_info(grid: &ModuleGrid) -> Result<(ECLevel, MaskPattern)> {
    let (first, second) = patterns::read_format(grid);
    let bits = if bch::format_check(first) == 0 {
        first
    } else if bch::format_check(second) == 0 {
        second
    } else {
        return Err(Error::MalformedData("format info check failed in both copies"));
    };
    Ok(bch::decode_format(bits))
}

/// Walk the concatenated data codewords segment by segment, keeping
/// each segment's mode alongside its payload. A zero mode indicator
/// terminates the stream; fewer than four leftover bits end it
/// implicitly.
fn decode_segments(data: &[u8], version: Version) -> Result<Vec<Segment>> {
    let mut stream = BitStream::with_capacity(8 * data.len())?;
    for &byte in data {
        stream.write(byte as u32, 8)?;
    }
    stream.seek(0)?;

    let mut segments = Vec::new();
    loop {
        if stream.remaining() < 4 {
            break;
        }
        let indicator = stream.read(4)?;
        if indicator == 0 {
            break;
        }
        let mode = Mode::from_indicator(indicator as u8)
            .ok_or(Error::MalformedData("unknown segment mode indicator"))?;
        if mode == Mode::Kanji {
            return Err(Error::MalformedData("kanji segments are not supported"));
        }

        let field = tables::length_field_bits(mode, version);
        if stream.remaining() < field {
            return Err(Error::MalformedData("segment header past end of stream"));
        }
        let count = stream.read(field)? as usize;
        let mut payload = Vec::new();
        match mode {
            Mode::Numeric => modes::numeric::decode(&mut stream, count, &mut payload)?,
            Mode::Alphanumeric => modes::alphanumeric::decode(&mut stream, count, &mut payload)?,
            _ => modes::byte::decode(&mut stream, count, &mut payload)?,
        }
        segments.push(Segment {
            mode,
            data: payload,
        });
    }
    Ok(segments)
}
