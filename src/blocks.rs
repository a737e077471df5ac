//! Codeword block structure: terminator/filler padding, per-block
//! Reed-Solomon parity, and the column-wise interleave.

use crate::ecc::reed_solomon;
use crate::error::{Error, Result};
use crate::models::{BitStream, ECLevel, Version};
use crate::tables;

/// How a symbol's codewords split into RS blocks. At most two kinds
/// exist: short blocks first, then long blocks carrying one extra
/// data word. EC length is uniform across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Blocks of each kind, short then long
    pub block_count: [usize; 2],
    /// Data words per block of each kind
    pub data_length: [usize; 2],
    /// EC words appended to every block
    pub ec_length: usize,
}

impl BlockLayout {
    /// Derive the block structure for a version/level pair
    pub fn new(version: Version, ec_level: ECLevel) -> Self {
        let info = tables::ec_block_info(version, ec_level);
        let data_words = tables::data_words(version, ec_level);
        let short = data_words / info.num_blocks;
        let num_long = data_words % info.num_blocks;
        Self {
            block_count: [info.num_blocks - num_long, num_long],
            data_length: [short, short + 1],
            ec_length: info.ecc_per_block,
        }
    }

    /// Total data words across all blocks
    pub fn data_words(&self) -> usize {
        self.block_count[0] * self.data_length[0] + self.block_count[1] * self.data_length[1]
    }

    /// Total codewords, data plus EC
    pub fn total_words(&self) -> usize {
        self.data_words() + (self.block_count[0] + self.block_count[1]) * self.ec_length
    }

    /// Data length of each block in symbol order, short kinds first
    fn block_lengths(&self) -> Vec<usize> {
        let mut lengths = Vec::with_capacity(self.block_count[0] + self.block_count[1]);
        lengths.extend(std::iter::repeat(self.data_length[0]).take(self.block_count[0]));
        lengths.extend(std::iter::repeat(self.data_length[1]).take(self.block_count[1]));
        lengths
    }

    fn longest_data(&self) -> usize {
        if self.block_count[1] > 0 {
            self.data_length[1]
        } else {
            self.data_length[0]
        }
    }
}

/// Pad a segment stream out to the full data-word capacity: up to four
/// terminator zeros, zero-fill to the byte boundary, then alternating
/// 0xEC/0x11 filler words. Padding appends at the end regardless of
/// where the cursor sits.
pub fn pad_stream(stream: &mut BitStream, data_words: usize) -> Result<()> {
    let capacity = 8 * data_words;
    if stream.len() > capacity {
        return Err(Error::InvalidInput("segments overflow the data capacity"));
    }
    stream.seek(stream.len())?;

    let terminator = (capacity - stream.len()).min(4);
    stream.write(0, terminator)?;
    let tail = stream.len() % 8;
    if tail != 0 {
        stream.write(0, 8 - tail)?;
    }

    let mut odd = false;
    while stream.len() < capacity {
        stream.write(if odd { 0x11 } else { 0xEC }, 8)?;
        odd = !odd;
    }
    Ok(())
}

/// Split padded data words into blocks, compute per-block parity, and
/// interleave both column-wise: word i of every block in turn, short
/// blocks dropping out once exhausted, then the EC columns.
pub fn interleave(data: &[u8], layout: &BlockLayout) -> Result<Vec<u8>> {
    debug_assert_eq!(data.len(), layout.data_words());

    let mut blocks: Vec<&[u8]> = Vec::with_capacity(layout.block_count[0] + layout.block_count[1]);
    let mut offset = 0;
    for len in layout.block_lengths() {
        blocks.push(&data[offset..offset + len]);
        offset += len;
    }

    let parity: Vec<Vec<u8>> = blocks
        .iter()
        .map(|block| reed_solomon::compute_parity(block, layout.ec_length))
        .collect();

    let mut out = Vec::new();
    out.try_reserve(layout.total_words())?;
    for i in 0..layout.longest_data() {
        for block in &blocks {
            if i < block.len() {
                out.push(block[i]);
            }
        }
    }
    for i in 0..layout.ec_length {
        for block_parity in &parity {
            out.push(block_parity[i]);
        }
    }
    Ok(out)
}

/// Invert [`interleave`]: recover the concatenated data words from an
/// interleaved codeword stream. The EC tail is not consumed.
pub fn deinterleave(words: &[u8], layout: &BlockLayout) -> Result<Vec<u8>> {
    if words.len() < layout.data_words() {
        return Err(Error::MalformedData("codeword stream shorter than block layout"));
    }

    let lengths = layout.block_lengths();
    let mut blocks: Vec<Vec<u8>> = lengths.iter().map(|&len| Vec::with_capacity(len)).collect();
    let mut cursor = 0;
    for i in 0..layout.longest_data() {
        for (block, &len) in blocks.iter_mut().zip(&lengths) {
            if i < len {
                block.push(words[cursor]);
                cursor += 1;
            }
        }
    }

    let mut out = Vec::new();
    out.try_reserve(layout.data_words())?;
    for block in &blocks {
        out.extend_from_slice(block);
    }
    Ok(out)
}

/// Pad the segment stream and produce the full interleaved codeword
/// stream for a version/level pair
pub fn assemble(stream: &mut BitStream, version: Version, ec_level: ECLevel) -> Result<Vec<u8>> {
    let layout = BlockLayout::new(version, ec_level);
    pad_stream(stream, layout.data_words())?;
    interleave(&stream.to_bytes(), &layout)
}
