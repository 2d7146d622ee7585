use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};

/// Contiguous slice of the bitstream carried by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Frame this chunk is painted into.
    pub index: FrameIndex,
    /// Chunk bits, at most one frame capacity long.
    pub bits: &'a [bool],
}

/// Number of chunks `bit_len` bits split into.
pub fn chunk_count(bit_len: usize, capacity_bits: usize) -> usize {
    if capacity_bits == 0 {
        return 0;
    }
    bit_len.div_ceil(capacity_bits)
}

/// Split `bits` into frame-sized chunks numbered from zero. Only the last chunk may be short.
pub fn split(bits: &[bool], capacity_bits: usize) -> ReelResult<Vec<Chunk<'_>>> {
    if capacity_bits == 0 {
        return Err(ReelError::validation("frame capacity must be non-zero"));
    }
    Ok(bits
        .chunks(capacity_bits)
        .enumerate()
        .map(|(i, bits)| Chunk {
            index: FrameIndex(i as u64),
            bits,
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/codec/chunk.rs"]
mod tests;
