use std::ops::Range;

/// Expand `payload` into bits, eight per byte, most significant bit first.
pub fn encode_bytes(payload: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(payload.len() * 8);
    for &byte in payload {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

/// Expand only bits `range` of `payload`, numbered as in [`encode_bytes`].
///
/// Panics when `range` reaches past `payload.len() * 8`.
pub fn bit_range(payload: &[u8], range: Range<usize>) -> Vec<bool> {
    range
        .map(|i| (payload[i / 8] >> (7 - i % 8)) & 1 == 1)
        .collect()
}

/// Pack bits back into bytes, eight at a time.
///
/// A trailing group shorter than eight bits is dropped, never zero-extended, so this never fails.
pub fn decode_bits(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|group| group.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/codec/bitstream.rs"]
mod tests;
