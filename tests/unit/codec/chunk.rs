use super::*;
use crate::codec::bitstream::encode_bytes;

#[test]
fn hi_splits_into_two_full_chunks() {
    let bits = encode_bytes(b"Hi");
    let chunks = split(&bits, 8).unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].index, FrameIndex(0));
    assert_eq!(chunks[1].index, FrameIndex(1));
    assert_eq!(chunks[0].bits, &bits[..8]);
    assert_eq!(chunks[1].bits, &bits[8..]);
}

#[test]
fn last_chunk_holds_the_remainder() {
    let bits = vec![true; 20];
    let chunks = split(&bits, 8).unwrap();
    let lens: Vec<usize> = chunks.iter().map(|c| c.bits.len()).collect();
    assert_eq!(lens, vec![8, 8, 4]);
    assert_eq!(chunk_count(20, 8), 3);
}

#[test]
fn indices_are_gapless() {
    let bits = vec![false; 100];
    let chunks = split(&bits, 6).unwrap();
    for (i, c) in chunks.iter().enumerate() {
        assert_eq!(c.index, FrameIndex(i as u64));
    }
    assert_eq!(chunks.len(), chunk_count(100, 6));
}

#[test]
fn empty_bitstream_has_no_chunks() {
    assert!(split(&[], 8).unwrap().is_empty());
    assert_eq!(chunk_count(0, 8), 0);
}

#[test]
fn zero_capacity_is_rejected() {
    assert!(split(&[true], 0).is_err());
}
