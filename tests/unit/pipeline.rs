use super::*;
use crate::codec::framing::Framing;
use crate::codec::geometry::GridGeometry;

fn tiny(framing: Framing) -> CodecConfig {
    CodecConfig {
        geometry: GridGeometry::new(4, 1, 1).unwrap(),
        framing,
        ..CodecConfig::default()
    }
}

fn parallel(threads: usize) -> PipelineOpts {
    PipelineOpts {
        parallel: true,
        threads: Some(threads),
        chunk_size: 3,
    }
}

#[test]
fn hi_uses_two_frames_with_raw_framing() {
    let codec = Codec::new(tiny(Framing::Raw), PipelineOpts::default()).unwrap();
    let frames = codec.encode_frames(b"Hi").unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(codec.frame_count(2).unwrap(), 2);
    assert_eq!(codec.decode_frames(frames).unwrap(), b"Hi");
}

#[test]
fn length_prefix_adds_header_frames() {
    let codec = Codec::new(tiny(Framing::LengthPrefixed), PipelineOpts::default()).unwrap();
    assert_eq!(codec.frame_count(2).unwrap(), 6);
    let frames = codec.encode_frames(b"Hi").unwrap();
    assert_eq!(frames.len(), 6);
    assert_eq!(codec.decode_frames(frames).unwrap(), b"Hi");
}

#[test]
fn empty_payload_raw_has_no_frames() {
    let codec = Codec::new(tiny(Framing::Raw), PipelineOpts::default()).unwrap();
    let frames = codec.encode_frames(b"").unwrap();
    assert!(frames.is_empty());
    assert!(codec.decode_frames(frames).unwrap().is_empty());
}

#[test]
fn decode_assembles_by_index_not_input_order() {
    let codec = Codec::new(tiny(Framing::Raw), parallel(4)).unwrap();
    let mut frames = codec.encode_frames(b"ordering").unwrap();
    frames.reverse();
    assert_eq!(codec.decode_frames(frames).unwrap(), b"ordering");
}

#[test]
fn parallel_and_sequential_frames_match() {
    let cfg = CodecConfig {
        geometry: GridGeometry::new(12, 6, 3).unwrap(),
        ..CodecConfig::default()
    };
    let payload: Vec<u8> = (0..200u8).collect();
    let seq = Codec::new(cfg, PipelineOpts::default()).unwrap();
    let par = Codec::new(cfg, parallel(3)).unwrap();

    let a = seq.encode_frames(&payload).unwrap();
    let b = par.encode_frames(&payload).unwrap();
    assert_eq!(a, b);
    assert_eq!(par.decode_frames(b).unwrap(), payload);
}

#[test]
fn one_bad_frame_fails_the_whole_decode() {
    let codec = Codec::new(tiny(Framing::Raw), parallel(2)).unwrap();
    let mut frames = codec.encode_frames(b"abcd").unwrap();
    frames[2].1.data[3] = 0;
    let err = codec.decode_frames(frames).unwrap_err();
    assert!(matches!(err, ReelError::TransparentPixel { frame: 2, .. }));
}

#[test]
fn truncated_video_is_a_length_mismatch() {
    let codec = Codec::new(tiny(Framing::LengthPrefixed), PipelineOpts::default()).unwrap();
    let mut frames = codec.encode_frames(b"abc").unwrap();
    frames.pop();
    let err = codec.decode_frames(frames).unwrap_err();
    assert!(matches!(err, ReelError::BitLengthMismatch(_)));
}

#[test]
fn configuration_errors_fail_at_construction() {
    let bad_tolerance = CodecConfig {
        tolerance: 0,
        ..CodecConfig::default()
    };
    assert!(Codec::new(bad_tolerance, PipelineOpts::default()).is_err());

    let bad_geometry = CodecConfig {
        geometry: GridGeometry {
            width: 2,
            height: 2,
            block_size: 3,
        },
        ..CodecConfig::default()
    };
    assert!(Codec::new(bad_geometry, PipelineOpts::default()).is_err());

    assert!(Codec::new(CodecConfig::default(), parallel(0)).is_err());

    let sequential_zero_threads = PipelineOpts {
        parallel: false,
        threads: Some(0),
        chunk_size: 1,
    };
    let err = Codec::new(tiny(Framing::Raw), sequential_zero_threads).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn assemble_concatenates_in_given_order() {
    let out = assemble(vec![vec![true], vec![], vec![false, true]]);
    assert_eq!(out, vec![true, false, true]);
}

#[test]
fn malformed_caller_raster_is_an_error_not_a_panic() {
    let codec = Codec::new(tiny(Framing::Raw), PipelineOpts::default()).unwrap();
    let frames = vec![(
        FrameIndex(0),
        Raster {
            width: 4,
            height: 1,
            data: vec![255; 4],
        },
    )];
    let err = codec.decode_frames(frames).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn per_frame_bits_match_a_whole_stream_split() {
    // 6 bits per frame, so frame boundaries fall inside bytes.
    let cfg = CodecConfig {
        geometry: GridGeometry::new(3, 1, 1).unwrap(),
        framing: Framing::Raw,
        ..CodecConfig::default()
    };
    let codec = Codec::new(cfg, parallel(2)).unwrap();
    let payload = b"\x5a\xc3\x0f\xf0\x81";

    let frames = codec.encode_frames(payload).unwrap();
    let bits = crate::codec::bitstream::encode_bytes(payload);
    let expected = crate::codec::chunk::split(&bits, 6).unwrap();
    assert_eq!(frames.len(), expected.len());
    for ((idx, raster), chunk) in frames.iter().zip(&expected) {
        assert_eq!(*idx, chunk.index);
        assert_eq!(*raster, codec.rasterize_chunk(chunk).unwrap());
    }
    assert_eq!(codec.decode_frames(frames).unwrap(), payload);
}
