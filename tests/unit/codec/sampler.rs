use super::*;
use crate::codec::bitstream::{decode_bits, encode_bytes};
use crate::codec::raster::rasterize;

#[test]
fn sampling_inverts_rasterizing_a_full_chunk() {
    let g = GridGeometry::new(24, 12, 6).unwrap();
    let p = Palette::default();
    let bits = encode_bytes(b"ok");
    let raster = rasterize(&g, &p, &bits).unwrap();
    let back = sample(&g, &p, FrameIndex(0), &raster).unwrap();
    assert_eq!(back, bits);
}

#[test]
fn filler_cells_read_back_as_zero_bits() {
    let g = GridGeometry::new(4, 2, 1).unwrap();
    let p = Palette::default();
    let raster = rasterize(&g, &p, &encode_bytes(b"A")).unwrap();
    let back = sample(&g, &p, FrameIndex(0), &raster).unwrap();
    assert_eq!(back.len(), g.capacity_bits());
    assert_eq!(decode_bits(&back), vec![b'A', 0]);
}

#[test]
fn only_top_left_pixel_of_a_cell_matters() {
    let g = GridGeometry::new(4, 2, 2).unwrap();
    let p = Palette::default();
    let mut raster = rasterize(&g, &p, &[true, false, false, true]).unwrap();
    // Scribble over a non-sampled pixel of cell 0.
    let i = (4 + 1) * 4;
    raster.data[i..i + 4].copy_from_slice(&[0, 255, 0, 255]);
    let back = sample(&g, &p, FrameIndex(0), &raster).unwrap();
    assert_eq!(back, vec![true, false, false, true]);
}

#[test]
fn transparent_pixel_fails_the_frame() {
    let g = GridGeometry::new(2, 1, 1).unwrap();
    let raster = Raster::from_rgba8(2, 1, vec![255, 0, 0, 255, 0, 0, 0, 0]).unwrap();
    let err = sample(&g, &Palette::default(), FrameIndex(4), &raster).unwrap_err();
    assert!(matches!(
        err,
        ReelError::TransparentPixel {
            frame: 4,
            x: 1,
            y: 0
        }
    ));
}

#[test]
fn strict_mode_reports_ambiguous_colors() {
    let g = GridGeometry::new(1, 1, 1).unwrap();
    let raster = Raster::from_rgba8(1, 1, vec![255, 255, 255, 255]).unwrap();
    let strict = Palette::new(150, true).unwrap();
    let err = sample(&g, &strict, FrameIndex(0), &raster).unwrap_err();
    assert!(matches!(err, ReelError::ClassificationAmbiguous { .. }));

    let lenient = Palette::default();
    assert_eq!(
        sample(&g, &lenient, FrameIndex(0), &raster).unwrap(),
        vec![false, true]
    );
}

#[test]
fn wrong_dimensions_are_rejected() {
    let g = GridGeometry::new(4, 4, 2).unwrap();
    let raster = Raster::from_rgba8(2, 2, vec![0; 16]).unwrap();
    assert!(matches!(
        sample(&g, &Palette::default(), FrameIndex(0), &raster),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn short_pixel_buffer_is_rejected_not_indexed() {
    let g = GridGeometry::new(4, 1, 1).unwrap();
    let raster = Raster {
        width: 4,
        height: 1,
        data: vec![255; 4],
    };
    assert!(matches!(
        sample(&g, &Palette::default(), FrameIndex(0), &raster),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn unvalidated_geometry_is_rejected() {
    let g = GridGeometry {
        width: 2,
        height: 2,
        block_size: 3,
    };
    let raster = Raster::from_rgba8(2, 2, vec![0; 16]).unwrap();
    assert!(matches!(
        sample(&g, &Palette::default(), FrameIndex(0), &raster),
        Err(ReelError::Validation(_))
    ));
}
