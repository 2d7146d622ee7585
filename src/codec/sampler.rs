use crate::codec::geometry::GridGeometry;
use crate::codec::palette::{Classification, Palette};
use crate::codec::raster::Raster;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};

/// Recover the bits carried by one frame.
///
/// Samples the top-left pixel of every cell in row-major order. Every cell yields exactly two
/// bits; transparent or (in strict mode) ambiguous pixels fail the frame.
pub fn sample(
    geometry: &GridGeometry,
    palette: &Palette,
    frame: FrameIndex,
    raster: &Raster,
) -> ReelResult<Vec<bool>> {
    geometry.validate()?;
    if raster.width != geometry.width || raster.height != geometry.height {
        return Err(ReelError::validation(format!(
            "frame {frame} is {}x{}, expected {}x{}",
            raster.width, raster.height, geometry.width, geometry.height
        )));
    }
    if raster.data.len() != geometry.raster_len() {
        return Err(ReelError::validation(format!(
            "frame {frame} holds {} bytes, expected {}",
            raster.data.len(),
            geometry.raster_len()
        )));
    }

    let mut bits = Vec::with_capacity(geometry.capacity_bits());
    for cell in 0..geometry.cell_count() {
        let (x, y) = geometry.cell_origin(cell);
        let px = raster.pixel(x, y);
        match palette.classify(px) {
            Classification::Symbol(s) => bits.extend_from_slice(&s.bits()),
            Classification::Transparent => {
                return Err(ReelError::TransparentPixel {
                    frame: frame.0,
                    x,
                    y,
                });
            }
            Classification::Ambiguous => {
                return Err(ReelError::ClassificationAmbiguous {
                    frame: frame.0,
                    x,
                    y,
                    rgb: [px[0], px[1], px[2]],
                });
            }
        }
    }
    Ok(bits)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/sampler.rs"]
mod tests;
