use crate::codec::geometry::{BITS_PER_CELL, GridGeometry};
use crate::codec::palette::{Palette, Symbol};
use crate::foundation::error::{ReelError, ReelResult};

/// Owned straight-alpha RGBA8 frame, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl Raster {
    /// Wrap existing pixel bytes, checking their length.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> ReelResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ReelError::validation(format!(
                "raster data is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// RGBA of pixel `(x, y)`. Panics when out of bounds or when `data` is shorter than
    /// `width * height * 4`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Symbol for `cell` within `bits`; cells without a full bit pair get the filler.
fn cell_symbol(bits: &[bool], cell: usize) -> Symbol {
    let at = cell * BITS_PER_CELL;
    match bits.get(at..at + BITS_PER_CELL) {
        Some(&[hi, lo]) => Symbol::from_bits(hi, lo),
        _ => Symbol::FILLER,
    }
}

/// Paint one chunk into a freshly allocated, fully opaque raster.
///
/// Each cell takes the bit pair at `2 * cell`; cells past the end of the chunk are filler.
/// Pixels past the last full cell column/row take the color of that edge cell.
pub fn rasterize(geometry: &GridGeometry, palette: &Palette, bits: &[bool]) -> ReelResult<Raster> {
    geometry.validate()?;
    if bits.len() > geometry.capacity_bits() {
        return Err(ReelError::validation(format!(
            "chunk of {} bits exceeds frame capacity {}",
            bits.len(),
            geometry.capacity_bits()
        )));
    }

    let width = geometry.width as usize;
    let columns = geometry.columns() as usize;
    let block = geometry.block_size as usize;
    let mut data = vec![0u8; geometry.raster_len()];
    let mut band = vec![0u8; width * 4];

    for row in 0..geometry.rows() {
        for x in 0..width {
            let col = (x / block).min(columns - 1);
            let rgba = palette.color(cell_symbol(bits, row as usize * columns + col));
            band[x * 4..x * 4 + 4].copy_from_slice(&rgba);
        }
        for y in geometry.band_rows(row) {
            let start = y as usize * width * 4;
            data[start..start + width * 4].copy_from_slice(&band);
        }
    }

    Raster::from_rgba8(geometry.width, geometry.height, data)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/raster.rs"]
mod tests;
