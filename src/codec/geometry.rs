use crate::foundation::error::{ReelError, ReelResult};

/// Bits carried by one cell.
pub const BITS_PER_CELL: usize = 2;

/// Number of whole cells a `width x height` raster holds.
pub fn cell_count(width: u32, height: u32, block_size: u32) -> usize {
    if block_size == 0 {
        return 0;
    }
    (width / block_size) as usize * (height / block_size) as usize
}

/// Capacity of one frame holding `cells` cells.
pub fn frame_capacity_bits(cells: usize) -> usize {
    BITS_PER_CELL * cells
}

/// Row-major cell index of pixel `(x, y)`.
///
/// Pixels right of the last full column fold into that column. Rows are folded by
/// [`GridGeometry::cell_index_for_pixel`], which knows the raster height.
pub fn cell_index_for_pixel(x: u32, y: u32, width: u32, block_size: u32) -> usize {
    if block_size == 0 {
        return 0;
    }
    let columns = (width / block_size).max(1);
    let col = (x / block_size).min(columns - 1);
    col as usize + columns as usize * (y / block_size) as usize
}

/// Partition of a fixed-size raster into square cells, laid out row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridGeometry {
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// Cell edge length in pixels.
    pub block_size: u32,
}

impl GridGeometry {
    /// Create a validated geometry.
    pub fn new(width: u32, height: u32, block_size: u32) -> ReelResult<Self> {
        let g = Self {
            width,
            height,
            block_size,
        };
        g.validate()?;
        Ok(g)
    }

    /// Check dimensions and that at least one cell fits.
    pub fn validate(&self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation(
                "raster width/height must be non-zero",
            ));
        }
        if self.block_size == 0 {
            return Err(ReelError::validation("block size must be non-zero"));
        }
        if self.block_size > self.width || self.block_size > self.height {
            return Err(ReelError::validation(format!(
                "block size {} does not fit a {}x{} raster",
                self.block_size, self.width, self.height
            )));
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| ReelError::validation("raster byte size overflows usize"))?;
        Ok(())
    }

    /// Cells per row.
    pub fn columns(&self) -> u32 {
        self.width / self.block_size
    }

    /// Cell rows.
    pub fn rows(&self) -> u32 {
        self.height / self.block_size
    }

    /// Total cells per frame.
    pub fn cell_count(&self) -> usize {
        cell_count(self.width, self.height, self.block_size)
    }

    /// Payload bits one frame can carry.
    pub fn capacity_bits(&self) -> usize {
        frame_capacity_bits(self.cell_count())
    }

    /// Frames needed to carry `bit_len` bits.
    pub fn frames_needed(&self, bit_len: usize) -> usize {
        bit_len.div_ceil(self.capacity_bits())
    }

    /// Row-major cell index of pixel `(x, y)`, folding edge pixels into the last column/row.
    pub fn cell_index_for_pixel(&self, x: u32, y: u32) -> usize {
        let y = y.min(self.rows() * self.block_size - 1);
        cell_index_for_pixel(x, y, self.width, self.block_size)
    }

    /// Top-left pixel of `cell`.
    pub fn cell_origin(&self, cell: usize) -> (u32, u32) {
        let columns = self.columns() as usize;
        let col = (cell % columns) as u32;
        let row = (cell / columns) as u32;
        (col * self.block_size, row * self.block_size)
    }

    /// Pixel rows painted for cell row `row`; the last row absorbs the leftover pixels.
    pub(crate) fn band_rows(&self, row: u32) -> std::ops::Range<u32> {
        let start = row * self.block_size;
        let end = if row + 1 == self.rows() {
            self.height
        } else {
            start + self.block_size
        };
        start..end
    }

    /// Byte length of one RGBA8 raster.
    pub fn raster_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            block_size: 6,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/geometry.rs"]
mod tests;
