use crate::foundation::error::{ReelError, ReelResult};

/// Default classification threshold per channel.
pub const DEFAULT_TOLERANCE: u8 = 150;

/// One two-bit symbol, carried by exactly one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Symbol {
    /// Bits `00`, painted blue. Also used for filler cells.
    S00 = 0b00,
    /// Bits `01`, painted black.
    S01 = 0b01,
    /// Bits `10`, painted red.
    S10 = 0b10,
    /// Bits `11`, painted green.
    S11 = 0b11,
}

impl Symbol {
    /// All symbols in bit-value order.
    pub const ALL: [Symbol; 4] = [Symbol::S00, Symbol::S01, Symbol::S10, Symbol::S11];

    /// Symbol painted into cells that carry no payload bits.
    pub const FILLER: Symbol = Symbol::S00;

    /// Build a symbol from its high and low bit.
    pub fn from_bits(hi: bool, lo: bool) -> Self {
        match (hi, lo) {
            (false, false) => Symbol::S00,
            (false, true) => Symbol::S01,
            (true, false) => Symbol::S10,
            (true, true) => Symbol::S11,
        }
    }

    /// `[hi, lo]`.
    pub fn bits(self) -> [bool; 2] {
        let v = self as u8;
        [v & 0b10 != 0, v & 0b01 != 0]
    }
}

/// Straight RGB color of `s`. Exact table lookup.
pub fn symbol_to_color(s: Symbol) -> [u8; 3] {
    match s {
        Symbol::S00 => [0, 0, 255],
        Symbol::S01 => [0, 0, 0],
        Symbol::S10 => [255, 0, 0],
        Symbol::S11 => [0, 255, 0],
    }
}

/// Outcome of classifying one sampled pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// The pixel maps to a symbol.
    Symbol(Symbol),
    /// Alpha is zero; such pixels never appear in encoded frames.
    Transparent,
    /// Strict mode only: the pixel matched no bucket and is not dark enough for the catch-all.
    Ambiguous,
}

/// Threshold-based inverse of [`symbol_to_color`].
///
/// A channel counts as "on" when strictly above `tolerance` and "off" when strictly below it.
/// Pure red, green and blue map to their symbols; everything else falls into the black bucket
/// unless `strict` is set, in which case only pixels with every channel off do.
pub fn color_to_symbol(rgba: [u8; 4], tolerance: u8, strict: bool) -> Classification {
    let [r, g, b, a] = rgba;
    if a == 0 {
        return Classification::Transparent;
    }
    let t = tolerance;
    if r > t && g < t && b < t {
        Classification::Symbol(Symbol::S10)
    } else if r < t && g > t && b < t {
        Classification::Symbol(Symbol::S11)
    } else if r < t && g < t && b > t {
        Classification::Symbol(Symbol::S00)
    } else if !strict || (r < t && g < t && b < t) {
        Classification::Symbol(Symbol::S01)
    } else {
        Classification::Ambiguous
    }
}

/// Validated classifier settings shared by every decode task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    tolerance: u8,
    strict: bool,
}

impl Palette {
    /// Validate `tolerance` and check every palette color lands in its own bucket.
    pub fn new(tolerance: u8, strict: bool) -> ReelResult<Self> {
        if tolerance == 0 || tolerance == u8::MAX {
            return Err(ReelError::validation(format!(
                "tolerance must be strictly between 0 and 255, got {tolerance}"
            )));
        }
        let palette = Self { tolerance, strict };
        for s in Symbol::ALL {
            let got = palette.classify(palette.color(s));
            if got != Classification::Symbol(s) {
                return Err(ReelError::validation(format!(
                    "palette color for {s:?} classifies as {got:?} at tolerance {tolerance}"
                )));
            }
        }
        Ok(palette)
    }

    /// Per-channel threshold.
    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }

    /// Whether the catch-all bucket is restricted to dark pixels.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Opaque RGBA color painted for `s`.
    pub fn color(&self, s: Symbol) -> [u8; 4] {
        let [r, g, b] = symbol_to_color(s);
        [r, g, b, 255]
    }

    /// Classify one straight-alpha RGBA pixel.
    pub fn classify(&self, rgba: [u8; 4]) -> Classification {
        color_to_symbol(rgba, self.tolerance, self.strict)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            strict: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/palette.rs"]
mod tests;
