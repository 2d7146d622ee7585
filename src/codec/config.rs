use std::path::Path;

use anyhow::Context as _;

use crate::codec::framing::Framing;
use crate::codec::geometry::GridGeometry;
use crate::codec::palette::{DEFAULT_TOLERANCE, Palette};
use crate::foundation::error::{ReelError, ReelResult};

/// Settings both ends of a transfer must agree on out-of-band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Raster size and cell size.
    pub geometry: GridGeometry,
    /// Per-channel classification threshold, strictly between 0 and 255.
    pub tolerance: u8,
    /// Reject unmatched colors instead of mapping them to the black bucket.
    pub strict: bool,
    /// Payload length framing.
    pub framing: Framing,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            geometry: GridGeometry::default(),
            tolerance: DEFAULT_TOLERANCE,
            strict: false,
            framing: Framing::default(),
        }
    }
}

impl CodecConfig {
    /// Validate geometry and palette together.
    pub fn validate(&self) -> ReelResult<()> {
        self.geometry.validate()?;
        self.palette()?;
        Ok(())
    }

    /// Palette derived from `tolerance` and `strict`.
    pub fn palette(&self) -> ReelResult<Palette> {
        Palette::new(self.tolerance, self.strict)
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_json_path(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read codec config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| ReelError::validation(format!("invalid codec config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/config.rs"]
mod tests;
