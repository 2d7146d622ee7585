/// Crate-wide result alias.
pub type ReelResult<T> = Result<T, ReelError>;

/// Errors produced while encoding payloads into frames or decoding frames back into bytes.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid configuration, geometry, palette or raster shape.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame artifact name carried no parseable (or a duplicated) sequence index.
    #[error("malformed frame name: {0}")]
    MalformedFrameName(String),

    /// A fully transparent pixel was sampled during decode.
    #[error("transparent pixel in frame {frame} at ({x}, {y})")]
    TransparentPixel {
        /// Frame sequence index.
        frame: u64,
        /// Pixel column.
        x: u32,
        /// Pixel row.
        y: u32,
    },

    /// Strict classification rejected a pixel that matches no palette bucket.
    #[error("ambiguous color {rgb:?} in frame {frame} at ({x}, {y})")]
    ClassificationAmbiguous {
        /// Frame sequence index.
        frame: u64,
        /// Pixel column.
        x: u32,
        /// Pixel row.
        y: u32,
        /// Sampled color.
        rgb: [u8; 3],
    },

    /// The recovered bitstream is shorter than its framing requires.
    #[error("bit length mismatch: {0}")]
    BitLengthMismatch(String),

    /// An external collaborator (`ffmpeg`) is missing or failed.
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Image encode/decode failure.
    #[error("image error: {0}")]
    Image(String),

    /// Anything else, usually I/O with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::MalformedFrameName`].
    pub fn malformed_frame_name(msg: impl Into<String>) -> Self {
        Self::MalformedFrameName(msg.into())
    }

    /// Build a [`ReelError::BitLengthMismatch`].
    pub fn bit_length(msg: impl Into<String>) -> Self {
        Self::BitLengthMismatch(msg.into())
    }

    /// Build a [`ReelError::ExternalTool`].
    pub fn external_tool(msg: impl Into<String>) -> Self {
        Self::ExternalTool(msg.into())
    }

    /// Build a [`ReelError::Image`].
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
