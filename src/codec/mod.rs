//! The visual bitstream codec: bits, cells, colors and the frames that carry them.

/// Byte/bit conversion.
pub mod bitstream;
/// Frame-sized chunking of a bitstream.
pub mod chunk;
/// Out-of-band settings shared by encoder and decoder.
pub mod config;
/// Payload length framing.
pub mod framing;
/// Raster-to-cell grid mapping.
pub mod geometry;
/// Symbol colors and pixel classification.
pub mod palette;
/// Frame rasterization.
pub mod raster;
/// Frame sampling.
pub mod sampler;
