//! Decoding sources.
//!
//! Sources hand ordered frames to `Codec::decode_source`, which samples them in parallel.

/// `ffmpeg`-based frame extraction.
pub mod ffmpeg;
/// Frame source trait and built-in sources.
pub mod source;
