//! bitreel stores arbitrary bytes in the pixels of a video.
//!
//! Every byte becomes eight bits, every two bits become one colored square cell, and a grid of
//! cells fills one frame. Frames are muxed into a video with the system `ffmpeg`; decoding
//! extracts the frames again, samples one pixel per cell and reassembles the bytes.
//!
//! - Pick a [`CodecConfig`] both sides agree on and build a [`Codec`]
//! - Encode into a [`FrameSink`] ([`FfmpegSink`], [`PngDirSink`], [`InMemorySink`])
//! - Decode from a [`FrameSource`] ([`extract_frames`], [`PngDirSource`], [`MemorySource`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod codec;
/// Frame sources and `ffmpeg` extraction.
pub mod decode;
/// Frame sinks and `ffmpeg` muxing.
pub mod encode;
pub mod naming;
/// Parallel encode/decode driver.
pub mod pipeline;

pub use crate::foundation::core::{Fps, FrameIndex};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::codec::config::CodecConfig;
pub use crate::codec::framing::Framing;
pub use crate::codec::geometry::GridGeometry;
pub use crate::codec::palette::{Palette, Symbol};
pub use crate::codec::raster::Raster;
pub use crate::decode::ffmpeg::{ExtractOpts, ExtractedFrames, extract_frames};
pub use crate::decode::source::{FrameSource, MemorySource, PngDirSource};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, VideoCodec, is_ffmpeg_on_path};
pub use crate::encode::png::{PngDirSink, PngDirSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::pipeline::{Codec, EncodeStats, PipelineOpts};
