use rayon::prelude::*;

use crate::{
    codec::bitstream::{bit_range, decode_bits},
    codec::chunk::{Chunk, chunk_count},
    codec::config::CodecConfig,
    codec::palette::Palette,
    codec::raster::{Raster, rasterize},
    codec::sampler::sample,
    decode::source::{FrameSource, MemorySource},
    encode::sink::{FrameSink, InMemorySink, SinkConfig},
    foundation::core::FrameIndex,
    foundation::error::{ReelError, ReelResult},
};

/// Threading and batching controls for multi-frame work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOpts {
    /// Process frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Frames rasterized per batch before they are handed to the sink.
    pub chunk_size: usize,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_size: 64,
        }
    }
}

/// Counters reported by [`Codec::encode_to_sink`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Payload bytes, excluding framing.
    pub payload_bytes: usize,
    /// Encoded bits, including framing.
    pub bits: usize,
    /// Frames pushed to the sink.
    pub frames: usize,
}

/// Validated encoder/decoder for one agreed [`CodecConfig`].
///
/// Construction is where configuration errors surface; per-frame work never re-validates
/// geometry or palette.
pub struct Codec {
    cfg: CodecConfig,
    palette: Palette,
    opts: PipelineOpts,
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("cfg", &self.cfg)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl Codec {
    /// Validate `cfg` and `opts`, and build a thread pool when `opts.parallel` is set.
    pub fn new(cfg: CodecConfig, opts: PipelineOpts) -> ReelResult<Self> {
        cfg.validate()?;
        let palette = cfg.palette()?;
        validate_threads(opts.threads)?;
        let pool = if opts.parallel {
            Some(build_thread_pool(opts.threads)?)
        } else {
            None
        };
        Ok(Self {
            cfg,
            palette,
            opts,
            pool,
        })
    }

    /// Agreed codec settings.
    pub fn config(&self) -> &CodecConfig {
        &self.cfg
    }

    /// Frames needed for a payload of `payload_len` bytes under the configured framing.
    pub fn frame_count(&self, payload_len: usize) -> ReelResult<usize> {
        let framed = self.cfg.framing.wrap(&[])?.len() + payload_len;
        Ok(self.cfg.geometry.frames_needed(framed * 8))
    }

    /// Rasterize one chunk into its own buffer.
    pub fn rasterize_chunk(&self, chunk: &Chunk<'_>) -> ReelResult<Raster> {
        rasterize(&self.cfg.geometry, &self.palette, chunk.bits)
    }

    /// Recover the bits of one frame.
    pub fn sample_frame(&self, index: FrameIndex, raster: &Raster) -> ReelResult<Vec<bool>> {
        sample(&self.cfg.geometry, &self.palette, index, raster)
    }

    /// Encode `payload` and push every frame into `sink` in index order.
    ///
    /// Bits are expanded per frame from the framed bytes, so only one batch of frames is held
    /// in memory at a time.
    #[tracing::instrument(skip_all, fields(bytes = payload.len()))]
    pub fn encode_to_sink(
        &self,
        payload: &[u8],
        sink: &mut dyn FrameSink,
    ) -> ReelResult<EncodeStats> {
        let framed = self.cfg.framing.wrap(payload)?;
        let bit_len = framed.len() * 8;
        let capacity = self.cfg.geometry.capacity_bits();
        let frame_count = chunk_count(bit_len, capacity);
        tracing::debug!(
            bits = bit_len,
            frames = frame_count,
            capacity,
            "bitstream split"
        );

        sink.begin(SinkConfig {
            width: self.cfg.geometry.width,
            height: self.cfg.geometry.height,
            frame_count,
        })?;

        let batch_size = normalized_chunk_size(self.opts.chunk_size);
        for first in (0..frame_count).step_by(batch_size) {
            let len = batch_size.min(frame_count - first);
            let rasters = self.map_frames(len, |i| {
                let start = (first + i) * capacity;
                let bits = bit_range(&framed, start..(start + capacity).min(bit_len));
                self.rasterize_chunk(&Chunk {
                    index: FrameIndex((first + i) as u64),
                    bits: &bits,
                })
            })?;
            for (i, raster) in rasters.iter().enumerate() {
                sink.push_frame(FrameIndex((first + i) as u64), raster)?;
            }
            tracing::trace!(first, len, "frame batch pushed");
        }
        sink.end()?;

        Ok(EncodeStats {
            payload_bytes: payload.len(),
            bits: bit_len,
            frames: frame_count,
        })
    }

    /// Encode `payload` into in-memory frames.
    pub fn encode_frames(&self, payload: &[u8]) -> ReelResult<Vec<(FrameIndex, Raster)>> {
        let mut sink = InMemorySink::new();
        self.encode_to_sink(payload, &mut sink)?;
        Ok(sink.into_frames())
    }

    /// Decode every frame of `source` and reassemble the payload.
    ///
    /// Frames are sampled independently; bits are concatenated in ascending frame index order
    /// once all of them are done. Any failing frame fails the whole decode.
    #[tracing::instrument(skip_all)]
    pub fn decode_source(&self, source: &dyn FrameSource) -> ReelResult<Vec<u8>> {
        let indices = source.indices();
        if let Some(w) = indices.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ReelError::validation(format!(
                "frame source is not strictly ascending at {} -> {}",
                w[0], w[1]
            )));
        }

        let per_frame = self.map_frames(indices.len(), |pos| {
            let raster = source.load(pos)?;
            self.sample_frame(indices[pos], &raster)
        })?;
        tracing::debug!(frames = per_frame.len(), "frames sampled");

        let recovered = assemble(per_frame);
        let bytes = decode_bits(&recovered);
        self.cfg.framing.strip(bytes)
    }

    /// Decode in-memory frames.
    pub fn decode_frames(&self, frames: Vec<(FrameIndex, Raster)>) -> ReelResult<Vec<u8>> {
        self.decode_source(&MemorySource::new(frames)?)
    }

    /// Run `f` for every position in `0..len`, returning results by position.
    ///
    /// The output vector is index-addressed, so completion order never leaks into it.
    fn map_frames<T, F>(&self, len: usize, f: F) -> ReelResult<Vec<T>>
    where
        T: Send,
        F: Fn(usize) -> ReelResult<T> + Sync + Send,
    {
        let results: Vec<ReelResult<T>> = match &self.pool {
            Some(pool) => pool.install(|| (0..len).into_par_iter().map(&f).collect()),
            None => (0..len).map(&f).collect(),
        };
        results.into_iter().collect()
    }
}

/// Concatenate per-frame bit-chunks in the order given (ascending frame index).
pub fn assemble(per_frame: Vec<Vec<bool>>) -> Vec<bool> {
    let total = per_frame.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(total);
    for bits in per_frame {
        out.extend(bits);
    }
    out
}

fn normalized_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

fn validate_threads(threads: Option<usize>) -> ReelResult<()> {
    if threads == Some(0) {
        return Err(ReelError::validation(
            "pipeline 'threads' must be >= 1 when set",
        ));
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    validate_threads(threads)?;
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
