use std::path::PathBuf;

use anyhow::Context as _;

use crate::codec::raster::Raster;
use crate::encode::sink::{FrameSink, SinkConfig, check_next_index};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::naming::{DEFAULT_FRAME_PREFIX, frame_file_name, remove_stale_frames};

/// Options for [`PngDirSink`].
#[derive(Clone, Debug)]
pub struct PngDirSinkOpts {
    /// Output directory, created when missing.
    pub dir: PathBuf,
    /// File name prefix (`<prefix>_<index>.png`).
    pub prefix: String,
    /// Remove stale `<prefix>_<n>.png` files left in `dir` by an earlier run.
    pub clean: bool,
}

impl PngDirSinkOpts {
    /// Write `frame_<index>.png` files into `dir`, clearing stale frames first.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: DEFAULT_FRAME_PREFIX.to_owned(),
            clean: true,
        }
    }
}

/// Sink writing each frame as a PNG file.
pub struct PngDirSink {
    opts: PngDirSinkOpts,
    written: Vec<PathBuf>,
    last_idx: Option<FrameIndex>,
}

impl PngDirSink {
    /// Create a sink; nothing touches the filesystem until `begin`.
    pub fn new(opts: PngDirSinkOpts) -> Self {
        Self {
            opts,
            written: Vec::new(),
            last_idx: None,
        }
    }

    /// Paths written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        std::fs::create_dir_all(&self.opts.dir)
            .with_context(|| format!("create frame dir '{}'", self.opts.dir.display()))?;
        if self.opts.clean {
            let removed = remove_stale_frames(&self.opts.dir, &self.opts.prefix)?;
            if removed > 0 {
                tracing::debug!(removed, dir = %self.opts.dir.display(), "removed stale frames");
            }
        }
        self.written = Vec::with_capacity(cfg.frame_count);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> ReelResult<()> {
        check_next_index(self.last_idx, idx)?;
        self.last_idx = Some(idx);

        let path = self.opts.dir.join(frame_file_name(&self.opts.prefix, idx));
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| ReelError::image(format!("write png '{}': {e}", path.display())))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        tracing::debug!(frames = self.written.len(), dir = %self.opts.dir.display(), "png frames written");
        Ok(())
    }
}
