use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::codec::raster::Raster;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::naming::{OrderedFrame, order_frames};

/// Ordered, randomly addressable collection of frames to decode.
///
/// `load` is called from worker threads; each call returns a raster owned by the caller.
pub trait FrameSource: Sync {
    /// Frame indices, strictly ascending.
    fn indices(&self) -> Vec<FrameIndex>;
    /// Load the frame at position `pos` of [`FrameSource::indices`].
    fn load(&self, pos: usize) -> ReelResult<Raster>;
}

/// Frames already held in memory.
#[derive(Debug, Default)]
pub struct MemorySource {
    frames: Vec<(FrameIndex, Raster)>,
}

impl MemorySource {
    /// Sort `frames` by index; duplicate indices are rejected.
    pub fn new(mut frames: Vec<(FrameIndex, Raster)>) -> ReelResult<Self> {
        frames.sort_by_key(|(i, _)| *i);
        if let Some(w) = frames.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ReelError::malformed_frame_name(format!(
                "duplicate in-memory frame index {}",
                w[0].0
            )));
        }
        Ok(Self { frames })
    }
}

impl FrameSource for MemorySource {
    fn indices(&self) -> Vec<FrameIndex> {
        self.frames.iter().map(|(i, _)| *i).collect()
    }

    fn load(&self, pos: usize) -> ReelResult<Raster> {
        self.frames
            .get(pos)
            .map(|(_, r)| r.clone())
            .ok_or_else(|| ReelError::validation(format!("no in-memory frame at position {pos}")))
    }
}

/// PNG frames in a directory, ordered by the index embedded in their names.
#[derive(Clone, Debug)]
pub struct PngDirSource {
    dir: PathBuf,
    frames: Vec<OrderedFrame>,
}

impl PngDirSource {
    /// List every `.png` file in `dir` and order them numerically.
    pub fn open(dir: impl AsRef<Path>) -> ReelResult<Self> {
        let dir = dir.as_ref();
        let entries =
            std::fs::read_dir(dir).with_context(|| format!("list frame dir '{}'", dir.display()))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("list frame dir '{}'", dir.display()))?
                .path();
            let is_png = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"));
            if is_png && path.is_file() {
                paths.push(path);
            }
        }
        let frames = order_frames(paths)?;
        tracing::debug!(frames = frames.len(), dir = %dir.display(), "opened png frame dir");
        Ok(Self {
            dir: dir.to_path_buf(),
            frames,
        })
    }

    /// Directory the frames were listed from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ordered frame files.
    pub fn frames(&self) -> &[OrderedFrame] {
        &self.frames
    }
}

/// Decode a PNG (or any format `image` was built with) into an RGBA raster.
pub fn load_png(path: &Path) -> ReelResult<Raster> {
    let img = image::open(path)
        .map_err(|e| ReelError::image(format!("decode '{}': {e}", path.display())))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Raster::from_rgba8(width, height, img.into_raw())
}

impl FrameSource for PngDirSource {
    fn indices(&self) -> Vec<FrameIndex> {
        self.frames.iter().map(|f| f.index).collect()
    }

    fn load(&self, pos: usize) -> ReelResult<Raster> {
        let frame = self
            .frames
            .get(pos)
            .ok_or_else(|| ReelError::validation(format!("no frame file at position {pos}")))?;
        load_png(&frame.path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/source.rs"]
mod tests;
