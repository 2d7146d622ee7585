use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context as _;

use crate::codec::raster::Raster;
use crate::decode::source::{FrameSource, PngDirSource};
use crate::encode::ffmpeg::is_ffmpeg_on_path;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::naming::{DEFAULT_FRAME_PREFIX, remove_stale_frames};

/// Options for [`extract_frames`].
#[derive(Clone, Debug, Default)]
pub struct ExtractOpts {
    /// Resample the video at this rate (`-vf fps=N`). `None` keeps every decoded frame.
    pub sample_fps: Option<Fps>,
    /// Directory to extract into; earlier `frame_<n>.png` files in it are removed first. `None`
    /// uses a fresh temporary directory removed on drop.
    pub out_dir: Option<PathBuf>,
}

/// Removes a directory tree when dropped.
struct TempDirGuard(Option<PathBuf>);

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_dir_all(path);
        }
    }
}

/// Frames extracted from a video, readable as a [`FrameSource`].
pub struct ExtractedFrames {
    source: PngDirSource,
    _guard: TempDirGuard,
}

impl ExtractedFrames {
    /// Directory holding the extracted PNG files.
    pub fn dir(&self) -> &Path {
        self.source.dir()
    }
}

impl FrameSource for ExtractedFrames {
    fn indices(&self) -> Vec<FrameIndex> {
        self.source.indices()
    }

    fn load(&self, pos: usize) -> ReelResult<Raster> {
        self.source.load(pos)
    }
}

fn temp_frame_dir() -> PathBuf {
    std::env::temp_dir().join(format!(
        "bitreel_frames_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0)
    ))
}

/// Arguments passed to `ffmpeg` to dump `video` as numbered PNG files in `dir`.
pub(crate) fn extract_args(video: &Path, dir: &Path, opts: &ExtractOpts) -> Vec<String> {
    let mut args: Vec<String> = ["-v", "error", "-y", "-i"].map(String::from).to_vec();
    args.push(video.to_string_lossy().into_owned());
    match opts.sample_fps {
        Some(fps) => {
            args.push("-vf".into());
            args.push(format!("fps={}", fps.to_ffmpeg_arg()));
        }
        None => {
            args.push("-fps_mode".into());
            args.push("passthrough".into());
        }
    }
    args.extend(["-start_number", "0"].map(String::from));
    args.push(
        dir.join(format!("{DEFAULT_FRAME_PREFIX}_%d.png"))
            .to_string_lossy()
            .into_owned(),
    );
    args
}

/// Run `ffmpeg` to split `video` into PNG frames numbered from zero.
#[tracing::instrument(skip(opts))]
pub fn extract_frames(video: &Path, opts: &ExtractOpts) -> ReelResult<ExtractedFrames> {
    if !video.is_file() {
        return Err(ReelError::validation(format!(
            "video '{}' does not exist",
            video.display()
        )));
    }

    let (dir, guard) = match &opts.out_dir {
        Some(dir) => {
            let removed = remove_stale_frames(dir, DEFAULT_FRAME_PREFIX)?;
            if removed > 0 {
                tracing::debug!(removed, dir = %dir.display(), "removed stale frames");
            }
            (dir.clone(), TempDirGuard(None))
        }
        None => {
            let dir = temp_frame_dir();
            (dir.clone(), TempDirGuard(Some(dir)))
        }
    };

    if !is_ffmpeg_on_path() {
        return Err(ReelError::external_tool(
            "ffmpeg is required for frame extraction, but was not found on PATH",
        ));
    }
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("create frame dir '{}'", dir.display()))?;

    let args = extract_args(video, &dir, opts);
    tracing::debug!(?args, "spawning ffmpeg extractor");
    let out = Command::new("ffmpeg").args(&args).output().map_err(|e| {
        ReelError::external_tool(format!(
            "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
        ))
    })?;
    if !out.status.success() {
        return Err(ReelError::external_tool(format!(
            "ffmpeg exited with status {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let source = PngDirSource::open(&dir)?;
    tracing::info!(frames = source.frames().len(), "frames extracted");
    Ok(ExtractedFrames {
        source,
        _guard: guard,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/decode/ffmpeg.rs"]
mod tests;
