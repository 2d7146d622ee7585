//! Frame artifact naming and numeric ordering.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};

/// Prefix used for frame files when none is configured.
pub const DEFAULT_FRAME_PREFIX: &str = "frame";

/// `<prefix>_<index>.png`
pub fn frame_file_name(prefix: &str, index: FrameIndex) -> String {
    format!("{prefix}_{}.png", index.0)
}

/// Parse the integer after the last `_` of the file stem (`frame_12.png` -> 12).
pub fn parse_frame_index(name: &str) -> ReelResult<FrameIndex> {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ReelError::malformed_frame_name(format!("'{name}' has no file stem")))?;
    let (_, digits) = stem.rsplit_once('_').ok_or_else(|| {
        ReelError::malformed_frame_name(format!("'{name}' has no '_<index>' suffix"))
    })?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReelError::malformed_frame_name(format!(
            "'{name}' index '{digits}' is not a decimal integer"
        )));
    }
    digits
        .parse::<u64>()
        .map(FrameIndex)
        .map_err(|e| ReelError::malformed_frame_name(format!("'{name}': {e}")))
}

/// A frame artifact paired with its parsed sequence index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedFrame {
    /// Parsed sequence index.
    pub index: FrameIndex,
    /// Artifact location.
    pub path: PathBuf,
}

/// Sort frame artifacts by their embedded index, numerically.
///
/// Gaps are allowed; a repeated index is not.
pub fn order_frames<I, P>(paths: I) -> ReelResult<Vec<OrderedFrame>>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut frames = Vec::new();
    for path in paths {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ReelError::malformed_frame_name(format!("'{}' has no UTF-8 name", path.display()))
            })?
            .to_owned();
        frames.push(OrderedFrame {
            index: parse_frame_index(&name)?,
            path,
        });
    }
    frames.sort_by_key(|f| f.index);
    if let Some(pair) = frames.windows(2).find(|w| w[0].index == w[1].index) {
        return Err(ReelError::malformed_frame_name(format!(
            "'{}' and '{}' share index {}",
            pair[0].path.display(),
            pair[1].path.display(),
            pair[0].index
        )));
    }
    Ok(frames)
}

/// Delete every `<prefix>_<n>.png` in `dir`, returning how many were removed.
///
/// Other files are left alone. A missing `dir` counts as empty.
pub fn remove_stale_frames(dir: &Path, prefix: &str) -> ReelResult<usize> {
    if !dir.exists() {
        return Ok(0);
    }
    let mut removed = 0;
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("list frame dir '{}'", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("list frame dir '{}'", dir.display()))?
            .path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let ours = name.starts_with(&format!("{prefix}_"))
            && name.ends_with(".png")
            && parse_frame_index(name).is_ok();
        if ours {
            std::fs::remove_file(&path)
                .with_context(|| format!("remove stale frame '{}'", path.display()))?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
#[path = "../tests/unit/naming.rs"]
mod tests;
