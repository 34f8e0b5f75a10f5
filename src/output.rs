//! Image output and stage-dump file naming.

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::stages::Stage;
use image::{RgbImage, RgbaImage};
use log::debug;
use std::path::{Path, PathBuf};

/// Create `path`'s parent directory when it does not exist yet.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Save an opaque result as RGB. The format follows the file extension.
pub fn save_rgb(image: &RgbImage, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    image.save(path)?;
    debug!("wrote {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Save an RGBA image (used for stage dumps, where alpha carries `aux`).
pub fn save_rgba(image: &RgbaImage, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    image.save(path)?;
    debug!("wrote {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Path for one stage dump: `dir/{pass}-{stage}.png`.
///
/// | Stage | Pass 0 | Pass 1 |
/// |-------|--------|--------|
/// | smooth resize | `resized.png` | - |
/// | luminance | `0-luminance.png` | `1-luminance.png` |
/// | gradient push | `0-push-gradient.png` | `1-push-gradient.png` |
pub fn stage_dump_path(dir: &Path, pass: usize, stage: Stage) -> PathBuf {
    dir.join(format!("{}-{}.png", pass, stage.name()))
}

/// Path for the smooth-resize dump, taken before the pipeline starts.
pub fn resized_dump_path(dir: &Path) -> PathBuf {
    dir.join("resized.png")
}

/// Write one stage's output with `aux` in the alpha channel.
pub fn dump_stage(dir: &Path, pass: usize, stage: Stage, buffer: &PixelBuffer) -> Result<()> {
    save_rgba(&buffer.to_aux_rgba_image(), &stage_dump_path(dir, pass, stage))
}
