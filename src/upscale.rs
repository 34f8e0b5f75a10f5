//! Smooth resize followed by the push pipeline.
//!
//! The resize itself is the `image` crate's Catmull-Rom (bicubic) filter.
//! Push strengths default to fractions of the scale factor: `scale / 6` for
//! the color push and `scale / 2` for the gradient push.

use crate::buffer::PixelBuffer;
use crate::error::{Anime4kError, Result};
use crate::output::{dump_stage, resized_dump_path, save_rgb, save_rgba};
use crate::pipeline::{Pipeline, PipelineReport};
use crate::strength::Strength;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Default scale factor.
pub const DEFAULT_SCALE: f32 = 2.0;

/// Options for one upscale.
#[derive(Debug, Clone, PartialEq)]
pub struct UpscaleOptions {
    /// Output size relative to the input.
    pub scale: f32,
    /// Color push intensity, 1.0 = full. Derived from `scale` when unset.
    pub push_strength: Option<f32>,
    /// Gradient push intensity, 1.0 = full. Derived from `scale` when unset.
    pub push_grad_strength: Option<f32>,
    /// Worker threads for the pipeline, 0 = rayon default.
    pub threads: usize,
    /// Write every intermediate buffer into this directory.
    pub dump_dir: Option<PathBuf>,
}

impl Default for UpscaleOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            push_strength: None,
            push_grad_strength: None,
            threads: 0,
            dump_dir: None,
        }
    }
}

impl UpscaleOptions {
    /// Options for a given scale with derived strengths.
    pub fn with_scale(scale: f32) -> Self {
        Self { scale, ..Default::default() }
    }

    /// Color push strength after defaulting and clamping.
    pub fn color_strength(&self) -> Strength {
        Strength::from_ratio(self.push_strength.unwrap_or(self.scale / 6.0))
    }

    /// Gradient push strength after defaulting and clamping.
    pub fn gradient_strength(&self) -> Strength {
        Strength::from_ratio(self.push_grad_strength.unwrap_or(self.scale / 2.0))
    }

    /// Pipeline configured from these options.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.color_strength(), self.gradient_strength()).with_threads(self.threads)
    }

    /// Output dimensions for a source of `width` × `height`.
    ///
    /// Dimensions are truncated toward zero. Fails when the scale is not a
    /// positive finite number or the result would be empty.
    pub fn target_dimensions(&self, width: u32, height: u32) -> Result<(u32, u32)> {
        let invalid = || Anime4kError::InvalidScale { scale: self.scale, width, height };
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(invalid());
        }
        let w = (width as f64 * self.scale as f64) as u64;
        let h = (height as f64 * self.scale as f64) as u64;
        if w == 0 || h == 0 || w > u32::MAX as u64 || h > u32::MAX as u64 {
            return Err(invalid());
        }
        Ok((w as u32, h as u32))
    }
}

/// What an upscale did, for printing or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct UpscaleSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub source_size: [u32; 2],
    pub target_size: [u32; 2],
    pub color_strength: Strength,
    pub gradient_strength: Strength,
    pub resize_ms: f64,
    pub pipeline: PipelineReport,
}

/// Resize with a smooth bicubic filter.
pub fn resize_smooth(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    imageops::resize(image, width, height, FilterType::CatmullRom)
}

/// Resize `image` and sharpen it with the push pipeline.
pub fn upscale(image: &DynamicImage, options: &UpscaleOptions) -> Result<(RgbaImage, UpscaleSummary)> {
    let (buffer, summary) = upscale_buffer(image, options)?;
    Ok((buffer.to_rgba_image(), summary))
}

fn upscale_buffer(image: &DynamicImage, options: &UpscaleOptions) -> Result<(PixelBuffer, UpscaleSummary)> {
    let source = image.to_rgba8();
    let (width, height) = source.dimensions();
    let (target_w, target_h) = options.target_dimensions(width, height)?;

    let resize_start = Instant::now();
    let resized = resize_smooth(&source, target_w, target_h);
    let resize_ms = resize_start.elapsed().as_secs_f64() * 1000.0;
    debug!("resized {}x{} -> {}x{} in {:.3} ms", width, height, target_w, target_h, resize_ms);

    if let Some(dir) = &options.dump_dir {
        save_rgba(&resized, &resized_dump_path(dir))?;
    }

    let buffer = PixelBuffer::from_rgba_image(&resized)?;
    let pipeline = options.pipeline();
    let dump_dir = options.dump_dir.as_deref();
    let (output, report) = pipeline.run_observed(buffer, |out| match dump_dir {
        Some(dir) => dump_stage(dir, out.pass, out.stage, out.buffer),
        None => Ok(()),
    })?;

    let summary = UpscaleSummary {
        input: None,
        output: None,
        source_size: [width, height],
        target_size: [target_w, target_h],
        color_strength: pipeline.color_strength(),
        gradient_strength: pipeline.gradient_strength(),
        resize_ms,
        pipeline: report,
    };
    Ok((output, summary))
}

/// Decode `input`, upscale it and write the result to `output` without alpha.
pub fn upscale_file(input: &Path, output: &Path, options: &UpscaleOptions) -> Result<UpscaleSummary> {
    info!("upscaling {} -> {}", input.display(), output.display());
    let image = image::open(input)?;
    let (result, mut summary) = upscale_buffer(&image, options)?;

    save_rgb(&result.to_rgb_image(), output)?;

    summary.input = Some(input.to_path_buf());
    summary.output = Some(output.to_path_buf());
    Ok(summary)
}
