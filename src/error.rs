//! Error types for buffer construction and the upscale glue.

use std::io;
use thiserror::Error;

/// Errors produced while building buffers or running an upscale.
///
/// The stages themselves cannot fail: every precondition they rely on is
/// checked when a [`crate::buffer::PixelBuffer`] is constructed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Anime4kError {
    /// A buffer with no pixels was requested
    #[error("buffer has zero area ({width}x{height})")]
    EmptyBuffer { width: u32, height: u32 },
    /// Sample count does not match the declared dimensions
    #[error("expected {expected} pixels for {width}x{height}, got {actual}")]
    DimensionMismatch { width: u32, height: u32, expected: usize, actual: usize },
    /// Scale factor is unusable for the given source image
    #[error("invalid scale factor {scale} for {width}x{height} image")]
    InvalidScale { scale: f32, width: u32, height: u32 },
    /// Decode, resize or encode failure
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// File system failure
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Worker pool could not be created
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Anime4kError>;
