//! Anime4K - edge-directed push upscaling for line art
//!
//! An image is first resized with a smooth bicubic filter, then sharpened by
//! a four-stage per-pixel pipeline, run twice:
//!
//! 1. [`stages::compute_luminance`] - lightness into each pixel's `aux` field
//! 2. [`stages::push_color`] - blend toward brighter neighbors along edges
//! 3. [`stages::compute_gradient`] - Sobel magnitude of `aux`
//! 4. [`stages::push_gradient`] - blend along the gradient, then reset `aux`
//!
//! ```
//! use anime4k::{pipeline, Pixel, PixelBuffer, Strength};
//!
//! let mut buffer = PixelBuffer::filled(4, 4, Pixel::rgb(0, 0, 0)).unwrap();
//! buffer.set(3, 3, Pixel::rgb(255, 255, 255));
//!
//! let out = pipeline::run(buffer, Strength::new(85), Strength::MAX);
//! assert_eq!(out.dimensions(), (4, 4));
//! assert!(out.pixels().iter().all(|p| p.aux == 255));
//! ```

pub mod buffer;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod pixel;
pub mod stages;
pub mod strength;
pub mod upscale;

pub use buffer::{Neighborhood, PixelBuffer};
pub use error::{Anime4kError, Result};
pub use pipeline::{Pipeline, PipelineReport, PASSES};
pub use pixel::Pixel;
pub use stages::{PushMode, Stage};
pub use strength::Strength;
pub use upscale::{upscale, upscale_file, UpscaleOptions, UpscaleSummary};
