//! Dense row-major pixel grid shared by every stage.
//!
//! Stages never read and write the same [`PixelBuffer`] within one pass (the
//! luminance stage is the exception, as each pixel only depends on itself).
//! Output buffers are split into disjoint rows so workers can fill them in
//! parallel while reading the untouched input.

use crate::error::{Anime4kError, Result};
use crate::pixel::Pixel;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use rayon::prelude::*;

/// Positions inside a 3×3 [`Neighborhood`], row by row.
pub mod tap {
    pub const TL: usize = 0;
    pub const TC: usize = 1;
    pub const TR: usize = 2;
    pub const ML: usize = 3;
    pub const MC: usize = 4;
    pub const MR: usize = 5;
    pub const BL: usize = 6;
    pub const BC: usize = 7;
    pub const BR: usize = 8;
}

/// The 3×3 window around a pixel with coordinates clamped to the image.
///
/// On the left edge the left column repeats the center column, on the right
/// edge the right column does, and the same holds for the top and bottom
/// rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    cells: [Pixel; 9],
}

impl Neighborhood {
    /// Build the window for column `x` from three (possibly repeated) rows.
    pub fn from_rows(top: &[Pixel], middle: &[Pixel], bottom: &[Pixel], x: usize) -> Self {
        let last = middle.len() - 1;
        let l = x.saturating_sub(1);
        let r = if x == last { x } else { x + 1 };
        Self {
            cells: [
                top[l], top[x], top[r], middle[l], middle[x], middle[r], bottom[l], bottom[x],
                bottom[r],
            ],
        }
    }

    /// Sample at one of the [`tap`] positions.
    #[inline]
    pub fn at(&self, position: usize) -> Pixel {
        self.cells[position]
    }

    /// Auxiliary value at one of the [`tap`] positions.
    #[inline]
    pub fn aux(&self, position: usize) -> u8 {
        self.cells[position].aux
    }

    #[inline]
    pub fn center(&self) -> Pixel {
        self.cells[tap::MC]
    }
}

/// A width × height grid of [`Pixel`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Allocate a buffer filled with [`Pixel::default`].
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Pixel::default())
    }

    /// Allocate a buffer filled with one pixel value.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Anime4kError::EmptyBuffer { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self { width, height, pixels: vec![pixel; len] })
    }

    /// Wrap an existing row-major sample vector.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Anime4kError::EmptyBuffer { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Anime4kError::DimensionMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Import an RGBA image. Alpha is dropped and `aux` starts opaque.
    pub fn from_rgba_image(image: &RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|p| Pixel::from(*p)).collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Export as a fully opaque RGBA image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| self.get(x, y).into())
    }

    /// Export as RGB, dropping the auxiliary channel.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| Rgb::from(self.get(x, y)))
    }

    /// Export with `aux` written into alpha, for inspecting stage output.
    pub fn to_aux_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let p = self.get(x, y);
            Rgba([p.r, p.g, p.b, p.aux])
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// A buffer with the same dimensions and default content.
    pub fn clone_shape(&self) -> PixelBuffer {
        Self {
            width: self.width,
            height: self.height,
            pixels: vec![Pixel::default(); self.pixels.len()],
        }
    }

    /// Read one pixel.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    /// Overwrite one pixel.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    /// One row of samples.
    pub fn row(&self, y: u32) -> &[Pixel] {
        assert!(y < self.height, "row {} out of range for height {}", y, self.height);
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// All samples in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Mutable rows as a rayon parallel iterator. Each row goes to one worker.
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, Pixel> {
        self.pixels.par_chunks_mut(self.width as usize)
    }

    /// Rows above and below `y`, clamped to the buffer, plus row `y` itself.
    pub fn row_triple(&self, y: u32) -> (&[Pixel], &[Pixel], &[Pixel]) {
        let above = y.saturating_sub(1);
        let below = if y + 1 < self.height { y + 1 } else { y };
        (self.row(above), self.row(y), self.row(below))
    }

    /// The edge-clamped 3×3 window around `(x, y)`.
    pub fn neighborhood(&self, x: u32, y: u32) -> Neighborhood {
        assert!(x < self.width, "column {} out of range for width {}", x, self.width);
        let (top, middle, bottom) = self.row_triple(y);
        Neighborhood::from_rows(top, middle, bottom, x as usize)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of range for {}x{} buffer",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}
