//! Per-pixel sample type.
//!
//! A [`Pixel`] carries three color channels plus an auxiliary scalar that the
//! stages use as their working field (luminance, then edge magnitude). The
//! auxiliary value is kept separate from transparency: images enter and leave
//! the pipeline fully opaque and `aux` is set to [`Pixel::OPAQUE_AUX`] at both
//! ends.

use image::{Rgb, Rgba};

/// One RGB sample plus its auxiliary scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Scalar field owned by the current stage.
    pub aux: u8,
}

impl Pixel {
    /// Value of `aux` outside the pipeline.
    pub const OPAQUE_AUX: u8 = 255;

    /// Create a pixel with an explicit auxiliary value.
    pub const fn new(r: u8, g: u8, b: u8, aux: u8) -> Self {
        Self { r, g, b, aux }
    }

    /// Create a pixel as it looks before the pipeline touches it.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, aux: Self::OPAQUE_AUX }
    }

    /// Same color with a different auxiliary value.
    pub const fn with_aux(self, aux: u8) -> Self {
        Self { aux, ..self }
    }

    /// Largest of the three color channels.
    pub fn max_channel(&self) -> u8 {
        self.r.max(self.g).max(self.b)
    }

    /// Smallest of the three color channels.
    pub fn min_channel(&self) -> u8 {
        self.r.min(self.g).min(self.b)
    }

    /// Color channels only, ignoring `aux`.
    pub fn same_color(&self, other: &Pixel) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

impl From<Rgba<u8>> for Pixel {
    /// Incoming alpha is discarded; the pipeline works on opaque images.
    fn from(value: Rgba<u8>) -> Self {
        let [r, g, b, _] = value.0;
        Pixel::rgb(r, g, b)
    }
}

impl From<Rgb<u8>> for Pixel {
    fn from(value: Rgb<u8>) -> Self {
        let [r, g, b] = value.0;
        Pixel::rgb(r, g, b)
    }
}

impl From<Pixel> for Rgb<u8> {
    fn from(value: Pixel) -> Self {
        Rgb([value.r, value.g, value.b])
    }
}

impl From<Pixel> for Rgba<u8> {
    /// Always opaque. Use [`Pixel::aux`] directly to inspect the scalar field.
    fn from(value: Pixel) -> Self {
        Rgba([value.r, value.g, value.b, 255])
    }
}
