//! Blend intensity for the push stages.

use serde::{Deserialize, Serialize};

/// How far a pixel moves toward its directional neighbor average, 0..=255.
///
/// `0` leaves colors untouched, `255` replaces them with the neighbor average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Strength(u8);

impl Strength {
    pub const ZERO: Strength = Strength(0);
    pub const MAX: Strength = Strength(255);

    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Convert a fractional intensity (1.0 = full strength).
    ///
    /// `ratio * 255` is truncated toward zero, then clamped into range.
    /// Non-finite input maps to zero.
    ///
    /// ```
    /// use anime4k::Strength;
    ///
    /// assert_eq!(Strength::from_ratio(0.5).get(), 127);
    /// assert_eq!(Strength::from_ratio(2.0).get(), 255);
    /// assert_eq!(Strength::from_ratio(-0.5).get(), 0);
    /// ```
    pub fn from_ratio(ratio: f32) -> Self {
        if !ratio.is_finite() {
            return Self::ZERO;
        }
        let scaled = (ratio * 255.0) as i64;
        Self(scaled.clamp(0, 255) as u8)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Weight applied to the center pixel, `255 - strength`.
    pub const fn inverse(self) -> u32 {
        255 - self.0 as u32
    }
}

impl From<u8> for Strength {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
