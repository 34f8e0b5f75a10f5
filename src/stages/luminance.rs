//! Luminance extraction into the auxiliary channel.
//!
//! The value stored is HSL lightness, `(max + min) / 2` of the color
//! channels, with exact halves rounded to even. Downstream stages compare it
//! as a brightness signal.

use crate::buffer::PixelBuffer;
use crate::pixel::Pixel;
use rayon::prelude::*;

/// Store each pixel's lightness in its `aux` channel, in place.
///
/// Colors are untouched, so every row can be processed independently.
pub fn compute_luminance(buffer: &mut PixelBuffer) {
    buffer.par_rows_mut().for_each(|row| {
        for pixel in row.iter_mut() {
            pixel.aux = lightness(pixel);
        }
    });
}

/// `255 * (max + min) / 510` rounded half to even, without going through
/// floats. Odd sums land exactly on `.5`, so `1 -> 0`, `3 -> 2`, `5 -> 2`.
#[inline]
pub fn lightness(pixel: &Pixel) -> u8 {
    let sum = pixel.max_channel() as u16 + pixel.min_channel() as u16;
    let half = sum / 2;
    if sum % 2 == 1 && half % 2 == 1 {
        (half + 1) as u8
    } else {
        half as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(p: &Pixel) -> u8 {
        let sum = p.max_channel() as f64 + p.min_channel() as f64;
        (255.0 * sum / 510.0).round_ties_even().clamp(0.0, 255.0) as u8
    }

    #[test]
    fn test_lightness_matches_formula() {
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(15) {
                for b in [0u16, 1, 127, 128, 254, 255] {
                    let p = Pixel::rgb(r as u8, g as u8, b as u8);
                    assert_eq!(lightness(&p), reference(&p), "rgb({}, {}, {})", r, g, b);
                }
            }
        }
    }

    #[test]
    fn test_lightness_halves_round_to_even() {
        assert_eq!(lightness(&Pixel::rgb(1, 0, 0)), 0);
        assert_eq!(lightness(&Pixel::rgb(3, 0, 0)), 2);
        assert_eq!(lightness(&Pixel::rgb(5, 0, 0)), 2);
        assert_eq!(lightness(&Pixel::rgb(9, 0, 0)), 4);
        assert_eq!(lightness(&Pixel::rgb(0, 7, 0)), 4);

        for s in 0..=255u8 {
            let expected = (s as f64 * 255.0 / 510.0).round_ties_even() as u8;
            assert_eq!(lightness(&Pixel::rgb(s, 0, 0)), expected, "rgb({}, 0, 0)", s);
        }
    }

    #[test]
    fn test_lightness_extremes() {
        assert_eq!(lightness(&Pixel::rgb(0, 0, 0)), 0);
        assert_eq!(lightness(&Pixel::rgb(255, 255, 255)), 255);
        assert_eq!(lightness(&Pixel::rgb(255, 0, 0)), 128);
        assert_eq!(lightness(&Pixel::rgb(128, 128, 128)), 128);
    }

    #[test]
    fn test_compute_luminance_every_pixel() {
        let mut buf = PixelBuffer::filled(3, 2, Pixel::rgb(100, 50, 10)).unwrap();
        buf.set(2, 1, Pixel::rgb(0, 0, 0));

        compute_luminance(&mut buf);

        assert_eq!(buf.get(0, 0).aux, 55);
        assert_eq!(buf.get(1, 1).aux, 55);
        // last row and column are included
        assert_eq!(buf.get(2, 0).aux, 55);
        assert_eq!(buf.get(2, 1).aux, 0);
    }

    #[test]
    fn test_compute_luminance_keeps_color() {
        let mut buf = PixelBuffer::filled(2, 2, Pixel::rgb(12, 34, 56)).unwrap();
        compute_luminance(&mut buf);
        assert!(buf.pixels().iter().all(|p| p.same_color(&Pixel::rgb(12, 34, 56))));
    }
}
