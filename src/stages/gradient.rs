//! Sobel edge magnitude over the auxiliary channel.
//!
//! Every pixel is processed, borders included, using the same edge-clamped
//! neighborhood as the push kernels. The stored value is inverted so strong
//! edges end up dark: `255 - |∇|`, or `0` once the magnitude exceeds 255.

use crate::buffer::{tap, Neighborhood, PixelBuffer};
use rayon::prelude::*;

const SOBEL_X: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
const SOBEL_Y: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

/// Replace `aux` with the inverted gradient magnitude. Colors pass through.
pub fn compute_gradient(input: &PixelBuffer) -> PixelBuffer {
    let mut output = input.clone_shape();
    output.par_rows_mut().enumerate().for_each(|(y, out_row)| {
        let (top, middle, bottom) = input.row_triple(y as u32);
        for (x, out) in out_row.iter_mut().enumerate() {
            let n = Neighborhood::from_rows(top, middle, bottom, x);
            *out = n.center().with_aux(inverted_magnitude(&n));
        }
    });
    output
}

/// Squared Sobel magnitude of the `aux` field at the window center.
pub fn sobel_magnitude_squared(n: &Neighborhood) -> u32 {
    let mut dx = 0i32;
    let mut dy = 0i32;
    for t in tap::TL..=tap::BR {
        let v = n.aux(t) as i32;
        dx += v * SOBEL_X[t];
        dy += v * SOBEL_Y[t];
    }
    (dx * dx + dy * dy) as u32
}

/// `0` above the 255 ceiling, otherwise `255 - round(sqrt(mag²))`.
#[inline]
pub fn inverted_magnitude(n: &Neighborhood) -> u8 {
    let squared = sobel_magnitude_squared(n);
    if squared > 255 * 255 {
        0
    } else {
        let magnitude = (squared as f64).sqrt().round() as u32;
        (255 - magnitude.min(255)) as u8
    }
}
