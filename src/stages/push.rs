//! Directional push kernels.
//!
//! Each output pixel looks at its 3×3 neighborhood in the input buffer and
//! tests four kernel pairs, one per axis (horizontal, two diagonals,
//! vertical). A kernel passes when every sample of its "light" triple is
//! brighter (by `aux`) than every sample of its "dark" triple; the pixel is
//! then blended toward the average of the light triple.
//!
//! ```text
//!   [tl] [tc] [tr]
//!   [ml] [mc] [mr]
//!   [bl] [bc] [br]
//! ```
//!
//! The same evaluator drives both push stages. They differ only in
//! [`PushMode`] and whether `aux` is reset afterwards.

use crate::buffer::{tap, Neighborhood, PixelBuffer};
use crate::pixel::Pixel;
use crate::strength::Strength;
use rayon::prelude::*;

/// How passing kernels combine into the output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushMode {
    /// Keep the candidate with the highest resulting `aux`. Ties keep the
    /// earlier candidate; the unmodified center starts as the best.
    BrightestPick,
    /// Every passing kernel overwrites the working pixel; last one wins.
    AlwaysAverage,
}

/// One directional test: blend toward `light` if it dominates `dark`.
#[derive(Debug, Clone, Copy)]
struct Kernel {
    light: [usize; 3],
    dark: [usize; 3],
}

/// A kernel and its mirror along the same axis.
///
/// The mirror is only tried when the primary kernel fails. `guard_center`
/// additionally requires the light side to be brighter than the center
/// pixel; only the horizontal and vertical pairs carry it.
#[derive(Debug, Clone, Copy)]
struct KernelPair {
    primary: Kernel,
    mirrored: Kernel,
    guard_center: bool,
}

const KERNEL_PAIRS: [KernelPair; 4] = [
    // 0 / 4: top against bottom
    KernelPair {
        primary: Kernel { light: [tap::TL, tap::TC, tap::TR], dark: [tap::BR, tap::BC, tap::BL] },
        mirrored: Kernel { light: [tap::BR, tap::BC, tap::BL], dark: [tap::TL, tap::TC, tap::TR] },
        guard_center: true,
    },
    // 1 / 5: top-right corner against bottom-left corner
    KernelPair {
        primary: Kernel { light: [tap::MR, tap::TC, tap::TR], dark: [tap::MC, tap::ML, tap::BC] },
        mirrored: Kernel { light: [tap::BL, tap::ML, tap::BC], dark: [tap::MC, tap::MR, tap::TC] },
        guard_center: false,
    },
    // 2 / 6: right against left
    KernelPair {
        primary: Kernel { light: [tap::MR, tap::BR, tap::TR], dark: [tap::ML, tap::TL, tap::BL] },
        mirrored: Kernel { light: [tap::ML, tap::TL, tap::BL], dark: [tap::MR, tap::BR, tap::TR] },
        guard_center: true,
    },
    // 3 / 7: bottom-right corner against top-left corner
    KernelPair {
        primary: Kernel { light: [tap::MR, tap::BR, tap::BC], dark: [tap::MC, tap::ML, tap::TC] },
        mirrored: Kernel { light: [tap::TC, tap::ML, tap::TL], dark: [tap::MC, tap::MR, tap::BC] },
        guard_center: false,
    },
];

impl Kernel {
    fn passes(&self, n: &Neighborhood, guard_center: bool) -> bool {
        let light_min = self.light.iter().map(|&t| n.aux(t)).min().unwrap_or(0);
        let dark_max = self.dark.iter().map(|&t| n.aux(t)).max().unwrap_or(255);
        light_min > dark_max && (!guard_center || light_min > n.center().aux)
    }

    fn blend(&self, n: &Neighborhood, strength: Strength) -> Pixel {
        let [a, b, c] = self.light.map(|t| n.at(t));
        blend(n.center(), a, b, c, strength)
    }
}

impl KernelPair {
    /// Blended candidate from whichever side of the pair passes, if any.
    fn evaluate(&self, n: &Neighborhood, strength: Strength) -> Option<Pixel> {
        [&self.primary, &self.mirrored]
            .into_iter()
            .find(|k| k.passes(n, self.guard_center))
            .map(|k| k.blend(n, strength))
    }
}

/// Move `center` toward the average of `a`, `b` and `c`.
///
/// Per channel, `avg = (a + b + c) / 3` and
/// `out = (center * (255 - s) + avg * s) / 255`, both truncating. Applied to
/// the color channels and to `aux`.
#[inline]
pub fn blend(center: Pixel, a: Pixel, b: Pixel, c: Pixel, strength: Strength) -> Pixel {
    let s = strength.get() as u32;
    let inv = strength.inverse();
    let mix = |cc: u8, x: u8, y: u8, z: u8| -> u8 {
        let avg = (x as u32 + y as u32 + z as u32) / 3;
        ((cc as u32 * inv + avg * s) / 255).min(255) as u8
    };
    Pixel {
        r: mix(center.r, a.r, b.r, c.r),
        g: mix(center.g, a.g, b.g, c.g),
        b: mix(center.b, a.b, b.b, c.b),
        aux: mix(center.aux, a.aux, b.aux, c.aux),
    }
}

/// Run all four kernel pairs on one neighborhood.
pub fn push_pixel(n: &Neighborhood, strength: Strength, mode: PushMode) -> Pixel {
    let mut current = n.center();
    for pair in &KERNEL_PAIRS {
        let Some(candidate) = pair.evaluate(n, strength) else {
            continue;
        };
        match mode {
            PushMode::BrightestPick => {
                if candidate.aux > current.aux {
                    current = candidate;
                }
            }
            PushMode::AlwaysAverage => current = candidate,
        }
    }
    current
}

/// Apply the push kernels to every pixel, reading only from `input`.
///
/// With `clear_aux` set, every output pixel leaves with an opaque `aux`.
pub fn push(input: &PixelBuffer, strength: Strength, mode: PushMode, clear_aux: bool) -> PixelBuffer {
    let mut output = input.clone_shape();
    output.par_rows_mut().enumerate().for_each(|(y, out_row)| {
        let (top, middle, bottom) = input.row_triple(y as u32);
        for (x, out) in out_row.iter_mut().enumerate() {
            let n = Neighborhood::from_rows(top, middle, bottom, x);
            let pushed = push_pixel(&n, strength, mode);
            *out = if clear_aux { pushed.with_aux(Pixel::OPAQUE_AUX) } else { pushed };
        }
    });
    output
}

/// Push colors toward brighter neighbors using luminance in `aux`.
///
/// The blended `aux` is carried forward for the gradient stage.
pub fn push_color(input: &PixelBuffer, strength: Strength) -> PixelBuffer {
    push(input, strength, PushMode::BrightestPick, false)
}

/// Push colors along the gradient stored in `aux`, then reset `aux`.
pub fn push_gradient(input: &PixelBuffer, strength: Strength) -> PixelBuffer {
    push(input, strength, PushMode::AlwaysAverage, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::compute_luminance;

    /// 3×3 buffer from aux values, color equal to aux in every channel.
    fn gray_grid(aux: [[u8; 3]; 3]) -> PixelBuffer {
        let pixels = aux.iter().flatten().map(|&v| Pixel::new(v, v, v, v)).collect();
        PixelBuffer::from_pixels(3, 3, pixels).unwrap()
    }

    #[test]
    fn test_blend_strength_zero_is_identity() {
        let cc = Pixel::new(10, 200, 30, 40);
        let w = Pixel::new(255, 255, 255, 255);
        assert_eq!(blend(cc, w, w, w, Strength::ZERO), cc);
    }

    #[test]
    fn test_blend_strength_max_is_average() {
        let cc = Pixel::new(10, 200, 30, 40);
        let a = Pixel::new(0, 10, 100, 1);
        let b = Pixel::new(3, 20, 100, 2);
        let c = Pixel::new(5, 31, 101, 3);
        // (0+3+5)/3 = 2, (10+20+31)/3 = 20, (100+100+101)/3 = 100, (1+2+3)/3 = 2
        assert_eq!(blend(cc, a, b, c, Strength::MAX), Pixel::new(2, 20, 100, 2));
    }

    #[test]
    fn test_blend_truncates() {
        let cc = Pixel::new(0, 0, 0, 0);
        let w = Pixel::new(255, 255, 255, 255);
        // 255 * 85 / 255 = 85
        assert_eq!(blend(cc, w, w, w, Strength::new(85)).r, 85);
        // avg (100 + 100 + 101) / 3 = 100; (50 * 155 + 100 * 100) / 255 = 69.6
        let a = Pixel::new(100, 0, 0, 0);
        let c = Pixel::new(101, 0, 0, 0);
        let center = Pixel::new(50, 0, 0, 0);
        assert_eq!(blend(center, a, a, c, Strength::new(100)).r, 69);
    }

    #[test]
    fn test_uniform_neighborhood_passes_nothing() {
        let buf = gray_grid([[128; 3]; 3]);
        let n = buf.neighborhood(1, 1);
        for pair in &KERNEL_PAIRS {
            assert!(pair.evaluate(&n, Strength::MAX).is_none());
        }
    }

    #[test]
    fn test_top_light_pushes_center() {
        let buf = gray_grid([[200, 200, 200], [50, 50, 50], [10, 10, 10]]);
        let n = buf.neighborhood(1, 1);
        let out = push_pixel(&n, Strength::MAX, PushMode::BrightestPick);
        assert_eq!(out, Pixel::new(200, 200, 200, 200));
    }

    #[test]
    fn test_center_guard_blocks_vertical_pair() {
        // top beats bottom but not the center, so pair 0/4 must not fire
        let buf = gray_grid([[100, 100, 100], [150, 150, 150], [10, 10, 10]]);
        let n = buf.neighborhood(1, 1);
        assert!(KERNEL_PAIRS[0].evaluate(&n, Strength::MAX).is_none());
        assert_eq!(push_pixel(&n, Strength::MAX, PushMode::AlwaysAverage), n.center());
    }

    #[test]
    fn test_diagonal_pair_counts_center_as_dark() {
        // mr, tc, tr = 100 beat mc, ml, bc
        let buf = gray_grid([[0, 100, 100], [0, 90, 100], [0, 0, 0]]);
        let n = buf.neighborhood(1, 1);
        let out = KERNEL_PAIRS[1].evaluate(&n, Strength::MAX);
        assert_eq!(out, Some(Pixel::new(100, 100, 100, 100)));

        // the center sits in the dark triple, so a bright center blocks the pair
        let buf = gray_grid([[0, 100, 100], [0, 200, 100], [0, 0, 0]]);
        let n = buf.neighborhood(1, 1);
        assert!(KERNEL_PAIRS[1].evaluate(&n, Strength::MAX).is_none());
    }

    #[test]
    fn test_mirrored_kernel() {
        // bottom is light, top is dark
        let buf = gray_grid([[10, 10, 10], [50, 50, 50], [200, 200, 200]]);
        let n = buf.neighborhood(1, 1);
        assert_eq!(KERNEL_PAIRS[0].evaluate(&n, Strength::MAX), Some(Pixel::new(200, 200, 200, 200)));
    }

    #[test]
    fn test_brightest_pick_keeps_highest_aux() {
        // pair 0/4 passes with aux 200, then pair 1/5 with (100 + 200 + 200) / 3
        let buf = gray_grid([[200, 200, 200], [0, 0, 100], [0, 0, 0]]);
        let n = buf.neighborhood(1, 1);
        assert_eq!(KERNEL_PAIRS[0].evaluate(&n, Strength::MAX).map(|p| p.aux), Some(200));
        assert_eq!(KERNEL_PAIRS[1].evaluate(&n, Strength::MAX).map(|p| p.aux), Some(166));
        assert!(KERNEL_PAIRS[2].evaluate(&n, Strength::MAX).is_none());
        assert!(KERNEL_PAIRS[3].evaluate(&n, Strength::MAX).is_none());

        let best = push_pixel(&n, Strength::MAX, PushMode::BrightestPick);
        assert_eq!(best, Pixel::new(200, 200, 200, 200));
    }

    #[test]
    fn test_always_average_last_pass_wins() {
        let buf = gray_grid([[200, 200, 200], [0, 0, 100], [0, 0, 0]]);
        let n = buf.neighborhood(1, 1);
        let out = push_pixel(&n, Strength::MAX, PushMode::AlwaysAverage);
        assert_eq!(out, Pixel::new(166, 166, 166, 166));
    }

    #[test]
    fn test_brightest_pick_tie_keeps_earlier() {
        let red = Pixel::new(255, 0, 0, 200);
        let blue = Pixel::new(0, 0, 255, 200);
        let dark = Pixel::new(0, 0, 0, 0);
        let pixels = vec![red, red, red, dark, dark, blue, dark, dark, dark];
        let buf = PixelBuffer::from_pixels(3, 3, pixels).unwrap();
        let n = buf.neighborhood(1, 1);

        // both candidates end at aux 200; the top-row one came first
        let best = push_pixel(&n, Strength::MAX, PushMode::BrightestPick);
        assert_eq!(best, Pixel::new(255, 0, 0, 200));

        let last = push_pixel(&n, Strength::MAX, PushMode::AlwaysAverage);
        assert_eq!(last, Pixel::new(170, 0, 85, 200));
    }

    #[test]
    fn test_push_color_strength_zero_keeps_color() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let v = (x * 60 + y * 5) as u8;
                buf.set(x, y, Pixel::rgb(v, 255 - v, v / 2));
            }
        }
        compute_luminance(&mut buf);

        let out = push_color(&buf, Strength::ZERO);
        assert_eq!(out, buf);
    }

    #[test]
    fn test_push_gradient_clears_aux() {
        let buf = gray_grid([[0, 30, 250], [70, 10, 200], [5, 90, 0]]);
        let out = push_gradient(&buf, Strength::new(128));
        assert_eq!(out.dimensions(), buf.dimensions());
        assert!(out.pixels().iter().all(|p| p.aux == 255));
    }

    #[test]
    fn test_uniform_gray_push_color_unchanged() {
        let mut buf = PixelBuffer::filled(3, 3, Pixel::rgb(128, 128, 128)).unwrap();
        compute_luminance(&mut buf);
        assert!(buf.pixels().iter().all(|p| p.aux == 128));

        for s in [0u8, 1, 128, 255] {
            let out = push_color(&buf, Strength::new(s));
            assert_eq!(out, buf);
        }
    }

    #[test]
    fn test_push_reads_only_input() {
        // Column 1 is pushed toward the bright column. Column 0 must not see
        // that result: it only ever compares against the untouched input.
        let buf = gray_grid([[0, 0, 240], [0, 0, 240], [0, 0, 240]]);
        let out = push_color(&buf, Strength::MAX);
        for y in 0..3 {
            assert_eq!(out.get(0, y), buf.get(0, y));
            assert_eq!(out.get(1, y), Pixel::new(240, 240, 240, 240));
            assert_eq!(out.get(2, y), buf.get(2, y));
        }
    }
}
