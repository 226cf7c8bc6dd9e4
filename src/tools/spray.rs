//! Gaussian scatter used by the spray paint tool.
//!
//! A spray of width `w` stamps `2w` single pixels around the pointer. Offsets
//! are drawn from N(0, 2w) horizontally and N(0, w) vertically, which gives
//! the tool its wide, flat footprint.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::surface::PixelPos;

/// Number of pixels stamped per pointer event
pub fn particle_count(width: u32) -> u32 {
    width * 2
}

/// Standard deviations `(horizontal, vertical)` for a given width
pub fn deviations(width: u32) -> (f64, f64) {
    (2.0 * width as f64, width as f64)
}

/// Draw one rounded offset
pub fn sample_offset<R: Rng + ?Sized>(width: u32, rng: &mut R) -> (i32, i32) {
    let (sigma_x, sigma_y) = deviations(width);
    let zx: f64 = StandardNormal.sample(rng);
    let zy: f64 = StandardNormal.sample(rng);
    ((zx * sigma_x).round() as i32, (zy * sigma_y).round() as i32)
}

/// Positions of every particle for one spray event centered on `center`
pub fn scatter<R: Rng + ?Sized>(center: PixelPos, width: u32, rng: &mut R) -> Vec<PixelPos> {
    (0..particle_count(width))
        .map(|_| {
            let (dx, dy) = sample_offset(width, rng);
            PixelPos::new(center.x.saturating_add(dx), center.y.saturating_add(dy))
        })
        .collect()
}
