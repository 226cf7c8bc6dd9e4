use egui::Color32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::surface::{BACKGROUND, PixelPos, PixelRect, Surface};
use crate::tools::{ToolConfig, ToolKind, spray};

/// Turns pointer segments into pixels on a [`Surface`]
#[derive(Debug)]
pub struct StrokeRenderer<R = StdRng> {
    rng: R,
}

impl Default for StrokeRenderer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeRenderer<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Renderer with a fixed spray sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> StrokeRenderer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Apply one pointer segment and return the region that changed.
    ///
    /// The eraser flag wins over the tool kind. Spray and eraser only look at `to`.
    pub fn apply_stroke(
        &mut self,
        surface: &mut Surface,
        config: &ToolConfig,
        from: PixelPos,
        to: PixelPos,
    ) -> PixelRect {
        match (config.eraser_active, config.tool) {
            (true, _) | (_, ToolKind::Eraser) => erase_square(surface, to, config.eraser_size),
            (false, ToolKind::Pencil | ToolKind::Brush) => {
                draw_segment(surface, from, to, config.stroke_width, config.color)
            }
            (false, ToolKind::Spray) => self.spray(surface, to, config.stroke_width, config.color),
        }
    }

    fn spray(&mut self, surface: &mut Surface, center: PixelPos, width: u32, color: Color32) -> PixelRect {
        let mut damage = PixelRect::NOTHING;
        for point in spray::scatter(center, width, &mut self.rng) {
            if surface.put_pixel(point, color) {
                damage = damage.union(&PixelRect::from_min_size(point, 1, 1));
            }
        }
        damage
    }
}

/// Clear the `size`×`size` square whose top-left corner is `corner`
pub fn erase_square(surface: &mut Surface, corner: PixelPos, size: u32) -> PixelRect {
    let side = size.min(i32::MAX as u32) as i32;
    surface.fill_rect(PixelRect::from_min_size(corner, side, side), BACKGROUND)
}

/// Rasterize a round-capped line of `width` pixels from `from` to `to`.
///
/// Every pixel whose center lies within `width / 2` of the segment is painted,
/// so both endpoints are always covered and consecutive segments join cleanly.
pub fn draw_segment(
    surface: &mut Surface,
    from: PixelPos,
    to: PixelPos,
    width: u32,
    color: Color32,
) -> PixelRect {
    let radius = width.max(1) as f64 / 2.0;
    let reach = radius.ceil() as i32;

    let bbox = PixelRect {
        min: PixelPos::new(
            from.x.min(to.x).saturating_sub(reach),
            from.y.min(to.y).saturating_sub(reach),
        ),
        max: PixelPos::new(
            from.x.max(to.x).saturating_add(reach + 1),
            from.y.max(to.y).saturating_add(reach + 1),
        ),
    }
    .intersect(&surface.bounds());

    let mut damage = PixelRect::NOTHING;
    for y in bbox.min.y..bbox.max.y {
        for x in bbox.min.x..bbox.max.x {
            let p = PixelPos::new(x, y);
            if distance_to_segment(p, from, to) <= radius && surface.put_pixel(p, color) {
                damage = damage.union(&PixelRect::from_min_size(p, 1, 1));
            }
        }
    }
    damage
}

fn distance_to_segment(p: PixelPos, a: PixelPos, b: PixelPos) -> f64 {
    let (px, py) = (p.x as f64, p.y as f64);
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (dx, dy) = (b.x as f64 - ax, b.y as f64 - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}
