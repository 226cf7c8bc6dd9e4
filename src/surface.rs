use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use egui::{Color32, ColorImage};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::error::{FileError, FileResult};

/// Color the canvas starts with and the eraser restores
pub const BACKGROUND: Color32 = Color32::WHITE;

/// Size of a freshly created canvas
pub const DEFAULT_SIZE: [u32; 2] = [400, 400];

/// Integer pixel coordinate on the surface. May lie outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Half-open integer rectangle `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub min: PixelPos,
    pub max: PixelPos,
}

impl PixelRect {
    pub const NOTHING: Self = Self {
        min: PixelPos::new(0, 0),
        max: PixelPos::new(0, 0),
    };

    pub fn from_min_size(min: PixelPos, width: i32, height: i32) -> Self {
        Self {
            min,
            max: PixelPos::new(min.x.saturating_add(width), min.y.saturating_add(height)),
        }
    }

    pub fn width(&self) -> i32 {
        (self.max.x - self.min.x).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.max.y - self.min.y).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, pos: PixelPos) -> bool {
        pos.x >= self.min.x && pos.x < self.max.x && pos.y >= self.min.y && pos.y < self.max.y
    }

    pub fn intersect(&self, other: &Self) -> Self {
        let rect = Self {
            min: PixelPos::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: PixelPos::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if rect.is_empty() { Self::NOTHING } else { rect }
    }

    /// Smallest rectangle containing both. Empty rectangles are ignored.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: PixelPos::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: PixelPos::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), 255])
}

/// The bitmap being painted on
#[derive(Clone)]
pub struct Surface {
    buffer: RgbaImage,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE[0], DEFAULT_SIZE[1])
    }
}

impl Surface {
    /// Create a surface filled with the background color
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: RgbaImage::from_pixel(width, height, to_rgba(BACKGROUND)),
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::from_min_size(PixelPos::default(), self.width() as i32, self.height() as i32)
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn pixel(&self, pos: PixelPos) -> Option<Color32> {
        if !self.bounds().contains(pos) {
            return None;
        }
        let [r, g, b, a] = self.buffer.get_pixel(pos.x as u32, pos.y as u32).0;
        Some(Color32::from_rgba_unmultiplied(r, g, b, a))
    }

    /// Set one pixel. Positions outside the buffer are ignored.
    pub fn put_pixel(&mut self, pos: PixelPos, color: Color32) -> bool {
        if !self.bounds().contains(pos) {
            return false;
        }
        self.buffer.put_pixel(pos.x as u32, pos.y as u32, to_rgba(color));
        true
    }

    /// Fill a rectangle clipped to the buffer and return the region actually touched
    pub fn fill_rect(&mut self, rect: PixelRect, color: Color32) -> PixelRect {
        let clipped = rect.intersect(&self.bounds());
        let pixel = to_rgba(color);
        for y in clipped.min.y..clipped.max.y {
            for x in clipped.min.x..clipped.max.x {
                self.buffer.put_pixel(x as u32, y as u32, pixel);
            }
        }
        clipped
    }

    /// Replace every pixel with `fill`
    pub fn clear(&mut self, fill: Color32) {
        let pixel = to_rgba(fill);
        for p in self.buffer.pixels_mut() {
            *p = pixel;
        }
    }

    /// Stretch the current contents to the new dimensions.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if self.size() == [new_width, new_height] {
            return;
        }
        log::debug!(
            "Resizing surface {}x{} -> {}x{}",
            self.width(),
            self.height(),
            new_width,
            new_height
        );
        self.buffer = imageops::resize(&self.buffer, new_width, new_height, FilterType::Triangle);
    }

    /// Decode `path` and fit it into the current dimensions, keeping its aspect
    /// ratio. The image is centered and the uncovered border is background.
    pub fn load_from_file(&mut self, path: &Path) -> FileResult<()> {
        let decoded = image::open(path)
            .map_err(|source| FileError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        log::info!(
            "Decoded {} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height()
        );
        self.buffer = letterbox(&decoded, self.width(), self.height());
        Ok(())
    }

    /// Encode the buffer in the format implied by the extension of `path`.
    ///
    /// The encoded bytes go to a sibling temporary file that is renamed over
    /// `path`, so a failure never leaves a truncated image behind.
    pub fn save_to_file(&self, path: &Path) -> FileResult<()> {
        let encode_err = |reason: String| FileError::Encode {
            path: path.to_path_buf(),
            reason,
        };

        let format = ImageFormat::from_path(path).map_err(|e| encode_err(e.to_string()))?;
        let image = match format {
            ImageFormat::Jpeg | ImageFormat::Pnm => {
                DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(self.buffer.clone()).to_rgb8())
            }
            ImageFormat::OpenExr => {
                DynamicImage::ImageRgba32F(DynamicImage::ImageRgba8(self.buffer.clone()).to_rgba32f())
            }
            ImageFormat::Farbfeld => {
                DynamicImage::ImageRgba16(DynamicImage::ImageRgba8(self.buffer.clone()).to_rgba16())
            }
            _ => DynamicImage::ImageRgba8(self.buffer.clone()),
        };

        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, format)
            .map_err(|e| encode_err(e.to_string()))?;

        let partial = partial_path(path);
        if let Err(err) = fs::write(&partial, bytes.get_ref()) {
            let _ = fs::remove_file(&partial);
            return Err(encode_err(err.to_string()));
        }
        if let Err(err) = fs::rename(&partial, path) {
            let _ = fs::remove_file(&partial);
            return Err(encode_err(err.to_string()));
        }

        log::info!("Saved {} as {:?}", path.display(), format);
        Ok(())
    }

    /// Copy out a region for a partial texture upload
    pub fn region_image(&self, rect: PixelRect) -> Option<ColorImage> {
        let clipped = rect.intersect(&self.bounds());
        if clipped.is_empty() {
            return None;
        }
        let region = imageops::crop_imm(
            &self.buffer,
            clipped.min.x as u32,
            clipped.min.y as u32,
            clipped.width() as u32,
            clipped.height() as u32,
        )
        .to_image();
        Some(ColorImage::from_rgba_unmultiplied(
            [clipped.width() as usize, clipped.height() as usize],
            region.as_raw(),
        ))
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.buffer.as_raw(),
        )
    }
}

fn letterbox(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut target = RgbaImage::from_pixel(width, height, to_rgba(BACKGROUND));
    if source.width() == 0 || source.height() == 0 {
        return target;
    }

    let scale = f64::min(
        width as f64 / source.width() as f64,
        height as f64 / source.height() as f64,
    );
    let fit_w = ((source.width() as f64 * scale).round() as u32).clamp(1, width.max(1));
    let fit_h = ((source.height() as f64 * scale).round() as u32).clamp(1, height.max(1));

    let offset_x = (width - fit_w.min(width)) / 2;
    let offset_y = (height - fit_h.min(height)) / 2;

    if source.dimensions() == (fit_w, fit_h) {
        flatten_onto(&mut target, source, offset_x, offset_y);
    } else {
        let scaled = imageops::resize(source, fit_w, fit_h, FilterType::Triangle);
        flatten_onto(&mut target, &scaled, offset_x, offset_y);
    }
    target
}

/// Composite `top` over the opaque `bottom`. Opaque pixels are copied exactly.
fn flatten_onto(bottom: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (tx, ty, pixel) in top.enumerate_pixels() {
        let (bx, by) = (x + tx, y + ty);
        if bx >= bottom.width() || by >= bottom.height() {
            continue;
        }
        let [r, g, b, a] = pixel.0;
        let out = if a == 255 {
            Rgba([r, g, b, 255])
        } else {
            let under = bottom.get_pixel(bx, by).0;
            let mix = |fg: u8, bg: u8| -> u8 {
                ((fg as u32 * a as u32 + bg as u32 * (255 - a as u32) + 127) / 255) as u8
            };
            Rgba([mix(r, under[0]), mix(g, under[1]), mix(b, under[2]), 255])
        };
        bottom.put_pixel(bx, by, out);
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_background() {
        let surface = Surface::new(8, 6);
        assert_eq!(surface.size(), [8, 6]);
        assert_eq!(surface.pixel(PixelPos::new(7, 5)), Some(BACKGROUND));
        assert_eq!(surface.pixel(PixelPos::new(8, 0)), None);
    }

    #[test]
    fn test_put_pixel_clips() {
        let mut surface = Surface::new(4, 4);
        assert!(surface.put_pixel(PixelPos::new(1, 2), Color32::RED));
        assert!(!surface.put_pixel(PixelPos::new(-1, 2), Color32::RED));
        assert!(!surface.put_pixel(PixelPos::new(1, 4), Color32::RED));
        assert_eq!(surface.pixel(PixelPos::new(1, 2)), Some(Color32::RED));
    }

    #[test]
    fn test_fill_rect_reports_clipped_region() {
        let mut surface = Surface::new(10, 10);
        let touched = surface.fill_rect(
            PixelRect::from_min_size(PixelPos::new(8, -2), 5, 5),
            Color32::BLACK,
        );
        assert_eq!(touched.min, PixelPos::new(8, 0));
        assert_eq!(touched.max, PixelPos::new(10, 3));
        assert_eq!(surface.pixel(PixelPos::new(9, 2)), Some(Color32::BLACK));
        assert_eq!(surface.pixel(PixelPos::new(7, 2)), Some(BACKGROUND));
    }

    #[test]
    fn test_resize_dimensions() {
        let mut surface = Surface::new(40, 30);
        surface.resize(13, 77);
        assert_eq!(surface.size(), [13, 77]);
        surface.resize(40, 30);
        assert_eq!(surface.size(), [40, 30]);
    }

    #[test]
    fn test_resize_stretches_content() {
        let mut surface = Surface::new(10, 10);
        surface.clear(Color32::BLACK);
        surface.resize(20, 5);
        assert_eq!(surface.pixel(PixelPos::new(10, 2)), Some(Color32::BLACK));
    }

    #[test]
    fn test_clear() {
        let mut surface = Surface::new(3, 3);
        surface.clear(Color32::GREEN);
        assert!(surface.buffer().pixels().all(|p| p.0 == [0, 255, 0, 255]));
    }

    #[test]
    fn test_letterbox_wide_image() {
        let source = RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 255]));
        let boxed = letterbox(&source, 10, 10);
        assert_eq!(boxed.dimensions(), (10, 10));
        // 10x5 band centered vertically
        assert_eq!(boxed.get_pixel(5, 0).0, [255, 255, 255, 255]);
        assert_eq!(boxed.get_pixel(5, 5).0, [0, 0, 0, 255]);
        assert_eq!(boxed.get_pixel(5, 9).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_flatten_blends_translucent_pixels() {
        let mut bottom = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        let mut top = RgbaImage::new(2, 1);
        top.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        top.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        flatten_onto(&mut bottom, &top, 0, 0);
        assert_eq!(bottom.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(bottom.get_pixel(1, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_region_image() {
        let surface = Surface::new(10, 10);
        let region = surface
            .region_image(PixelRect::from_min_size(PixelPos::new(8, 8), 4, 4))
            .unwrap();
        assert_eq!(region.size, [2, 2]);
        assert!(surface.region_image(PixelRect::NOTHING).is_none());
    }

    #[test]
    fn test_rect_union_ignores_empty() {
        let a = PixelRect::from_min_size(PixelPos::new(1, 1), 2, 2);
        assert_eq!(a.union(&PixelRect::NOTHING), a);
        let b = PixelRect::from_min_size(PixelPos::new(5, 0), 1, 1);
        let u = a.union(&b);
        assert_eq!(u.min, PixelPos::new(1, 0));
        assert_eq!(u.max, PixelPos::new(6, 3));
    }

    #[test]
    fn test_partial_path_is_hidden_sibling() {
        let p = partial_path(Path::new("/tmp/drawing.png"));
        assert_eq!(p, PathBuf::from("/tmp/.drawing.png.partial"));
    }
}
