//! CPU drawing surface for a render pass.
//!
//! All drawing calls take offsets relative to the canvas center, matching the
//! projector's output; the translation to image pixels happens here once.

use crate::{
    constants::{ERROR_BACKGROUND, ERROR_INDICATOR},
    core::geo::Point,
    Result,
};
use image::{Pixel, Rgba, RgbaImage};
use std::path::Path;

/// Half-width of the error cross, in pixels.
const ERROR_STROKE: f64 = 6.0;

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Opaque black surface of `width`x`height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Image position of the drawing origin (the visual center).
    pub fn origin(&self) -> Point {
        Point::new(self.width() as f64 / 2.0, self.height() as f64 / 2.0)
    }

    /// Converts a center-relative offset to image pixel coordinates.
    pub fn to_pixel(&self, offset: Point) -> Point {
        offset.add(&self.origin())
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    fn blend_at(&mut self, x: u32, y: u32, color: [u8; 4]) {
        self.image.get_pixel_mut(x, y).blend(&Rgba(color));
    }

    /// Draws `img` centered on the origin, scaled by `opacity`.
    pub fn draw_image_centered(&mut self, img: &RgbaImage, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        let left = (self.width() as i64 - img.width() as i64) / 2;
        let top = (self.height() as i64 - img.height() as i64) / 2;

        for (sx, sy, src) in img.enumerate_pixels() {
            let x = left + sx as i64;
            let y = top + sy as i64;
            if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
                continue;
            }
            let mut color = src.0;
            color[3] = (color[3] as f32 * opacity).round() as u8;
            self.blend_at(x as u32, y as u32, color);
        }
    }

    /// Fills a circle of `diameter` around the center-relative `center`.
    ///
    /// The optional stroke is a one pixel ring on the edge, blended over the fill.
    pub fn fill_circle(&mut self, center: Point, diameter: f64, fill: [u8; 4], stroke: Option<[u8; 4]>) {
        if !diameter.is_finite() || diameter < 0.0 {
            return;
        }
        let radius = diameter / 2.0;
        let reach = radius + 1.0;
        let c = self.to_pixel(center);
        if !c.x.is_finite() || !c.y.is_finite() {
            return;
        }

        let x0 = (c.x - reach).floor().max(0.0);
        let y0 = (c.y - reach).floor().max(0.0);
        let x1 = (c.x + reach).ceil().min(self.width() as f64);
        let y1 = (c.y + reach).ceil().min(self.height() as f64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let d = Point::new(x as f64 + 0.5, y as f64 + 0.5).distance_to(&c);
                if d <= radius {
                    self.blend_at(x, y, fill);
                }
                if let Some(stroke) = stroke {
                    if (d - radius).abs() <= 0.5 {
                        self.blend_at(x, y, stroke);
                    }
                }
            }
        }
    }

    /// Replaces the contents with a dark frame crossed out in red.
    pub fn draw_error_indicator(&mut self) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        let diagonal = (w * w + h * h).sqrt();

        for (x, y, px) in self.image.enumerate_pixels_mut() {
            let (px_x, px_y) = (x as f64 + 0.5, y as f64 + 0.5);
            let to_main = (px_x * h - px_y * w).abs() / diagonal;
            let to_anti = (px_x * h + px_y * w - w * h).abs() / diagonal;
            *px = if to_main <= ERROR_STROKE || to_anti <= ERROR_STROKE {
                Rgba(ERROR_INDICATOR)
            } else {
                Rgba(ERROR_BACKGROUND)
            };
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}
