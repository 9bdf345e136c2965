//! CPU rasterizer for display lists
//!
//! Frames are in logical units; the output image is in physical pixels
//! (`viewport.dpr` per unit). Coverage is sampled at pixel centers and
//! colors are blended source-over.

use crate::frame::{DrawCommand, Frame};
use image::{Rgba, RgbaImage};
use std::path::Path;
use tinder_core::{Color, Rect, Result, TinderError, Vec2};

/// Rasterize `frame` into a new image at its physical size
pub fn rasterize(frame: &Frame) -> RgbaImage {
    let (w, h) = frame.viewport.physical_size();
    let mut image = RgbaImage::new(w.max(1), h.max(1));
    rasterize_into(frame, &mut image);
    image
}

/// Rasterize into an existing image, reusing its allocation
pub fn rasterize_into(frame: &Frame, image: &mut RgbaImage) {
    let mut canvas = Canvas {
        image,
        scale: frame.viewport.dpr,
    };
    for item in frame.items() {
        match &item.command {
            DrawCommand::Clear(color) => canvas.clear(*color),
            DrawCommand::Gradient { rect, top, bottom } => canvas.gradient(rect, top, bottom),
            DrawCommand::FillRect { rect, color } => canvas.fill_rect(rect, *color),
            DrawCommand::FillPolygon { points, color } => canvas.fill_polygon(points, *color),
            DrawCommand::FillEllipse {
                center,
                radii,
                color,
            } => canvas.fill_ellipse(*center, *radii, *color),
        }
    }
}

/// Encode an image as PNG at `path`
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| TinderError::Render(format!("Failed to save {}: {}", path.display(), e)))?;
    tracing::info!("wrote {}x{} screenshot to {}", image.width(), image.height(), path.display());
    Ok(())
}

struct Canvas<'a> {
    image: &'a mut RgbaImage,
    scale: f32,
}

impl Canvas<'_> {
    fn clear(&mut self, color: Color) {
        let px = Rgba(color.to_rgba8());
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    /// Pixel range `[start, end)` covering logical `[lo, hi)` along an axis
    fn span(&self, lo: f32, hi: f32, limit: u32) -> (u32, u32) {
        let start = (lo * self.scale).round().clamp(0.0, limit as f32) as u32;
        let end = (hi * self.scale).round().clamp(0.0, limit as f32) as u32;
        (start, end)
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        if color.a <= 0.0 {
            return;
        }
        let (x0, x1) = self.span(rect.x, rect.right(), self.image.width());
        let (y0, y1) = self.span(rect.y, rect.bottom(), self.image.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    fn gradient(&mut self, rect: &Rect, top: &Color, bottom: &Color) {
        let (x0, x1) = self.span(rect.x, rect.right(), self.image.width());
        let (y0, y1) = self.span(rect.y, rect.bottom(), self.image.height());
        let rows = (y1 - y0).max(1) as f32;
        for y in y0..y1 {
            let t = (y - y0) as f32 / rows;
            let color = top.lerp(bottom, t);
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    /// Even-odd scanline fill
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 || color.a <= 0.0 {
            return;
        }
        let s = self.scale;
        let min_y = points.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        let (y0, y1) = self.span(min_y, max_y, self.image.height());
        let width = self.image.width();

        let mut crossings = Vec::with_capacity(8);
        for py in y0..y1 {
            let sy = (py as f32 + 0.5) / s;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = &points[(i + 1) % points.len()];
                if (a.y <= sy) != (b.y <= sy) {
                    let t = (sy - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let (x0, x1) = self.span(pair[0], pair[1], width);
                for px in x0..x1 {
                    self.blend(px, py, color);
                }
            }
        }
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        if radii.x <= 0.0 || radii.y <= 0.0 || color.a <= 0.0 {
            return;
        }
        let s = self.scale;
        let (x0, x1) = self.span(center.x - radii.x, center.x + radii.x, self.image.width());
        let (y0, y1) = self.span(center.y - radii.y, center.y + radii.y, self.image.height());
        for py in y0..y1 {
            let dy = ((py as f32 + 0.5) / s - center.y) / radii.y;
            for px in x0..x1 {
                let dx = ((px as f32 + 0.5) / s - center.x) / radii.x;
                if dx * dx + dy * dy <= 1.0 {
                    self.blend(px, py, color);
                }
            }
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: Color) {
        let dst = self.image.get_pixel_mut(x, y);
        let a = color.a.clamp(0.0, 1.0);
        if a >= 1.0 {
            *dst = Rgba(color.to_rgba8());
            return;
        }
        let src = [color.r, color.g, color.b];
        for (c, s) in dst.0.iter_mut().take(3).zip(src) {
            let d = *c as f32 / 255.0;
            *c = ((s * a + d * (1.0 - a)).clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        let da = dst.0[3] as f32 / 255.0;
        dst.0[3] = ((a + da * (1.0 - a)).clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Layer;
    use tinder_core::Viewport;

    fn frame(w: f32, h: f32, dpr: f32) -> Frame {
        Frame::new(Viewport::new(w, h, dpr))
    }

    #[test]
    fn test_image_is_physical_size() {
        let img = rasterize(&frame(100.0, 50.0, 2.0));
        assert_eq!(img.dimensions(), (200, 100));
    }

    #[test]
    fn test_rect_fill_and_clip() {
        let mut f = frame(10.0, 10.0, 1.0);
        f.push(Layer::Background, DrawCommand::Clear(Color::BLACK));
        f.fill_rect(Layer::Player, Rect::new(8.0, 8.0, 5.0, 5.0), Color::WHITE);
        let img = rasterize(&f);
        assert_eq!(img.get_pixel(9, 9).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(7, 7).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_alpha_blend() {
        let mut f = frame(4.0, 4.0, 1.0);
        f.push(Layer::Background, DrawCommand::Clear(Color::BLACK));
        f.fill_rect(
            Layer::Player,
            Rect::new(0.0, 0.0, 4.0, 4.0),
            Color::WHITE.with_alpha(0.5),
        );
        let px = rasterize(&f).get_pixel(1, 1).0;
        assert!((127..=128).contains(&px[0]));
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_gradient_runs_top_to_bottom() {
        let mut f = frame(2.0, 10.0, 1.0);
        f.push(
            Layer::Background,
            DrawCommand::Gradient {
                rect: Rect::new(0.0, 0.0, 2.0, 10.0),
                top: Color::BLACK,
                bottom: Color::WHITE,
            },
        );
        let img = rasterize(&f);
        assert_eq!(img.get_pixel(0, 0).0[0], 0);
        assert!(img.get_pixel(0, 9).0[0] > 200);
    }

    #[test]
    fn test_triangle_fill() {
        let mut f = frame(10.0, 10.0, 1.0);
        f.push(Layer::Background, DrawCommand::Clear(Color::BLACK));
        f.fill_polygon(
            Layer::Background,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(0.0, 10.0),
            ],
            Color::WHITE,
        );
        let img = rasterize(&f);
        assert_eq!(img.get_pixel(1, 1).0[0], 255);
        assert_eq!(img.get_pixel(8, 8).0[0], 0);
    }

    #[test]
    fn test_ellipse_fill() {
        let mut f = frame(20.0, 20.0, 1.0);
        f.push(Layer::Background, DrawCommand::Clear(Color::BLACK));
        f.fill_ellipse(
            Layer::Collectibles,
            Vec2::new(10.0, 10.0),
            Vec2::new(5.0, 5.0),
            Color::WHITE,
        );
        let img = rasterize(&f);
        assert_eq!(img.get_pixel(10, 10).0[0], 255);
        assert_eq!(img.get_pixel(5, 5).0[0], 0);
        assert_eq!(img.get_pixel(1, 1).0[0], 0);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        let img = rasterize(&frame(8.0, 8.0, 1.0));
        save_png(&img, &path).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!(loaded.width(), 8);
    }
}
