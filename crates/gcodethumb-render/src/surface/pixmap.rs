//! tiny-skia backed surface

use super::{DrawingSurface, PixelRect};
use crate::color::Color;
use crate::error::SurfaceError;
use crate::mapper::PixelPoint;
use std::fmt;
use tiny_skia::{BlendMode, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

/// Raster surface over a tiny-skia [`Pixmap`]
///
/// Starts fully transparent. Strokes are anti-aliased with butt caps.
#[derive(Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
    path: PathBuilder,
}

impl fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish_non_exhaustive()
    }
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        Ok(Self {
            pixmap,
            path: PathBuilder::new(),
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Straight-alpha color at (x, y), `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        // tiny-skia indexes y * width + x without checking x
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Color::rgba(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    /// Row-major straight-alpha RGBA8 bytes
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    fn paint_rect(&mut self, rect: PixelRect, paint: &Paint) {
        let Some(r) = Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return;
        };
        self.pixmap.fill_rect(r, paint, Transform::identity(), None);
    }
}

impl DrawingSurface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear_rect(&mut self, rect: PixelRect) {
        let mut paint = Paint::default();
        paint.set_color(Color::TRANSPARENT.into());
        paint.blend_mode = BlendMode::Source;
        paint.anti_alias = false;
        self.paint_rect(rect, &paint);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let mut paint = Paint::default();
        paint.set_color(color.into());
        paint.anti_alias = false;
        self.paint_rect(rect, &paint);
    }

    fn begin_path(&mut self) {
        self.path = PathBuilder::new();
    }

    fn move_to(&mut self, p: PixelPoint) {
        self.path.move_to(p.x as f32, p.y as f32);
    }

    fn line_to(&mut self, p: PixelPoint) {
        self.path.line_to(p.x as f32, p.y as f32);
    }

    fn bezier_curve_to(&mut self, c1: PixelPoint, c2: PixelPoint, to: PixelPoint) {
        self.path.cubic_to(
            c1.x as f32,
            c1.y as f32,
            c2.x as f32,
            c2.y as f32,
            to.x as f32,
            to.y as f32,
        );
    }

    fn stroke(&mut self, color: Color, width: f32) {
        // An empty or single-point path has nothing to stroke.
        let Some(path) = self.path.clone().finish() else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color.into());
        paint.anti_alias = true;
        let stroke = Stroke {
            width,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}
