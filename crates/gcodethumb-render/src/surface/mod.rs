//! Drawing surfaces
//!
//! [`DrawingSurface`] follows 2D canvas path semantics: `begin_path` starts
//! a new path, `stroke` paints the current path and keeps it.

mod pixmap;
mod recording;

pub use pixmap::PixmapSurface;
pub use recording::{DrawCommand, RecordingSurface};

use crate::color::Color;
use crate::mapper::PixelPoint;

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole area of `surface`
    pub fn covering<S: DrawingSurface + ?Sized>(surface: &S) -> Self {
        Self::new(0, 0, surface.width(), surface.height())
    }
}

/// Raster target for toolpath drawing
pub trait DrawingSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Reset the pixels of `rect` to fully transparent
    fn clear_rect(&mut self, rect: PixelRect);
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: PixelPoint);
    fn line_to(&mut self, p: PixelPoint);
    fn bezier_curve_to(&mut self, c1: PixelPoint, c2: PixelPoint, to: PixelPoint);

    /// Stroke the current path
    fn stroke(&mut self, color: Color, width: f32);
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn clear_rect(&mut self, rect: PixelRect) {
        (**self).clear_rect(rect)
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        (**self).fill_rect(rect, color)
    }

    fn begin_path(&mut self) {
        (**self).begin_path()
    }

    fn move_to(&mut self, p: PixelPoint) {
        (**self).move_to(p)
    }

    fn line_to(&mut self, p: PixelPoint) {
        (**self).line_to(p)
    }

    fn bezier_curve_to(&mut self, c1: PixelPoint, c2: PixelPoint, to: PixelPoint) {
        (**self).bezier_curve_to(c1, c2, to)
    }

    fn stroke(&mut self, color: Color, width: f32) {
        (**self).stroke(color, width)
    }
}
