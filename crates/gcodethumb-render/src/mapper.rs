//! Model space to pixel space mapping.
//!
//! Pixel X grows right from the box's minimum X. Pixel Y is flipped so
//! that larger model Y moves up the image.

use crate::scale::ScaleContext;
use gcodethumb_core::Point;

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Convert f64 to i32, clamping to valid range and handling non-finite values
fn safe_to_i32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    value.clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

#[inline]
pub fn map_x(ctx: &ScaleContext, x: f64) -> i32 {
    safe_to_i32((ctx.ratio * (x - ctx.origin.x)).round())
}

#[inline]
pub fn map_y(ctx: &ScaleContext, y: f64) -> i32 {
    safe_to_i32((ctx.pixel_height - ctx.ratio * (y - ctx.origin.y)).round())
}

/// Map a model point to the nearest pixel. Z is ignored.
pub fn map_point(ctx: &ScaleContext, p: &Point) -> PixelPoint {
    PixelPoint::new(map_x(ctx, p.x), map_y(ctx, p.y))
}

impl ScaleContext {
    pub fn to_pixel(&self, p: &Point) -> PixelPoint {
        map_point(self, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_ctx() -> ScaleContext {
        ScaleContext::new(200.0 / 1.73205, Point::ORIGIN, 200.0)
    }

    #[test]
    fn test_triangle_corners() {
        let ctx = triangle_ctx();
        assert_eq!(map_point(&ctx, &Point::xy(0.0, 0.0)), PixelPoint::new(0, 200));
        assert_eq!(map_point(&ctx, &Point::xy(2.0, 0.0)), PixelPoint::new(231, 200));
        assert_eq!(map_point(&ctx, &Point::xy(1.0, 1.73205)), PixelPoint::new(115, 0));
    }

    #[test]
    fn test_origin_offset() {
        let ctx = ScaleContext::new(10.0, Point::xy(-3.0, 5.0), 100.0);
        assert_eq!(map_point(&ctx, &Point::xy(-3.0, 5.0)), PixelPoint::new(0, 100));
        assert_eq!(map_point(&ctx, &Point::xy(0.0, 7.5)), PixelPoint::new(30, 75));
    }

    #[test]
    fn test_z_ignored() {
        let ctx = triangle_ctx();
        assert_eq!(
            ctx.to_pixel(&Point::new(1.0, 1.0, -4.0)),
            ctx.to_pixel(&Point::xy(1.0, 1.0))
        );
    }

    #[test]
    fn test_non_finite_and_huge_values() {
        assert_eq!(safe_to_i32(f64::NAN), 0);
        assert_eq!(safe_to_i32(f64::INFINITY), 0);
        assert_eq!(safe_to_i32(1e20), i32::MAX);
        assert_eq!(safe_to_i32(-1e20), i32::MIN);

        let ctx = ScaleContext::new(f64::INFINITY, Point::ORIGIN, 10.0);
        assert_eq!(map_x(&ctx, 1.0), 0);
    }
}
