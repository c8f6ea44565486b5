//! Fit-to-surface scale computation

use gcodethumb_core::{BoundingBox, Point};

/// Uniform scale factor that fits `bbox` inside a `width` x `height` surface.
///
/// An axis with zero extent divides to +inf and drops out of the `min`.
/// Both axes empty yields +inf; callers check
/// [`BoundingBox::is_degenerate`] first.
pub fn fit_ratio(bbox: &BoundingBox, width: u32, height: u32) -> f64 {
    let ratio_x = f64::from(width) / bbox.width();
    let ratio_y = f64::from(height) / bbox.height();
    ratio_x.min(ratio_y)
}

/// Everything needed to map model points into one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    pub ratio: f64,
    pub origin: Point,
    pub pixel_height: f64,
}

impl ScaleContext {
    pub fn new(ratio: f64, origin: Point, pixel_height: f64) -> Self {
        Self {
            ratio,
            origin,
            pixel_height,
        }
    }

    /// Scale context for drawing `bbox` on a `width` x `height` surface
    pub fn fit(bbox: &BoundingBox, width: u32, height: u32) -> Self {
        Self {
            ratio: fit_ratio(bbox, width, height),
            origin: bbox.min,
            pixel_height: f64::from(height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_limited_ratio() {
        let bbox = BoundingBox::new(Point::ORIGIN, Point::xy(2.0, 1.73205));
        let ratio = fit_ratio(&bbox, 250, 200);
        assert!((ratio - 200.0 / 1.73205).abs() < 1e-9);
    }

    #[test]
    fn test_width_limited_ratio() {
        let bbox = BoundingBox::new(Point::xy(-5.0, 0.0), Point::xy(5.0, 1.0));
        assert_eq!(fit_ratio(&bbox, 100, 100), 10.0);
    }

    #[test]
    fn test_flat_axis_drops_out() {
        let horizontal = BoundingBox::new(Point::xy(0.0, 3.0), Point::xy(4.0, 3.0));
        assert_eq!(fit_ratio(&horizontal, 100, 50), 25.0);

        let vertical = BoundingBox::new(Point::xy(1.0, 0.0), Point::xy(1.0, 10.0));
        assert_eq!(fit_ratio(&vertical, 100, 50), 5.0);
    }

    #[test]
    fn test_fit_uses_min_corner() {
        let bbox = BoundingBox::new(Point::new(-1.0, -2.0, -3.0), Point::new(1.0, 2.0, 0.0));
        let ctx = ScaleContext::fit(&bbox, 40, 80);
        assert_eq!(ctx.origin, bbox.min);
        assert_eq!(ctx.pixel_height, 80.0);
        assert_eq!(ctx.ratio, 20.0);
    }
}
